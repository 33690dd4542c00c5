// SPDX-License-Identifier: MIT

use std::io::{self, Write};

use crate::seq::record::SeqRecord;

// One header line, one sequence line, no wrapping. Downstream tools (alignment, tip-dating prep)
// all accept single-line sequences.
pub fn write_fasta<W: Write>(out: &mut W, records: &[SeqRecord]) -> io::Result<()> {
    for record in records {
        writeln!(out, ">{}", record.header)?;
        writeln!(out, "{}", record.sequence)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_fasta() {
        let records = vec![
            SeqRecord {
                header: String::from("seq1"),
                sequence: String::from("GAATTC"),
            },
            SeqRecord {
                header: String::from("seq2"),
                sequence: String::from("TTGCCGCGA"),
            },
        ];
        let mut out = Vec::new();
        write_fasta(&mut out, &records).expect("write failed");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ">seq1\nGAATTC\n>seq2\nTTGCCGCGA\n"
        );
    }

    #[test]
    fn test_write_fasta_empty_sequence() {
        // Best-effort parsing can produce a record with no sequence; it still gets both lines.
        let records = vec![SeqRecord {
            header: String::from("seq1"),
            sequence: String::new(),
        }];
        let mut out = Vec::new();
        write_fasta(&mut out, &records).expect("write failed");
        assert_eq!(String::from_utf8(out).unwrap(), ">seq1\n\n");
    }
}
