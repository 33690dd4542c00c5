// SPDX-License-Identifier: MIT

// Splits scanned records into unique ones (emitted in input order) and duplicate-defline groups
// (renamed and pushed to the end of the output).

use std::collections::HashSet;

use itertools::Itertools;
use log::debug;

use crate::seq::genbank::ScanOutcome;
use crate::seq::record::SeqRecord;

/// Output of duplicate resolution. `unique` preserves first-occurrence input order; `duplicates`
/// holds the renamed members of every duplicated-defline group, with byte-identical
/// (header, sequence) pairs collapsed and no guaranteed relative order.
#[derive(Debug)]
pub struct Resolution {
    pub unique: Vec<SeqRecord>,
    pub duplicates: Vec<SeqRecord>,
}

impl Resolution {
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// Walk the deflines in first-seen order. A defline filed with exactly one sequence is emitted
/// as-is; a defline filed k > 1 times defers all k sequences, renamed `<defline>_dup1` ..
/// `<defline>_dupk` in the order the records appeared.
pub fn resolve_duplicates(outcome: ScanOutcome) -> Resolution {
    let mut unique = Vec::new();
    let mut deferred: HashSet<(String, String)> = HashSet::new();

    for defline in outcome.order.iter().unique() {
        // Every defline in the order list was committed together with its sequence, so the
        // lookup cannot miss unless the scanner is broken.
        let seqs = outcome
            .sequences
            .get(defline)
            .expect("defline in order list but not in sequence map");
        if seqs.len() > 1 {
            debug!("defline {:?} duplicated {} times", defline, seqs.len());
            for (k, seq) in seqs.iter().enumerate() {
                deferred.insert((format!("{}_dup{}", defline, k + 1), seq.clone()));
            }
        } else {
            unique.push(SeqRecord {
                header: defline.clone(),
                sequence: seqs[0].clone(),
            });
        }
    }

    let duplicates = deferred
        .into_iter()
        .map(|(header, sequence)| SeqRecord { header, sequence })
        .collect();

    Resolution { unique, duplicates }
}
