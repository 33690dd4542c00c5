// SPDX-License-Identifier: MIT

use std::{
    fs::File,
    io::{stdout, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use log::info;

use crate::dates::rewrite_decimal_dates;
use crate::errors::SeqPrepError;
use crate::seq::dedup::resolve_duplicates;
use crate::seq::fasta::write_fasta;
use crate::seq::genbank::{scan_genbank, FieldSelector};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a GenBank flat file to FASTA
    #[command(name = "genbank2fasta")]
    #[command(alias = "g2f")]
    Genbank2Fasta {
        /// GenBank input file
        gb_fname: PathBuf,

        /// Metadata field supplying the defline
        #[arg(short = 'd', long = "defline-source", default_value_t = FieldSelector::Title,
            help = "Defline source field [locus|definition|title] (or just l|d|t); default: title",
            hide_default_value = true,
            hide_possible_values = true,
        )]
        defline_source: FieldSelector,
    },

    /// Rewrite FASTA headers to the decimal-date form used by BEAST
    #[command(name = "decimal-date")]
    #[command(alias = "dd")]
    DecimalDate {
        /// Output FASTA file
        out_fname: PathBuf,

        /// Input FASTA file(s)
        #[arg(required = true)]
        fasta_fnames: Vec<PathBuf>,
    },
}

pub fn run() -> Result<(), SeqPrepError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Genbank2Fasta {
            gb_fname,
            defline_source,
        } => genbank2fasta(&gb_fname, defline_source),
        Command::DecimalDate {
            out_fname,
            fasta_fnames,
        } => decimal_date(&out_fname, &fasta_fnames),
    }
}

// Unique deflines come out first, in input order; duplicated ones are renamed and appended, with
// a single warning on stderr. Output order within the duplicate block is not guaranteed.
fn genbank2fasta(gb_fname: &Path, defline_source: FieldSelector) -> Result<(), SeqPrepError> {
    info!(
        "converting {} (defline source: {})",
        gb_fname.display(),
        defline_source
    );
    let input = BufReader::new(File::open(gb_fname)?);
    let resolution = resolve_duplicates(scan_genbank(input, defline_source)?);

    let stdout = stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_fasta(&mut out, &resolution.unique)?;
    if resolution.has_duplicates() {
        eprintln!("WARNING: deflines are duplicated in the input file");
        write_fasta(&mut out, &resolution.duplicates)?;
    }
    out.flush()?;

    Ok(())
}

fn decimal_date(out_fname: &Path, fasta_fnames: &[PathBuf]) -> Result<(), SeqPrepError> {
    let mut out = BufWriter::new(File::create(out_fname)?);
    for fname in fasta_fnames {
        info!("rewriting dates in {}", fname.display());
        let input = BufReader::new(File::open(fname)?);
        rewrite_decimal_dates(input, &mut out)?;
    }
    out.flush()?;

    Ok(())
}
