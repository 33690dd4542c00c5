// SPDX-License-Identifier: MIT

// Line-driven scanner for GenBank-style flat files. A record looks like:
//
// LOCUS               defline           length
// DEFINITION          defline           length
// TITLE               defline
// ORIGIN
//
// position    seq beginning
// ...
// position    seq end
// //
//
// The defline is taken from one of LOCUS/DEFINITION/TITLE (caller's choice) and may continue
// onto indented lines. Sequence data runs from ORIGIN to the // terminator, each line prefixed
// with a position offset and broken into space-delimited chunks.

use std::collections::HashMap;
use std::fmt;
use std::io::BufRead;

use clap::ValueEnum;
use itertools::Itertools;
use log::debug;

use crate::errors::SeqPrepError;

const SEQUENCE_START: &str = "ORIGIN";
const RECORD_TERMINATOR: &str = "//";

/// The metadata field whose value becomes the FASTA defline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FieldSelector {
    #[clap(name = "locus")]
    #[clap(alias = "l")]
    Locus,
    #[clap(name = "definition")]
    #[clap(alias = "d")]
    Definition,
    #[clap(name = "title")]
    #[clap(alias = "t")]
    Title,
}

impl FieldSelector {
    fn field_name(self) -> &'static str {
        match self {
            FieldSelector::Locus => "LOCUS",
            FieldSelector::Definition => "DEFINITION",
            FieldSelector::Title => "TITLE",
        }
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldSelector::Locus => "locus",
            FieldSelector::Definition => "definition",
            FieldSelector::Title => "title",
        };
        write!(f, "{}", s)
    }
}

/// Everything one pass over the input yields: each record's sequence(s) filed under its defline,
/// plus the deflines in record order (repeats included). More than one sequence under a key
/// means the defline is duplicated in the input.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub order: Vec<String>,
    pub sequences: HashMap<String, Vec<String>>,
}

// Where we are relative to the sequence body of the current record.
#[derive(Debug, PartialEq, Eq)]
enum BodyState {
    Idle,
    InSequence,
}

struct Scanner {
    field: FieldSelector,
    state: BodyState,
    // True while the defline may still continue onto indented lines. The accumulator below keeps
    // its value after capture ends, until the record terminator commits it.
    capturing_defline: bool,
    defline: String,
    sequence: String,
    outcome: ScanOutcome,
}

impl Scanner {
    fn new(field: FieldSelector) -> Self {
        Scanner {
            field,
            state: BodyState::Idle,
            capturing_defline: false,
            defline: String::new(),
            sequence: String::new(),
            outcome: ScanOutcome::default(),
        }
    }

    fn feed(&mut self, line: &str) {
        // An open defline capture eats indented lines; any other line ends the capture and is
        // then handled normally (so a terminator or ORIGIN line also takes its own effect).
        if self.capturing_defline {
            if line.starts_with(' ') {
                let segment = line.split_whitespace().join("_");
                if !segment.is_empty() {
                    self.defline.push('_');
                    self.defline.push_str(&segment);
                }
                return;
            }
            self.capturing_defline = false;
        }

        if line.starts_with(self.field.field_name()) {
            // A second trigger within one record replaces the pending defline.
            self.defline.clear();
            self.defline.push_str(&line.split_whitespace().skip(1).join("_"));
            self.capturing_defline = true;
        } else if line.starts_with(RECORD_TERMINATOR) {
            self.commit_record();
        } else if line.starts_with(SEQUENCE_START) {
            self.state = BodyState::InSequence;
        } else if self.state == BodyState::InSequence {
            // Token 1 is the position offset; the rest is sequence data.
            for chunk in line.split_whitespace().skip(1) {
                self.sequence.push_str(chunk);
            }
        }
        // Anything else (ACCESSION, VERSION, ...) is ignored.
    }

    // File the finished record under its defline and reset the per-record accumulators. A record
    // without an ORIGIN section commits an empty sequence; we parse best-effort rather than
    // rejecting sloppy input.
    fn commit_record(&mut self) {
        debug!(
            "record committed: defline {:?}, {} bases",
            self.defline,
            self.sequence.len()
        );
        self.outcome.order.push(self.defline.clone());
        self.outcome
            .sequences
            .entry(std::mem::take(&mut self.defline))
            .or_default()
            .push(std::mem::take(&mut self.sequence));
        self.capturing_defline = false;
        self.state = BodyState::Idle;
    }

    fn finish(self) -> ScanOutcome {
        // Lines after the last terminator belong to no record and are dropped.
        self.outcome
    }
}

/// Walk `input` once and collect every record's (defline, sequence) pair, with the defline taken
/// from `field`. The whole input must be consumed before any output can be emitted, because
/// duplicate resolution needs to have seen every record.
pub fn scan_genbank<R: BufRead>(input: R, field: FieldSelector) -> Result<ScanOutcome, SeqPrepError> {
    let mut scanner = Scanner::new(field);
    for line in input.lines() {
        scanner.feed(&line?);
    }
    Ok(scanner.finish())
}
