// SPDX-License-Identifier: MIT

pub mod dedup;
pub mod fasta;
pub mod genbank;
pub mod record;
