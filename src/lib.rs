// SPDX-License-Identifier: MIT

pub mod dates;
pub mod errors;
mod runner;
pub mod seq;

use crate::errors::SeqPrepError;

pub fn run() -> Result<(), SeqPrepError> {
    runner::run()
}
