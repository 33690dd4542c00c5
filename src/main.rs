// SPDX-License-Identifier: MIT

use log::info;

use seqprep::errors::SeqPrepError;

fn main() -> Result<(), SeqPrepError> {
    env_logger::init();
    info!("Starting log");

    seqprep::run()
}
