//! Generate synthetic CSV volume test data by replicating a small sample
//! file, either in-process or through a batch execution pipeline.

use failure::Error;
use log;

pub mod config;
pub mod pipeline;
pub mod replicate;
pub mod runner;
pub mod sample;

pub use crate::config::{ExecutionMode, ExecutionTarget, Overrides, RunParameters, RunStamp};

/// Main entry function for one generation run.
pub fn generate_volume_data(params: &RunParameters, stamp: &RunStamp) -> Result<(), Error> {
    log::info!(
        "Generate volume data from sample {} with replication volume {}",
        params.sample_file.display(),
        params.replication_volume
    );

    runner::run(params, stamp)
}
