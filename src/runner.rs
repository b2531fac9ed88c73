//! Orchestrate one generation run.
//!
//! Resolve where output goes, load the sample, then either write the
//! volume file in this process (local mode) or hand per-line work items to
//! the batch pipeline (distributed mode).

use std::fs;
use std::path::Path;

use failure::{Error, ResultExt};
use log;

use crate::config::{ExecutionMode, ExecutionTarget, RunParameters, RunStamp};
use crate::pipeline::{Pipeline, RunOptions};
use crate::replicate::replicate;
use crate::sample::{SampleData, SampleRows};

pub fn run(params: &RunParameters, stamp: &RunStamp) -> Result<(), Error> {
    match params.mode {
        ExecutionMode::Local => run_local(params, stamp),
        ExecutionMode::Distributed => run_distributed(params, stamp),
    }
}

/// Row-based local variant.
///
/// Every sample row is written `replication_volume` times to a single csv
/// file, outer loop over rows, so all copies of a row stay grouped in
/// sample order.
fn run_local(params: &RunParameters, stamp: &RunStamp) -> Result<(), Error> {
    let sample = SampleRows::read(&params.sample_file)?;

    let output = params.output_path(sample.volume, stamp);

    log::info!(
        "Replicate {} sample rows {} times into {}",
        sample.volume,
        params.replication_volume,
        output
    );

    if let Some(parent) = Path::new(&output).parent() {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&output)
        .context("Failed to create volume data file")?;

    for row in &sample.rows {
        for _ in 0..params.replication_volume {
            writer.write_record(row)?;
        }
    }

    writer.flush()?;

    log::info!("run end time: {}", RunStamp::now());

    Ok(())
}

/// Line-based distributed variant.
///
/// Each raw sample line is one work item, replicated independently and
/// written by the engine as its own artifact.
fn run_distributed(params: &RunParameters, stamp: &RunStamp) -> Result<(), Error> {
    let sample = SampleData::read(&params.sample_file)?;

    let output = params.output_path(sample.volume, stamp);
    let times = params.replication_volume;

    let options = RunOptions {
        target: params.target,
        autoscaling: params.autoscaling,
        num_workers: params.num_workers,
        staging_location: params.staging_location.clone(),
        temp_location: params.temp_location.clone(),
        job_name: params.job_name(sample.volume, stamp),
    };

    let handle = Pipeline::create(sample.lines)
        .map(move |line| replicate(line, times))
        .write(&output)
        .run(&options)?;

    match params.target {
        ExecutionTarget::DirectSync => {
            handle.block_until_finished()?;

            log::info!("run end time: {}", RunStamp::now());
        }
        ExecutionTarget::RemoteAsync => {
            // Fire and forget; the engine monitor owns completion from here.
            log::info!("run dispatched to the remote backend, check the engine monitor");
        }
    }

    Ok(())
}
