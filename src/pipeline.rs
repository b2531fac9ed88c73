//! Minimal interface to the batch execution engine.
//!
//! The runner registers a sequence of work items, a per-item transform and
//! an output sink; partitioning, parallel execution and artifact writes all
//! happen behind this surface. The crate bundles an in-process executor
//! (the direct-runner analogue). A remote backend is addressed through the
//! same calls, with completion tracked by the engine's own monitoring.

use std::sync::Arc;
use std::thread;

use failure::Error;
use log;

use crate::config::{AutoscalingPolicy, ExecutionTarget};

mod executor;

/// Pure per-item transform applied by the engine workers.
pub type Transform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Options handed to the engine at submission.
///
/// Only the worker count shapes the bundled executor; the remaining fields
/// are recorded with the job and passed through uninterpreted.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub target: ExecutionTarget,
    pub autoscaling: AutoscalingPolicy,
    pub num_workers: u32,
    pub staging_location: String,
    pub temp_location: String,
    pub job_name: String,
}

pub struct Pipeline {
    items: Vec<String>,
    transform: Option<Transform>,
    sink: Option<String>,
}

impl Pipeline {
    /// Register the sequence of work items, one per input element.
    pub fn create(items: Vec<String>) -> Pipeline {
        Pipeline {
            items,
            transform: None,
            sink: None,
        }
    }

    /// Register the per-item transform.
    pub fn map<F>(mut self, transform: F) -> Pipeline
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Register the output sink prefix. Each work item becomes its own
    /// artifact named `{sink}-{index:05}-of-{total:05}`, so a run produces
    /// as many files as there are input elements.
    pub fn write(mut self, sink: &str) -> Pipeline {
        self.sink = Some(sink.to_string());
        self
    }

    /// Submit the pipeline and return a handle to the running job.
    ///
    /// A `DirectSync` caller joins the run through the handle. A
    /// `RemoteAsync` caller drops the handle and returns; the job keeps
    /// running without this process.
    pub fn run(self, options: &RunOptions) -> Result<RunHandle, Error> {
        let transform = self
            .transform
            .ok_or_else(|| failure::err_msg("No transform registered"))?;
        let sink = self
            .sink
            .ok_or_else(|| failure::err_msg("No output sink registered"))?;

        log::info!(
            "Submit job {}: {} work items, autoscaling {}",
            options.job_name,
            self.items.len(),
            options.autoscaling.as_setting()
        );
        log::debug!(
            "Job staging at {}, temp at {}",
            options.staging_location,
            options.temp_location
        );

        let executor = executor::Executor::new(sink, transform, options.num_workers);

        executor.submit(self.items)
    }
}

/// Tracks one submitted run.
pub struct RunHandle {
    joins: Vec<thread::JoinHandle<()>>,
}

impl RunHandle {
    /// Block until every worker finishes. A worker failure surfaces here
    /// as an error, the engine equivalent of a failed job.
    pub fn block_until_finished(self) -> Result<(), Error> {
        for join in self.joins {
            join.join()
                .map_err(|_| failure::err_msg("Pipeline worker failed"))?;
        }

        Ok(())
    }
}
