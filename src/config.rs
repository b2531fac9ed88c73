//! Run configuration and output path resolution.
//!
//! All settings for one generation run are fixed here at startup and never
//! mutated afterwards. The run-start timestamp is captured once as a
//! `RunStamp` and threaded through every path derivation explicitly.

use std::fmt::{self, Display};
use std::path::PathBuf;

use chrono::Local;

const DEFAULT_SAMPLE_FILE: &str = "data/sample.csv";

const DEFAULT_REPLICATION_VOLUME: usize = 100;

/// How the run executes: in this process or handed to the batch pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Local,
    Distributed,
}

/// Where the pipeline itself runs, relevant only in distributed mode.
///
/// `DirectSync` blocks until the pipeline finishes. `RemoteAsync` submits
/// the run and returns immediately; completion is tracked through the
/// engine's own monitoring, not by this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionTarget {
    DirectSync,
    RemoteAsync,
}

/// Autoscaling hint passed through to the execution engine verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoscalingPolicy {
    None,
    ThroughputBased,
}

impl AutoscalingPolicy {
    pub fn as_setting(&self) -> &'static str {
        match self {
            AutoscalingPolicy::None => "NONE",
            AutoscalingPolicy::ThroughputBased => "THROUGHPUT_BASED",
        }
    }
}

/// Run-start timestamp, sortable second resolution.
///
/// Captured once per process and passed down as a value. Two runs started
/// within the same second share a stamp, so equal sample volumes and
/// replication counts collide on output path. Known limitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStamp(String);

impl RunStamp {
    pub fn now() -> RunStamp {
        RunStamp(Local::now().format("%Y-%m-%d-%H-%M-%S").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Overrides taken from the command line; missing fields fall back to the
/// fixed defaults.
#[derive(Debug, Default)]
pub struct Overrides {
    pub replication_volume: Option<usize>,
    pub sample_file: Option<PathBuf>,
    pub mode: Option<ExecutionMode>,
    pub target: Option<ExecutionTarget>,
}

/// Immutable parameters of one generation run.
///
/// The worker count, staging and temp locations and job name prefix are
/// opaque hints for the execution engine; the core does not interpret them.
#[derive(Debug, Clone)]
pub struct RunParameters {
    /// Sample file, assumed to have no header row.
    pub sample_file: PathBuf,
    pub replication_volume: usize,
    pub local_output_dir: PathBuf,
    pub remote_output_dir: String,
    pub mode: ExecutionMode,
    pub target: ExecutionTarget,
    pub autoscaling: AutoscalingPolicy,
    pub num_workers: u32,
    pub staging_location: String,
    pub temp_location: String,
    pub job_name_prefix: String,
}

impl RunParameters {
    /// Build the parameter set from fixed defaults plus any overrides.
    pub fn resolve(overrides: Overrides) -> RunParameters {
        RunParameters {
            sample_file: overrides
                .sample_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLE_FILE)),
            replication_volume: overrides
                .replication_volume
                .unwrap_or(DEFAULT_REPLICATION_VOLUME),
            local_output_dir: PathBuf::from("data/output"),
            remote_output_dir: "gs://volume-test-data/input/".to_string(),
            mode: overrides.mode.unwrap_or(ExecutionMode::Local),
            target: overrides.target.unwrap_or(ExecutionTarget::DirectSync),
            autoscaling: AutoscalingPolicy::None,
            num_workers: 25,
            staging_location: "gs://volume-test-data/staging/".to_string(),
            temp_location: "gs://volume-test-data/temp/".to_string(),
            job_name_prefix: "generate-volume-test-data".to_string(),
        }
    }

    /// Unique key labelling one run: `{sample volume}x{replications}-{stamp}`.
    pub fn run_key(&self, sample_volume: usize, stamp: &RunStamp) -> String {
        format!(
            "{}x{}-{}",
            sample_volume, self.replication_volume, stamp
        )
    }

    /// Output location, derived deterministically from the sample volume,
    /// the replication count, the mode and the run stamp.
    pub fn output_path(&self, sample_volume: usize, stamp: &RunStamp) -> String {
        let key = self.run_key(sample_volume, stamp);

        match self.mode {
            ExecutionMode::Distributed => format!(
                "{}{}/Input_Volume_Data_{}.csv",
                self.remote_output_dir, key, key
            ),
            ExecutionMode::Local => {
                let mut path = self.local_output_dir.join(key);
                path.push("data.csv");
                path.display().to_string()
            }
        }
    }

    /// Job name handed to the engine: `{prefix}-{key}`.
    pub fn job_name(&self, sample_volume: usize, stamp: &RunStamp) -> String {
        format!("{}-{}", self.job_name_prefix, self.run_key(sample_volume, stamp))
    }
}
