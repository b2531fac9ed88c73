//! Generate synthetic CSV volume test data from a small sample file.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger;

use volume_gen::{ExecutionMode, ExecutionTarget, Overrides, RunParameters, RunStamp};

#[derive(Parser)]
#[command(version, about = "Generate synthetic CSV volume test data from a small sample file.")]
struct Cli {
    /// Number of times to replicate each sample record.
    replications: Option<usize>,

    /// Sample file to replicate.
    sample: Option<PathBuf>,

    /// Hand the replication work to the batch pipeline.
    #[arg(long)]
    distributed: bool,

    /// Submit to the remote backend and return without waiting.
    #[arg(long, requires = "distributed")]
    remote: bool,
}

fn main() {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");

    env_logger::init_from_env(env);

    let cli = Cli::parse();

    let stamp = RunStamp::now();

    log::info!("run start time: {}", stamp);

    let params = RunParameters::resolve(Overrides {
        replication_volume: cli.replications,
        sample_file: cli.sample,
        mode: cli.distributed.then(|| ExecutionMode::Distributed),
        target: cli.remote.then(|| ExecutionTarget::RemoteAsync),
    });

    if let Err(error) = volume_gen::generate_volume_data(&params, &stamp) {
        log::error!("Failed to generate volume data, cause: {}", error);
        process::exit(1);
    }
}
