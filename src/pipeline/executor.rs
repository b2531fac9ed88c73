//! Internal implementation of the in-process executor.
//!
//! The submitting thread fans work items out round-robin to worker threads
//! over channels; each worker applies the transform and writes one artifact
//! per item.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use failure::{Error, ResultExt};
use log;

use crate::pipeline::{RunHandle, Transform};

type Sender = mpsc::Sender<(usize, String)>;
type Join = thread::JoinHandle<()>;

pub struct Executor {
    sink: String,
    transform: Transform,
    num_workers: u32,
}

impl Executor {
    pub fn new(sink: String, transform: Transform, num_workers: u32) -> Executor {
        Executor {
            sink,
            transform,
            num_workers,
        }
    }

    pub fn submit(self, items: Vec<String>) -> Result<RunHandle, Error> {
        let total = items.len();

        if let Some(parent) = Path::new(&self.sink).parent() {
            fs::create_dir_all(parent).context("Failed to create output directory")?;
        }

        // Never more workers than items, never fewer than one.
        let workers = (self.num_workers as usize).min(total).max(1);

        let (senders, joins) = self.spawn_workers(workers, total);
        {
            // Drop the senders once dispatch finishes so the workers see
            // the channels close and terminate.
            let senders = senders;

            for (index, item) in items.into_iter().enumerate() {
                log::trace!("Send work item {} to worker {}", index, index % workers);

                senders[index % workers].send((index, item)).unwrap();
            }
        }

        Ok(RunHandle { joins })
    }

    fn spawn_workers(&self, workers: usize, total: usize) -> (Vec<Sender>, Vec<Join>) {
        (0..workers)
            .map(|idx| {
                let (tx, rx) = mpsc::channel();

                let sink = self.sink.clone();
                let transform = self.transform.clone();

                log::debug!("Spawn pipeline worker {}", idx);

                let handle = thread::spawn(move || artifact_writer(&sink, total, transform, rx));

                (tx, handle)
            })
            .unzip()
    }
}

fn artifact_writer(
    sink: &str,
    total: usize,
    transform: Transform,
    rx: mpsc::Receiver<(usize, String)>,
) {
    for (index, item) in rx {
        let artifact = artifact_path(sink, index, total);

        log::trace!("Write work item {} to {}", index, artifact);

        let file = fs::File::create(&artifact).expect("Failed to create output artifact");
        let mut writer = BufWriter::new(file);

        writer
            .write_all(transform(&item).as_bytes())
            .expect("Unexpected write failure");
    }
}

/// Shard-style artifact name, e.g. `data.csv-00003-of-00030`.
fn artifact_path(sink: &str, index: usize, total: usize) -> String {
    format!("{}-{:05}-of-{:05}", sink, index, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_artifact_path_format() {
        assert_eq!(
            artifact_path("out/data.csv", 3, 30),
            "out/data.csv-00003-of-00030"
        );
    }

    #[test]
    fn test_artifact_writer_one_file_per_item() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let sink = dir.path().join("data.csv").display().to_string();

        let (tx, rx) = mpsc::channel();
        let transform: Transform = Arc::new(|item: &str| item.to_uppercase());

        for (index, item) in vec!["a,b", "c,d"].into_iter().enumerate() {
            tx.send((index, item.to_string())).unwrap();
        }
        drop(tx);

        artifact_writer(&sink, 2, transform, rx);

        let first = fs::read_to_string(artifact_path(&sink, 0, 2))?;
        let second = fs::read_to_string(artifact_path(&sink, 1, 2))?;

        assert_eq!(first, "A,B");
        assert_eq!(second, "C,D");
        Ok(())
    }
}
