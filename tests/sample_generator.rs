//! Build random sample csv files for tests.

use rand::{self, Rng};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const FIELD_LENGTH: usize = 10;

// Random field value in alphanumeric distribution ([a-zA-Z0-9]*).
#[inline]
fn random_field(length: usize) -> String {
    let rand_string: String = rand::thread_rng()
        .sample_iter(rand::distributions::Alphanumeric)
        .take(length)
        .collect();

    rand_string
}

/// Write a sample csv of the given shape, no header row.
pub fn create_sample_csv(
    location: &Path,
    rows: usize,
    fields: usize,
) -> Result<(), std::io::Error> {
    let file = File::create(location)?;
    let mut buff_writer = BufWriter::new(file);

    for _ in 0..rows {
        let row: Vec<String> = (0..fields).map(|_| random_field(FIELD_LENGTH)).collect();

        writeln!(buff_writer, "{}", row.join(","))?;
    }

    buff_writer.flush()?;

    Ok(())
}
