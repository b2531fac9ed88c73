//! Read the sample CSV file into memory.
//!
//! The whole sample is held in memory for the duration of a run, and in
//! local mode the whole replicated output is too. Nothing here enforces a
//! size limit; feasibility is bounded by process memory.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use failure::{Error, ResultExt};

/// Raw sample lines in file order, terminators preserved as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleData {
    pub lines: Vec<String>,
    /// Number of lines in the sample.
    pub volume: usize,
}

impl SampleData {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<SampleData, Error> {
        let file = File::open(path).context("Missing sample csv file")?;
        let mut buff_reader = BufReader::new(file);

        let mut lines = Vec::new();

        loop {
            let mut line = String::new();
            // read_line keeps the terminator, unlike BufRead::lines.
            let read = buff_reader.read_line(&mut line)?;
            if read == 0 {
                break;
            }
            lines.push(line);
        }

        let volume = lines.len();

        Ok(SampleData { lines, volume })
    }
}

/// Parsed sample rows for the row-based local writer.
///
/// Comma delimited, no header row, minimal quoting, arbitrary field count
/// per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRows {
    pub rows: Vec<csv::StringRecord>,
    pub volume: usize,
}

impl SampleRows {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<SampleRows, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .context("Missing sample csv file")?;

        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .context("Malformed sample csv row")?;

        let volume = rows.len();

        Ok(SampleRows { rows, volume })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_reports_line_count() -> Result<(), Error> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "a,b\nc,d\ne,f\n")?;

        let sample = SampleData::read(file.path())?;

        assert_eq!(sample.volume, 3);
        assert_eq!(sample.lines.len(), 3);
        Ok(())
    }

    #[test]
    fn test_read_keeps_terminators() -> Result<(), Error> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "a,b\nc,d")?;

        let sample = SampleData::read(file.path())?;

        assert_eq!(sample.lines, vec!["a,b\n".to_string(), "c,d".to_string()]);
        Ok(())
    }

    #[test]
    fn test_read_missing_file_fails() {
        let result = SampleData::read("data/does-not-exist.csv");

        assert!(result.is_err());
    }

    #[test]
    fn test_read_rows_parses_fields() -> Result<(), Error> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "100,abc\n200,\"d,e\"\n")?;

        let sample = SampleRows::read(file.path())?;

        assert_eq!(sample.volume, 2);
        assert_eq!(&sample.rows[0][0], "100");
        assert_eq!(&sample.rows[1][1], "d,e");
        Ok(())
    }
}
