use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::record::TrainingRecord;
use super::DatasetError;

/// Writes training records as line-delimited JSON, one object per line.
pub struct JsonlWriter {
    inner: BufWriter<File>,
    records_written: usize,
}

impl JsonlWriter {
    /// Create (or truncate) the output file.
    pub fn create(path: &Path) -> Result<Self, DatasetError> {
        let file = File::create(path)?;
        Ok(Self {
            inner: BufWriter::new(file),
            records_written: 0,
        })
    }

    /// Append one record as a single compact JSON line.
    ///
    /// Records with a blank instruction are rejected; the parser upstream
    /// already drops them, this guards the sink as well.
    pub fn write(&mut self, record: &TrainingRecord) -> Result<(), DatasetError> {
        if record.instruction.trim().is_empty() {
            return Err(DatasetError::EmptyInstruction);
        }
        serde_json::to_writer(&mut self.inner, record)?;
        self.inner.write_all(b"\n")?;
        self.records_written += 1;
        Ok(())
    }

    /// Flush and return the number of records written.
    pub fn finish(mut self) -> Result<usize, DatasetError> {
        self.inner.flush()?;
        Ok(self.records_written)
    }
}

/// Write a full batch of records to `path`, returning the count written.
pub fn write_records(path: &Path, records: &[TrainingRecord]) -> Result<usize, DatasetError> {
    let mut writer = JsonlWriter::create(path)?;
    for record in records {
        writer.write(record)?;
    }
    writer.finish()
}
