use crate::error::Result;
use crate::models::RentalRecord;
use csv::{Writer, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Destination for assembled rental records
pub trait RecordSink {
    /// Append one record. Implementations persist it before returning.
    fn write_record(&mut self, record: &RentalRecord) -> Result<()>;
}

/// CSV table with the fixed rental header
pub struct CsvSink<W: Write> {
    writer: Writer<W>,
}

impl CsvSink<File> {
    /// Append to `path`, creating it with a header row if it does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_exists = path.exists();

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        if file_exists {
            info!("Appending to {}", path.display());
        } else {
            info!("Creating {}", path.display());
        }

        Self::from_writer(file, !file_exists)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W, write_header: bool) -> Result<Self> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(inner);

        if write_header {
            writer.write_record(RentalRecord::HEADER)?;
            writer.flush()?;
        }

        Ok(Self { writer })
    }

    /// Flush and hand back the underlying writer
    #[cfg(test)]
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &RentalRecord) -> Result<()> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }
}
