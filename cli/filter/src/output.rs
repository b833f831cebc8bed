//! Writer sink: serializes forwarded batches as JSON.

use crate::args::OutputFormat;
use mf_traits::OutputSink;
use mf_types::ReadingSet;
use std::io::{self, Write};
use tracing::error;

/// Sink that writes every forwarded reading to a writer.
///
/// The first write failure is kept and later batches are dropped; callers
/// collect the failure with [`WriterSink::finish`].
pub struct WriterSink<W: Write> {
    writer: W,
    format: OutputFormat,
    bytes_written: u64,
    readings_written: u64,
    failure: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    /// Creates a sink writing to `writer`.
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            bytes_written: 0,
            readings_written: 0,
            failure: None,
        }
    }

    /// Returns the number of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Returns the number of readings written so far.
    pub fn readings_written(&self) -> u64 {
        self.readings_written
    }

    /// Flushes the writer and reports the first failure, if any.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.failure.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_batch(&mut self, readings: &ReadingSet) -> io::Result<()> {
        for reading in readings.readings() {
            let mut line = match self.format {
                OutputFormat::Jsonl => serde_json::to_vec(reading)?,
                OutputFormat::Json => serde_json::to_vec_pretty(reading)?,
            };
            line.push(b'\n');

            self.writer.write_all(&line)?;
            self.bytes_written += line.len() as u64;
            self.readings_written += 1;
        }
        Ok(())
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn emit(&mut self, readings: ReadingSet) {
        if self.failure.is_some() {
            return;
        }
        if let Err(e) = self.write_batch(&readings) {
            error!(error = %e, "Failed to write readings");
            self.failure = Some(e);
        }
    }
}
