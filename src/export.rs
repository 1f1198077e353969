use crate::{Event, ImportError};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Line layout understood by `pio import`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventLine<'a> {
    #[serde(flatten)]
    event: &'a Event,
    event_time: String,
}

/// Writes events as newline-delimited JSON.
///
/// The underlying writer is buffered and flushed on drop, so an exporter
/// abandoned halfway through still leaves every line written so far.
pub struct EventExporter<W: Write> {
    writer: BufWriter<W>,
    written: usize,
}

impl EventExporter<File> {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: &Path) -> Result<Self, ImportError> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> EventExporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            written: 0,
        }
    }

    /// Appends one event, stamped with the current time.
    pub fn create_event(&mut self, event: &Event) -> Result<(), ImportError> {
        let line = EventLine {
            event,
            event_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, false),
        };
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Flushes buffered lines and returns how many events were written.
    pub fn finish(mut self) -> Result<usize, ImportError> {
        self.writer.flush()?;
        Ok(self.written)
    }
}
