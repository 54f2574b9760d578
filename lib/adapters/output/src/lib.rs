//! Record sinks: log lines through `tracing`, or JSON lines on a writer.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use podstart_domain::{OutputFormat, StartupRecord};
use podstart_ports::RecordSink;

#[derive(Clone, Copy, Default)]
pub struct TracingRecordSink;

impl RecordSink for TracingRecordSink {
    fn emit(&self, record: &StartupRecord) {
        info!(
            target: "podstart::startup",
            pod = %record.name,
            namespace = record.namespace.as_deref().unwrap_or(""),
            uid = %record.id,
            duration_ms = record.duration_millis(),
            "{record}"
        );
    }
}

/// Writes each record as one JSON object followed by a newline.
pub struct JsonLinesRecordSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesRecordSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_record(&self, record: &StartupRecord) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

impl JsonLinesRecordSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> RecordSink for JsonLinesRecordSink<W> {
    fn emit(&self, record: &StartupRecord) {
        if let Err(err) = self.write_record(record) {
            warn!(pod = %record.name, "failed to write startup record: {err}");
        }
    }
}

pub fn sink_for(format: OutputFormat) -> Arc<dyn RecordSink> {
    match format {
        OutputFormat::Log => Arc::new(TracingRecordSink),
        OutputFormat::Json => Arc::new(JsonLinesRecordSink::stdout()),
    }
}
