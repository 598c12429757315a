//! Delimited node-utilization report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::ReportError;
use crate::models::WorkerNode;

/// Header row of the utilization report.
pub const CSV_HEADER: &str = "Node ID,Available Cores,Available Memory,Job End Time";

/// Destination for the final node snapshot.
pub trait ReportSink {
    /// Persists one row per node, in pool order.
    fn write_nodes(&mut self, nodes: &[WorkerNode]) -> Result<(), ReportError>;
}

/// Writes the snapshot as comma-separated rows.
#[derive(Debug)]
pub struct CsvReportSink<W: Write> {
    writer: W,
}

impl CsvReportSink<BufWriter<File>> {
    /// Creates (or truncates) a report file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ReportError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "writing utilization report");
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> CsvReportSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for CsvReportSink<W> {
    fn write_nodes(&mut self, nodes: &[WorkerNode]) -> Result<(), ReportError> {
        writeln!(self.writer, "{CSV_HEADER}")?;
        for node in nodes {
            writeln!(
                self.writer,
                "{},{},{},{}",
                node.id(),
                node.available_cores(),
                node.available_memory_gb(),
                node.job_end_time()
            )
            .map_err(|source| ReportError::Row {
                node_id: node.id(),
                source,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Renders the snapshot as a CSV string.
pub fn render_csv(nodes: &[WorkerNode]) -> String {
    let mut sink = CsvReportSink::new(Vec::new());
    // Writing into a Vec<u8> cannot fail.
    if sink.write_nodes(nodes).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&sink.into_inner()).into_owned()
}
