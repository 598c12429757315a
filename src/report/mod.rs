//! Run reports.
//!
//! The report sink persists the final node snapshot; KPIs summarize how
//! well the chosen policies used the pool.
//!
//! # Report Format
//!
//! ```text
//! Node ID,Available Cores,Available Memory,Job End Time
//! 1,20,56,5
//! 2,24,64,0
//! ```

mod csv;
mod kpi;

pub use csv::{render_csv, CsvReportSink, ReportSink, CSV_HEADER};
pub use kpi::SimulationKpi;
