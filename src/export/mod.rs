//! Report export

pub mod json;

pub use json::{read_report, render_report, write_report, Report, ReportEntry};
