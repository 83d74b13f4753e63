//! Report rendering: console, JSON, Markdown, HTML and PDF

pub mod formatter;
pub mod pdf;
pub mod report;

pub use formatter::{save_report_to_file, suggest_filename, ReportGenerator};
pub use report::ReportDocument;
