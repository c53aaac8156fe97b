//! # Keurex Export
//!
//! Renders a bucketed report to CSV: one file per section plus a pivot
//! summary, written into an output directory.

pub mod workbook;

pub use workbook::{write_report, REPORT_HEADERS};
