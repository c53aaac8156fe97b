//! Read-only fetch queries for the export pipeline.

pub mod keuring;
