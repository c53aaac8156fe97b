//! # Keurex Graph
//!
//! Read-only repository layer over the asset graph.
//!
//! Provides the Neo4j connection client and the fetch queries the export
//! pipeline consumes: active LS/LSDeel assets, Voedt relations and the
//! toezichtgroep lookup. Nothing here writes to the database.

pub mod client;
pub mod queries;

pub use client::{GraphClient, GraphConfig, GraphCounts};
