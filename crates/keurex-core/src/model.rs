//! Domain model: assets, inspection records and the Voedt relation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix length for keys derived from full source-system identifiers.
///
/// The source system stores toezichtgroep references as the first 8
/// characters of the referenced object's uuid.
pub const DERIVED_KEY_LEN: usize = 8;

/// The two legacy asset categories that participate in pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    Ls,
    LsDeel,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Ls => "LS",
            AssetType::LsDeel => "LSDeel",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inspection record attached to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keuringsinfo {
    pub datum_laatste_keuring: Option<NaiveDate>,
    pub resultaat_keuring: Option<String>,
}

/// A read-only asset snapshot as fetched from the graph.
///
/// Only active assets (`is_actief == true`) are ever fetched; the flag is
/// carried so report rows can echo it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub key: String,
    pub asset_type: AssetType,
    pub naam: Option<String>,
    pub naampad: Option<String>,
    pub is_actief: bool,
    pub toestand: Option<String>,
    pub toezichtgroep_key: Option<String>,
    pub keuring: Option<Keuringsinfo>,
}

/// A directed Voedt relation, LS → LSDeel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoedtLink {
    pub ls_key: String,
    pub lsdeel_key: String,
}

/// Supervision group lookup entry: key → human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toezichtgroep {
    pub key: String,
    pub naam: String,
}

/// Derive a toezichtgroep key from a full identifier.
///
/// The source system truncates the referenced uuid to a fixed prefix; this
/// is the single place where that derivation lives.
pub fn toezichtgroep_key_from_uuid(uuid: &str) -> String {
    uuid.chars().take(DERIVED_KEY_LEN).collect()
}
