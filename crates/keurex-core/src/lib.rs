//! Keurex Core Library
//!
//! Domain models and consolidation logic for the keuringsinfo export:
//! pairing LS and LSDeel assets via the Voedt relation, selecting the
//! inspection record to report per logical group, and bucketing rows
//! per toezichtgroep.

pub mod bucket;
pub mod consolidate;
pub mod error;
pub mod model;
pub mod pairing;
pub mod pivot;

pub use error::{KeurexError, KeurexResult};
pub use model::{Asset, AssetType, Keuringsinfo, Toezichtgroep, VoedtLink};
pub use pairing::{LogicalGroup, MatchKind};
