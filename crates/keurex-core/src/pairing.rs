//! Pairing engine: groups LS and LSDeel assets into logical groups.
//!
//! Matching happens **only** via the Voedt relation (LS → LSDeel). There is
//! no naampad or hierarchy fallback. An LS feeding several LSDeel assets
//! yields one pair per link; the ambiguity is surfaced, not collapsed.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use crate::model::{Asset, VoedtLink};

/// How a logical group was formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchKind {
    Voedt,
    SingleLs,
    SingleLsDeel,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Voedt => "voedt",
            MatchKind::SingleLs => "single_ls",
            MatchKind::SingleLsDeel => "single_lsdeel",
        }
    }
}

/// One logical entity for reporting purposes: a matched pair or a singleton.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalGroup {
    Pair { ls: Asset, lsdeel: Asset },
    SingleLs(Asset),
    SingleLsDeel(Asset),
}

impl LogicalGroup {
    pub fn match_kind(&self) -> MatchKind {
        match self {
            LogicalGroup::Pair { .. } => MatchKind::Voedt,
            LogicalGroup::SingleLs(_) => MatchKind::SingleLs,
            LogicalGroup::SingleLsDeel(_) => MatchKind::SingleLsDeel,
        }
    }
}

/// Group LS and LSDeel assets via the supplied Voedt links.
///
/// Every qualifying link becomes a `Pair`. LS assets that never appear as a
/// link source become `SingleLs`; LSDeel assets that never appear as a link
/// target become `SingleLsDeel`. Links referring to an asset missing from
/// the supplied sets are skipped and logged; the endpoints that do exist
/// still surface as singletons.
pub fn pair(ls_assets: &[Asset], lsdeel_assets: &[Asset], links: &[VoedtLink]) -> Vec<LogicalGroup> {
    let ls_by_key: HashMap<&str, &Asset> =
        ls_assets.iter().map(|a| (a.key.as_str(), a)).collect();
    let lsdeel_by_key: HashMap<&str, &Asset> =
        lsdeel_assets.iter().map(|a| (a.key.as_str(), a)).collect();

    let mut groups = Vec::new();
    let mut matched_ls: HashSet<&str> = HashSet::new();
    let mut matched_lsdeel: HashSet<&str> = HashSet::new();

    for link in links {
        match (
            ls_by_key.get(link.ls_key.as_str()),
            lsdeel_by_key.get(link.lsdeel_key.as_str()),
        ) {
            (Some(ls), Some(lsdeel)) => {
                matched_ls.insert(ls.key.as_str());
                matched_lsdeel.insert(lsdeel.key.as_str());
                groups.push(LogicalGroup::Pair {
                    ls: (*ls).clone(),
                    lsdeel: (*lsdeel).clone(),
                });
            }
            _ => {
                warn!(
                    ls_key = %link.ls_key,
                    lsdeel_key = %link.lsdeel_key,
                    "Voedt link refers to an asset missing from the snapshot, skipping"
                );
            }
        }
    }

    for ls in ls_assets {
        if !matched_ls.contains(ls.key.as_str()) {
            groups.push(LogicalGroup::SingleLs(ls.clone()));
        }
    }

    for lsdeel in lsdeel_assets {
        if !matched_lsdeel.contains(lsdeel.key.as_str()) {
            groups.push(LogicalGroup::SingleLsDeel(lsdeel.clone()));
        }
    }

    groups
}
