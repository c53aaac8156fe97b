//! Consolidation engine: one report row per logical group.
//!
//! For a matched pair the LSDeel side provides the identity (key, naam,
//! naampad, toezichtgroep) while the inspection record is taken from
//! whichever side was inspected more recently.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::bucket::UNKNOWN_GROUP;
use crate::model::{Asset, AssetType, Keuringsinfo};
use crate::pairing::{LogicalGroup, MatchKind};

/// Which side of a pair wins when both inspection dates compare equal
/// (including both absent). The source material left this open, so the
/// rule is explicit and configurable rather than accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    #[default]
    PreferLsDeel,
    PreferLs,
}

/// The consolidated, exportable representation of one logical group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Raw toezichtgroep key of the representative asset.
    pub toezichtgroep_key: Option<String>,
    /// Resolved toezichtgroep name; `UNKNOWN` until label resolution runs.
    pub toezichtgroep: String,
    pub asset_type: AssetType,
    pub match_kind: MatchKind,
    pub uuid: String,
    pub naam: Option<String>,
    pub naampad: Option<String>,
    pub is_actief: bool,
    pub toestand: Option<String>,
    pub datum_laatste_keuring: Option<NaiveDate>,
    pub resultaat_keuring: Option<String>,
}

/// Consolidate a logical group into a single report row.
///
/// Pure function: the same group and tie-break always yield the same row.
pub fn consolidate(group: &LogicalGroup, tie_break: TieBreak) -> ReportRow {
    match group {
        LogicalGroup::Pair { ls, lsdeel } => {
            let keuring = pick_keuring(ls, lsdeel, tie_break);
            row_from(lsdeel, MatchKind::Voedt, keuring)
        }
        LogicalGroup::SingleLs(asset) => {
            row_from(asset, MatchKind::SingleLs, asset.keuring.as_ref())
        }
        LogicalGroup::SingleLsDeel(asset) => {
            row_from(asset, MatchKind::SingleLsDeel, asset.keuring.as_ref())
        }
    }
}

/// Select the inspection record to report for a matched pair.
///
/// The later `datum_laatste_keuring` wins; an absent date sorts below any
/// present date. A record-less side never beats a side with a record.
fn pick_keuring<'a>(
    ls: &'a Asset,
    lsdeel: &'a Asset,
    tie_break: TieBreak,
) -> Option<&'a Keuringsinfo> {
    match (ls.keuring.as_ref(), lsdeel.keuring.as_ref()) {
        (None, None) => None,
        (Some(k), None) => Some(k),
        (None, Some(k)) => Some(k),
        (Some(a), Some(b)) => {
            // Option<NaiveDate> ordering puts None below any Some.
            match a.datum_laatste_keuring.cmp(&b.datum_laatste_keuring) {
                Ordering::Greater => Some(a),
                Ordering::Less => Some(b),
                Ordering::Equal => match tie_break {
                    TieBreak::PreferLs => Some(a),
                    TieBreak::PreferLsDeel => Some(b),
                },
            }
        }
    }
}

fn row_from(representative: &Asset, match_kind: MatchKind, keuring: Option<&Keuringsinfo>) -> ReportRow {
    ReportRow {
        toezichtgroep_key: representative.toezichtgroep_key.clone(),
        toezichtgroep: UNKNOWN_GROUP.to_string(),
        asset_type: representative.asset_type,
        match_kind,
        uuid: representative.key.clone(),
        naam: representative.naam.clone(),
        naampad: representative.naampad.clone(),
        is_actief: representative.is_actief,
        toestand: representative.toestand.clone(),
        datum_laatste_keuring: keuring.and_then(|k| k.datum_laatste_keuring),
        resultaat_keuring: keuring.and_then(|k| k.resultaat_keuring.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(key: &str, asset_type: AssetType, keuring: Option<Keuringsinfo>) -> Asset {
        Asset {
            key: key.to_string(),
            asset_type,
            naam: Some(format!("naam-{key}")),
            naampad: Some(format!("A/B/{key}")),
            is_actief: true,
            toestand: Some("in-gebruik".to_string()),
            toezichtgroep_key: None,
            keuring,
        }
    }

    fn keuring(date: &str, resultaat: &str) -> Keuringsinfo {
        Keuringsinfo {
            datum_laatste_keuring: Some(date.parse().unwrap()),
            resultaat_keuring: Some(resultaat.to_string()),
        }
    }

    #[test]
    fn test_pair_later_date_wins_and_lsdeel_is_representative() {
        let ls = asset(
            "ls1",
            AssetType::Ls,
            Some(keuring("2020-10-16", "niet-conform met inbreuken")),
        );
        let lsdeel = asset("lsd1", AssetType::LsDeel, Some(keuring("2021-01-05", "conform")));

        let row = consolidate(&LogicalGroup::Pair { ls, lsdeel }, TieBreak::default());

        assert_eq!(row.uuid, "lsd1");
        assert_eq!(row.asset_type, AssetType::LsDeel);
        assert_eq!(row.match_kind, MatchKind::Voedt);
        assert_eq!(row.datum_laatste_keuring, Some("2021-01-05".parse().unwrap()));
        assert_eq!(row.resultaat_keuring.as_deref(), Some("conform"));
    }

    #[test]
    fn test_pair_only_ls_side_inspected() {
        let ls = asset("ls1", AssetType::Ls, Some(keuring("2019-06-30", "conform")));
        let lsdeel = asset("lsd1", AssetType::LsDeel, None);

        let row = consolidate(&LogicalGroup::Pair { ls, lsdeel }, TieBreak::default());

        // Identity stays with the LSDeel, the record comes from the LS side.
        assert_eq!(row.uuid, "lsd1");
        assert_eq!(row.resultaat_keuring.as_deref(), Some("conform"));
    }

    #[test]
    fn test_pair_neither_side_inspected() {
        let ls = asset("ls1", AssetType::Ls, None);
        let lsdeel = asset("lsd1", AssetType::LsDeel, None);

        let row = consolidate(&LogicalGroup::Pair { ls, lsdeel }, TieBreak::default());

        assert_eq!(row.match_kind, MatchKind::Voedt);
        assert_eq!(row.datum_laatste_keuring, None);
        assert_eq!(row.resultaat_keuring, None);
    }

    #[test]
    fn test_tie_break_is_pinned() {
        let ls = asset("ls1", AssetType::Ls, Some(keuring("2022-03-01", "ls-resultaat")));
        let lsdeel = asset(
            "lsd1",
            AssetType::LsDeel,
            Some(keuring("2022-03-01", "lsdeel-resultaat")),
        );

        let pair = LogicalGroup::Pair { ls, lsdeel };

        let default_row = consolidate(&pair, TieBreak::default());
        assert_eq!(default_row.resultaat_keuring.as_deref(), Some("lsdeel-resultaat"));

        let ls_row = consolidate(&pair, TieBreak::PreferLs);
        assert_eq!(ls_row.resultaat_keuring.as_deref(), Some("ls-resultaat"));
    }

    #[test]
    fn test_absent_date_loses_to_present_date() {
        let ls = asset(
            "ls1",
            AssetType::Ls,
            Some(Keuringsinfo {
                datum_laatste_keuring: None,
                resultaat_keuring: Some("ongedateerd".to_string()),
            }),
        );
        let lsdeel = asset("lsd1", AssetType::LsDeel, Some(keuring("2018-01-01", "conform")));

        let row = consolidate(&LogicalGroup::Pair { ls, lsdeel }, TieBreak::default());
        assert_eq!(row.resultaat_keuring.as_deref(), Some("conform"));
    }

    #[test]
    fn test_singleton_without_record_has_empty_fields() {
        let row = consolidate(
            &LogicalGroup::SingleLs(asset("ls2", AssetType::Ls, None)),
            TieBreak::default(),
        );

        assert_eq!(row.uuid, "ls2");
        assert_eq!(row.match_kind, MatchKind::SingleLs);
        assert_eq!(row.datum_laatste_keuring, None);
        assert_eq!(row.resultaat_keuring, None);
    }

    #[test]
    fn test_singleton_keeps_own_record() {
        let row = consolidate(
            &LogicalGroup::SingleLsDeel(asset(
                "lsd2",
                AssetType::LsDeel,
                Some(keuring("2023-11-20", "conform")),
            )),
            TieBreak::default(),
        );

        assert_eq!(row.match_kind, MatchKind::SingleLsDeel);
        assert_eq!(row.resultaat_keuring.as_deref(), Some("conform"));
    }
}
