//! Pivot summary: counts per toezichtgroep × keuringsresultaat.
//!
//! A result only counts under its own name when the last inspection is
//! strictly after the cutoff date and the result text is non-blank; every
//! other included row counts under the "geen keuring" column, so the pivot
//! accounts for every exported row.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::bucket::{is_niet_meegenomen, TARGET_SHEETS, UNKNOWN_GROUP};
use crate::consolidate::ReportRow;

/// Column name for rows without a countable inspection result.
pub const GEEN_KEURING: &str = "geen keuring";

/// Inspections on or before this date are treated as "geen keuring".
pub fn default_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid cutoff date")
}

/// Pivot counts: toezichtgroep → result → count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pivot {
    pub result_columns: Vec<String>,
    pub counts: BTreeMap<String, BTreeMap<String, u64>>,
}

impl Pivot {
    /// Row ordering for rendering: target sheets (sorted) first, then any
    /// remaining toezichtgroepen alphabetically.
    pub fn row_groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = TARGET_SHEETS.iter().map(|s| s.to_string()).collect();
        groups.sort();

        let mut others: Vec<String> = self
            .counts
            .keys()
            .filter(|g| !TARGET_SHEETS.contains(&g.as_str()))
            .cloned()
            .collect();
        others.sort();

        groups.extend(others);
        groups
    }

    pub fn count(&self, toezichtgroep: &str, result: &str) -> u64 {
        self.counts
            .get(toezichtgroep)
            .and_then(|c| c.get(result))
            .copied()
            .unwrap_or(0)
    }
}

/// Normalized result key for pivot counting.
pub fn pivot_result_key(row: &ReportRow, cutoff: NaiveDate) -> String {
    let after_cutoff = row
        .datum_laatste_keuring
        .map(|d| d > cutoff)
        .unwrap_or(false);
    if !after_cutoff {
        return GEEN_KEURING.to_string();
    }

    match row.resultaat_keuring.as_deref().map(str::trim) {
        Some(r) if !r.is_empty() => r.to_string(),
        _ => GEEN_KEURING.to_string(),
    }
}

/// Build the pivot over consolidated rows.
///
/// Niet-meegenomen rows are excluded unless `include_niet_meegenomen` is set.
pub fn build_pivot(rows: &[ReportRow], cutoff: NaiveDate, include_niet_meegenomen: bool) -> Pivot {
    let mut counts: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
    let mut columns: Vec<String> = Vec::new();

    for row in rows {
        if !include_niet_meegenomen && is_niet_meegenomen(row) {
            continue;
        }

        let result = pivot_result_key(row, cutoff);
        let group = if row.toezichtgroep.is_empty() {
            UNKNOWN_GROUP.to_string()
        } else {
            row.toezichtgroep.clone()
        };

        *counts.entry(group).or_default().entry(result.clone()).or_insert(0) += 1;
        if !columns.contains(&result) {
            columns.push(result);
        }
    }

    columns.sort();
    Pivot {
        result_columns: columns,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssetType;
    use crate::pairing::MatchKind;

    fn row(toezichtgroep: &str, toestand: &str, datum: Option<&str>, resultaat: Option<&str>) -> ReportRow {
        ReportRow {
            toezichtgroep_key: None,
            toezichtgroep: toezichtgroep.to_string(),
            asset_type: AssetType::Ls,
            match_kind: MatchKind::SingleLs,
            uuid: "u".to_string(),
            naam: None,
            naampad: None,
            is_actief: true,
            toestand: Some(toestand.to_string()),
            datum_laatste_keuring: datum.map(|d| d.parse().unwrap()),
            resultaat_keuring: resultaat.map(str::to_string),
        }
    }

    #[test]
    fn test_result_key_cutoff_and_blank_handling() {
        let cutoff = default_cutoff();

        // date == cutoff does not count as inspected
        let on_cutoff = row("V&W-WL", "in-gebruik", Some("2021-01-01"), Some("conform"));
        assert_eq!(pivot_result_key(&on_cutoff, cutoff), GEEN_KEURING);

        // date after cutoff but blank result
        let blank = row("V&W-WL", "in-gebruik", Some("2021-01-02"), Some("  "));
        assert_eq!(pivot_result_key(&blank, cutoff), GEEN_KEURING);

        // date after cutoff with a real result counts as itself
        let counted = row("V&W-WL", "in-gebruik", Some("2022-02-03"), Some("conform"));
        assert_eq!(pivot_result_key(&counted, cutoff), "conform");

        // no date at all
        let undated = row("V&W-WL", "in-gebruik", None, Some("conform"));
        assert_eq!(pivot_result_key(&undated, cutoff), GEEN_KEURING);
    }

    #[test]
    fn test_build_pivot_counts_every_row_and_excludes_niet_meegenomen() {
        let cutoff = default_cutoff();
        let rows = vec![
            row("V&W-WL", "in-gebruik", Some("2022-01-01"), Some("conform")),
            row("V&W-WL", "in-gebruik", None, None),
            row("V&W-WL", "verwijderd", Some("2022-01-01"), Some("conform")),
        ];

        let pivot = build_pivot(&rows, cutoff, false);
        assert_eq!(pivot.result_columns, vec!["conform", GEEN_KEURING]);
        assert_eq!(pivot.count("V&W-WL", "conform"), 1);
        assert_eq!(pivot.count("V&W-WL", GEEN_KEURING), 1);

        let with_excluded = build_pivot(&rows, cutoff, true);
        assert_eq!(with_excluded.count("V&W-WL", "conform"), 2);
        assert_eq!(with_excluded.count("V&W-WL", GEEN_KEURING), 1);
    }

    #[test]
    fn test_row_groups_targets_first_then_others() {
        let cutoff = default_cutoff();
        let rows = vec![
            row("Aangroep", "in-gebruik", None, None),
            row("V&W-WW", "in-gebruik", None, None),
        ];

        let pivot = build_pivot(&rows, cutoff, false);
        let groups = pivot.row_groups();

        // All six target sheets lead, sorted; extra groups trail.
        assert_eq!(groups.len(), TARGET_SHEETS.len() + 1);
        assert_eq!(groups.last().map(String::as_str), Some("Aangroep"));
        assert!(groups[..TARGET_SHEETS.len()].windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_empty_rows_yield_empty_pivot() {
        let pivot = build_pivot(&[], default_cutoff(), false);
        assert!(pivot.result_columns.is_empty());
        assert!(pivot.counts.is_empty());
        // Target groups still render as zero rows.
        assert_eq!(pivot.row_groups().len(), TARGET_SHEETS.len());
    }
}
