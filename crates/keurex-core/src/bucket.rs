//! Bucketing: routes consolidated rows into named report sections.
//!
//! Classification into a section is a total function: a toezichtgroep name
//! either matches one of the fixed target sheets or falls through to the
//! "Andere" catch-all. Active assets whose toestand is verwijderd or
//! overgedragen land on the "Niet meegenomen" sheet instead.

use std::collections::HashMap;

use crate::consolidate::ReportRow;
use crate::model::Toezichtgroep;

/// Toezichtgroepen that get a sheet of their own.
pub const TARGET_SHEETS: &[&str] = &[
    "V&W-WL",
    "V&W-WA",
    "V&W-WO",
    "V&W-WW",
    "V&W-WVB",
    "Tunnel Organ. VL.",
];

/// Catch-all section for unknown or unlisted toezichtgroepen.
pub const ANDERE_SHEET: &str = "Andere";

/// Section for active assets with a verwijderd/overgedragen toestand.
pub const EXCLUDED_SHEET: &str = "Niet meegenomen";

/// Placeholder label for an unresolvable toezichtgroep key.
pub const UNKNOWN_GROUP: &str = "UNKNOWN";

/// One named report section with its ordered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub rows: Vec<ReportRow>,
}

/// The full bucketed report: target sheets (sorted), then "Andere", then
/// "Niet meegenomen". Every section is always present, even when empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub sections: Vec<Section>,
}

/// Classify a toezichtgroep name into its section.
pub fn sheet_name(toezichtgroep: Option<&str>) -> &'static str {
    match toezichtgroep {
        Some(tg) => TARGET_SHEETS
            .iter()
            .copied()
            .find(|s| *s == tg)
            .unwrap_or(ANDERE_SHEET),
        None => ANDERE_SHEET,
    }
}

/// Active assets with a removed/transferred toestand are reported apart.
/// Inactive assets never reach this stage; they are filtered at query time.
pub fn is_niet_meegenomen(row: &ReportRow) -> bool {
    matches!(
        row.toestand.as_deref().map(str::to_lowercase).as_deref(),
        Some("verwijderd") | Some("overgedragen")
    )
}

/// Resolve each row's toezichtgroep key to its human-readable name.
///
/// Missing or unresolvable keys keep the `UNKNOWN` placeholder, which routes
/// the row to the catch-all sheet downstream.
pub fn resolve_toezichtgroepen(rows: &mut [ReportRow], groepen: &[Toezichtgroep]) {
    let by_key: HashMap<&str, &str> = groepen
        .iter()
        .map(|g| (g.key.as_str(), g.naam.as_str()))
        .collect();

    for row in rows {
        if let Some(naam) = row
            .toezichtgroep_key
            .as_deref()
            .and_then(|k| by_key.get(k))
        {
            row.toezichtgroep = (*naam).to_string();
        } else {
            row.toezichtgroep = UNKNOWN_GROUP.to_string();
        }
    }
}

/// Partition resolved rows into the report sections.
///
/// Rows within a section are ordered ascending by naampad (an absent
/// naampad sorts first).
pub fn bucket_rows(rows: Vec<ReportRow>) -> Report {
    let mut ordered_names: Vec<String> = TARGET_SHEETS.iter().map(|s| s.to_string()).collect();
    ordered_names.sort();
    ordered_names.push(ANDERE_SHEET.to_string());
    ordered_names.push(EXCLUDED_SHEET.to_string());

    let mut buckets: HashMap<&str, Vec<ReportRow>> = HashMap::new();
    for row in rows {
        let name = if is_niet_meegenomen(&row) {
            EXCLUDED_SHEET
        } else {
            sheet_name(Some(row.toezichtgroep.as_str()))
        };
        buckets.entry(name).or_default().push(row);
    }

    let sections = ordered_names
        .into_iter()
        .map(|name| {
            let mut rows = buckets.remove(name.as_str()).unwrap_or_default();
            rows.sort_by(|a, b| a.naampad.cmp(&b.naampad));
            Section { name, rows }
        })
        .collect();

    Report { sections }
}
