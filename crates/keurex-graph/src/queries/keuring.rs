//! Fetch queries for the keuringsinfo export.
//!
//! All queries are read-only and return immutable snapshots. Assettype
//! references are resolved first so a typo in a short_uri fails the run
//! immediately with usable candidates instead of producing an empty report.

use anyhow::Result;
use chrono::NaiveDate;
use neo4rs::Query;
use tracing::{debug, warn};

use keurex_core::model::toezichtgroep_key_from_uuid;
use keurex_core::{Asset, AssetType, KeurexError, Keuringsinfo, Toezichtgroep, VoedtLink};

use crate::GraphClient;

/// Resolve an assettype short_uri to its key, failing fast when unknown.
///
/// The error lists up to 10 short_uris containing the fragment after `#`,
/// so a near-miss is easy to correct.
pub async fn resolve_assettype(client: &GraphClient, short_uri: &str) -> Result<String> {
    let query = Query::new(
        "MATCH (at:Assettype {short_uri: $short_uri})
         RETURN at.key as key
         LIMIT 1"
            .to_string(),
    )
    .param("short_uri", short_uri);

    if let Some(key) = client.query_scalar::<String>(query, "key").await? {
        debug!(short_uri, key, "resolved assettype");
        return Ok(key);
    }

    let needle = short_uri
        .rsplit('#')
        .next()
        .unwrap_or(short_uri)
        .to_lowercase();
    let candidates_query = Query::new(
        "MATCH (at:Assettype)
         WHERE toLower(at.short_uri) CONTAINS $needle
         RETURN at.short_uri as short_uri
         LIMIT 10"
            .to_string(),
    )
    .param("needle", needle);

    let mut candidates = Vec::new();
    for row in client.query(candidates_query).await? {
        let uri: String = row.get("short_uri").unwrap_or_default();
        if !uri.is_empty() {
            candidates.push(uri);
        }
    }

    Err(KeurexError::AssettypeNotFound {
        short_uri: short_uri.to_string(),
        candidates: candidates.join(", "),
    }
    .into())
}

/// Fetch all active assets of one assettype.
pub async fn fetch_active_assets(
    client: &GraphClient,
    assettype_key: &str,
    asset_type: AssetType,
    limit: Option<u32>,
) -> Result<Vec<Asset>> {
    let mut cypher = String::from(
        "MATCH (a:Asset {assettype_key: $assettype_key})
         WHERE a.is_actief = true
         RETURN a.key as key, a.naam as naam, a.naampad as naampad,
                a.toestand as toestand, a.toezichtgroep_key as toezichtgroep_key,
                a.datum_laatste_keuring as datum_laatste_keuring,
                a.resultaat_keuring as resultaat_keuring",
    );
    if let Some(n) = limit {
        cypher.push_str(&format!("\n LIMIT {n}"));
    }

    let query = Query::new(cypher).param("assettype_key", assettype_key);

    let mut assets = Vec::new();
    for row in client.query(query).await? {
        let key: String = row.get("key").unwrap_or_default();
        if key.is_empty() {
            continue;
        }

        let datum = parse_iso_date(&key, row.get::<String>("datum_laatste_keuring").ok());
        let resultaat = non_empty(row.get::<String>("resultaat_keuring").ok());
        let keuring = match (datum, resultaat) {
            (None, None) => None,
            (datum_laatste_keuring, resultaat_keuring) => Some(Keuringsinfo {
                datum_laatste_keuring,
                resultaat_keuring,
            }),
        };

        assets.push(Asset {
            key,
            asset_type,
            naam: non_empty(row.get::<String>("naam").ok()),
            naampad: non_empty(row.get::<String>("naampad").ok()),
            is_actief: true,
            toestand: non_empty(row.get::<String>("toestand").ok()),
            // Some snapshots carry the full referenced uuid; the lookup key
            // is its fixed prefix.
            toezichtgroep_key: non_empty(row.get::<String>("toezichtgroep_key").ok())
                .map(|k| toezichtgroep_key_from_uuid(&k)),
            keuring,
        });
    }

    debug!(assettype_key, count = assets.len(), "fetched active assets");
    Ok(assets)
}

/// Fetch the Voedt relations between active LS and LSDeel assets.
///
/// Only the outbound LS → LSDeel direction qualifies for pairing.
pub async fn fetch_voedt_links(
    client: &GraphClient,
    ls_assettype_key: &str,
    lsdeel_assettype_key: &str,
) -> Result<Vec<VoedtLink>> {
    let query = Query::new(
        "MATCH (ls:Asset {assettype_key: $ls_key})-[:VOEDT]->(ld:Asset {assettype_key: $lsdeel_key})
         WHERE ls.is_actief = true AND ld.is_actief = true
         RETURN ls.key as ls_key, ld.key as lsdeel_key"
            .to_string(),
    )
    .param("ls_key", ls_assettype_key)
    .param("lsdeel_key", lsdeel_assettype_key);

    let mut links = Vec::new();
    for row in client.query(query).await? {
        let ls_key: String = row.get("ls_key").unwrap_or_default();
        let lsdeel_key: String = row.get("lsdeel_key").unwrap_or_default();
        if !ls_key.is_empty() && !lsdeel_key.is_empty() {
            links.push(VoedtLink { ls_key, lsdeel_key });
        }
    }

    debug!(count = links.len(), "fetched Voedt links");
    Ok(links)
}

/// Fetch the toezichtgroep lookup (key → naam).
pub async fn fetch_toezichtgroepen(client: &GraphClient) -> Result<Vec<Toezichtgroep>> {
    let query = Query::new(
        "MATCH (t:Toezichtgroep)
         RETURN t.key as key, t.naam as naam"
            .to_string(),
    );

    let mut groepen = Vec::new();
    for row in client.query(query).await? {
        let key: String = row.get("key").unwrap_or_default();
        let naam: String = row.get("naam").unwrap_or_default();
        if !key.is_empty() && !naam.is_empty() {
            groepen.push(Toezichtgroep { key, naam });
        }
    }
    Ok(groepen)
}

/// Parse an ISO calendar date, treating malformed values as absent.
fn parse_iso_date(asset_key: &str, raw: Option<String>) -> Option<NaiveDate> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<NaiveDate>() {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(asset_key, raw, "unparseable keuring date, treating as absent");
            None
        }
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("k", Some("2021-01-05".to_string())),
            Some(NaiveDate::from_ymd_opt(2021, 1, 5).unwrap())
        );
        assert_eq!(parse_iso_date("k", Some("05/01/2021".to_string())), None);
        assert_eq!(parse_iso_date("k", Some(String::new())), None);
        assert_eq!(parse_iso_date("k", None), None);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("x".to_string())), Some("x".to_string()));
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
    }
}
