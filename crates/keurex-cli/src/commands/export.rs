//! The export pipeline command: fetch → pair → consolidate → bucket → write.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use keurex_core::bucket::{bucket_rows, resolve_toezichtgroepen};
use keurex_core::consolidate::{consolidate, ReportRow, TieBreak};
use keurex_core::model::AssetType;
use keurex_core::pairing::pair;
use keurex_core::pivot::{build_pivot, default_cutoff};
use keurex_graph::{queries::keuring, GraphClient};

#[derive(Args)]
pub struct ExportArgs {
    /// Output directory for the report CSVs
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// assettypes short_uri for LS
    #[arg(long, default_value = "lgc:installatie#LS")]
    pub ls_short_uri: String,

    /// assettypes short_uri for LSDeel
    #[arg(long, default_value = "lgc:installatie#LSDeel")]
    pub lsdeel_short_uri: String,

    /// Prefer the LS side on an exact inspection-date tie
    #[arg(long)]
    pub prefer_ls_on_tie: bool,

    /// Optional row cap per assettype (debug)
    #[arg(long)]
    pub limit: Option<u32>,
}

pub async fn execute(client: &GraphClient, args: ExportArgs) -> Result<()> {
    let out_dir = args.out.unwrap_or_else(|| {
        PathBuf::from(format!(
            "keuringsinfo_{}",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ))
    });

    // Fail fast on a mistyped short_uri before fetching anything.
    let ls_key = keuring::resolve_assettype(client, &args.ls_short_uri).await?;
    let lsdeel_key = keuring::resolve_assettype(client, &args.lsdeel_short_uri).await?;

    let ls_assets =
        keuring::fetch_active_assets(client, &ls_key, AssetType::Ls, args.limit).await?;
    let lsdeel_assets =
        keuring::fetch_active_assets(client, &lsdeel_key, AssetType::LsDeel, args.limit).await?;
    let links = keuring::fetch_voedt_links(client, &ls_key, &lsdeel_key).await?;
    let groepen = keuring::fetch_toezichtgroepen(client).await?;

    info!(
        ls = ls_assets.len(),
        lsdeel = lsdeel_assets.len(),
        links = links.len(),
        toezichtgroepen = groepen.len(),
        "snapshot fetched"
    );

    let tie_break = if args.prefer_ls_on_tie {
        TieBreak::PreferLs
    } else {
        TieBreak::PreferLsDeel
    };

    let groups = pair(&ls_assets, &lsdeel_assets, &links);
    let mut rows: Vec<ReportRow> = groups.iter().map(|g| consolidate(g, tie_break)).collect();
    resolve_toezichtgroepen(&mut rows, &groepen);

    let pivot = build_pivot(&rows, default_cutoff(), false);
    print_summary(&rows);

    let row_count = rows.len();
    let report = bucket_rows(rows);
    keurex_export::write_report(&out_dir, &report, &pivot)?;

    println!(
        "\n{} {} rows to {}",
        "Wrote".green().bold(),
        row_count,
        out_dir.display()
    );
    Ok(())
}

/// Console sanity summary: counts per asset type and match kind.
fn print_summary(rows: &[ReportRow]) {
    let mut type_counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut match_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        *type_counts.entry(row.asset_type.as_str()).or_insert(0) += 1;
        *match_counts.entry(row.match_kind.as_str()).or_insert(0) += 1;
    }

    println!("{} {}", "Consolidated rows:".bold(), rows.len());
    for (name, count) in &type_counts {
        println!("  {:<14} {}", name, count);
    }
    for (name, count) in &match_counts {
        println!("  {:<14} {}", name.dimmed(), count);
    }
}
