//! Terminal rendering of the dashboard counts

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use walletdash_server::db::ItemRepo;
use walletdash_server::models::summary::total_count;
use walletdash_server::models::{CategorySummary, KindSummary};

use super::DatabaseArgs;

/// Arguments for the summary command
#[derive(Parser, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Print JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

pub async fn run_summary(args: SummaryArgs) -> Result<()> {
    let db = args.db.connect()?;
    let repo = ItemRepo::new(&db);

    let kinds = repo
        .summary_by_kind()
        .await
        .context("Failed to summarize items by kind")?;
    let categories = repo
        .summary_by_category()
        .await
        .context("Failed to summarize items by category")?;
    db.close().await;

    if args.json {
        let out = json!({
            "total": total_count(&kinds),
            "kinds": kinds,
            "categories": categories,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render_kinds(&kinds));
        println!();
        print!("{}", render_categories(&categories));
    }
    Ok(())
}

fn render_kinds(kinds: &[KindSummary]) -> String {
    let mut out = format!("{:<14} {:>6} {:>8}\n", "KIND", "CODE", "COUNT");
    for k in kinds {
        out.push_str(&format!("{:<14} {:>6} {:>8}\n", k.kind.to_string(), k.kind_code, k.count));
    }
    out.push_str(&format!("{:<14} {:>6} {:>8}\n", "total", "", total_count(kinds)));
    out
}

fn render_categories(categories: &[CategorySummary]) -> String {
    if categories.is_empty() {
        return "(no categories)\n".to_owned();
    }

    let mut out = format!("{:<32} {:<24} {:<12} {:>8}\n", "CREDENTIAL TYPE", "CATEGORY", "KIND", "COUNT");
    for c in categories {
        out.push_str(&format!(
            "{:<32} {:<24} {:<12} {:>8}\n",
            c.credential_type,
            shorten(&c.category, 24),
            c.kind.to_string(),
            c.count
        ));
    }
    out
}

/// Clip long hex strings to `width` characters.
fn shorten(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_owned()
    } else {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
