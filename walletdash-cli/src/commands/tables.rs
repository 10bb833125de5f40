//! Database description command

use anyhow::Result;
use clap::Parser;

use walletdash_server::db::{DatabaseDescription, TableRepo};

use super::DatabaseArgs;

/// Arguments for the tables command
#[derive(Parser, Debug)]
pub struct TablesArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub async fn run_tables(args: TablesArgs) -> Result<()> {
    let db = args.db.connect()?;
    // describe() degrades to placeholders instead of failing
    let description = TableRepo::new(&db).describe().await;
    db.close().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&description)?);
    } else {
        print!("{}", render(&description));
    }
    Ok(())
}

fn render(description: &DatabaseDescription) -> String {
    let mut out = format!("{} tables in public schema\n", description.total_tables);

    for table in &description.tables {
        out.push_str(&format!("\n┌─ {}", table.table));
        if table.placeholder {
            out.push_str(" (unavailable)");
        }
        out.push('\n');
        if let Some(error) = &table.error {
            out.push_str(&format!("│  error: {}\n", error));
        }
        for column in &table.columns {
            let null = if column.nullable { "null" } else { "not null" };
            out.push_str(&format!("│  {:<24} {:<28} {}\n", column.name, column.data_type, null));
        }
        out.push_str(&format!("└─ {} sample rows\n", table.sample.len()));
    }
    out
}
