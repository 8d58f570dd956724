use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

use site_ledger::export::{export_csv, export_json};
use site_ledger::store::SiteStore;
use site_ledger::ui::App;

#[derive(Parser, Debug)]
#[command(name = "site-ledger")]
#[command(about = "Site Ledger - track purchase orders, invoices and bills per building floor")]
#[command(version)]
struct Args {
    /// Start with a small seeded demo tree
    #[arg(long)]
    sample: bool,

    /// Export the final report to CSV on exit
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Export the final report to JSON on exit
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let store = if args.sample {
        SiteStore::sample()?
    } else {
        SiteStore::new()
    };

    let terminal = ratatui::init();
    let result = App::new(store).run(terminal);
    ratatui::restore();
    let store = result?;

    if let Some(csv_path) = &args.csv {
        export_csv(&store, csv_path)?;
        println!("Exported to CSV: {}", csv_path.display());
    }

    if let Some(json_path) = &args.json {
        export_json(&store, json_path)?;
        println!("Exported to JSON: {}", json_path.display());
    }

    Ok(())
}
