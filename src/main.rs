//! Headless maintenance front for the stocktake engine.
//!
//! The interactive form lives elsewhere; this binary covers the operational
//! tasks (listing, searching, imports, export) from a shell, driving the
//! same library surface the form uses.

use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use stocktake::configuration::StoreConfig;
use stocktake::error::{Result, StocktakeError};
use stocktake::import;
use stocktake::record::{GRID_COLUMNS, InventoryRecord};
use stocktake::search::{self, SearchCriteria, SearchOutcome};
use stocktake::store::Store;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "command failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = StoreConfig::load("stocktake")?;
    match args.first().map(String::as_str) {
        Some("list") => {
            let store = Store::open(&config.database_path)?;
            let page = args
                .get(1)
                .and_then(|s| s.parse().ok())
                .unwrap_or(1);
            let (rows, total) = store.page(page, config.page_size)?;
            println!("{}", GRID_COLUMNS.join(" | "));
            for row in &rows {
                let fields: Vec<String> = row.iter().map(|v| v.text()).collect();
                println!("{}", fields.join(" | "));
            }
            let pages = total.div_ceil(config.page_size).max(1);
            println!("Page {} of {} ({} assets)", page, pages, total);
        }
        Some("count") => {
            let store = Store::open(&config.database_path)?;
            println!("{}", store.total_count()?);
        }
        Some("search") => {
            let store = Store::open(&config.database_path)?;
            let criteria = SearchCriteria {
                asset_tag: args.get(1).cloned(),
                serial_number: args.get(2).cloned(),
                transfer_sheet: args.get(3).cloned(),
            };
            match search::search(&store, &criteria)? {
                SearchOutcome::Inventory { rows, consolidated } => {
                    println!("{} matching inventory rows", rows.len());
                    println!("Asset Tag:     {}", consolidated.asset_tag);
                    println!("Description:   {}", consolidated.description);
                    println!("Serial Number: {}", consolidated.serial_number);
                }
                SearchOutcome::Known { consolidated } => {
                    println!("Known asset (no inventory rows)");
                    println!("Asset Tag:     {}", consolidated.asset_tag);
                    println!("Description:   {}", consolidated.description);
                    println!("Serial Number: {}", consolidated.serial_number);
                }
                SearchOutcome::NoMatch => {
                    println!("No matching item found in any inventory.");
                }
            }
        }
        Some("add") => {
            let store = Store::open(&config.database_path)?;
            let record = InventoryRecord::from_map(&field_map(&args[1..]));
            let id = store.insert(&record)?;
            println!("Entry {} added.", id);
        }
        Some("update") => {
            let store = Store::open(&config.database_path)?;
            let id: i64 = args.get(1).and_then(|s| s.parse().ok()).ok_or_else(|| {
                StocktakeError::Validation(
                    "Usage: stocktake update <id> field=value...".into(),
                )
            })?;
            let record = InventoryRecord::from_map(&field_map(&args[2..]));
            match store.update(id, &record)? {
                0 => println!("No entry with id {}.", id),
                _ => println!("Entry {} updated.", id),
            }
        }
        Some("delete") => {
            let store = Store::open(&config.database_path)?;
            let id: i64 = args.get(1).and_then(|s| s.parse().ok()).ok_or_else(|| {
                StocktakeError::Validation("Usage: stocktake delete <id>".into())
            })?;
            match store.delete(id)? {
                0 => println!("No entry with id {}.", id),
                _ => println!("Entry {} deleted.", id),
            }
        }
        Some("import") => {
            let mut store = Store::open(&config.database_path)?;
            let file = open_file(&args, "import <file.csv>")?;
            let rows = import::import_transaction_csv(&mut store, file)?;
            println!("Imported {} rows.", rows);
        }
        Some("reconcile") => {
            let store = Store::open(&config.database_path)?;
            let file = open_file(&args, "reconcile <file.csv>")?;
            let inserted = import::reconcile_known_csv(&store, file)?;
            println!("Rows inserted: {}", inserted);
        }
        Some("export") => {
            let store = Store::open(&config.database_path)?;
            let path = args.get(1).ok_or_else(|| {
                StocktakeError::Validation("Usage: stocktake export <file.csv>".into())
            })?;
            let file = File::create(path)
                .map_err(|e| StocktakeError::Persistence(format!("{}: {}", path, e)))?;
            let rows = import::export_csv(&store, file)?;
            println!("Exported {} rows.", rows);
        }
        Some("theme") => {
            let store = Store::open(&config.database_path)?;
            match args.get(1) {
                Some(name) => store.set_theme(name)?,
                None => println!("{}", store.theme()?.unwrap_or_else(|| "Dark".into())),
            }
        }
        _ => {
            eprintln!(
                "Usage: stocktake <list [page] | count | search [asset_tag] [serial] [sheet] | \
                 add field=value... | update <id> field=value... | delete <id> | \
                 import <csv> | reconcile <csv> | export <csv> | theme [name]>"
            );
        }
    }
    Ok(())
}

// `field=value` arguments become the raw map the record adapter expects;
// anything without an equals sign is ignored
fn field_map(args: &[String]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for arg in args {
        if let Some((key, value)) = arg.split_once('=') {
            map.insert(key.to_owned(), value.to_owned());
        }
    }
    map
}

fn open_file(args: &[String], usage: &str) -> Result<File> {
    let path = args
        .get(1)
        .ok_or_else(|| StocktakeError::Validation(format!("Usage: stocktake {}", usage)))?;
    File::open(path).map_err(|e| StocktakeError::Persistence(format!("{}: {}", path, e)))
}
