//! Import reconciliation and delimited-text exchange.
//!
//! Two import operations with deliberately different failure policies live
//! here. The reference-catalog reconciler deduplicates externally supplied
//! asset rows against `known_inventory` and treats duplicates as skips, so
//! rerunning it against the same source is idempotent. The transaction
//! importer is stricter: every row's date and time must parse against the
//! accepted format lists, and a single bad row aborts the entire import with
//! a row-indexed error before anything is written.

use std::io::{Read, Write};

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info};

use crate::error::{Result, StocktakeError};
use crate::record::{DATE_FORMAT, GRID_COLUMNS, InventoryRecord, KnownAsset, TIME_FORMAT};
use crate::store::Store;

/// Accepted transaction-import date formats, tried in order. chrono's
/// numeric fields take unpadded digits, so this single pattern covers
/// `4/5/2025` through `04/05/2025`.
pub const DATE_FORMATS: &[&str] = &["%m/%d/%Y"];
/// Accepted transaction-import time formats, tried in order: 12-hour with
/// AM/PM first, then plain 24-hour.
pub const TIME_FORMATS: &[&str] = &["%I:%M %p", "%H:%M"];

/// First format that parses wins.
pub fn parse_import_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s.trim(), f).ok())
}

pub fn parse_import_time(s: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(s.trim(), f).ok())
}

/// Imports already-split transaction rows (header line removed) in the fixed
/// eleven-column order Asset Tag, Description, Serial Number, Transfer
/// Sheet, Notes, Date, Time, Location, Transferred By, Received By, Color.
///
/// Dates and times are normalized to the canonical stored formats before the
/// whole set goes through one atomic bulk insert. Any unparseable date or
/// time aborts the import with the offending row's number (counted from the
/// start of the file, header included) and nothing is persisted.
pub fn import_transaction_rows(store: &mut Store, rows: &[Vec<String>]) -> Result<usize> {
    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        // header is line 1 of the source file
        let line = index + 2;
        let field = |i: usize| row.get(i).map(|s| s.trim()).unwrap_or("");

        let date_text = field(5);
        let Some(date) = parse_import_date(date_text) else {
            return Err(StocktakeError::Import {
                message: format!(
                    "Invalid date format at row {}: '{}'. Expected formats: 4/5/2025, 04/05/2025, etc.",
                    line, date_text
                ),
                row: Some(line),
            });
        };
        let time_text = field(6);
        let Some(time) = parse_import_time(time_text) else {
            return Err(StocktakeError::Import {
                message: format!(
                    "Invalid time format at row {}: '{}'. Expected formats: 1:00 PM, 01:00 PM, 13:00, etc.",
                    line, time_text
                ),
                row: Some(line),
            });
        };

        records.push(InventoryRecord {
            asset_tag: field(0).to_owned(),
            description: field(1).to_owned(),
            serial_number: field(2).to_owned(),
            transfer_sheet: field(3).to_owned(),
            notes: field(4).to_owned(),
            date: date.format(DATE_FORMAT).to_string(),
            time: time.format(TIME_FORMAT).to_string(),
            location: field(7).to_owned(),
            transferred_by: field(8).to_owned(),
            received_by: field(9).to_owned(),
            color: field(10).to_owned(),
        });
    }
    let inserted = store.bulk_insert(&records)?;
    info!(rows = inserted, "transaction import complete");
    Ok(inserted)
}

/// Reads transaction rows from delimited text, skipping the header line, and
/// hands them to [`import_transaction_rows`].
pub fn import_transaction_csv<R: Read>(store: &mut Store, input: R) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    import_transaction_rows(store, &rows)
}

/// Reconciles externally supplied catalog rows against `known_inventory`,
/// inserting only assets not already present. Uniqueness is checked by
/// serial number when one is given, otherwise by asset tag; rows with both
/// keys empty are skipped. A duplicate-constraint failure during insert also
/// counts as a skip. Returns the number of rows inserted; reruns against the
/// same source insert nothing.
pub fn reconcile_known_assets(store: &Store, assets: &[KnownAsset]) -> Result<usize> {
    let mut inserted = 0;
    for asset in assets {
        let asset_tag = asset.asset_tag.trim();
        let serial = asset.serial_number.trim();
        if asset_tag.is_empty() && serial.is_empty() {
            continue;
        }

        let exists = if !serial.is_empty() {
            catalog_count(store, "serial_number", serial)?
        } else {
            catalog_count(store, "asset_tag", asset_tag)?
        } > 0;
        if exists {
            continue;
        }

        let outcome = store.execute(
            "insert into known_inventory (asset_tag, description, serial_number) values (?, ?, ?)",
            &[&asset_tag, &asset.description.trim(), &serial],
        );
        match outcome {
            Ok(_) => inserted += 1,
            Err(StocktakeError::Constraint(message)) => {
                debug!(%message, "duplicate catalog row skipped");
            }
            Err(e) => return Err(e),
        }
    }
    info!(inserted, scanned = assets.len(), "reference catalog reconciled");
    Ok(inserted)
}

// column is one of two fixed names, never caller input
fn catalog_count(store: &Store, column: &str, value: &str) -> Result<i64> {
    let sql = format!("select count(*) from known_inventory where {} = ?", column);
    let rows = store.query(&sql, &[&value])?;
    Ok(rows
        .first()
        .and_then(|r| r.first())
        .and_then(|v| v.as_integer())
        .unwrap_or(0))
}

/// Reads catalog rows (asset tag, description, serial number) from delimited
/// text, skipping the header line, and hands them to
/// [`reconcile_known_assets`].
pub fn reconcile_known_csv<R: Read>(store: &Store, input: R) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let mut assets = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or("");
        assets.push(KnownAsset::new(field(0), field(1), field(2)));
    }
    reconcile_known_assets(store, &assets)
}

/// Writes every inventory row, ordered by the temporal key descending, as
/// delimited text with the fixed twelve-column header. Returns the number of
/// data rows written.
pub fn export_csv<W: Write>(store: &Store, output: W) -> Result<usize> {
    let rows = store.all_rows()?;
    let mut writer = csv::Writer::from_writer(output);
    writer
        .write_record(GRID_COLUMNS)
        .map_err(|e| StocktakeError::Persistence(e.to_string()))?;
    for row in &rows {
        let fields: Vec<String> = row.iter().map(|v| v.text()).collect();
        writer
            .write_record(&fields)
            .map_err(|e| StocktakeError::Persistence(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| StocktakeError::Persistence(e.to_string()))?;
    info!(rows = rows.len(), "export complete");
    Ok(rows.len())
}
