//! Record types for the inventory store.
//!
//! An [`InventoryRecord`] carries the eleven text fields of one transfer
//! entry. A [`KnownAsset`] is one row of the reference catalog used as a
//! search fallback. Field names and their order are fixed here and shared by
//! every statement builder, importer and exporter so that column positions
//! never drift between the write and read paths.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::error::{Result, StocktakeError};

/// Canonical stored date format, e.g. `04/05/2025`.
pub const DATE_FORMAT: &str = "%m/%d/%Y";
/// Canonical stored time format, e.g. `01:00 PM`.
pub const TIME_FORMAT: &str = "%I:%M %p";

/// Column names of the `inventory` table, in persisted order (identity excluded).
pub const FIELDS: [&str; 11] = [
    "asset_tag",
    "description",
    "serial_number",
    "transfer_sheet",
    "notes",
    "date",
    "time",
    "location",
    "transferred_by",
    "received_by",
    "color",
];

/// Display headers for full rows, identity first.
pub const GRID_COLUMNS: [&str; 12] = [
    "ID",
    "Asset Tag",
    "Description",
    "Serial Number",
    "Transfer Sheet",
    "Notes",
    "Date",
    "Time",
    "Location",
    "Transferred By",
    "Received By",
    "Color",
];

/// One inventory transfer entry. Identity is assigned by the store on insert
/// and never carried here; updates address rows by identity explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryRecord {
    pub asset_tag: String,
    pub description: String,
    pub serial_number: String,
    pub transfer_sheet: String,
    pub notes: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub transferred_by: String,
    pub received_by: String,
    pub color: String,
}

impl InventoryRecord {
    /// Builds a record from a raw string-keyed field map. Keys not present in
    /// the map come out empty and are left for [`InventoryRecord::validate`]
    /// to judge; unknown keys are ignored.
    pub fn from_map(raw: &HashMap<String, String>) -> Self {
        let take = |key: &str| raw.get(key).cloned().unwrap_or_default();
        InventoryRecord {
            asset_tag: take("asset_tag"),
            description: take("description"),
            serial_number: take("serial_number"),
            transfer_sheet: take("transfer_sheet"),
            notes: take("notes"),
            date: take("date"),
            time: take("time"),
            location: take("location"),
            transferred_by: take("transferred_by"),
            received_by: take("received_by"),
            color: take("color"),
        }
    }

    /// Field values in [`FIELDS`] order, for parameter binding.
    pub fn values(&self) -> [&str; 11] {
        [
            &self.asset_tag,
            &self.description,
            &self.serial_number,
            &self.transfer_sheet,
            &self.notes,
            &self.date,
            &self.time,
            &self.location,
            &self.transferred_by,
            &self.received_by,
            &self.color,
        ]
    }

    /// Checks the invariants every persisted record must satisfy: a non-empty
    /// serial number and date/time strings in their canonical stored formats.
    /// No write path accepts a record this rejects.
    pub fn validate(&self) -> Result<()> {
        if self.serial_number.trim().is_empty() {
            return Err(StocktakeError::Validation(
                "Serial Number is required.".into(),
            ));
        }
        if !canonical_date(&self.date) {
            return Err(StocktakeError::Validation(format!(
                "Invalid Date format: '{}' (expected MM/dd/yyyy)",
                self.date
            )));
        }
        if !canonical_time(&self.time) {
            return Err(StocktakeError::Validation(format!(
                "Invalid Time format: '{}' (expected hh:mm AM/PM)",
                self.time
            )));
        }
        Ok(())
    }
}

/// One row of the reference catalog (`known_inventory`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownAsset {
    pub asset_tag: String,
    pub description: String,
    pub serial_number: String,
}

impl KnownAsset {
    pub fn new(asset_tag: &str, description: &str, serial_number: &str) -> Self {
        KnownAsset {
            asset_tag: asset_tag.trim().to_owned(),
            description: description.trim().to_owned(),
            serial_number: serial_number.trim().to_owned(),
        }
    }
}

// chrono accepts unpadded numerics, so a plain parse would let "4/5/2025"
// through; requiring the reformatted value to equal the input pins the
// canonical zero-padded form.
fn canonical_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string() == s)
        .unwrap_or(false)
}

fn canonical_time(s: &str) -> bool {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .map(|t| t.format(TIME_FORMAT).to_string() == s)
        .unwrap_or(false)
}
