//! Multi-field OR search with consolidation.
//!
//! A search takes up to three criteria (asset tag, serial number, transfer
//! sheet) and matches the `inventory` table with one OR clause per supplied
//! criterion, exact and case-sensitive, ordered by the temporal key
//! descending. When nothing matches and an asset tag or serial was given,
//! the `known_inventory` reference catalog is tried with just those two
//! columns as a fallback.
//!
//! Because a criterion such as a shared serial number can match several
//! historical rows, each display field of the result is *consolidated*: the
//! distinct non-empty values observed across all matched rows are joined
//! with `", "` in the order the rows came back. Values containing commas are
//! not escaped; consolidation is a display aid, not a reversible encoding.

use rusqlite::ToSql;
use tracing::{debug, info};

use crate::error::{Result, StocktakeError};
use crate::order::ORDER_BY_TEMPORAL_DESC;
use crate::store::{Row, Store};

/// Raw search input. Blank or whitespace-only criteria count as absent.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub asset_tag: Option<String>,
    pub serial_number: Option<String>,
    pub transfer_sheet: Option<String>,
}

impl SearchCriteria {
    fn normalized(&self) -> SearchCriteria {
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };
        SearchCriteria {
            asset_tag: clean(&self.asset_tag),
            serial_number: clean(&self.serial_number),
            transfer_sheet: clean(&self.transfer_sheet),
        }
    }

    fn is_empty(&self) -> bool {
        self.asset_tag.is_none() && self.serial_number.is_none() && self.transfer_sheet.is_none()
    }
}

/// Per-field consolidated display values for a set of matched rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consolidated {
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

impl Consolidated {
    /// Consolidates full inventory rows (identity at column 0, the eleven
    /// record fields at columns 1..=11).
    pub fn from_inventory_rows(rows: &[Row]) -> Consolidated {
        Consolidated {
            asset_tag: consolidate_column(rows, 1),
            description: consolidate_column(rows, 2),
            serial_number: consolidate_column(rows, 3),
            transfer_sheet: consolidate_column(rows, 4),
            notes: consolidate_column(rows, 5),
            date: consolidate_column(rows, 6),
            time: consolidate_column(rows, 7),
            location: consolidate_column(rows, 8),
            transferred_by: consolidate_column(rows, 9),
            received_by: consolidate_column(rows, 10),
            color: consolidate_column(rows, 11),
        }
    }

    /// Consolidates reference-catalog rows, which only carry asset tag,
    /// description and serial number.
    pub fn from_known_rows(rows: &[Row]) -> Consolidated {
        Consolidated {
            asset_tag: consolidate_column(rows, 1),
            description: consolidate_column(rows, 2),
            serial_number: consolidate_column(rows, 3),
            ..Consolidated::default()
        }
    }
}

/// What a search produced. A primary-table hit takes precedence over the
/// reference catalog; an empty result on both sides is a plain `NoMatch`,
/// never an error.
#[derive(Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Matches in the primary table: the full ordered rows for the grid plus
    /// the consolidated field values.
    Inventory { rows: Vec<Row>, consolidated: Consolidated },
    /// No primary match, but the reference catalog knows the asset. The grid
    /// stays empty; only consolidated values are available.
    Known { consolidated: Consolidated },
    NoMatch,
}

/// Runs a search. At least one non-empty criterion is required.
pub fn search(store: &Store, criteria: &SearchCriteria) -> Result<SearchOutcome> {
    let criteria = criteria.normalized();
    if criteria.is_empty() {
        return Err(StocktakeError::Validation(
            "Enter an Asset Tag, Serial Number, or Transfer Sheet to search.".into(),
        ));
    }

    let mut conditions: Vec<&str> = Vec::new();
    let mut values: Vec<&String> = Vec::new();
    if let Some(v) = &criteria.asset_tag {
        conditions.push("asset_tag = ?");
        values.push(v);
    }
    if let Some(v) = &criteria.serial_number {
        conditions.push("serial_number = ?");
        values.push(v);
    }
    if let Some(v) = &criteria.transfer_sheet {
        conditions.push("transfer_sheet = ?");
        values.push(v);
    }
    let sql = format!(
        "select * from inventory where {} {}",
        conditions.join(" or "),
        ORDER_BY_TEMPORAL_DESC
    );
    let params: Vec<&dyn ToSql> = values.iter().map(|v| v as &dyn ToSql).collect();
    let rows = store.query(&sql, &params)?;
    if !rows.is_empty() {
        info!(rows = rows.len(), "search matched inventory");
        let consolidated = Consolidated::from_inventory_rows(&rows);
        return Ok(SearchOutcome::Inventory { rows, consolidated });
    }

    // transfer_sheet is not a reference-catalog column, so the fallback only
    // applies when an asset tag or serial was supplied
    let mut known_conditions: Vec<&str> = Vec::new();
    let mut known_values: Vec<&String> = Vec::new();
    if let Some(v) = &criteria.asset_tag {
        known_conditions.push("asset_tag = ?");
        known_values.push(v);
    }
    if let Some(v) = &criteria.serial_number {
        known_conditions.push("serial_number = ?");
        known_values.push(v);
    }
    if !known_conditions.is_empty() {
        let sql = format!(
            "select * from known_inventory where {}",
            known_conditions.join(" or ")
        );
        let params: Vec<&dyn ToSql> =
            known_values.iter().map(|v| v as &dyn ToSql).collect();
        let known = store.query(&sql, &params)?;
        if !known.is_empty() {
            info!(rows = known.len(), "search matched reference catalog");
            return Ok(SearchOutcome::Known {
                consolidated: Consolidated::from_known_rows(&known),
            });
        }
    }

    debug!("search matched nothing");
    Ok(SearchOutcome::NoMatch)
}

fn consolidate_column(rows: &[Row], column: usize) -> String {
    let mut seen: Vec<String> = Vec::new();
    for row in rows {
        let Some(value) = row.get(column) else { continue };
        let value = value.text();
        let value = value.trim();
        if value.is_empty() || seen.iter().any(|s| s == value) {
            continue;
        }
        seen.push(value.to_owned());
    }
    seen.join(", ")
}
