//! Configuration loading.
//!
//! The engine itself is stateless per call; everything it needs to open a
//! store arrives through [`StoreConfig`]. Values come from an optional
//! config file merged with `STOCKTAKE_*` environment variables on top of
//! built-in defaults.

use config::Config;
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_DATABASE_PATH: &str = "inventory.db";
pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path of the on-disk store file.
    pub database_path: String,
    /// Rows per page for the paginated reader.
    pub page_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            database_path: DEFAULT_DATABASE_PATH.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StoreConfig {
    /// Loads configuration from `<name>.{toml,json,...}` if present, then
    /// environment variables, falling back to defaults for anything unset.
    pub fn load(name: &str) -> Result<StoreConfig> {
        let settings = Config::builder()
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .set_default("page_size", DEFAULT_PAGE_SIZE as i64)?
            .add_source(config::File::with_name(name).required(false))
            .add_source(config::Environment::with_prefix("STOCKTAKE"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
