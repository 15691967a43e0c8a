//! Stocktake – an embedded inventory data-access and search-aggregation engine.
//!
//! Stocktake persists inventory transfer records in a single SQLite file and
//! answers the questions an asset-tracking front end asks of them:
//! * A [`record::InventoryRecord`] carries the eleven text fields of one
//!   transfer entry; a [`record::KnownAsset`] is one row of the reference
//!   catalog of previously-known assets.
//! * The [`store::Store`] owns the backing connection, guarantees the schema
//!   and is the sole gateway for reads and writes, including the atomic
//!   all-or-nothing bulk insert and the 1-based paginated reader.
//! * Chronological order is derived, never stored: records keep a
//!   `MM/dd/yyyy` date and a 12-hour `hh:mm AM/PM` time as free text, and
//!   [`order::temporal_key`] turns them into a sortable 24-hour key that is
//!   recomputed identically by every read path.
//! * [`search`] matches up to three criteria across the primary table with a
//!   reference-catalog fallback and consolidates multi-row matches into
//!   comma-joined display values.
//! * [`import`] reconciles external catalog rows without ever duplicating an
//!   asset, and imports transaction rows strictly: one bad date aborts the
//!   whole batch.
//!
//! ## Modules
//! * [`record`] – Record types, field order and validation.
//! * [`order`] – The temporal ordering function and its SQL registration.
//! * [`store`] – SQLite persistence: schema, query/execute primitives,
//!   CRUD, bulk insert, pagination, settings.
//! * [`search`] – Multi-field OR search and consolidation.
//! * [`import`] – Catalog reconciliation, transaction import, full export.
//! * [`configuration`] – Config file / environment loading.
//! * [`error`] – The crate-wide error taxonomy.
//!
//! ## Quick Start
//! ```
//! use stocktake::record::InventoryRecord;
//! use stocktake::store::Store;
//! let store = Store::open_in_memory().unwrap();
//! let record = InventoryRecord {
//!     serial_number: "SN1".into(),
//!     date: "04/05/2025".into(),
//!     time: "01:00 PM".into(),
//!     ..Default::default()
//! };
//! let id = store.insert(&record).unwrap();
//! assert!(id >= 1);
//! ```
//!
//! ## Concurrency
//! Single process, single writer, fully synchronous. The bulk-insert
//! transaction is the only multi-statement atomic unit; nothing is retried
//! automatically and there are no timeouts or cancellation.

pub mod configuration;
pub mod error;
pub mod import;
pub mod order;
pub mod record;
pub mod search;
pub mod store;
