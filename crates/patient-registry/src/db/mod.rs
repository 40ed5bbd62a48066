//! SQLite store for patient records.
//!
//! `PatientStore` holds only the database path; every operation opens a
//! scoped connection and releases it on every exit path. There is no
//! shared in-process state, so concurrent callers fall through to
//! SQLite's own locking.

mod migrate;
mod patients;
mod schema;

pub use migrate::{backfill_date_of_entry, ensure_migrated_columns, ensure_table};
pub use schema::SCHEMA;

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use thiserror::Error;
use tracing::info;

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Another record already holds this email.
    #[error("email already exists")]
    DuplicateEmail,

    /// No record with this id.
    #[error("patient not found: id {0}")]
    NotFound(i64),

    /// Any other persistence failure. Not retried.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to the patient database.
///
/// `open` runs the schema migration before returning, so a constructed
/// store always sees a fully migrated table. Migration failure is fatal
/// to construction; there is no partially-migrated mode.
pub struct PatientStore {
    path: PathBuf,
}

impl PatientStore {
    /// Open the store at `path`, creating and migrating the database as
    /// needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        let conn = store.connect()?;
        migrate::run(&conn)?;
        info!(path = %store.path.display(), "patient store opened");
        Ok(store)
    }

    /// Open a fresh connection. One per operation; dropped on return.
    pub(crate) fn connect(&self) -> StoreResult<Connection> {
        Ok(Connection::open(&self.path)?)
    }
}

/// Current local date as an ISO 8601 string (`YYYY-MM-DD`).
///
/// Used as the backfill value during migration and as the default
/// `date_of_entry` for new form submissions.
pub fn today_iso() -> String {
    chrono::Local::now().date_naive().to_string()
}
