//! Patient Registry Core Library
//!
//! SQLite-backed record management for a single `patients` table: create,
//! list, search, filter, edit, and delete patient records behind a small
//! typed API.
//!
//! # Architecture
//!
//! ```text
//! Form UI (external) → validate → PatientStore → SQLite
//!                                      │
//!                          schema migration at open()
//!                        (table → columns → backfill)
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite store with per-operation scoped connections
//! - [`models`]: Domain types (Patient, PatientFields)
//! - [`validate`]: Pure format checks and the field-level error taxonomy

pub mod db;
pub mod models;
pub mod validate;

// Re-export commonly used types
pub use db::{today_iso, PatientStore, StoreError, StoreResult};
pub use models::{Patient, PatientFields};
pub use validate::{is_valid_email, is_valid_phone, validate_fields, ValidationError};
