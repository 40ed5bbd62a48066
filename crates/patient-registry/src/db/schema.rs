//! Base SQLite schema.

/// Base schema for the patient database.
///
/// The two date columns are intentionally absent here: they arrived after
/// the first release, so [`super::ensure_migrated_columns`] adds them on
/// fresh and legacy databases alike. AUTOINCREMENT keeps deleted ids from
/// being reused.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    address TEXT,
    email TEXT NOT NULL UNIQUE,
    phone TEXT
);
"#;
