//! Patient CRUD and search operations.

use std::collections::BTreeSet;

use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use super::{PatientStore, StoreError, StoreResult};
use crate::models::{Patient, PatientFields};

const PATIENT_COLUMNS: &str =
    "id, first_name, last_name, address, email, phone, date_of_birth, date_of_entry";

fn patient_from_row(row: &Row) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        address: row.get(3)?,
        email: row.get(4)?,
        phone: row.get(5)?,
        date_of_birth: row.get(6)?,
        date_of_entry: row.get(7)?,
    })
}

/// Map a unique-constraint violation on the email column to
/// `DuplicateEmail`; pass anything else through as a store fault.
fn map_constraint_err(e: rusqlite::Error) -> StoreError {
    match &e {
        rusqlite::Error::SqliteFailure(err, Some(msg))
            if err.code == rusqlite::ErrorCode::ConstraintViolation
                && msg.contains("patients.email") =>
        {
            StoreError::DuplicateEmail
        }
        _ => StoreError::Sqlite(e),
    }
}

impl PatientStore {
    /// Insert a new patient and return its assigned id.
    pub fn add(&self, fields: &PatientFields) -> StoreResult<i64> {
        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT INTO patients (
                first_name, last_name, address, email, phone,
                date_of_birth, date_of_entry
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                fields.first_name,
                fields.last_name,
                fields.address,
                fields.email,
                fields.phone,
                fields.date_of_birth,
                fields.date_of_entry,
            ],
        )
        .map_err(map_constraint_err)?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a patient by id. Absent ids are `None`, not an error.
    pub fn get(&self, id: i64) -> StoreResult<Option<Patient>> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?"),
            [id],
            patient_from_row,
        )
        .optional()
        .map_err(Into::into)
    }

    /// Overwrite every mutable field of the patient with the given id.
    ///
    /// The id itself never changes. Fails with `NotFound` when no row has
    /// that id, and with `DuplicateEmail` when the new email belongs to a
    /// different row.
    pub fn update(&self, id: i64, fields: &PatientFields) -> StoreResult<()> {
        let conn = self.connect()?;
        let rows_affected = conn
            .execute(
                r#"
                UPDATE patients SET
                    first_name = ?2,
                    last_name = ?3,
                    address = ?4,
                    email = ?5,
                    phone = ?6,
                    date_of_birth = ?7,
                    date_of_entry = ?8
                WHERE id = ?1
                "#,
                params![
                    id,
                    fields.first_name,
                    fields.last_name,
                    fields.address,
                    fields.email,
                    fields.phone,
                    fields.date_of_birth,
                    fields.date_of_entry,
                ],
            )
            .map_err(map_constraint_err)?;
        if rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    /// Hard-delete the patient with the given id. Deleting an absent id
    /// is a no-op.
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM patients WHERE id = ?", [id])?;
        Ok(())
    }

    /// All patients, newest first.
    pub fn list_all(&self) -> StoreResult<Vec<Patient>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY id DESC"
        ))?;
        let rows = stmt.query_map([], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Filtered patient list, newest first. Active filters combine with
    /// AND:
    ///
    /// - `free_text`, when non-empty, keeps rows where it appears as a
    ///   substring of first name, last name, email, or phone
    ///   (case-insensitive, SQLite `LIKE`).
    /// - `last_name`, when `Some`, is an exact match; `None` matches
    ///   anything.
    /// - `email_domain`, when `Some(d)`, keeps rows whose email ends with
    ///   `@d`.
    pub fn search(
        &self,
        free_text: &str,
        last_name: Option<&str>,
        email_domain: Option<&str>,
    ) -> StoreResult<Vec<Patient>> {
        let conn = self.connect()?;
        let mut sql = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE 1=1");
        let mut args: Vec<String> = Vec::new();

        if !free_text.is_empty() {
            sql.push_str(
                " AND (first_name LIKE ? OR last_name LIKE ? OR email LIKE ? OR phone LIKE ?)",
            );
            let pattern = format!("%{free_text}%");
            args.extend(std::iter::repeat(pattern).take(4));
        }
        if let Some(last) = last_name {
            sql.push_str(" AND last_name = ?");
            args.push(last.to_string());
        }
        if let Some(domain) = email_domain {
            sql.push_str(" AND email LIKE ?");
            args.push(format!("%@{domain}"));
        }
        sql.push_str(" ORDER BY id DESC");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args), patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Sorted distinct non-empty last names, for filter dropdowns.
    pub fn distinct_last_names(&self) -> StoreResult<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT last_name FROM patients WHERE last_name <> '' ORDER BY last_name",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Sorted distinct email domains (the part after `@`) across all
    /// current records, for filter dropdowns.
    pub fn distinct_email_domains(&self) -> StoreResult<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT email FROM patients")?;
        let emails = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut domains = BTreeSet::new();
        for email in emails {
            let email = email?;
            if let Some((_, domain)) = email.split_once('@') {
                domains.insert(domain.to_string());
            }
        }
        Ok(domains.into_iter().collect())
    }
}
