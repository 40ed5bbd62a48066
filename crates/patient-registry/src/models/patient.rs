//! Patient models.

use serde::{Deserialize, Serialize};

/// A stored patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Surrogate key, assigned by the store at insert, never reused
    pub id: i64,
    /// First name (required, non-empty)
    pub first_name: String,
    /// Last name (required, non-empty)
    pub last_name: String,
    /// Postal address
    pub address: Option<String>,
    /// Email (required, unique across all records)
    pub email: String,
    /// Phone number
    pub phone: Option<String>,
    /// Date of birth, ISO 8601 (`YYYY-MM-DD`)
    pub date_of_birth: Option<String>,
    /// Date the record was entered, ISO 8601 (`YYYY-MM-DD`)
    pub date_of_entry: String,
}

impl Patient {
    /// The mutable portion of this record, as passed to `add`/`update`.
    pub fn fields(&self) -> PatientFields {
        PatientFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            address: self.address.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            date_of_birth: self.date_of_birth.clone(),
            date_of_entry: self.date_of_entry.clone(),
        }
    }
}

/// Every mutable field of a patient record, as collected from a form.
///
/// This is the single value `PatientStore::add` and `PatientStore::update`
/// take; the `id` is assigned by the store and never part of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientFields {
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub date_of_entry: String,
}

impl PatientFields {
    /// Copy with leading/trailing whitespace stripped from every text
    /// field. Optional fields that trim to empty become `None`.
    pub fn trimmed(&self) -> Self {
        let trim_opt = |s: &Option<String>| {
            s.as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
        };
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            address: trim_opt(&self.address),
            email: self.email.trim().to_string(),
            phone: trim_opt(&self.phone),
            date_of_birth: trim_opt(&self.date_of_birth),
            date_of_entry: self.date_of_entry.trim().to_string(),
        }
    }
}
