//! The record abstraction shared by every domain collection.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::labels::{label_enum, Tone};

label_enum! {
    /// Which collection a record belongs to.
    pub enum EntityKind {
        Patient => "patient",
        LabTest => "test",
        Invoice => "invoice",
        InventoryItem => "inventory item",
        StaffMember => "staff member",
        Franchise => "franchise",
        Report => "report",
        Booking => "booking",
    }
}

impl EntityKind {
    /// Backing table / collection name.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Patient => "patients",
            EntityKind::LabTest => "lab_tests",
            EntityKind::Invoice => "invoices",
            EntityKind::InventoryItem => "inventory_items",
            EntityKind::StaffMember => "staff_members",
            EntityKind::Franchise => "franchises",
            EntityKind::Report => "reports",
            EntityKind::Booking => "bookings",
        }
    }

    /// Prefix of ids allocated for new records (e.g. `P004`, `INV-004`).
    pub fn id_prefix(&self) -> &'static str {
        match self {
            EntityKind::Patient => "P",
            EntityKind::LabTest => "T",
            EntityKind::Invoice => "INV-",
            EntityKind::InventoryItem => "INV",
            EntityKind::StaffMember => "STF",
            EntityKind::Franchise => "FRN",
            EntityKind::Report => "RPT-",
            EntityKind::Booking => "BK",
        }
    }
}

/// A primitive value behind a display field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    /// Label of a closed enum (status, category, method).
    Enum(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn label(value: impl fmt::Display) -> Self {
        FieldValue::Enum(value.to_string())
    }

    /// Text the query engine matches against and the table cell shows.
    pub fn display_text(&self) -> String {
        self.to_string()
    }

    /// Numeric view, when the value is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Ordering used by column sorting. Values of different kinds compare by
    /// their display text.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            _ => self
                .display_text()
                .to_lowercase()
                .cmp(&other.display_text().to_lowercase()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Enum(s) => f.write_str(s),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

/// A single invariant violation on a record or form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A record failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} {id}: {}", join_errors(.errors))]
pub struct ValidationError {
    pub kind: EntityKind,
    pub id: String,
    pub errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Common shape of every domain entity: a stable id plus named display fields.
pub trait Record {
    /// Collection this record type lives in.
    const KIND: EntityKind;

    /// Names of all display fields, in column order.
    const FIELDS: &'static [&'static str];

    /// Fields the search box matches against.
    const SEARCH_FIELDS: &'static [&'static str];

    fn id(&self) -> &str;

    /// Badge category of the record's status column.
    fn status_tone(&self) -> Tone;

    /// Look up a display field by name. Unknown names yield `None`.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Invariant violations, empty when the record is valid.
    fn field_errors(&self) -> Vec<FieldError>;

    fn display_fields(&self) -> BTreeMap<String, FieldValue> {
        Self::FIELDS
            .iter()
            .filter_map(|name| self.field(name).map(|v| (name.to_string(), v)))
            .collect()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let errors = self.field_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                kind: Self::KIND,
                id: self.id().to_string(),
                errors,
            })
        }
    }
}

/// Collects field errors while checking a record.
#[derive(Debug, Default)]
pub(crate) struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, "is required");
        }
        self
    }

    pub fn non_negative(&mut self, field: &str, value: f64) -> &mut Self {
        if !value.is_finite() || value < 0.0 {
            self.fail(field, "must be a non-negative number");
        }
        self
    }

    pub fn ensure(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.fail(field, message);
        }
        self
    }

    pub fn fail(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn finish(&mut self) -> Vec<FieldError> {
        std::mem::take(&mut self.errors)
    }
}
