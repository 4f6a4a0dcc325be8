//! Dialog form parsing.
//!
//! Dialogs hand over their field values as strings keyed by field name. A
//! form is parsed into a record with every problem collected as a
//! [`FieldError`] for the dialog to show next to the field; parsing never
//! panics and never stops at the first problem.

mod entities;

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};

use crate::models::{FieldError, Record};

/// Raw dialog values, keyed by field name.
pub type FormData = BTreeMap<String, String>;

/// Values forms fall back to.
#[derive(Debug, Clone, PartialEq)]
pub struct FormContext {
    pub today: NaiveDate,
    /// Days between invoice date and due date when no due date is given.
    pub payment_terms_days: u32,
}

impl FormContext {
    pub fn new(today: NaiveDate, payment_terms_days: u32) -> Self {
        Self {
            today,
            payment_terms_days,
        }
    }
}

/// A record that can be built from dialog values.
pub trait FromForm: Record + Sized {
    fn from_form(id: String, form: &FormData, ctx: &FormContext) -> Result<Self, Vec<FieldError>>;

    /// Values an edit of `current` is parsed from.
    fn edit_form(current: &Self, submitted: &FormData) -> FormData {
        merge_for_edit(current, submitted)
    }
}

/// Form values for editing `record`: its current display values overlaid
/// with what the dialog submitted.
pub fn merge_for_edit<T: Record>(record: &T, submitted: &FormData) -> FormData {
    let mut form: FormData = record
        .display_fields()
        .into_iter()
        .map(|(name, value)| (name, value.display_text()))
        .collect();
    form.extend(submitted.iter().map(|(k, v)| (k.clone(), v.clone())));
    form
}

/// Build form data from any string map (e.g. one received over FFI).
pub fn form_data(values: HashMap<String, String>) -> FormData {
    values.into_iter().collect()
}

const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];

/// Reads typed values out of a form, collecting errors as it goes.
pub(crate) struct FormReader<'a> {
    form: &'a FormData,
    errors: Vec<FieldError>,
}

impl<'a> FormReader<'a> {
    pub fn new(form: &'a FormData) -> Self {
        Self {
            form,
            errors: Vec::new(),
        }
    }

    /// Trimmed value; blank counts as absent.
    fn raw(&self, name: &str) -> Option<&'a str> {
        self.form
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn fail(&mut self, name: &str, message: &str) {
        self.errors.push(FieldError::new(name, message));
    }

    pub fn text(&mut self, name: &str) -> String {
        match self.raw(name) {
            Some(v) => v.to_string(),
            None => {
                self.fail(name, "is required");
                String::new()
            }
        }
    }

    pub fn text_or_empty(&self, name: &str) -> String {
        self.raw(name).unwrap_or_default().to_string()
    }

    pub fn text_or(&self, name: &str, default: &str) -> String {
        self.raw(name).unwrap_or(default).to_string()
    }

    fn parse_number(&mut self, name: &str, raw: &str) -> Option<f64> {
        let cleaned: String = raw.chars().filter(|c| *c != ',' && *c != '₹').collect();
        match cleaned.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => {
                self.fail(name, "must be a number");
                None
            }
        }
    }

    pub fn number(&mut self, name: &str) -> f64 {
        match self.raw(name) {
            Some(raw) => self.parse_number(name, raw).unwrap_or_default(),
            None => {
                self.fail(name, "is required");
                0.0
            }
        }
    }

    pub fn number_or(&mut self, name: &str, default: f64) -> f64 {
        match self.raw(name) {
            Some(raw) => self.parse_number(name, raw).unwrap_or(default),
            None => default,
        }
    }

    fn parse_count<N: TryFrom<i64> + Default>(&mut self, name: &str, raw: &str) -> N {
        match raw.parse::<i64>() {
            Ok(n) if n < 0 => {
                self.fail(name, "must not be negative");
                N::default()
            }
            Ok(n) => N::try_from(n).unwrap_or_else(|_| {
                self.fail(name, "is too large");
                N::default()
            }),
            Err(_) => {
                self.fail(name, "must be a whole number");
                N::default()
            }
        }
    }

    /// Non-negative whole number.
    pub fn count<N: TryFrom<i64> + Default>(&mut self, name: &str) -> N {
        match self.raw(name) {
            Some(raw) => self.parse_count(name, raw),
            None => {
                self.fail(name, "is required");
                N::default()
            }
        }
    }

    pub fn count_or<N: TryFrom<i64> + Default>(&mut self, name: &str, default: N) -> N {
        match self.raw(name) {
            Some(raw) => self.parse_count(name, raw),
            None => default,
        }
    }

    /// A labelled enum value. `placeholder` is only returned alongside an
    /// error.
    pub fn label<E: FromStr>(&mut self, name: &str, placeholder: E) -> E {
        match self.raw(name) {
            Some(raw) => self.parse_label(name, raw, placeholder),
            None => {
                self.fail(name, "is required");
                placeholder
            }
        }
    }

    pub fn label_or<E: FromStr>(&mut self, name: &str, default: E) -> E {
        match self.raw(name) {
            Some(raw) => self.parse_label(name, raw, default),
            None => default,
        }
    }

    fn parse_label<E: FromStr>(&mut self, name: &str, raw: &str, fallback: E) -> E {
        raw.parse().unwrap_or_else(|_| {
            self.fail(name, "is not a recognised option");
            fallback
        })
    }

    fn parse_date(&mut self, name: &str, raw: &str) -> Option<NaiveDate> {
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.fail(name, "must be a date (YYYY-MM-DD)");
                None
            }
        }
    }

    pub fn date_or(&mut self, name: &str, default: NaiveDate) -> NaiveDate {
        match self.raw(name) {
            Some(raw) => self.parse_date(name, raw).unwrap_or(default),
            None => default,
        }
    }

    pub fn optional_date(&mut self, name: &str) -> Option<NaiveDate> {
        let raw = self.raw(name)?;
        self.parse_date(name, raw)
    }

    pub fn time(&mut self, name: &str) -> NaiveTime {
        let Some(raw) = self.raw(name) else {
            self.fail(name, "is required");
            return NaiveTime::MIN;
        };
        TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
            .unwrap_or_else(|| {
                self.fail(name, "must be a time such as 09:30 or 09:30 AM");
                NaiveTime::MIN
            })
    }

    /// Comma-separated list; at least one entry required.
    pub fn list(&mut self, name: &str) -> Vec<String> {
        let items: Vec<String> = self
            .raw(name)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if items.is_empty() {
            self.fail(name, "is required");
        }
        items
    }

    /// The built record, or every error found while reading and validating.
    pub fn finish<T: Record>(self, record: T) -> Result<T, Vec<FieldError>> {
        let errors = self.finish_with(record.field_errors());
        if errors.is_empty() {
            Ok(record)
        } else {
            Err(errors)
        }
    }

    /// Reading errors followed by `validation` errors on fields that read
    /// cleanly.
    pub fn finish_with(mut self, validation: Vec<FieldError>) -> Vec<FieldError> {
        for error in validation {
            if !self.errors.iter().any(|e| e.field == error.field) {
                self.errors.push(error);
            }
        }
        self.errors
    }
}
