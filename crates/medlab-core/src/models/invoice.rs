//! Billing models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::labels::{label_enum, Tone};
use super::record::{Checks, EntityKind, FieldError, FieldValue, Record};

label_enum! {
    pub enum InvoiceStatus {
        Paid => "paid",
        Pending => "pending",
        Overdue => "overdue",
    }
}

impl InvoiceStatus {
    /// Each status renders as its own category; overdue is the only danger tone.
    pub fn tone(&self) -> Tone {
        match self {
            InvoiceStatus::Paid => Tone::Success,
            InvoiceStatus::Pending => Tone::Warning,
            InvoiceStatus::Overdue => Tone::Danger,
        }
    }

    /// Whether the amount still has to be collected.
    pub fn is_outstanding(&self) -> bool {
        !matches!(self, InvoiceStatus::Paid)
    }
}

label_enum! {
    pub enum PaymentMethod {
        Upi => "UPI",
        Cash => "Cash",
        Card => "Card",
        Online => "Online",
    }
}

/// A patient invoice.
///
/// `final_amount` is never stored: it is always `amount - discount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice number (e.g. "INV-001")
    pub id: String,
    /// Weak reference to the billed patient; no cascade on delete
    pub patient_id: String,
    /// Patient name as printed on the bill
    pub patient_name: String,
    /// Names of the tests billed
    pub tests: Vec<String>,
    /// Gross amount before discount
    pub amount: f64,
    pub discount: f64,
    pub status: InvoiceStatus,
    pub payment_method: PaymentMethod,
    /// Billing date
    pub date: NaiveDate,
    /// Payment due date
    pub due_date: NaiveDate,
}

impl Invoice {
    /// Create a pending invoice dated today and due the same day.
    pub fn new(id: String, patient_id: String, patient_name: String, amount: f64) -> Self {
        let today = chrono::Utc::now().date_naive();
        Self {
            id,
            patient_id,
            patient_name,
            tests: Vec::new(),
            amount,
            discount: 0.0,
            status: InvoiceStatus::Pending,
            payment_method: PaymentMethod::Cash,
            date: today,
            due_date: today,
        }
    }

    /// Amount payable after discount.
    pub fn final_amount(&self) -> f64 {
        self.amount - self.discount
    }
}

impl Record for Invoice {
    const KIND: EntityKind = EntityKind::Invoice;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "patientId",
        "patientName",
        "tests",
        "amount",
        "discount",
        "finalAmount",
        "status",
        "paymentMethod",
        "date",
        "dueDate",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["patientName", "id", "patientId"];

    fn id(&self) -> &str {
        &self.id
    }

    fn status_tone(&self) -> Tone {
        self.status.tone()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => FieldValue::text(&self.id),
            "patientId" => FieldValue::text(&self.patient_id),
            "patientName" => FieldValue::text(&self.patient_name),
            "tests" => FieldValue::List(self.tests.clone()),
            "amount" => self.amount.into(),
            "discount" => self.discount.into(),
            "finalAmount" => self.final_amount().into(),
            "status" => FieldValue::label(self.status),
            "paymentMethod" => FieldValue::label(self.payment_method),
            "date" => self.date.into(),
            "dueDate" => self.due_date.into(),
            _ => return None,
        })
    }

    fn field_errors(&self) -> Vec<FieldError> {
        Checks::new()
            .require("id", &self.id)
            .require("patientId", &self.patient_id)
            .ensure(!self.tests.is_empty(), "tests", "at least one test is required")
            .non_negative("amount", self.amount)
            .non_negative("discount", self.discount)
            .ensure(
                self.discount <= self.amount,
                "discount",
                "must not exceed the amount",
            )
            .ensure(
                self.due_date >= self.date,
                "dueDate",
                "must not be before the invoice date",
            )
            .finish()
    }
}
