//! Billing download of an invoice set.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Invoice;

/// One invoice line in a billing download.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingLine {
    pub invoice_id: String,
    pub patient_id: String,
    pub patient_name: String,
    /// Billed tests
    pub tests: Vec<String>,
    pub amount: f64,
    pub discount: f64,
    pub final_amount: f64,
    pub status: String,
    pub payment_method: String,
    /// Invoice date (YYYY-MM-DD)
    pub date: String,
    pub due_date: String,
}

impl From<&Invoice> for BillingLine {
    fn from(invoice: &Invoice) -> Self {
        Self {
            invoice_id: invoice.id.clone(),
            patient_id: invoice.patient_id.clone(),
            patient_name: invoice.patient_name.clone(),
            tests: invoice.tests.clone(),
            amount: invoice.amount,
            discount: invoice.discount,
            final_amount: invoice.final_amount(),
            status: invoice.status.to_string(),
            payment_method: invoice.payment_method.to_string(),
            date: invoice.date.format("%Y-%m-%d").to_string(),
            due_date: invoice.due_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Totals over a billing download.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BillingTotals {
    pub invoice_count: usize,
    pub amount: f64,
    pub discount: f64,
    pub final_amount: f64,
    /// Final amount still to be collected (pending and overdue)
    pub outstanding: f64,
}

/// A billing download: the invoices a viewer had on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingExport {
    /// Unique id of this download
    pub batch_id: String,
    /// Export timestamp
    pub exported_at: String,
    /// Search text the invoice set was filtered by
    pub query: String,
    pub lines: Vec<BillingLine>,
    pub totals: BillingTotals,
}

impl BillingExport {
    /// Build a download from the invoices in display order.
    pub fn from_invoices<'a>(invoices: impl IntoIterator<Item = &'a Invoice>, query: &str) -> Self {
        let mut totals = BillingTotals::default();
        let lines: Vec<BillingLine> = invoices
            .into_iter()
            .inspect(|invoice| {
                totals.invoice_count += 1;
                totals.amount += invoice.amount;
                totals.discount += invoice.discount;
                totals.final_amount += invoice.final_amount();
                if invoice.status.is_outstanding() {
                    totals.outstanding += invoice.final_amount();
                }
            })
            .map(BillingLine::from)
            .collect();

        let batch_id = Uuid::new_v4().to_string();
        tracing::info!(%batch_id, invoices = lines.len(), "billing export built");

        Self {
            batch_id,
            exported_at: chrono::Utc::now().to_rfc3339(),
            query: query.to_string(),
            lines,
            totals,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format, one row per invoice.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("batch_id,invoice_id,patient_id,patient_name,tests,amount,discount,final_amount,status,payment_method,date,due_date\n");

        for line in &self.lines {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{},{}\n",
                escape_csv(&self.batch_id),
                escape_csv(&line.invoice_id),
                escape_csv(&line.patient_id),
                escape_csv(&line.patient_name),
                escape_csv(&line.tests.join("; ")),
                line.amount,
                line.discount,
                line.final_amount,
                escape_csv(&line.status),
                escape_csv(&line.payment_method),
                line.date,
                line.due_date,
            ));
        }

        csv
    }
}

/// Download format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
