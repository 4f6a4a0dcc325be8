//! MedLab Core Library
//!
//! Data and view layer of the MedLab Pro diagnostic-lab dashboard: the record
//! collections of a lab network, the role policy deciding who sees what, and
//! the view composer a native shell renders from.
//!
//! # Architecture
//!
//! ```text
//!   Sidebar click / search box / dialog submit
//!                     │
//!                     ▼
//!              session::Dashboard ──── access (role policy)
//!                     │
//!        ┌────────────┼─────────────┬──────────────┐
//!        ▼            ▼             ▼              ▼
//!   views::resolve  query::search  forms::FromForm  summary
//!        │            │             │              │
//!        └────────────┴──────┬──────┴──────────────┘
//!                            ▼
//!                    db (SQLite, JSON rows)
//! ```
//!
//! # Core Principle
//!
//! **Navigation never fails.** Unknown or hidden modules render the
//! dashboard; unknown sub-views render the module's default.
//!
//! # Modules
//!
//! - [`models`]: Domain records (Patient, Invoice, Franchise, etc.)
//! - [`db`]: SQLite store with generic CRUD over every collection
//! - [`query`]: Case-insensitive search and column sorting
//! - [`access`]: Roles, modules and the action policy
//! - [`views`]: Navigation schema, columns and view resolution
//! - [`forms`]: Dialog form parsing and validation
//! - [`summary`]: Summary cards and analytics
//! - [`export`]: Billing download
//! - [`session`]: One viewer's dashboard state

pub mod access;
pub mod config;
pub mod db;
pub mod export;
pub mod format;
pub mod forms;
pub mod models;
pub mod query;
pub mod session;
pub mod summary;
pub mod views;

// Re-export commonly used types
pub use access::{Action, ModuleId, Role};
pub use config::DashboardConfig;
pub use db::Database;
pub use models::{EntityKind, FieldError, FieldValue, Record, Tone};
pub use session::{Dashboard, SessionError, SubmitOutcome};
pub use views::{ModuleSelector, ViewSpec};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MedlabError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for MedlabError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(id) => MedlabError::NotFound(id),
            db::DbError::Validation(v) => MedlabError::InvalidInput(v.to_string()),
            other => MedlabError::DatabaseError(other.to_string()),
        }
    }
}

impl From<SessionError> for MedlabError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Forbidden { .. } => MedlabError::Forbidden(e.to_string()),
            SessionError::ReportNotReady(_) => MedlabError::InvalidInput(e.to_string()),
            SessionError::Db(db) => db.into(),
            SessionError::Export(json) => MedlabError::SerializationError(json.to_string()),
        }
    }
}

impl From<models::UnknownLabel> for MedlabError {
    fn from(e: models::UnknownLabel) -> Self {
        MedlabError::InvalidInput(e.to_string())
    }
}

impl From<anyhow::Error> for MedlabError {
    fn from(e: anyhow::Error) -> Self {
        MedlabError::ConfigError(format!("{e:#}"))
    }
}

impl<T> From<std::sync::PoisonError<T>> for MedlabError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MedlabError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install the log subscriber. Returns `false` when one was already set.
#[uniffi::export]
pub fn init_logging(filter: String) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .try_init()
        .is_ok()
}

/// Version of the sidebar layout, for shells that cache the menu.
#[uniffi::export]
pub fn navigation_version() -> u32 {
    views::NAVIGATION_VERSION
}

/// Open a dashboard session over the demo data.
#[uniffi::export]
pub fn open_dashboard(role: String) -> Result<Arc<MedlabCore>, MedlabError> {
    let role: Role = role.parse()?;
    let dashboard = Dashboard::new(role)?;
    Ok(MedlabCore::wrap(dashboard))
}

/// Open a dashboard session configured from a TOML file. Installs the
/// configured log filter unless a subscriber is already set.
#[uniffi::export]
pub fn open_dashboard_with_config(path: String) -> Result<Arc<MedlabCore>, MedlabError> {
    let config = DashboardConfig::load_or_default(&path)?;
    let filter = config.env_filter()?;
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    let dashboard = Dashboard::from_config(&config)?;
    Ok(MedlabCore::wrap(dashboard))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session wrapper for FFI.
#[derive(uniffi::Object)]
pub struct MedlabCore {
    session: Arc<Mutex<Dashboard>>,
}

impl MedlabCore {
    fn wrap(dashboard: Dashboard) -> Arc<Self> {
        Arc::new(Self {
            session: Arc::new(Mutex::new(dashboard)),
        })
    }
}

#[uniffi::export]
impl MedlabCore {
    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn role(&self) -> Result<String, MedlabError> {
        Ok(self.session.lock()?.role().to_string())
    }

    /// Sidebar entries visible to the viewer.
    pub fn menu(&self) -> Result<Vec<FfiNavEntry>, MedlabError> {
        let session = self.session.lock()?;
        let role = session.role();
        Ok(session
            .menu()
            .into_iter()
            .map(|entry| FfiNavEntry {
                module: entry.module.to_string(),
                label: entry.label.to_string(),
                icon: entry.icon.to_string(),
                children: entry
                    .children_for(role)
                    .map(|c| FfiNavChild {
                        sub_view: c.sub_view.to_string(),
                        label: c.label.to_string(),
                    })
                    .collect(),
            })
            .collect())
    }

    /// Select a view by `module` or `module/sub-view`. Never fails.
    pub fn navigate(&self, selector: String) -> Result<FfiViewSpec, MedlabError> {
        let mut session = self.session.lock()?;
        let selector: ModuleSelector = selector.parse().unwrap_or_default();
        session.navigate(selector);
        Ok(session.current_view().into())
    }

    pub fn set_search(&self, text: String) -> Result<(), MedlabError> {
        self.session.lock()?.set_search(text);
        Ok(())
    }

    pub fn current_view(&self) -> Result<FfiViewSpec, MedlabError> {
        Ok(self.session.lock()?.current_view().into())
    }

    /// Order the current view by a column; `None` restores collection order.
    pub fn set_sort(&self, field: Option<String>, descending: bool) -> Result<(), MedlabError> {
        let mut session = self.session.lock()?;
        match field {
            Some(field) => {
                let direction = if descending {
                    query::SortDirection::Descending
                } else {
                    query::SortDirection::Ascending
                };
                session.set_sort(field, direction);
            }
            None => session.clear_sort(),
        }
        Ok(())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Table rows of the current view.
    pub fn rows(&self) -> Result<Vec<FfiRow>, MedlabError> {
        let rows = self.session.lock()?.rows()?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Summary cards of the current view.
    pub fn summary(&self) -> Result<Vec<FfiStat>, MedlabError> {
        let session = self.session.lock()?;
        let currency = session.currency().to_string();
        let stats = session.summary()?;
        Ok(stats
            .into_iter()
            .map(|s| FfiStat {
                label: s.label.to_string(),
                value: s.display(&currency),
            })
            .collect())
    }

    // =========================================================================
    // Dialogs
    // =========================================================================

    /// Submit a create (no `id`) or edit (with `id`) dialog.
    pub fn submit_form(
        &self,
        entity: String,
        values: HashMap<String, String>,
    ) -> Result<FfiSubmitOutcome, MedlabError> {
        let kind: EntityKind = entity.parse()?;
        let form = forms::form_data(values);
        let outcome = self.session.lock()?.submit(kind, &form)?;
        Ok(outcome.into())
    }

    pub fn delete_record(&self, entity: String, id: String) -> Result<bool, MedlabError> {
        let kind: EntityKind = entity.parse()?;
        Ok(self.session.lock()?.delete(kind, &id)?)
    }

    pub fn update_profile(
        &self,
        values: HashMap<String, String>,
    ) -> Result<FfiSubmitOutcome, MedlabError> {
        let form = forms::form_data(values);
        Ok(self.session.lock()?.update_profile(&form)?.into())
    }

    pub fn update_organization(
        &self,
        values: HashMap<String, String>,
    ) -> Result<FfiSubmitOutcome, MedlabError> {
        let form = forms::form_data(values);
        Ok(self.session.lock()?.update_organization(&form)?.into())
    }

    // =========================================================================
    // Analytics and Export
    // =========================================================================

    /// Cards and recent reports of the dashboard home.
    pub fn home_stats(&self) -> Result<FfiHomeStats, MedlabError> {
        let session = self.session.lock()?;
        let home = session.home_stats()?;
        Ok(FfiHomeStats {
            total_patients: home.total_patients as u32,
            tests_completed: home.tests_completed as u32,
            appointments: home.appointments as u32,
            pending_bookings: home.pending_bookings as u32,
            revenue: format::format_currency(home.revenue, session.currency()),
            recent_reports: home
                .recent_reports
                .into_iter()
                .map(|r| FfiReportSummary {
                    tone: r.status_tone().as_str().to_string(),
                    status: r.status.to_string(),
                    id: r.id,
                    patient_name: r.patient_name,
                    test_name: r.test_name,
                    request_date: r.request_date.to_string(),
                })
                .collect(),
        })
    }

    /// Revenue per month, oldest first, with the change against the month
    /// before.
    pub fn monthly_revenue(&self) -> Result<Vec<FfiMonthlyRevenue>, MedlabError> {
        let session = self.session.lock()?;
        let currency = session.currency().to_string();
        let months = session.monthly_revenue()?;

        let mut previous: Option<f64> = None;
        let mut out = Vec::with_capacity(months.len());
        for month in months {
            let change = previous
                .and_then(|p| format::percent_change(p, month.revenue))
                .map(format::format_percent);
            previous = Some(month.revenue);
            out.push(FfiMonthlyRevenue {
                label: month.label(),
                invoices: month.invoices as u32,
                revenue: format::format_currency(month.revenue, &currency),
                chart_label: format::format_thousands(month.revenue, &currency),
                change,
            });
        }
        Ok(out)
    }

    /// The most billed tests, most frequent first.
    pub fn top_tests(&self, limit: u32) -> Result<Vec<FfiTestFrequency>, MedlabError> {
        let tests = self.session.lock()?.top_tests(limit as usize)?;
        Ok(tests
            .into_iter()
            .map(|t| FfiTestFrequency {
                name: t.name,
                count: t.count as u32,
            })
            .collect())
    }

    /// Franchise Performance panel (admin only).
    pub fn franchise_performance(&self) -> Result<Vec<FfiFranchiseRanking>, MedlabError> {
        let rankings = self.session.lock()?.franchise_performance()?;
        Ok(rankings
            .into_iter()
            .map(|r| FfiFranchiseRanking {
                rank: r.rank as u32,
                id: r.id,
                name: r.name,
                score: r.score,
                band: r.band.to_string(),
                monthly_revenue: r.monthly_revenue,
            })
            .collect())
    }

    /// A completed report as JSON.
    pub fn download_report(&self, id: String) -> Result<String, MedlabError> {
        let report = self.session.lock()?.download_report(&id)?;
        serde_json::to_string_pretty(&report)
            .map_err(|e| MedlabError::SerializationError(e.to_string()))
    }

    /// Download the invoices the billing view shows, as `json` or `csv`.
    pub fn export_billing(&self, format: String) -> Result<String, MedlabError> {
        let format: export::ExportFormat = format.parse().map_err(MedlabError::InvalidInput)?;
        Ok(self.session.lock()?.export_billing(format)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe sidebar entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNavEntry {
    pub module: String,
    pub label: String,
    pub icon: String,
    pub children: Vec<FfiNavChild>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNavChild {
    pub sub_view: String,
    pub label: String,
}

/// FFI-safe resolved view.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiViewSpec {
    pub module: String,
    pub sub_view: Option<String>,
    pub title: String,
    pub heading: String,
    pub icon: String,
    pub collection: Option<String>,
    pub columns: Vec<FfiColumn>,
    pub opens_form: bool,
    pub actions: Vec<String>,
}

impl From<ViewSpec> for FfiViewSpec {
    fn from(view: ViewSpec) -> Self {
        Self {
            module: view.module.to_string(),
            sub_view: view.sub_view.map(str::to_string),
            title: view.title.to_string(),
            heading: view.heading.to_string(),
            icon: view.icon.to_string(),
            collection: view.collection.map(|k| k.to_string()),
            columns: view
                .columns
                .iter()
                .map(|c| FfiColumn {
                    field: c.field.to_string(),
                    header: c.header.to_string(),
                })
                .collect(),
            opens_form: view.opens_form,
            actions: view.actions.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiColumn {
    pub field: String,
    pub header: String,
}

/// FFI-safe table row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRow {
    pub id: String,
    pub cells: Vec<FfiCell>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCell {
    pub field: String,
    pub text: String,
    pub tone: Option<String>,
}

impl From<session::Row> for FfiRow {
    fn from(row: session::Row) -> Self {
        Self {
            id: row.id,
            cells: row
                .cells
                .into_iter()
                .map(|c| FfiCell {
                    field: c.field.to_string(),
                    text: c.text,
                    tone: c.tone.map(|t| t.as_str().to_string()),
                })
                .collect(),
        }
    }
}

/// FFI-safe summary card.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFieldError {
    pub field: String,
    pub message: String,
}

/// FFI-safe dialog submit result.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum FfiSubmitOutcome {
    Saved { id: String, created: bool },
    Invalid { errors: Vec<FfiFieldError> },
}

impl From<SubmitOutcome> for FfiSubmitOutcome {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Saved { id, created } => FfiSubmitOutcome::Saved { id, created },
            SubmitOutcome::Invalid(errors) => FfiSubmitOutcome::Invalid {
                errors: errors
                    .into_iter()
                    .map(|e| FfiFieldError {
                        field: e.field,
                        message: e.message,
                    })
                    .collect(),
            },
        }
    }
}

/// FFI-safe franchise ranking.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFranchiseRanking {
    pub rank: u32,
    pub id: String,
    pub name: String,
    pub score: u8,
    pub band: String,
    pub monthly_revenue: f64,
}

/// FFI-safe dashboard home.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHomeStats {
    pub total_patients: u32,
    pub tests_completed: u32,
    pub appointments: u32,
    pub pending_bookings: u32,
    pub revenue: String,
    pub recent_reports: Vec<FfiReportSummary>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReportSummary {
    pub id: String,
    pub patient_name: String,
    pub test_name: String,
    pub request_date: String,
    pub status: String,
    pub tone: String,
}

/// FFI-safe revenue chart point.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMonthlyRevenue {
    pub label: String,
    pub invoices: u32,
    pub revenue: String,
    /// Short amount such as `₹185k`
    pub chart_label: String,
    /// Signed change against the previous month, e.g. `+12.5%`
    pub change: Option<String>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTestFrequency {
    pub name: String,
    pub count: u32,
}
