//! Application state for one signed-in viewer.
//!
//! A [`Dashboard`] owns the store, the viewer's role (fixed for the session),
//! the navigator and the search text. Rendering asks it for the current
//! [`ViewSpec`], the rows and the summary cards; dialogs submit through it so
//! every mutation passes the role policy and record validation.

mod rows;

pub use rows::*;

use chrono::Utc;
use thiserror::Error;

use crate::access::{is_allowed, Action, ModuleId, Role};
use crate::config::DashboardConfig;
use crate::db::{Database, DbError, Stored};
use crate::export::{BillingExport, ExportFormat};
use crate::forms::{FormContext, FormData, FormReader, FromForm};
use crate::models::{
    Booking, EntityKind, FieldError, Franchise, InventoryItem, Invoice, LabTest,
    OrganizationSettings, Patient, Report, StaffMember, UserProfile,
};
use crate::query::{self, SortDirection};
use crate::summary::{
    franchise_performance, monthly_revenue, summarize_for, top_tests, visible_stats,
    FranchiseRanking, HomeStats, MonthlyRevenue, Stat, Summarize, TestFrequency,
};
use crate::views::{menu, ModuleSelector, NavEntry, Navigator, ViewSpec};

/// Session errors.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("{role} may not {action} in {module}")]
    Forbidden {
        role: Role,
        module: ModuleId,
        action: Action,
    },

    #[error("Report {0} is not completed yet")]
    ReportNotReady(String),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Result of a dialog submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved { id: String, created: bool },
    /// The dialog stays open and shows these next to the fields.
    Invalid(Vec<FieldError>),
}

/// Run `$body` with `$T` bound to the record type of `$kind`.
macro_rules! with_record_type {
    ($kind:expr, $T:ident => $body:expr) => {
        match $kind {
            EntityKind::Patient => {
                type $T = Patient;
                $body
            }
            EntityKind::LabTest => {
                type $T = LabTest;
                $body
            }
            EntityKind::Invoice => {
                type $T = Invoice;
                $body
            }
            EntityKind::InventoryItem => {
                type $T = InventoryItem;
                $body
            }
            EntityKind::StaffMember => {
                type $T = StaffMember;
                $body
            }
            EntityKind::Franchise => {
                type $T = Franchise;
                $body
            }
            EntityKind::Report => {
                type $T = Report;
                $body
            }
            EntityKind::Booking => {
                type $T = Booking;
                $body
            }
        }
    };
}

/// One viewer's dashboard session.
pub struct Dashboard {
    db: Database,
    role: Role,
    navigator: Navigator,
    search: String,
    sort: Option<(String, SortDirection)>,
    currency: String,
    recent_reports: usize,
}

impl Dashboard {
    /// Session over the demo data, landing on the dashboard.
    pub fn new(role: Role) -> SessionResult<Self> {
        Self::from_config(&DashboardConfig {
            role,
            ..DashboardConfig::default()
        })
    }

    pub fn from_config(config: &DashboardConfig) -> SessionResult<Self> {
        let db = if config.seed_demo_data {
            Database::open_with_demo_data()?
        } else {
            Database::open_in_memory()?
        };
        tracing::info!(role = %config.role, landing = %config.landing, "session started");

        Ok(Self {
            db,
            role: config.role,
            navigator: Navigator::new(config.landing_selector()),
            search: String::new(),
            sort: None,
            currency: config.currency_symbol.clone(),
            recent_reports: config.recent_reports,
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Sidebar entries for this viewer.
    pub fn menu(&self) -> Vec<&'static NavEntry> {
        menu(self.role)
    }

    // =========================================================================
    // Navigation and search
    // =========================================================================

    /// Select a module. Each view starts with an empty search box and in
    /// collection order.
    pub fn navigate(&mut self, selector: ModuleSelector) {
        self.navigator.select(selector);
        self.search.clear();
        self.sort = None;
    }

    pub fn selection(&self) -> &ModuleSelector {
        self.navigator.current()
    }

    pub fn current_view(&self) -> ViewSpec {
        self.navigator.view(self.role)
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        tracing::debug!(query = %self.search, "search changed");
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// Order the current view by a display field. Stable; records without
    /// the field go last.
    pub fn set_sort(&mut self, field: impl Into<String>, direction: SortDirection) {
        let field = field.into();
        tracing::debug!(%field, ?direction, "sort changed");
        self.sort = Some((field, direction));
    }

    /// Back to collection order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Records of `T` as `view` shows them: sub-view filter, search and sort
    /// applied when the view shows `T`, the whole collection otherwise.
    fn visible_in<T: Stored + Clone>(&self, view: &ViewSpec) -> SessionResult<Vec<T>> {
        let all = self.db.list::<T>()?;
        if view.collection != Some(T::KIND) {
            return Ok(all);
        }

        let mut shown: Vec<&T> = query::search(&all, &self.search, view.search_fields)
            .into_iter()
            .filter(|r| view.filter.map_or(true, |f| f.admits(*r)))
            .collect();
        if let Some((field, direction)) = &self.sort {
            query::sort_by(&mut shown, field, *direction);
        }
        Ok(shown.into_iter().cloned().collect())
    }

    /// Table rows of the current view.
    pub fn rows(&self) -> SessionResult<Vec<Row>> {
        let view = self.current_view();
        let Some(kind) = view.collection else {
            return Ok(Vec::new());
        };

        let rows = with_record_type!(kind, T => {
            let records = self.visible_in::<T>(&view)?;
            records
                .iter()
                .map(|r| Row::build(r, &view.columns, &self.currency))
                .collect::<Vec<_>>()
        });
        tracing::debug!(view = %self.selection(), rows = rows.len(), "rows rendered");
        Ok(rows)
    }

    /// Summary cards of the current view, computed over the visible rows.
    pub fn summary(&self) -> SessionResult<Vec<Stat>> {
        let view = self.current_view();
        match (view.collection, view.module) {
            (Some(kind), _) => with_record_type!(kind, T => self.summary_of::<T>(&view)),
            (None, ModuleId::Dashboard) => Ok(self.home_stats()?.stats()),
            (None, ModuleId::Analytics) => self.analytics_summary(&view),
            (None, _) => Ok(Vec::new()),
        }
    }

    fn summary_of<T: Stored + Clone + Summarize>(&self, view: &ViewSpec) -> SessionResult<Vec<Stat>> {
        let records = self.visible_in::<T>(view)?;
        let rows: Vec<&T> = records.iter().collect();
        Ok(summarize_for(&rows, self.role, &view.actions))
    }

    fn analytics_summary(&self, view: &ViewSpec) -> SessionResult<Vec<Stat>> {
        let invoices = self.db.list::<Invoice>()?;
        let franchises = self.db.list::<Franchise>()?;
        let revenue: f64 = invoices.iter().map(Invoice::final_amount).sum();
        let average = if invoices.is_empty() {
            0.0
        } else {
            revenue / invoices.len() as f64
        };

        let stats = vec![
            Stat::amount("Total Revenue", revenue),
            Stat::count("Invoices", invoices.len()),
            Stat::amount("Average Invoice", average),
            Stat::amount(
                "Network Revenue",
                franchises.iter().map(|f| f.monthly_revenue).sum(),
            )
            .requiring(Action::ViewFranchisePerformance),
        ];
        Ok(visible_stats(stats, &view.actions))
    }

    // =========================================================================
    // Dialogs
    // =========================================================================

    fn require(&self, module: ModuleId, action: Action) -> SessionResult<()> {
        if is_allowed(self.role, module, action) {
            Ok(())
        } else {
            tracing::warn!(role = %self.role, %module, %action, "action refused");
            Err(SessionError::Forbidden {
                role: self.role,
                module,
                action,
            })
        }
    }

    fn form_context(&self) -> SessionResult<FormContext> {
        let org = self.db.organization_settings()?;
        Ok(FormContext::new(
            Utc::now().date_naive(),
            org.payment_terms_days,
        ))
    }

    /// Submit a create or edit dialog. A form carrying an `id` edits that
    /// record; otherwise a record with the next sequential id is created.
    pub fn submit(&mut self, kind: EntityKind, form: &FormData) -> SessionResult<SubmitOutcome> {
        let module = ModuleId::for_kind(kind);
        let id = form
            .get("id")
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let action = if id.is_some() { Action::Edit } else { Action::Create };
        self.require(module, action)?;
        if kind == EntityKind::Franchise {
            self.require(module, Action::ManageFranchise)?;
        }
        if kind == EntityKind::StaffMember && form.contains_key("salary") {
            self.require(module, Action::EditSalary)?;
        }

        with_record_type!(kind, T => self.submit_as::<T>(id, form))
    }

    fn submit_as<T: Stored + FromForm>(
        &self,
        id: Option<String>,
        form: &FormData,
    ) -> SessionResult<SubmitOutcome> {
        let ctx = self.form_context()?;
        let (id, values, created) = match id {
            Some(id) => {
                let current: T = self.db.require(&id)?;
                let values = T::edit_form(&current, form);
                (id, values, false)
            }
            None => (self.db.next_id::<T>()?, form.clone(), true),
        };

        let record = match T::from_form(id.clone(), &values, &ctx) {
            Ok(record) => record,
            Err(errors) => {
                tracing::warn!(kind = %T::KIND, %id, errors = errors.len(), "submit rejected");
                return Ok(SubmitOutcome::Invalid(errors));
            }
        };

        let saved = if created {
            self.db.insert(&record)
        } else {
            self.db.update(&record).map(|_| ())
        };
        match saved {
            Ok(()) => Ok(SubmitOutcome::Saved { id, created }),
            Err(DbError::Validation(e)) => Ok(SubmitOutcome::Invalid(e.errors)),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a record. Returns `false` when it did not exist.
    pub fn delete(&mut self, kind: EntityKind, id: &str) -> SessionResult<bool> {
        self.require(ModuleId::for_kind(kind), Action::Delete)?;
        let deleted = with_record_type!(kind, T => self.db.delete::<T>(id)?);
        Ok(deleted)
    }

    // =========================================================================
    // Dashboard home and analytics
    // =========================================================================

    pub fn home_stats(&self) -> SessionResult<HomeStats> {
        Ok(HomeStats::compute(
            &self.db.list::<Patient>()?,
            &self.db.list::<Report>()?,
            &self.db.list::<Booking>()?,
            &self.db.list::<Invoice>()?,
            self.recent_reports,
        ))
    }

    pub fn monthly_revenue(&self) -> SessionResult<Vec<MonthlyRevenue>> {
        Ok(monthly_revenue(&self.db.list::<Invoice>()?))
    }

    pub fn top_tests(&self, limit: usize) -> SessionResult<Vec<TestFrequency>> {
        Ok(top_tests(&self.db.list::<Invoice>()?, limit))
    }

    /// The Franchise Performance panel. Admin only.
    pub fn franchise_performance(&self) -> SessionResult<Vec<FranchiseRanking>> {
        self.require(ModuleId::Analytics, Action::ViewFranchisePerformance)?;
        Ok(franchise_performance(&self.db.list::<Franchise>()?))
    }

    // =========================================================================
    // Billing download
    // =========================================================================

    /// Download the invoices the billing view currently shows.
    pub fn export_billing(&self, format: ExportFormat) -> SessionResult<String> {
        self.require(ModuleId::Billing, Action::Export)?;

        let view = self.current_view();
        let invoices = self.visible_in::<Invoice>(&view)?;
        let query = if view.collection == Some(EntityKind::Invoice) {
            self.search.as_str()
        } else {
            ""
        };

        let export = BillingExport::from_invoices(&invoices, query);
        Ok(match format {
            ExportFormat::Json => export.to_json()?,
            ExportFormat::Csv => export.to_csv(),
        })
    }

    /// A completed report, as the Download Reports view hands it out.
    pub fn download_report(&self, id: &str) -> SessionResult<Report> {
        self.require(ModuleId::Reports, Action::Download)?;

        let report: Report = self.db.require(id)?;
        if !report.is_downloadable() {
            return Err(SessionError::ReportNotReady(report.id));
        }
        tracing::info!(%id, "report downloaded");
        Ok(report)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn user_profile(&self) -> SessionResult<UserProfile> {
        Ok(self.db.user_profile()?)
    }

    pub fn update_profile(&mut self, form: &FormData) -> SessionResult<SubmitOutcome> {
        self.require(ModuleId::Settings, Action::EditProfile)?;
        let current = self.db.user_profile()?;

        let r = FormReader::new(form);
        let profile = UserProfile {
            name: r.text_or("name", &current.name),
            email: r.text_or("email", &current.email),
            phone: r.text_or("phone", &current.phone),
            designation: r.text_or("designation", &current.designation),
            lab_name: r.text_or("labName", &current.lab_name),
            address: r.text_or("address", &current.address),
        };
        let errors = r.finish_with(profile.field_errors());
        if !errors.is_empty() {
            return Ok(SubmitOutcome::Invalid(errors));
        }

        self.db.save_user_profile(&profile)?;
        Ok(SubmitOutcome::Saved {
            id: "profile".to_string(),
            created: false,
        })
    }

    pub fn organization_settings(&self) -> SessionResult<OrganizationSettings> {
        Ok(self.db.organization_settings()?)
    }

    /// Update organization settings. Admin only.
    pub fn update_organization(&mut self, form: &FormData) -> SessionResult<SubmitOutcome> {
        self.require(ModuleId::Settings, Action::EditOrganization)?;
        let current = self.db.organization_settings()?;

        let mut r = FormReader::new(form);
        let settings = OrganizationSettings {
            name: r.text_or("name", &current.name),
            address: r.text_or("address", &current.address),
            payment_terms_days: r.count_or("paymentTermsDays", current.payment_terms_days),
        };
        let errors = r.finish_with(settings.field_errors());
        if !errors.is_empty() {
            return Ok(SubmitOutcome::Invalid(errors));
        }

        self.db.save_organization_settings(&settings)?;
        Ok(SubmitOutcome::Saved {
            id: "organization".to_string(),
            created: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn admin() -> Dashboard {
        Dashboard::new(Role::Admin).unwrap()
    }

    fn franchise() -> Dashboard {
        Dashboard::new(Role::Franchise).unwrap()
    }

    fn ids(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_landing_on_dashboard() {
        let session = admin();
        assert_eq!(session.current_view().module, ModuleId::Dashboard);
        assert!(session.rows().unwrap().is_empty());
        assert_eq!(session.summary().unwrap().len(), 4);
    }

    #[test]
    fn test_search_patients() {
        let mut session = franchise();
        session.navigate("patients".parse().unwrap());
        session.set_search("ami");

        let rows = session.rows().unwrap();
        assert_eq!(ids(&rows), vec!["P003"]);
        assert_eq!(rows[0].cell("name").unwrap().text, "Amit Patel");
    }

    #[test]
    fn test_navigation_clears_search() {
        let mut session = admin();
        session.navigate("patients".parse().unwrap());
        session.set_search("ramesh");
        session.navigate("billing".parse().unwrap());
        assert_eq!(session.search_text(), "");
        assert_eq!(session.rows().unwrap().len(), 3);
    }

    #[test]
    fn test_sub_view_filter_and_summary_agree() {
        let mut session = admin();
        session.navigate("billing/ledger".parse().unwrap());

        let rows = session.rows().unwrap();
        assert_eq!(ids(&rows), vec!["INV-002", "INV-003"]);

        let summary = session.summary().unwrap();
        let invoices = summary.iter().find(|s| s.label == "Invoices").unwrap();
        assert_eq!(invoices.display("₹"), "2");
    }

    #[test]
    fn test_overdue_status_cell_tone() {
        let mut session = admin();
        session.navigate("billing".parse().unwrap());
        let rows = session.rows().unwrap();

        let tones: Vec<_> = rows.iter().map(|r| r.cell("status").unwrap().tone).collect();
        assert_eq!(
            tones,
            vec![
                Some(crate::models::Tone::Success),
                Some(crate::models::Tone::Warning),
                Some(crate::models::Tone::Danger),
            ]
        );
        assert_eq!(rows[2].cell("finalAmount").unwrap().text, "₹475");
    }

    #[test]
    fn test_unknown_selector_falls_back() {
        let mut session = franchise();
        session.navigate("pharmacy/orders".parse().unwrap());
        assert_eq!(session.current_view().module, ModuleId::Dashboard);
        assert_eq!(session.selection().to_string(), "pharmacy/orders");
    }

    #[test]
    fn test_create_patient() {
        let mut session = franchise();
        let outcome = session
            .submit(
                EntityKind::Patient,
                &form(&[("name", "Sunita Devi"), ("age", "52"), ("gender", "Female")]),
            )
            .unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Saved {
                id: "P004".into(),
                created: true
            }
        );
        assert_eq!(session.database().count::<Patient>().unwrap(), 4);
    }

    #[test]
    fn test_invalid_invoice_reported_locally() {
        let mut session = franchise();
        let outcome = session
            .submit(
                EntityKind::Invoice,
                &form(&[
                    ("patientId", "P001"),
                    ("patientName", "Ramesh Kumar"),
                    ("tests", "CBC"),
                    ("amount", "500"),
                    ("discount", "600"),
                ]),
            )
            .unwrap();

        match outcome {
            SubmitOutcome::Invalid(errors) => assert_eq!(errors[0].field, "discount"),
            other => panic!("expected invalid, got {other:?}"),
        }
        assert_eq!(session.database().count::<Invoice>().unwrap(), 3);
    }

    #[test]
    fn test_edit_invoice_status() {
        let mut session = admin();
        let outcome = session
            .submit(
                EntityKind::Invoice,
                &form(&[("id", "INV-002"), ("status", "paid")]),
            )
            .unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Saved {
                id: "INV-002".into(),
                created: false
            }
        );

        let invoice: Invoice = session.database().require("INV-002").unwrap();
        assert_eq!(invoice.status, crate::models::InvoiceStatus::Paid);
        assert_eq!(invoice.tests, vec!["Thyroid Function"]);
    }

    #[test]
    fn test_franchise_cannot_manage_franchises() {
        let mut session = franchise();
        let result = session.submit(
            EntityKind::Franchise,
            &form(&[
                ("name", "MedLab Airport"),
                ("ownerName", "Dr. Kavita Rao"),
                ("location", "Airport Road"),
            ]),
        );
        assert!(matches!(
            result,
            Err(SessionError::Forbidden {
                action: Action::Create,
                ..
            })
        ));

        assert!(matches!(
            session.delete(EntityKind::Patient, "P001"),
            Err(SessionError::Forbidden { .. })
        ));
        assert!(session.franchise_performance().is_err());
    }

    #[test]
    fn test_admin_creates_franchise_and_deletes() {
        let mut session = admin();
        let outcome = session
            .submit(
                EntityKind::Franchise,
                &form(&[
                    ("name", "MedLab Airport"),
                    ("ownerName", "Dr. Kavita Rao"),
                    ("location", "Airport Road"),
                ]),
            )
            .unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Saved {
                id: "FRN006".into(),
                created: true
            }
        );

        assert!(session.delete(EntityKind::Franchise, "FRN006").unwrap());
        assert!(!session.delete(EntityKind::Franchise, "FRN006").unwrap());
    }

    #[test]
    fn test_edit_missing_record() {
        let mut session = admin();
        let result = session.submit(EntityKind::Patient, &form(&[("id", "P404"), ("age", "40")]));
        assert!(matches!(
            result,
            Err(SessionError::Db(DbError::NotFound(_)))
        ));
    }

    #[test]
    fn test_salary_hidden_from_franchise() {
        let mut session = franchise();
        session.navigate("staff".parse().unwrap());

        let rows = session.rows().unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.cell("salary").is_none()));
        assert!(session
            .summary()
            .unwrap()
            .iter()
            .all(|s| s.label != "Monthly Payroll"));
    }

    #[test]
    fn test_export_uses_visible_invoices() {
        let mut session = franchise();
        session.navigate("billing".parse().unwrap());
        session.set_search("amit");

        let csv = session.export_billing(ExportFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("INV-003"));

        let json = session.export_billing(ExportFormat::Json).unwrap();
        assert!(json.contains("\"query\": \"amit\""));
    }

    #[test]
    fn test_download_report_needs_completion() {
        let session = franchise();
        let report = session.download_report("RPT-001").unwrap();
        assert_eq!(report.patient_name, "Ramesh Kumar");
        assert!(report.completion_date.is_some());

        assert!(matches!(
            session.download_report("RPT-002"),
            Err(SessionError::ReportNotReady(id)) if id == "RPT-002"
        ));
        assert!(matches!(
            session.download_report("RPT-404"),
            Err(SessionError::Db(DbError::NotFound(_)))
        ));
    }

    #[test]
    fn test_sort_patients_by_age() {
        let mut session = admin();
        session.navigate("patients".parse().unwrap());

        session.set_sort("age", SortDirection::Ascending);
        assert_eq!(ids(&session.rows().unwrap()), vec!["P003", "P002", "P001"]);

        session.set_search("a");
        session.set_sort("name", SortDirection::Descending);
        assert_eq!(ids(&session.rows().unwrap()), vec!["P001", "P002", "P003"]);

        session.clear_sort();
        session.set_sort("age", SortDirection::Ascending);
        session.navigate("patients".parse().unwrap());
        assert_eq!(ids(&session.rows().unwrap()), vec!["P001", "P002", "P003"]);
    }

    #[test]
    fn test_edit_report_back_to_rejected() {
        let mut session = admin();
        let outcome = session
            .submit(
                EntityKind::Report,
                &form(&[("id", "RPT-001"), ("status", "rejected")]),
            )
            .unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Saved {
                id: "RPT-001".into(),
                created: false
            }
        );

        let stored: Report = session.database().require("RPT-001").unwrap();
        assert_eq!(stored.status, crate::models::ReportStatus::Rejected);
        assert_eq!(stored.completion_date, None);
        assert!(session.download_report("RPT-001").is_err());
    }

    #[test]
    fn test_analytics() {
        let admin = admin();
        assert_eq!(admin.franchise_performance().unwrap().len(), 5);
        assert_eq!(admin.top_tests(1).unwrap()[0].name, "CBC");
        assert_eq!(admin.monthly_revenue().unwrap().len(), 1);

        let mut franchise = franchise();
        franchise.navigate("analytics".parse().unwrap());
        let labels: Vec<&str> = franchise.summary().unwrap().iter().map(|s| s.label).collect();
        assert!(!labels.contains(&"Network Revenue"));
    }

    #[test]
    fn test_profile_and_organization() {
        let mut session = franchise();
        let outcome = session
            .update_profile(&form(&[("phone", "+91 9000000000")]))
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
        assert_eq!(session.user_profile().unwrap().phone, "+91 9000000000");

        assert!(matches!(
            session.update_organization(&form(&[("name", "MedLab West")])),
            Err(SessionError::Forbidden { .. })
        ));

        let mut admin = admin();
        let outcome = admin
            .update_organization(&form(&[("paymentTermsDays", "-3")]))
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        let outcome = admin
            .update_organization(&form(&[("paymentTermsDays", "400")]))
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));

        admin
            .update_organization(&form(&[("paymentTermsDays", "14")]))
            .unwrap();
        assert_eq!(admin.organization_settings().unwrap().payment_terms_days, 14);
    }
}
