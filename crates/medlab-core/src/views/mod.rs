//! View composition.
//!
//! A [`ModuleSelector`] names a module and optionally a sub-view. [`resolve`]
//! turns it into a [`ViewSpec`]: the collection to show, the columns the role
//! may see, an optional row filter for the sub-view, and the permitted
//! actions. Resolution never fails; anything it cannot place lands on the
//! dashboard, and an unknown sub-view lands on the module's default.
//!
//! [`Navigator`] holds the only mutable navigation state.

mod columns;
mod schema;

pub use columns::*;
pub use schema::*;

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::access::{visible_actions, Action, ModuleId, Role};
use crate::models::{
    Booking, EntityKind, Franchise, InventoryItem, Invoice, LabTest, Patient, Record, Report,
    StaffMember,
};

/// A navigation target as selected in the UI: module plus optional sub-view.
///
/// Kept as raw text so that stale or unknown selections can still be held
/// and resolved to a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSelector {
    pub module: String,
    pub sub_view: Option<String>,
}

impl ModuleSelector {
    pub fn new(module: impl Into<String>, sub_view: Option<&str>) -> Self {
        Self {
            module: module.into(),
            sub_view: sub_view.map(str::to_string),
        }
    }

    pub fn dashboard() -> Self {
        ModuleId::Dashboard.into()
    }
}

impl Default for ModuleSelector {
    fn default() -> Self {
        Self::dashboard()
    }
}

impl From<ModuleId> for ModuleSelector {
    fn from(module: ModuleId) -> Self {
        Self::new(module.label(), None)
    }
}

/// Parses `module` or `module/sub-view`.
impl FromStr for ModuleSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.split_once('/') {
            Some((module, sub)) if !sub.trim().is_empty() => {
                Self::new(module.trim(), Some(sub.trim()))
            }
            Some((module, _)) => Self::new(module.trim(), None),
            None => Self::new(s, None),
        })
    }
}

impl fmt::Display for ModuleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub_view {
            Some(sub) => write!(f, "{}/{}", self.module, sub),
            None => f.write_str(&self.module),
        }
    }
}

/// Restricts a view's rows to records whose `field` shows one of `any_of`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFilter {
    pub field: &'static str,
    pub any_of: &'static [&'static str],
}

impl RowFilter {
    pub fn admits<T: Record>(&self, record: &T) -> bool {
        record.field(self.field).is_some_and(|value| {
            let text = value.display_text();
            self.any_of.iter().any(|want| want.eq_ignore_ascii_case(&text))
        })
    }
}

/// Everything the rendering layer needs to draw a view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSpec {
    pub module: ModuleId,
    pub sub_view: Option<&'static str>,
    /// Module label.
    pub title: &'static str,
    /// Sub-view label, or the module label when there is none.
    pub heading: &'static str,
    pub icon: &'static str,
    /// Backing collection; `None` for dashboard, analytics and settings.
    pub collection: Option<EntityKind>,
    pub search_fields: &'static [&'static str],
    pub columns: Vec<ColumnSpec>,
    pub filter: Option<RowFilter>,
    /// The sub-view is an entry form for a new record.
    pub opens_form: bool,
    pub actions: BTreeSet<Action>,
}

impl ViewSpec {
    pub fn allows(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

fn collection_for(module: ModuleId) -> Option<EntityKind> {
    match module {
        ModuleId::Patients => Some(EntityKind::Patient),
        ModuleId::Tests => Some(EntityKind::LabTest),
        ModuleId::Billing => Some(EntityKind::Invoice),
        ModuleId::Bookings => Some(EntityKind::Booking),
        ModuleId::Inventory => Some(EntityKind::InventoryItem),
        ModuleId::Staff => Some(EntityKind::StaffMember),
        ModuleId::Franchises => Some(EntityKind::Franchise),
        ModuleId::Reports => Some(EntityKind::Report),
        ModuleId::Dashboard | ModuleId::Analytics | ModuleId::Settings => None,
    }
}

/// Search fields of a collection.
pub fn search_fields(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Patient => Patient::SEARCH_FIELDS,
        EntityKind::LabTest => LabTest::SEARCH_FIELDS,
        EntityKind::Invoice => Invoice::SEARCH_FIELDS,
        EntityKind::InventoryItem => InventoryItem::SEARCH_FIELDS,
        EntityKind::StaffMember => StaffMember::SEARCH_FIELDS,
        EntityKind::Franchise => Franchise::SEARCH_FIELDS,
        EntityKind::Report => Report::SEARCH_FIELDS,
        EntityKind::Booking => Booking::SEARCH_FIELDS,
    }
}

/// Row filter and form flag of a sub-view.
fn sub_view_behavior(module: ModuleId, sub_view: &str) -> (Option<RowFilter>, bool) {
    let filter = |field: &'static str, any_of: &'static [&'static str]| {
        Some(RowFilter { field, any_of })
    };
    match (module, sub_view) {
        (ModuleId::Billing, "new") | (ModuleId::Bookings, "new") => (None, true),
        (ModuleId::Staff, "add") | (ModuleId::Franchises, "add") => (None, true),
        (ModuleId::Billing, "online") => (filter("paymentMethod", &["UPI", "Online"]), false),
        (ModuleId::Billing, "ledger") => (filter("status", &["pending", "overdue"]), false),
        (ModuleId::Bookings, "pending") => (filter("status", &["Pending"]), false),
        (ModuleId::Bookings, "progress") => (filter("status", &["In Progress"]), false),
        (ModuleId::Bookings, "completed") => (filter("status", &["Completed"]), false),
        (ModuleId::Inventory, "requests") => (filter("stockStatus", &["Low"]), false),
        (ModuleId::Reports, "download") | (ModuleId::Reports, "old") => {
            (filter("status", &["completed"]), false)
        }
        _ => (None, false),
    }
}

/// Resolve a selector for a role. Unknown or hidden modules resolve to the
/// dashboard; unknown or hidden sub-views to the module's default sub-view.
pub fn resolve(selector: &ModuleSelector, role: Role) -> ViewSpec {
    let found = selector
        .module
        .parse::<ModuleId>()
        .ok()
        .and_then(entry)
        .filter(|e| e.visible_to(role));

    let Some(entry) = found else {
        tracing::warn!(%selector, %role, "unknown module, falling back to dashboard");
        return compose(&DASHBOARD, None, role);
    };

    let child = match selector.sub_view.as_deref() {
        None => entry.default_child(),
        Some(name) => {
            let visible = entry.child(name).filter(|c| c.roles.contains(&role));
            if visible.is_none() {
                tracing::warn!(%selector, %role, "unknown sub-view, using module default");
            }
            visible.or_else(|| entry.default_child())
        }
    };

    compose(entry, child, role)
}

fn compose(entry: &NavEntry, child: Option<&'static NavChild>, role: Role) -> ViewSpec {
    let actions = visible_actions(role, entry.module);
    let collection = collection_for(entry.module);

    let columns = collection
        .map(|kind| {
            columns(kind)
                .iter()
                .filter(|c| c.requires.map_or(true, |a| actions.contains(&a)))
                .copied()
                .collect()
        })
        .unwrap_or_default();

    let (filter, opens_form) = child
        .map(|c| sub_view_behavior(entry.module, c.sub_view))
        .unwrap_or((None, false));

    ViewSpec {
        module: entry.module,
        sub_view: child.map(|c| c.sub_view),
        title: entry.label,
        heading: child.map_or(entry.label, |c| c.label),
        icon: entry.icon,
        collection,
        search_fields: collection.map(search_fields).unwrap_or(&[]),
        columns,
        filter,
        opens_form: opens_form && actions.contains(&Action::Create),
        actions,
    }
}

/// Current navigation selection. Selecting overwrites it; there is no
/// history and no guard.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: ModuleSelector,
}

impl Navigator {
    pub fn new(landing: ModuleSelector) -> Self {
        Self { current: landing }
    }

    pub fn select(&mut self, selector: ModuleSelector) {
        tracing::debug!(from = %self.current, to = %selector, "navigate");
        self.current = selector;
    }

    pub fn current(&self) -> &ModuleSelector {
        &self.current
    }

    pub fn view(&self, role: Role) -> ViewSpec {
        resolve(&self.current, role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(s: &str) -> ModuleSelector {
        s.parse().unwrap()
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!(sel("billing/history"), ModuleSelector::new("billing", Some("history")));
        assert_eq!(sel(" patients "), ModuleSelector::new("patients", None));
        assert_eq!(sel("billing/"), ModuleSelector::new("billing", None));
        assert_eq!(sel("billing/ledger").to_string(), "billing/ledger");
    }

    #[test]
    fn test_unknown_module_resolves_to_dashboard() {
        for role in Role::ALL {
            let dashboard = resolve(&ModuleSelector::dashboard(), *role);
            assert_eq!(resolve(&sel("pharmacy"), *role), dashboard);
            assert_eq!(resolve(&sel("pharmacy/orders"), *role), dashboard);
            assert_eq!(resolve(&sel(""), *role), dashboard);
            assert_eq!(dashboard.module, ModuleId::Dashboard);
            assert_eq!(dashboard.collection, None);
        }
    }

    #[test]
    fn test_billing_entries_share_invoice_collection() {
        for sub in ["new", "online", "history", "ledger"] {
            let view = resolve(&ModuleSelector::new("billing", Some(sub)), Role::Admin);
            assert_eq!(view.collection, Some(EntityKind::Invoice));
            assert_eq!(view.sub_view, Some(sub));
        }
        let ledger = resolve(&sel("billing/ledger"), Role::Franchise);
        assert_eq!(ledger.heading, "Track Ledger");
        assert_eq!(ledger.filter.unwrap().any_of, &["pending", "overdue"]);
    }

    #[test]
    fn test_unknown_sub_view_uses_module_default() {
        let view = resolve(&sel("billing/refunds"), Role::Admin);
        assert_eq!(view.module, ModuleId::Billing);
        assert_eq!(view.sub_view, Some("history"));
        assert_eq!(view, resolve(&sel("billing"), Role::Admin));
    }

    #[test]
    fn test_admin_only_sub_view_hidden_from_franchise() {
        let view = resolve(&sel("franchise/add"), Role::Franchise);
        assert_eq!(view.module, ModuleId::Franchises);
        assert_eq!(view.sub_view, Some("list"));
        assert!(!view.opens_form);

        let admin = resolve(&sel("franchise/add"), Role::Admin);
        assert!(admin.opens_form);
        assert!(admin.allows(Action::ManageFranchise));
    }

    #[test]
    fn test_salary_column_admin_only() {
        let has_salary = |role| {
            resolve(&sel("staff"), role)
                .columns
                .iter()
                .any(|c| c.field == "salary")
        };
        assert!(has_salary(Role::Admin));
        assert!(!has_salary(Role::Franchise));
    }

    #[test]
    fn test_module_labels_are_case_insensitive() {
        let view = resolve(&sel("Reports/DOWNLOAD"), Role::Franchise);
        assert_eq!(view.module, ModuleId::Reports);
        assert_eq!(view.sub_view, Some("download"));
        assert!(view.allows(Action::Download));
    }

    #[test]
    fn test_row_filter() {
        let view = resolve(&sel("booking/progress"), Role::Franchise);
        let filter = view.filter.unwrap();

        let mut booking = Booking::new(
            "BK002".into(),
            "Jane Smith".into(),
            "Lipid Profile".into(),
            chrono::NaiveTime::from_hms_opt(10, 15, 0).unwrap(),
        );
        assert!(!filter.admits(&booking));
        booking.status = crate::models::BookingStatus::InProgress;
        assert!(filter.admits(&booking));
    }

    #[test]
    fn test_navigator_overwrites_selection() {
        let mut nav = Navigator::default();
        assert_eq!(nav.view(Role::Admin).module, ModuleId::Dashboard);

        nav.select(sel("inventory/requests"));
        nav.select(sel("nowhere"));
        assert_eq!(nav.current(), &sel("nowhere"));
        assert_eq!(nav.view(Role::Admin).module, ModuleId::Dashboard);

        nav.select(sel("inventory/requests"));
        let view = nav.view(Role::Admin);
        assert_eq!(view.module, ModuleId::Inventory);
        assert_eq!(view.search_fields, InventoryItem::SEARCH_FIELDS);
    }
}
