//! Summary aggregates shown above each list.
//!
//! Aggregates are computed over the rows the viewer currently sees (after
//! sub-view filter and search), so the cards always agree with the table.

mod analytics;

pub use analytics::*;

use std::collections::BTreeSet;

use crate::access::{Action, Role};
use crate::format::format_currency;
use crate::models::{
    ActiveStatus, Booking, BookingStatus, Franchise, FranchiseStatus, InventoryItem, Invoice,
    InvoiceStatus, LabTest, Patient, Record, Report, ReportStatus, StaffMember, StaffStatus,
};

/// The value behind a summary card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Count(usize),
    Amount(f64),
    /// Average of 0-100 scores.
    Score(f64),
}

/// A summary card.
#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub label: &'static str,
    pub metric: Metric,
    /// Action the viewer needs to see this card.
    pub requires: Option<Action>,
}

impl Stat {
    pub fn count(label: &'static str, n: usize) -> Self {
        Self {
            label,
            metric: Metric::Count(n),
            requires: None,
        }
    }

    pub fn amount(label: &'static str, amount: f64) -> Self {
        Self {
            label,
            metric: Metric::Amount(amount),
            requires: None,
        }
    }

    pub fn requiring(mut self, action: Action) -> Self {
        self.requires = Some(action);
        self
    }

    /// Rendered value, amounts in `currency`.
    pub fn display(&self, currency: &str) -> String {
        match self.metric {
            Metric::Count(n) => n.to_string(),
            Metric::Amount(a) => format_currency(a, currency),
            Metric::Score(s) => format!("{:.1}", s),
        }
    }
}

/// Drop cards the viewer may not see.
pub fn visible_stats(stats: Vec<Stat>, actions: &BTreeSet<Action>) -> Vec<Stat> {
    stats
        .into_iter()
        .filter(|s| s.requires.map_or(true, |a| actions.contains(&a)))
        .collect()
}

/// Per-collection summary cards.
pub trait Summarize: Record + Sized {
    fn summarize(rows: &[&Self]) -> Vec<Stat>;
}

fn count_where<T>(rows: &[&T], pred: impl Fn(&T) -> bool) -> usize {
    rows.iter().filter(|r| pred(r)).count()
}

fn sum_of<T>(rows: &[&T], value: impl Fn(&T) -> f64) -> f64 {
    rows.iter().map(|r| value(r)).sum()
}

impl Summarize for Patient {
    fn summarize(rows: &[&Self]) -> Vec<Stat> {
        vec![
            Stat::count("Total Patients", rows.len()),
            Stat::count("Active", count_where(rows, Patient::is_active)),
            Stat::count(
                "Inactive",
                count_where(rows, |p| p.status == ActiveStatus::Inactive),
            ),
        ]
    }
}

impl Summarize for LabTest {
    fn summarize(rows: &[&Self]) -> Vec<Stat> {
        let categories: BTreeSet<&str> = rows.iter().map(|t| t.category.as_str()).collect();
        vec![
            Stat::count("Total Tests", rows.len()),
            Stat::count("Active Tests", count_where(rows, LabTest::is_active)),
            Stat::count("Categories", categories.len()),
        ]
    }
}

impl Summarize for Invoice {
    fn summarize(rows: &[&Self]) -> Vec<Stat> {
        let paid = |i: &Invoice| i.status == InvoiceStatus::Paid;
        vec![
            Stat::count("Invoices", rows.len()),
            Stat::amount("Total Billed", sum_of(rows, Invoice::final_amount)),
            Stat::amount(
                "Collected",
                sum_of(rows, |i| if paid(i) { i.final_amount() } else { 0.0 }),
            ),
            Stat::amount(
                "Outstanding",
                sum_of(rows, |i| {
                    if i.status.is_outstanding() {
                        i.final_amount()
                    } else {
                        0.0
                    }
                }),
            ),
            Stat::count(
                "Overdue",
                count_where(rows, |i| i.status == InvoiceStatus::Overdue),
            ),
        ]
    }
}

impl Summarize for InventoryItem {
    fn summarize(rows: &[&Self]) -> Vec<Stat> {
        vec![
            Stat::count("Total Items", rows.len()),
            Stat::count("Low Stock", count_where(rows, InventoryItem::is_low)),
            Stat::amount("Stock Value", sum_of(rows, InventoryItem::stock_value)),
        ]
    }
}

impl Summarize for StaffMember {
    fn summarize(rows: &[&Self]) -> Vec<Stat> {
        vec![
            Stat::count("Total Staff", rows.len()),
            Stat::count(
                "Active",
                count_where(rows, |s| s.status == StaffStatus::Active),
            ),
            Stat::count(
                "On Leave",
                count_where(rows, |s| s.status == StaffStatus::OnLeave),
            ),
            Stat::amount("Monthly Payroll", sum_of(rows, |s| s.salary))
                .requiring(Action::ViewSalary),
        ]
    }
}

impl Summarize for Franchise {
    fn summarize(rows: &[&Self]) -> Vec<Stat> {
        let average = if rows.is_empty() {
            0.0
        } else {
            sum_of(rows, |f| f64::from(f.performance_score)) / rows.len() as f64
        };
        vec![
            Stat::count("Total Franchises", rows.len()),
            Stat::count(
                "Active",
                count_where(rows, |f| f.status == FranchiseStatus::Active),
            ),
            Stat::amount("Monthly Revenue", sum_of(rows, |f| f.monthly_revenue)),
            Stat::count(
                "Tests Completed",
                rows.iter().map(|f| f.tests_completed as usize).sum(),
            ),
            Stat {
                label: "Average Performance",
                metric: Metric::Score(average),
                requires: None,
            },
        ]
    }
}

impl Summarize for Report {
    fn summarize(rows: &[&Self]) -> Vec<Stat> {
        let with = |status: ReportStatus| count_where(rows, move |r: &Report| r.status == status);
        vec![
            Stat::count("Total Reports", rows.len()),
            Stat::count("Completed", with(ReportStatus::Completed)),
            Stat::count("Processing", with(ReportStatus::Processing)),
            Stat::count("Pending", with(ReportStatus::Pending)),
        ]
    }
}

impl Summarize for Booking {
    fn summarize(rows: &[&Self]) -> Vec<Stat> {
        let with = |status: BookingStatus| count_where(rows, move |b: &Booking| b.status == status);
        vec![
            Stat::count("Total Bookings", rows.len()),
            Stat::count("Pending", with(BookingStatus::Pending)),
            Stat::count("In Progress", with(BookingStatus::InProgress)),
            Stat::count("Completed", with(BookingStatus::Completed)),
        ]
    }
}

/// Summary cards for a role, computed over `rows`.
pub fn summarize_for<T: Summarize>(rows: &[&T], role: Role, actions: &BTreeSet<Action>) -> Vec<Stat> {
    let stats = visible_stats(T::summarize(rows), actions);
    tracing::debug!(kind = %T::KIND, %role, rows = rows.len(), cards = stats.len(), "summarized");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{visible_actions, ModuleId};
    use crate::db::Database;
    use crate::query::search_default;

    fn metric(stats: &[Stat], label: &str) -> Metric {
        stats
            .iter()
            .find(|s| s.label == label)
            .unwrap_or_else(|| panic!("no stat {label}"))
            .metric
    }

    #[test]
    fn test_invoice_summary_over_seed() {
        let db = Database::open_with_demo_data().unwrap();
        let invoices = db.list::<Invoice>().unwrap();
        let rows: Vec<&Invoice> = invoices.iter().collect();

        let stats = Invoice::summarize(&rows);
        assert_eq!(metric(&stats, "Invoices"), Metric::Count(3));
        assert_eq!(metric(&stats, "Total Billed"), Metric::Amount(2025.0));
        assert_eq!(metric(&stats, "Collected"), Metric::Amount(850.0));
        assert_eq!(metric(&stats, "Outstanding"), Metric::Amount(1175.0));
        assert_eq!(metric(&stats, "Overdue"), Metric::Count(1));
    }

    #[test]
    fn test_summary_follows_search() {
        let db = Database::open_with_demo_data().unwrap();
        let invoices = db.list::<Invoice>().unwrap();
        let rows = search_default(&invoices, "amit");

        let stats = Invoice::summarize(&rows);
        assert_eq!(metric(&stats, "Invoices"), Metric::Count(1));
        assert_eq!(metric(&stats, "Total Billed"), Metric::Amount(475.0));
    }

    #[test]
    fn test_inventory_summary() {
        let db = Database::open_with_demo_data().unwrap();
        let items = db.list::<InventoryItem>().unwrap();
        let rows: Vec<&InventoryItem> = items.iter().collect();

        let stats = InventoryItem::summarize(&rows);
        assert_eq!(metric(&stats, "Low Stock"), Metric::Count(2));
        // 150*25 + 25*1250 + 80*15 + 2*85000 + 10*8
        assert_eq!(metric(&stats, "Stock Value"), Metric::Amount(206_280.0));
    }

    #[test]
    fn test_payroll_hidden_from_franchise() {
        let db = Database::open_with_demo_data().unwrap();
        let staff = db.list::<StaffMember>().unwrap();
        let rows: Vec<&StaffMember> = staff.iter().collect();

        let admin = summarize_for(&rows, Role::Admin, &visible_actions(Role::Admin, ModuleId::Staff));
        assert_eq!(metric(&admin, "Monthly Payroll"), Metric::Amount(405_000.0));

        let franchise = summarize_for(
            &rows,
            Role::Franchise,
            &visible_actions(Role::Franchise, ModuleId::Staff),
        );
        assert!(franchise.iter().all(|s| s.label != "Monthly Payroll"));
        assert_eq!(metric(&franchise, "On Leave"), Metric::Count(1));
    }

    #[test]
    fn test_empty_rows() {
        let stats = Franchise::summarize(&[]);
        assert_eq!(metric(&stats, "Total Franchises"), Metric::Count(0));
        assert_eq!(metric(&stats, "Average Performance"), Metric::Score(0.0));
    }

    #[test]
    fn test_stat_display() {
        assert_eq!(Stat::amount("Revenue", 567890.0).display("₹"), "₹5,67,890");
        assert_eq!(Stat::count("Patients", 3).display("₹"), "3");
    }
}
