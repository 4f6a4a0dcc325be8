//! Analytics and dashboard home figures.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::{
    Booking, BookingStatus, Franchise, Invoice, InvoiceStatus, Patient, PerformanceBand, Report,
    ReportStatus,
};

use super::Stat;

/// Revenue billed in one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub invoices: usize,
    /// Sum of final amounts.
    pub revenue: f64,
}

impl MonthlyRevenue {
    /// Short label such as "Jan 2024".
    pub fn label(&self) -> String {
        chrono::NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }
}

/// Invoice totals per month, oldest first.
pub fn monthly_revenue(invoices: &[Invoice]) -> Vec<MonthlyRevenue> {
    let mut months: BTreeMap<(i32, u32), (usize, f64)> = BTreeMap::new();
    for invoice in invoices {
        let slot = months
            .entry((invoice.date.year(), invoice.date.month()))
            .or_default();
        slot.0 += 1;
        slot.1 += invoice.final_amount();
    }

    months
        .into_iter()
        .map(|((year, month), (invoices, revenue))| MonthlyRevenue {
            year,
            month,
            invoices,
            revenue,
        })
        .collect()
}

/// How often a test was billed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFrequency {
    pub name: String,
    pub count: usize,
}

/// The `limit` most billed tests, most frequent first. Ties keep the order in
/// which tests first appear.
pub fn top_tests(invoices: &[Invoice], limit: usize) -> Vec<TestFrequency> {
    let mut counts: Vec<TestFrequency> = Vec::new();
    for name in invoices.iter().flat_map(|i| i.tests.iter()) {
        match counts.iter_mut().find(|t| t.name.eq_ignore_ascii_case(name)) {
            Some(entry) => entry.count += 1,
            None => counts.push(TestFrequency {
                name: name.clone(),
                count: 1,
            }),
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// A franchise's place in the performance ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct FranchiseRanking {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub score: u8,
    pub band: PerformanceBand,
    pub monthly_revenue: f64,
}

/// Franchises ranked by performance score, best first.
pub fn franchise_performance(franchises: &[Franchise]) -> Vec<FranchiseRanking> {
    let mut ranked: Vec<&Franchise> = franchises.iter().collect();
    ranked.sort_by(|a, b| b.performance_score.cmp(&a.performance_score));

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, f)| FranchiseRanking {
            rank: i + 1,
            id: f.id.clone(),
            name: f.name.clone(),
            score: f.performance_score,
            band: f.performance_band(),
            monthly_revenue: f.monthly_revenue,
        })
        .collect()
}

/// Figures on the dashboard landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeStats {
    pub total_patients: usize,
    pub tests_completed: usize,
    pub appointments: usize,
    pub pending_bookings: usize,
    /// Collected revenue (paid invoices).
    pub revenue: f64,
    /// Latest reports, newest request first.
    pub recent_reports: Vec<Report>,
}

impl HomeStats {
    pub fn compute(
        patients: &[Patient],
        reports: &[Report],
        bookings: &[Booking],
        invoices: &[Invoice],
        recent: usize,
    ) -> Self {
        let mut recent_reports: Vec<Report> = reports.to_vec();
        recent_reports.sort_by(|a, b| b.request_date.cmp(&a.request_date));
        recent_reports.truncate(recent);

        Self {
            total_patients: patients.len(),
            tests_completed: reports
                .iter()
                .filter(|r| r.status == ReportStatus::Completed)
                .count(),
            appointments: bookings.len(),
            pending_bookings: bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Pending)
                .count(),
            revenue: invoices
                .iter()
                .filter(|i| i.status == InvoiceStatus::Paid)
                .map(Invoice::final_amount)
                .sum(),
            recent_reports,
        }
    }

    /// The figures as summary cards.
    pub fn stats(&self) -> Vec<Stat> {
        vec![
            Stat::count("Total Patients", self.total_patients),
            Stat::count("Tests Completed", self.tests_completed),
            Stat::count("Appointments Today", self.appointments),
            Stat::amount("Revenue", self.revenue),
        ]
    }
}
