use chrono::Duration;

use super::{merge_for_edit, FormContext, FormData, FormReader, FromForm};
use crate::models::{
    ActiveStatus, Booking, BookingStatus, FieldError, Franchise, FranchiseStatus, Gender,
    InventoryItem, Invoice, InvoiceStatus, LabTest, Patient, PaymentMethod, Report, ReportStatus,
    Shift, StaffMember, StaffStatus,
};

impl FromForm for Patient {
    fn from_form(id: String, form: &FormData, ctx: &FormContext) -> Result<Self, Vec<FieldError>> {
        let mut r = FormReader::new(form);
        let patient = Patient {
            id,
            name: r.text("name"),
            age: r.count("age"),
            gender: r.label("gender", Gender::Other),
            phone: r.text_or_empty("phone"),
            email: r.text_or_empty("email"),
            address: r.text_or_empty("address"),
            last_visit: r.date_or("lastVisit", ctx.today),
            status: r.label_or("status", ActiveStatus::Active),
        };
        r.finish(patient)
    }
}

impl FromForm for LabTest {
    fn from_form(id: String, form: &FormData, _ctx: &FormContext) -> Result<Self, Vec<FieldError>> {
        let mut r = FormReader::new(form);
        let test = LabTest {
            id,
            name: r.text("name"),
            category: r.text("category"),
            b2b_price: r.number("b2bPrice"),
            mrp: r.number("mrp"),
            duration: r.text_or_empty("duration"),
            description: r.text_or_empty("description"),
            status: r.label_or("status", ActiveStatus::Active),
        };
        r.finish(test)
    }
}

impl FromForm for Invoice {
    fn from_form(id: String, form: &FormData, ctx: &FormContext) -> Result<Self, Vec<FieldError>> {
        let mut r = FormReader::new(form);
        let date = r.date_or("date", ctx.today);
        let terms = Duration::days(i64::from(ctx.payment_terms_days));
        let invoice = Invoice {
            id,
            patient_id: r.text("patientId"),
            patient_name: r.text("patientName"),
            tests: r.list("tests"),
            amount: r.number("amount"),
            discount: r.number_or("discount", 0.0),
            status: r.label_or("status", InvoiceStatus::Pending),
            payment_method: r.label_or("paymentMethod", PaymentMethod::Cash),
            date,
            due_date: r.date_or("dueDate", date + terms),
        };
        r.finish(invoice)
    }
}

impl FromForm for InventoryItem {
    fn from_form(id: String, form: &FormData, ctx: &FormContext) -> Result<Self, Vec<FieldError>> {
        let mut r = FormReader::new(form);
        let item = InventoryItem {
            id,
            name: r.text("name"),
            category: r.text("category"),
            current_stock: r.count("currentStock"),
            min_stock: r.count("minStock"),
            max_stock: r.count("maxStock"),
            unit_price: r.number("unitPrice"),
            supplier: r.text_or_empty("supplier"),
            last_updated: ctx.today,
        };
        r.finish(item)
    }
}

impl FromForm for StaffMember {
    fn from_form(id: String, form: &FormData, ctx: &FormContext) -> Result<Self, Vec<FieldError>> {
        let mut r = FormReader::new(form);
        let member = StaffMember {
            id,
            name: r.text("name"),
            role: r.text("role"),
            department: r.text("department"),
            email: r.text_or_empty("email"),
            phone: r.text_or_empty("phone"),
            join_date: r.date_or("joinDate", ctx.today),
            status: r.label_or("status", StaffStatus::Active),
            shift: r.label_or("shift", Shift::Day),
            salary: r.number_or("salary", 0.0),
        };
        r.finish(member)
    }
}

impl FromForm for Franchise {
    fn from_form(id: String, form: &FormData, ctx: &FormContext) -> Result<Self, Vec<FieldError>> {
        let mut r = FormReader::new(form);
        let franchise = Franchise {
            id,
            name: r.text("name"),
            owner_name: r.text("ownerName"),
            location: r.text("location"),
            address: r.text_or_empty("address"),
            phone: r.text_or_empty("phone"),
            email: r.text_or_empty("email"),
            established_date: r.date_or("establishedDate", ctx.today),
            // New franchises start under review.
            status: r.label_or("status", FranchiseStatus::UnderReview),
            tests_completed: r.count_or("testsCompleted", 0),
            monthly_revenue: r.number_or("monthlyRevenue", 0.0),
            staff_count: r.count_or("staff", 0),
            performance_score: r.count_or("performanceScore", 0),
        };
        r.finish(franchise)
    }
}

impl FromForm for Report {
    fn from_form(id: String, form: &FormData, ctx: &FormContext) -> Result<Self, Vec<FieldError>> {
        let mut r = FormReader::new(form);
        let report = Report {
            id,
            patient_id: r.text("patientId"),
            patient_name: r.text("patientName"),
            test_name: r.text("testName"),
            request_date: r.date_or("requestDate", ctx.today),
            completion_date: r.optional_date("completionDate"),
            status: r.label_or("status", ReportStatus::Pending),
            findings: r.text_or_empty("findings"),
            technician: r.text_or_empty("technician"),
        };
        r.finish(report)
    }

    /// The stored completion date is dropped when the edit moves the report
    /// out of `completed` without naming a date.
    fn edit_form(current: &Self, submitted: &FormData) -> FormData {
        let mut form = merge_for_edit(current, submitted);
        let completed = form
            .get("status")
            .and_then(|s| s.parse::<ReportStatus>().ok())
            == Some(ReportStatus::Completed);
        if !completed && !submitted.contains_key("completionDate") {
            form.remove("completionDate");
        }
        form
    }
}

impl FromForm for Booking {
    fn from_form(id: String, form: &FormData, _ctx: &FormContext) -> Result<Self, Vec<FieldError>> {
        let mut r = FormReader::new(form);
        let booking = Booking {
            id,
            patient_name: r.text("patientName"),
            test_name: r.text("testName"),
            status: r.label_or("status", BookingStatus::Pending),
            slot: r.time("time"),
        };
        r.finish(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn ctx() -> FormContext {
        FormContext::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), 7)
    }

    fn form(pairs: &[(&str, &str)]) -> FormData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn error_fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_patient_form() {
        let data = form(&[("name", "Sunita Devi"), ("age", "52"), ("gender", "female")]);
        let patient = Patient::from_form("P004".into(), &data, &ctx()).unwrap();

        assert_eq!(patient.gender, Gender::Female);
        assert_eq!(patient.last_visit, ctx().today);
        assert_eq!(patient.status, ActiveStatus::Active);
    }

    #[test]
    fn test_invoice_discount_above_amount() {
        let data = form(&[
            ("patientId", "P003"),
            ("patientName", "Amit Patel"),
            ("tests", "CBC"),
            ("amount", "500"),
            ("discount", "600"),
        ]);
        let errors = Invoice::from_form("INV-004".into(), &data, &ctx()).unwrap_err();
        assert_eq!(error_fields(&errors), vec!["discount"]);
    }

    #[test]
    fn test_invoice_defaults_due_date_from_terms() {
        let data = form(&[
            ("patientId", "P003"),
            ("patientName", "Amit Patel"),
            ("tests", "Blood Sugar, CBC"),
            ("amount", "500"),
            ("discount", "25"),
            ("paymentMethod", "card"),
        ]);
        let invoice = Invoice::from_form("INV-004".into(), &data, &ctx()).unwrap();
        assert_eq!(invoice.final_amount(), 475.0);
        assert_eq!(invoice.payment_method, PaymentMethod::Card);
        assert_eq!(invoice.due_date, NaiveDate::from_ymd_opt(2024, 1, 22).unwrap());
    }

    #[test]
    fn test_test_form_non_numeric_price() {
        let data = form(&[
            ("name", "HbA1c"),
            ("category", "Biochemistry"),
            ("b2bPrice", "three hundred"),
            ("mrp", "450"),
        ]);
        let errors = LabTest::from_form("T006".into(), &data, &ctx()).unwrap_err();
        assert_eq!(error_fields(&errors), vec!["b2bPrice"]);
    }

    #[test]
    fn test_inventory_negative_stock() {
        let data = form(&[
            ("name", "Gloves"),
            ("category", "Consumables"),
            ("currentStock", "-10"),
            ("minStock", "50"),
            ("maxStock", "20"),
            ("unitPrice", "5"),
        ]);
        let errors = InventoryItem::from_form("INV006".into(), &data, &ctx()).unwrap_err();
        assert_eq!(error_fields(&errors), vec!["currentStock", "minStock"]);
    }

    #[test]
    fn test_booking_time_formats() {
        for raw in ["14:30", "02:30 PM"] {
            let data = form(&[
                ("patientName", "John Doe"),
                ("testName", "CBC"),
                ("time", raw),
            ]);
            let booking = Booking::from_form("BK005".into(), &data, &ctx()).unwrap();
            assert_eq!(booking.slot, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        }
    }

    #[test]
    fn test_report_completion_rules_apply() {
        let data = form(&[
            ("patientId", "P001"),
            ("patientName", "Ramesh Kumar"),
            ("testName", "CBC"),
            ("status", "completed"),
        ]);
        let errors = Report::from_form("RPT-005".into(), &data, &ctx()).unwrap_err();
        assert_eq!(error_fields(&errors), vec!["completionDate"]);
    }

    #[test]
    fn test_edit_keeps_unsubmitted_fields() {
        let mut franchise = Franchise::new(
            "FRN001".into(),
            "MedLab Downtown".into(),
            "Dr. Rajesh Kumar".into(),
            "Downtown Business District".into(),
        );
        franchise.performance_score = 95;
        franchise.monthly_revenue = 185000.0;
        franchise.status = FranchiseStatus::Active;

        let merged = merge_for_edit(&franchise, &form(&[("performanceScore", "97")]));
        let edited = Franchise::from_form(franchise.id.clone(), &merged, &ctx()).unwrap();

        assert_eq!(edited.performance_score, 97);
        assert_eq!(edited.monthly_revenue, 185000.0);
        assert_eq!(edited.status, FranchiseStatus::Active);
        assert_eq!(edited.established_date, franchise.established_date);
    }

    #[test]
    fn test_report_edit_out_of_completed() {
        let mut report = Report::new(
            "RPT-001".into(),
            "P001".into(),
            "Ramesh Kumar".into(),
            "CBC".into(),
        );
        report.request_date = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        report.complete(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "Normal values".into(),
        );

        let values = Report::edit_form(&report, &form(&[("status", "rejected")]));
        let edited = Report::from_form(report.id.clone(), &values, &ctx()).unwrap();
        assert_eq!(edited.status, ReportStatus::Rejected);
        assert_eq!(edited.completion_date, None);

        // A date named alongside a non-completed status is still refused.
        let values = Report::edit_form(
            &report,
            &form(&[("status", "processing"), ("completionDate", "2024-01-16")]),
        );
        let errors = Report::from_form(report.id.clone(), &values, &ctx()).unwrap_err();
        assert_eq!(error_fields(&errors), vec!["completionDate"]);

        let values = Report::edit_form(&report, &form(&[("findings", "Normal")]));
        let edited = Report::from_form(report.id.clone(), &values, &ctx()).unwrap();
        assert_eq!(edited.completion_date, report.completion_date);
    }

    #[test]
    fn test_edit_round_trips_booking_time() {
        let booking = Booking::new(
            "BK001".into(),
            "John Doe".into(),
            "Complete Blood Count".into(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        );
        let merged = merge_for_edit(&booking, &form(&[("status", "In Progress")]));
        let edited = Booking::from_form(booking.id.clone(), &merged, &ctx()).unwrap();
        assert_eq!(edited.slot, booking.slot);
        assert_eq!(edited.status, BookingStatus::InProgress);
    }
}
