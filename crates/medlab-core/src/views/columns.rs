//! Column descriptors per collection.

use crate::access::Action;
use crate::models::EntityKind;

/// How a cell's value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    Text,
    /// Amount in the session currency with Indian digit grouping.
    Currency,
    /// Status badge; the cell carries the record's tone.
    Status,
}

/// One table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Record field shown in this column.
    pub field: &'static str,
    pub header: &'static str,
    pub format: CellFormat,
    /// Action the viewer needs to see this column.
    pub requires: Option<Action>,
}

const fn text(field: &'static str, header: &'static str) -> ColumnSpec {
    ColumnSpec {
        field,
        header,
        format: CellFormat::Text,
        requires: None,
    }
}

const fn money(field: &'static str, header: &'static str) -> ColumnSpec {
    ColumnSpec {
        field,
        header,
        format: CellFormat::Currency,
        requires: None,
    }
}

const fn status(field: &'static str) -> ColumnSpec {
    ColumnSpec {
        field,
        header: "Status",
        format: CellFormat::Status,
        requires: None,
    }
}

const PATIENT_COLUMNS: &[ColumnSpec] = &[
    text("id", "Patient ID"),
    text("name", "Name"),
    text("age", "Age"),
    text("gender", "Gender"),
    text("phone", "Contact"),
    text("lastVisit", "Last Visit"),
    status("status"),
];

const TEST_COLUMNS: &[ColumnSpec] = &[
    text("id", "Test ID"),
    text("name", "Test Name"),
    text("category", "Category"),
    money("b2bPrice", "B2B Price"),
    money("mrp", "MRP"),
    money("margin", "Margin"),
    text("duration", "Duration"),
    status("status"),
];

const INVOICE_COLUMNS: &[ColumnSpec] = &[
    text("id", "Invoice ID"),
    text("patientName", "Patient"),
    text("tests", "Tests"),
    money("amount", "Amount"),
    money("discount", "Discount"),
    money("finalAmount", "Final Amount"),
    text("paymentMethod", "Payment Method"),
    text("date", "Date"),
    status("status"),
];

const INVENTORY_COLUMNS: &[ColumnSpec] = &[
    text("id", "Item ID"),
    text("name", "Item Name"),
    text("category", "Category"),
    text("currentStock", "Current Stock"),
    text("minStock", "Min Stock"),
    money("unitPrice", "Unit Price"),
    text("supplier", "Supplier"),
    status("stockStatus"),
];

const STAFF_COLUMNS: &[ColumnSpec] = &[
    text("id", "Staff ID"),
    text("name", "Name"),
    text("role", "Role"),
    text("department", "Department"),
    text("shift", "Shift"),
    text("joinDate", "Join Date"),
    ColumnSpec {
        field: "salary",
        header: "Salary",
        format: CellFormat::Currency,
        requires: Some(Action::ViewSalary),
    },
    status("status"),
];

const FRANCHISE_COLUMNS: &[ColumnSpec] = &[
    text("id", "Franchise ID"),
    text("name", "Franchise"),
    text("ownerName", "Owner"),
    text("location", "Location"),
    text("testsCompleted", "Tests Completed"),
    money("monthlyRevenue", "Monthly Revenue"),
    text("performanceScore", "Performance"),
    status("status"),
];

const REPORT_COLUMNS: &[ColumnSpec] = &[
    text("id", "Report ID"),
    text("patientName", "Patient"),
    text("testName", "Test"),
    text("requestDate", "Requested"),
    text("completionDate", "Completed"),
    text("technician", "Technician"),
    status("status"),
];

const BOOKING_COLUMNS: &[ColumnSpec] = &[
    text("id", "Booking ID"),
    text("patientName", "Patient"),
    text("testName", "Test"),
    text("time", "Time"),
    status("status"),
];

/// All columns of a collection, before role filtering.
pub fn columns(kind: EntityKind) -> &'static [ColumnSpec] {
    match kind {
        EntityKind::Patient => PATIENT_COLUMNS,
        EntityKind::LabTest => TEST_COLUMNS,
        EntityKind::Invoice => INVOICE_COLUMNS,
        EntityKind::InventoryItem => INVENTORY_COLUMNS,
        EntityKind::StaffMember => STAFF_COLUMNS,
        EntityKind::Franchise => FRANCHISE_COLUMNS,
        EntityKind::Report => REPORT_COLUMNS,
        EntityKind::Booking => BOOKING_COLUMNS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Booking, Franchise, InventoryItem, Invoice, LabTest, Patient, Record, Report, StaffMember,
    };

    fn fields_exist<T: Record>() {
        for column in columns(T::KIND) {
            assert!(
                T::FIELDS.contains(&column.field),
                "{} has no field {}",
                T::KIND,
                column.field
            );
        }
    }

    #[test]
    fn test_columns_name_real_fields() {
        fields_exist::<Patient>();
        fields_exist::<LabTest>();
        fields_exist::<Invoice>();
        fields_exist::<InventoryItem>();
        fields_exist::<StaffMember>();
        fields_exist::<Franchise>();
        fields_exist::<Report>();
        fields_exist::<Booking>();
    }

    #[test]
    fn test_every_collection_has_one_status_column() {
        for kind in EntityKind::ALL {
            let statuses = columns(*kind)
                .iter()
                .filter(|c| c.format == CellFormat::Status)
                .count();
            assert_eq!(statuses, 1, "{kind}");
        }
    }
}
