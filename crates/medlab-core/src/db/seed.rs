//! Demo collections loaded at session start.
//!
//! Seed rows go through [`Database::insert`], so they are validated like any
//! record created from a dialog.

use serde_json::{json, Value};

use super::{Database, DbResult, Stored};
use crate::models::{
    Booking, Franchise, InventoryItem, Invoice, LabTest, Patient, Report, StaffMember,
};

impl Database {
    /// Load the demo collections into an empty database.
    pub fn seed_demo_data(&self) -> DbResult<()> {
        self.insert_rows::<Patient>(patients())?;
        self.insert_rows::<LabTest>(lab_tests())?;
        self.insert_rows::<Invoice>(invoices())?;
        self.insert_rows::<InventoryItem>(inventory_items())?;
        self.insert_rows::<StaffMember>(staff_members())?;
        self.insert_rows::<Franchise>(franchises())?;
        self.insert_rows::<Report>(reports())?;
        self.insert_rows::<Booking>(bookings())?;
        tracing::debug!("demo data seeded");
        Ok(())
    }

    fn insert_rows<T: Stored>(&self, rows: Value) -> DbResult<()> {
        let records: Vec<T> = serde_json::from_value(rows)?;
        for record in &records {
            self.insert(record)?;
        }
        Ok(())
    }
}

fn patients() -> Value {
    json!([
        {
            "id": "P001", "name": "Ramesh Kumar", "age": 45, "gender": "Male",
            "phone": "+91 9876543210", "email": "ramesh@email.com", "address": "Delhi",
            "lastVisit": "2024-01-15", "status": "active"
        },
        {
            "id": "P002", "name": "Priya Sharma", "age": 32, "gender": "Female",
            "phone": "+91 8765432109", "email": "priya@email.com", "address": "Mumbai",
            "lastVisit": "2024-01-14", "status": "active"
        },
        {
            "id": "P003", "name": "Amit Patel", "age": 28, "gender": "Male",
            "phone": "+91 7654321098", "email": "amit@email.com", "address": "Ahmedabad",
            "lastVisit": "2024-01-10", "status": "inactive"
        }
    ])
}

fn lab_tests() -> Value {
    json!([
        {
            "id": "T001", "name": "Complete Blood Count (CBC)", "category": "Hematology",
            "b2bPrice": 250.0, "mrp": 350.0, "duration": "4-6 hours",
            "description": "Complete blood count with differential", "status": "active"
        },
        {
            "id": "T002", "name": "Lipid Profile", "category": "Biochemistry",
            "b2bPrice": 400.0, "mrp": 550.0, "duration": "8-12 hours",
            "description": "Cholesterol, triglycerides, HDL, LDL analysis", "status": "active"
        },
        {
            "id": "T003", "name": "Thyroid Function Test", "category": "Endocrinology",
            "b2bPrice": 500.0, "mrp": 700.0, "duration": "12-24 hours",
            "description": "TSH, T3, T4 hormone levels", "status": "active"
        },
        {
            "id": "T004", "name": "Blood Sugar (Fasting)", "category": "Biochemistry",
            "b2bPrice": 100.0, "mrp": 150.0, "duration": "2-4 hours",
            "description": "Fasting glucose level measurement", "status": "active"
        },
        {
            "id": "T005", "name": "Liver Function Test", "category": "Biochemistry",
            "b2bPrice": 350.0, "mrp": 500.0, "duration": "6-8 hours",
            "description": "SGPT, SGOT, Bilirubin, Protein levels", "status": "inactive"
        }
    ])
}

fn invoices() -> Value {
    json!([
        {
            "id": "INV-001", "patientId": "P001", "patientName": "Ramesh Kumar",
            "tests": ["CBC", "Lipid Profile"], "amount": 900.0, "discount": 50.0,
            "status": "paid", "paymentMethod": "UPI",
            "date": "2024-01-15", "dueDate": "2024-01-15"
        },
        {
            "id": "INV-002", "patientId": "P002", "patientName": "Priya Sharma",
            "tests": ["Thyroid Function"], "amount": 700.0, "discount": 0.0,
            "status": "pending", "paymentMethod": "Cash",
            "date": "2024-01-14", "dueDate": "2024-01-21"
        },
        {
            "id": "INV-003", "patientId": "P003", "patientName": "Amit Patel",
            "tests": ["Blood Sugar", "CBC"], "amount": 500.0, "discount": 25.0,
            "status": "overdue", "paymentMethod": "Card",
            "date": "2024-01-10", "dueDate": "2024-01-17"
        }
    ])
}

fn inventory_items() -> Value {
    json!([
        {
            "id": "INV001", "name": "Blood Collection Tubes", "category": "Consumables",
            "currentStock": 150, "minStock": 50, "maxStock": 500, "unitPrice": 25.0,
            "supplier": "MedSupply Co.", "lastUpdated": "2024-01-08"
        },
        {
            "id": "INV002", "name": "Reagent Kit - CBC", "category": "Reagents",
            "currentStock": 25, "minStock": 30, "maxStock": 100, "unitPrice": 1250.0,
            "supplier": "LabChem Ltd.", "lastUpdated": "2024-01-07"
        },
        {
            "id": "INV003", "name": "Microscope Slides", "category": "Consumables",
            "currentStock": 80, "minStock": 40, "maxStock": 200, "unitPrice": 15.0,
            "supplier": "GlassTech Inc.", "lastUpdated": "2024-01-06"
        },
        {
            "id": "INV004", "name": "Centrifuge Machine", "category": "Equipment",
            "currentStock": 2, "minStock": 1, "maxStock": 5, "unitPrice": 85000.0,
            "supplier": "MedEquip Solutions", "lastUpdated": "2024-01-05"
        },
        {
            "id": "INV005", "name": "Disposable Syringes", "category": "Consumables",
            "currentStock": 10, "minStock": 50, "maxStock": 300, "unitPrice": 8.0,
            "supplier": "SafeMed Supplies", "lastUpdated": "2024-01-04"
        }
    ])
}

fn staff_members() -> Value {
    json!([
        {
            "id": "STF001", "name": "Dr. Sarah Johnson", "role": "Lab Director",
            "department": "Administration", "email": "sarah.johnson@medlab.com",
            "phone": "+91 98765 43210", "joinDate": "2023-01-15", "status": "Active",
            "shift": "Day", "salary": 125000.0
        },
        {
            "id": "STF002", "name": "Michael Chen", "role": "Senior Technician",
            "department": "Hematology", "email": "michael.chen@medlab.com",
            "phone": "+91 98765 43211", "joinDate": "2023-03-20", "status": "Active",
            "shift": "Day", "salary": 85000.0
        },
        {
            "id": "STF003", "name": "Priya Sharma", "role": "Receptionist",
            "department": "Front Office", "email": "priya.sharma@medlab.com",
            "phone": "+91 98765 43212", "joinDate": "2023-06-10", "status": "Active",
            "shift": "Morning", "salary": 35000.0
        },
        {
            "id": "STF004", "name": "James Wilson", "role": "Lab Technician",
            "department": "Biochemistry", "email": "james.wilson@medlab.com",
            "phone": "+91 98765 43213", "joinDate": "2023-08-05", "status": "On Leave",
            "shift": "Evening", "salary": 65000.0
        },
        {
            "id": "STF005", "name": "Anita Patel", "role": "Quality Controller",
            "department": "Quality Assurance", "email": "anita.patel@medlab.com",
            "phone": "+91 98765 43214", "joinDate": "2023-09-12", "status": "Active",
            "shift": "Day", "salary": 95000.0
        }
    ])
}

fn franchises() -> Value {
    json!([
        {
            "id": "FRN001", "name": "MedLab Downtown", "ownerName": "Dr. Rajesh Kumar",
            "location": "Downtown Business District",
            "address": "123 Main Street, Downtown, Mumbai - 400001",
            "phone": "+91 98765 43210", "email": "rajesh.kumar@medlab.com",
            "establishedDate": "2023-01-15", "status": "Active", "testsCompleted": 2450,
            "monthlyRevenue": 185000.0, "staffCount": 8, "performanceScore": 95
        },
        {
            "id": "FRN002", "name": "MedLab Uptown", "ownerName": "Dr. Priya Sharma",
            "location": "Uptown Medical Center",
            "address": "456 Health Avenue, Uptown, Mumbai - 400020",
            "phone": "+91 98765 43211", "email": "priya.sharma@medlab.com",
            "establishedDate": "2023-03-20", "status": "Active", "testsCompleted": 1890,
            "monthlyRevenue": 142000.0, "staffCount": 6, "performanceScore": 88
        },
        {
            "id": "FRN003", "name": "MedLab City Mall", "ownerName": "Dr. Amit Patel",
            "location": "City Mall Complex",
            "address": "789 Shopping Plaza, City Center, Mumbai - 400015",
            "phone": "+91 98765 43212", "email": "amit.patel@medlab.com",
            "establishedDate": "2023-06-10", "status": "Active", "testsCompleted": 1250,
            "monthlyRevenue": 98000.0, "staffCount": 5, "performanceScore": 82
        },
        {
            "id": "FRN004", "name": "MedLab Suburban", "ownerName": "Dr. Sarah Johnson",
            "location": "Suburban Healthcare Hub",
            "address": "321 Wellness Road, Suburbs, Mumbai - 400050",
            "phone": "+91 98765 43213", "email": "sarah.johnson@medlab.com",
            "establishedDate": "2023-08-05", "status": "Under Review", "testsCompleted": 680,
            "monthlyRevenue": 52000.0, "staffCount": 4, "performanceScore": 75
        },
        {
            "id": "FRN005", "name": "MedLab Express", "ownerName": "Dr. Michael Chen",
            "location": "Express Healthcare Center",
            "address": "654 Quick Care Lane, Express District, Mumbai - 400030",
            "phone": "+91 98765 43214", "email": "michael.chen@medlab.com",
            "establishedDate": "2023-09-12", "status": "Inactive", "testsCompleted": 420,
            "monthlyRevenue": 28000.0, "staffCount": 3, "performanceScore": 65
        }
    ])
}

fn reports() -> Value {
    json!([
        {
            "id": "RPT-001", "patientId": "P001", "patientName": "Ramesh Kumar",
            "testName": "Complete Blood Count", "requestDate": "2024-01-15",
            "completionDate": "2024-01-15", "status": "completed",
            "findings": "Normal values within reference range", "technician": "Dr. Sharma"
        },
        {
            "id": "RPT-002", "patientId": "P002", "patientName": "Priya Sharma",
            "testName": "Lipid Profile", "requestDate": "2024-01-14",
            "completionDate": null, "status": "processing",
            "findings": "Analysis in progress", "technician": "Dr. Patel"
        },
        {
            "id": "RPT-003", "patientId": "P003", "patientName": "Amit Patel",
            "testName": "Thyroid Function", "requestDate": "2024-01-10",
            "completionDate": "2024-01-12", "status": "completed",
            "findings": "Slightly elevated TSH levels", "technician": "Dr. Kumar"
        },
        {
            "id": "RPT-004", "patientId": "P004", "patientName": "Sunita Devi",
            "testName": "Blood Sugar Test", "requestDate": "2024-01-13",
            "completionDate": null, "status": "pending",
            "findings": "Awaiting sample processing", "technician": "Dr. Singh"
        }
    ])
}

fn bookings() -> Value {
    json!([
        {
            "id": "BK001", "patientName": "John Doe", "testName": "Complete Blood Count",
            "status": "Pending", "slot": "09:30:00"
        },
        {
            "id": "BK002", "patientName": "Jane Smith", "testName": "Lipid Profile",
            "status": "In Progress", "slot": "10:15:00"
        },
        {
            "id": "BK003", "patientName": "Mike Johnson", "testName": "Thyroid Function",
            "status": "Completed", "slot": "08:45:00"
        },
        {
            "id": "BK004", "patientName": "Sarah Wilson", "testName": "Diabetes Panel",
            "status": "Pending", "slot": "11:00:00"
        }
    ])
}
