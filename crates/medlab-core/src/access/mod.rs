//! Role policy: which actions each role sees in each module.
//!
//! This is a static capability table. There are no per-record ownership
//! checks; a franchise user who may edit patients may edit any patient.

use std::collections::BTreeSet;

use crate::models::{label_enum, EntityKind};

label_enum! {
    /// Viewer capability class, fixed for a session.
    pub enum Role {
        Admin => "admin",
        Franchise => "franchise",
    }
}

label_enum! {
    /// Top-level navigation destination.
    pub enum ModuleId {
        Dashboard => "dashboard",
        Patients => "patients",
        Tests => "tests",
        Billing => "billing",
        Bookings => "booking",
        Inventory => "inventory",
        Staff => "staff",
        Franchises => "franchise",
        Reports => "reports",
        Analytics => "analytics",
        Settings => "settings",
    }
}

impl ModuleId {
    /// Module whose views show a collection.
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Patient => ModuleId::Patients,
            EntityKind::LabTest => ModuleId::Tests,
            EntityKind::Invoice => ModuleId::Billing,
            EntityKind::InventoryItem => ModuleId::Inventory,
            EntityKind::StaffMember => ModuleId::Staff,
            EntityKind::Franchise => ModuleId::Franchises,
            EntityKind::Report => ModuleId::Reports,
            EntityKind::Booking => ModuleId::Bookings,
        }
    }
}

label_enum! {
    pub enum Action {
        View => "view",
        Search => "search",
        Create => "create",
        Edit => "edit",
        Delete => "delete",
        /// Billing download.
        Export => "export",
        /// Report download.
        Download => "download",
        ManageFranchise => "manage franchise",
        ViewSalary => "view salary",
        EditSalary => "edit salary",
        ViewFranchisePerformance => "view franchise performance",
        EditProfile => "edit profile",
        EditOrganization => "edit organization",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grant {
    Everyone,
    AdminOnly,
}

use Action::*;
use Grant::*;
use ModuleId::*;

/// Module → action → who gets it. View is implied for every module.
const POLICY: &[(ModuleId, Action, Grant)] = &[
    (Patients, Search, Everyone),
    (Patients, Create, Everyone),
    (Patients, Edit, Everyone),
    (Patients, Delete, AdminOnly),
    (Tests, Search, Everyone),
    (Tests, Create, AdminOnly),
    (Tests, Edit, AdminOnly),
    (Tests, Delete, AdminOnly),
    (Billing, Search, Everyone),
    (Billing, Create, Everyone),
    (Billing, Export, Everyone),
    (Billing, Edit, AdminOnly),
    (Billing, Delete, AdminOnly),
    (Bookings, Search, Everyone),
    (Bookings, Create, Everyone),
    (Bookings, Edit, AdminOnly),
    (Bookings, Delete, AdminOnly),
    (Inventory, Search, Everyone),
    (Inventory, Create, AdminOnly),
    (Inventory, Edit, AdminOnly),
    (Inventory, Delete, AdminOnly),
    (Staff, Search, Everyone),
    (Staff, Create, AdminOnly),
    (Staff, Edit, AdminOnly),
    (Staff, Delete, AdminOnly),
    (Staff, ViewSalary, AdminOnly),
    (Staff, EditSalary, AdminOnly),
    (Franchises, Search, Everyone),
    (Franchises, Create, AdminOnly),
    (Franchises, Edit, AdminOnly),
    (Franchises, Delete, AdminOnly),
    (Franchises, ManageFranchise, AdminOnly),
    (Reports, Search, Everyone),
    (Reports, Download, Everyone),
    // Creating a report is the upload action.
    (Reports, Create, AdminOnly),
    (Reports, Edit, AdminOnly),
    (Reports, Delete, AdminOnly),
    (Analytics, ViewFranchisePerformance, AdminOnly),
    (Settings, EditProfile, Everyone),
    (Settings, EditOrganization, AdminOnly),
];

/// Actions `role` may take in `module`.
pub fn visible_actions(role: Role, module: ModuleId) -> BTreeSet<Action> {
    let mut actions: BTreeSet<Action> = POLICY
        .iter()
        .filter(|(m, _, grant)| *m == module && (*grant == Everyone || role == Role::Admin))
        .map(|(_, action, _)| *action)
        .collect();
    actions.insert(View);
    actions
}

/// Whether `role` may take `action` in `module`.
pub fn is_allowed(role: Role, module: ModuleId, action: Action) -> bool {
    visible_actions(role, module).contains(&action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_franchise_never_manages_franchises() {
        for module in ModuleId::ALL {
            let actions = visible_actions(Role::Franchise, *module);
            assert!(!actions.contains(&ManageFranchise), "{module}");
        }
        assert!(is_allowed(Role::Admin, Franchises, ManageFranchise));
    }

    #[test]
    fn test_view_available_everywhere() {
        for role in Role::ALL {
            for module in ModuleId::ALL {
                assert!(is_allowed(*role, *module, View));
            }
        }
    }

    #[test]
    fn test_admin_sees_superset() {
        for module in ModuleId::ALL {
            let admin = visible_actions(Role::Admin, *module);
            let franchise = visible_actions(Role::Franchise, *module);
            assert!(franchise.is_subset(&admin), "{module}");
        }
    }

    #[test]
    fn test_franchise_limited_edit() {
        assert!(is_allowed(Role::Franchise, Patients, Create));
        assert!(is_allowed(Role::Franchise, Patients, Edit));
        assert!(is_allowed(Role::Franchise, Billing, Create));
        assert!(is_allowed(Role::Franchise, Bookings, Create));
        assert!(is_allowed(Role::Franchise, Settings, EditProfile));

        assert!(!is_allowed(Role::Franchise, Patients, Delete));
        assert!(!is_allowed(Role::Franchise, Staff, ViewSalary));
        assert!(!is_allowed(Role::Franchise, Analytics, ViewFranchisePerformance));
        assert!(!is_allowed(Role::Franchise, Settings, EditOrganization));
        assert!(!is_allowed(Role::Franchise, Inventory, Edit));
    }

    #[test]
    fn test_role_labels() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Franchise.to_string(), "franchise");
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_every_kind_has_a_module() {
        assert_eq!(ModuleId::for_kind(EntityKind::Booking), Bookings);
        assert_eq!(ModuleId::for_kind(EntityKind::Invoice), Billing);
    }
}
