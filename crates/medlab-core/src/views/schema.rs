//! The navigation schema: one table describing every module, its menu
//! entries and which roles see them.

use crate::access::{ModuleId, Role};

/// Bumped whenever a module or sub-view is added, renamed or removed.
pub const NAVIGATION_VERSION: u32 = 3;

const BOTH: &[Role] = &[Role::Admin, Role::Franchise];
const ADMIN: &[Role] = &[Role::Admin];

/// A sidebar module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub module: ModuleId,
    pub label: &'static str,
    /// Icon name understood by the rendering layer.
    pub icon: &'static str,
    /// Sub-view menu entries. The first one is the module's default.
    pub children: &'static [NavChild],
    pub roles: &'static [Role],
}

/// A menu entry inside a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavChild {
    pub sub_view: &'static str,
    pub label: &'static str,
    pub roles: &'static [Role],
}

const fn child(sub_view: &'static str, label: &'static str) -> NavChild {
    NavChild {
        sub_view,
        label,
        roles: BOTH,
    }
}

const fn admin_child(sub_view: &'static str, label: &'static str) -> NavChild {
    NavChild {
        sub_view,
        label,
        roles: ADMIN,
    }
}

/// Landing module and fallback for selectors that resolve to nothing.
pub const DASHBOARD: NavEntry = NavEntry {
    module: ModuleId::Dashboard,
    label: "Dashboard",
    icon: "layout-dashboard",
    children: &[],
    roles: BOTH,
};

pub static NAVIGATION: &[NavEntry] = &[
    DASHBOARD,
    NavEntry {
        module: ModuleId::Patients,
        label: "Patient Management",
        icon: "users",
        children: &[],
        roles: BOTH,
    },
    NavEntry {
        module: ModuleId::Tests,
        label: "Test Catalogue",
        icon: "test-tube",
        children: &[],
        roles: BOTH,
    },
    NavEntry {
        module: ModuleId::Billing,
        label: "Billing & Payments",
        icon: "receipt",
        children: &[
            child("history", "Payment History"),
            child("new", "Generate Bill"),
            child("online", "Online Payment"),
            child("ledger", "Track Ledger"),
        ],
        roles: BOTH,
    },
    NavEntry {
        module: ModuleId::Bookings,
        label: "Test Booking",
        icon: "calendar",
        children: &[
            child("all", "All Bookings"),
            child("new", "New Booking"),
            child("pending", "Pending"),
            child("progress", "In Progress"),
            child("completed", "Completed"),
        ],
        roles: BOTH,
    },
    NavEntry {
        module: ModuleId::Inventory,
        label: "Inventory",
        icon: "package",
        children: &[
            child("main", "Inventory Overview"),
            child("stock", "Stock Levels"),
            child("requests", "Reorder Requests"),
        ],
        roles: BOTH,
    },
    NavEntry {
        module: ModuleId::Staff,
        label: "Staff Management",
        icon: "user-check",
        children: &[
            child("list", "Staff List"),
            admin_child("add", "Add Staff"),
            child("my", "My Staff"),
        ],
        roles: BOTH,
    },
    NavEntry {
        module: ModuleId::Franchises,
        label: "Franchise Management",
        icon: "building",
        children: &[
            child("list", "Franchise List"),
            admin_child("add", "Add Franchise"),
            admin_child("credits", "Franchise Credits"),
            admin_child("pricing", "Franchise Pricing"),
        ],
        roles: BOTH,
    },
    NavEntry {
        module: ModuleId::Reports,
        label: "Lab Reports",
        icon: "file-text",
        children: &[
            child("all", "All Reports"),
            child("search", "Search Reports"),
            child("download", "Download Reports"),
            child("old", "Old Reports"),
        ],
        roles: BOTH,
    },
    NavEntry {
        module: ModuleId::Analytics,
        label: "Analytics",
        icon: "bar-chart",
        children: &[],
        roles: BOTH,
    },
    NavEntry {
        module: ModuleId::Settings,
        label: "Settings",
        icon: "settings",
        children: &[
            child("profile", "Profile"),
            child("password", "Change Password"),
            child("security", "Security"),
            child("about", "About"),
            admin_child("certificate", "Certificate"),
        ],
        roles: BOTH,
    },
];

impl NavEntry {
    pub fn visible_to(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Menu entries `role` sees, in menu order.
    pub fn children_for(&self, role: Role) -> impl Iterator<Item = &'static NavChild> + '_ {
        self.children.iter().filter(move |c| c.roles.contains(&role))
    }

    pub fn child(&self, sub_view: &str) -> Option<&'static NavChild> {
        self.children
            .iter()
            .find(|c| c.sub_view.eq_ignore_ascii_case(sub_view))
    }

    pub fn default_child(&self) -> Option<&'static NavChild> {
        self.children.first()
    }
}

/// Schema entry for a module.
pub fn entry(module: ModuleId) -> Option<&'static NavEntry> {
    NAVIGATION.iter().find(|e| e.module == module)
}

/// Sidebar for a role: the modules it sees, in menu order.
pub fn menu(role: Role) -> Vec<&'static NavEntry> {
    NAVIGATION.iter().filter(|e| e.visible_to(role)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_module_has_one_entry() {
        let modules: HashSet<ModuleId> = NAVIGATION.iter().map(|e| e.module).collect();
        assert_eq!(modules.len(), NAVIGATION.len());
        for module in ModuleId::ALL {
            assert!(entry(*module).is_some(), "{module} missing from navigation");
        }
    }

    #[test]
    fn test_sub_views_unique_within_module() {
        for entry in NAVIGATION {
            let names: HashSet<&str> = entry.children.iter().map(|c| c.sub_view).collect();
            assert_eq!(names.len(), entry.children.len(), "{}", entry.label);
        }
    }

    #[test]
    fn test_default_child_visible_to_everyone() {
        for entry in NAVIGATION {
            if let Some(default) = entry.default_child() {
                assert_eq!(default.roles, BOTH, "{}", entry.label);
            }
        }
    }

    #[test]
    fn test_franchise_menu_hides_admin_children() {
        let franchise = entry(ModuleId::Franchises).unwrap();
        let visible: Vec<&str> = franchise
            .children_for(Role::Franchise)
            .map(|c| c.sub_view)
            .collect();
        assert_eq!(visible, vec!["list"]);
        assert_eq!(franchise.children_for(Role::Admin).count(), 4);
    }

    #[test]
    fn test_billing_entries() {
        let billing = entry(ModuleId::Billing).unwrap();
        let labels: Vec<&str> = billing.children.iter().map(|c| c.label).collect();
        assert!(labels.contains(&"Generate Bill"));
        assert!(labels.contains(&"Track Ledger"));
        assert_eq!(billing.child("LEDGER").unwrap().sub_view, "ledger");
    }
}
