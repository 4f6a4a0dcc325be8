//! Sessions opened from a configuration file.

use std::fs;

use medlab_core::{Dashboard, DashboardConfig, ModuleId, Role};
use tempfile::tempdir;

#[test]
fn test_session_from_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("medlab.toml");
    fs::write(
        &path,
        "role = \"franchise\"\nlanding = \"billing/ledger\"\ncurrency_symbol = \"Rs \"\n",
    )
    .unwrap();

    let config = DashboardConfig::load(&path).unwrap();
    let session = Dashboard::from_config(&config).unwrap();

    assert_eq!(session.role(), Role::Franchise);
    let view = session.current_view();
    assert_eq!(view.module, ModuleId::Billing);
    assert_eq!(view.sub_view, Some("ledger"));

    let rows = session.rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].cell("finalAmount").unwrap().text, "Rs 475");
}

#[test]
fn test_empty_store_and_hidden_landing() {
    let config = DashboardConfig::from_toml(
        "role = \"franchise\"\nlanding = \"franchise/pricing\"\nseed_demo_data = false\n",
    )
    .unwrap();
    let session = Dashboard::from_config(&config).unwrap();

    let view = session.current_view();
    assert_eq!(view.module, ModuleId::Franchises);
    assert_eq!(view.sub_view, Some("list"));
    assert!(session.rows().unwrap().is_empty());
    assert_eq!(session.summary().unwrap()[0].display("₹"), "0");
}
