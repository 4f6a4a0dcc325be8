//! Settings documents.

use rusqlite::{params, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

use super::{Database, DbResult};
use crate::models::{OrganizationSettings, UserProfile};

const PROFILE_KEY: &str = "user_profile";
const ORGANIZATION_KEY: &str = "organization";

impl Database {
    /// Current user profile, or the default profile when none was saved.
    pub fn user_profile(&self) -> DbResult<UserProfile> {
        Ok(self.load_setting(PROFILE_KEY)?.unwrap_or_default())
    }

    pub fn save_user_profile(&self, profile: &UserProfile) -> DbResult<()> {
        self.store_setting(PROFILE_KEY, profile)
    }

    /// Organization settings, or defaults when none were saved.
    pub fn organization_settings(&self) -> DbResult<OrganizationSettings> {
        Ok(self.load_setting(ORGANIZATION_KEY)?.unwrap_or_default())
    }

    pub fn save_organization_settings(&self, settings: &OrganizationSettings) -> DbResult<()> {
        self.store_setting(ORGANIZATION_KEY, settings)
    }

    fn load_setting<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM settings WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;

        value
            .map(|v| serde_json::from_str(&v))
            .transpose()
            .map_err(Into::into)
    }

    fn store_setting<T: Serialize>(&self, key: &str, value: &T) -> DbResult<()> {
        let json = serde_json::to_string(value)?;
        self.conn.execute(
            r#"
            INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
            params![key, json],
        )?;
        tracing::info!(key, "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unsaved() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.user_profile().unwrap(), UserProfile::default());
        assert_eq!(
            db.organization_settings().unwrap(),
            OrganizationSettings::default()
        );
    }

    #[test]
    fn test_save_and_reload() {
        let db = Database::open_in_memory().unwrap();

        let mut profile = db.user_profile().unwrap();
        profile.phone = "+91 9000000000".into();
        db.save_user_profile(&profile).unwrap();

        let mut org = db.organization_settings().unwrap();
        org.payment_terms_days = 30;
        db.save_organization_settings(&org).unwrap();
        // Saving twice upserts.
        db.save_organization_settings(&org).unwrap();

        assert_eq!(db.user_profile().unwrap().phone, "+91 9000000000");
        assert_eq!(db.organization_settings().unwrap().payment_terms_days, 30);
    }
}
