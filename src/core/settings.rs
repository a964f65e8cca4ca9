//! Per-assignment plugin configuration.
//!
//! [`PluginConfig`] is loaded once for an assignment and handed to the plugin.
//! Reads are served from memory; writes go straight through to the
//! `assign_plugin_config` table and update the in-memory copy.

use crate::{
    entities::{PluginConfig as PluginConfigEntity, plugin_config},
    errors::Result,
};
use sea_orm::{Select, Set, prelude::*};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Plugin name under which settings are stored.
pub const PLUGIN: &str = "assignmeta";
/// Plugin family under which settings are stored.
pub const SUBTYPE: &str = "assignsubmission";

/// Setting name of the plugin-wide enable switch for an assignment.
pub const ENABLED_KEY: &str = "enabled";

/// Settings of this plugin for one assignment instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginConfig {
    assignment: i64,
    values: BTreeMap<String, String>,
}

impl PluginConfig {
    /// In-memory config, not backed by stored rows.
    #[must_use]
    pub const fn new(assignment: i64, values: BTreeMap<String, String>) -> Self {
        Self { assignment, values }
    }

    /// Loads every stored setting for `assignment`.
    #[instrument(skip(db))]
    pub async fn load<C>(db: &C, assignment: i64) -> Result<Self>
    where
        C: ConnectionTrait,
    {
        let rows = scoped(assignment).all(db).await?;
        debug!("Loaded {} settings for assignment {}", rows.len(), assignment);
        let values = rows
            .into_iter()
            .map(|row| (row.name, row.value.unwrap_or_default()))
            .collect();
        Ok(Self { assignment, values })
    }

    /// Assignment instance these settings belong to.
    #[must_use]
    pub const fn assignment(&self) -> i64 {
        self.assignment
    }

    /// Raw value of a setting.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of a setting, `None` when missing or empty.
    #[must_use]
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    /// Reads a checkbox-style setting. Unset counts as off.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.get(name)
            .is_some_and(|value| matches!(value.trim(), "1" | "true"))
    }

    /// Stores a setting, replacing a previous value.
    #[instrument(skip(self, db))]
    pub async fn set<C>(&mut self, db: &C, name: &str, value: &str) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let existing = scoped(self.assignment)
            .filter(plugin_config::Column::Name.eq(name))
            .one(db)
            .await?;

        if let Some(row) = existing {
            let mut active: plugin_config::ActiveModel = row.into();
            active.value = Set(Some(value.to_string()));
            active.update(db).await?;
        } else {
            plugin_config::ActiveModel {
                assignment: Set(self.assignment),
                plugin: Set(PLUGIN.to_string()),
                subtype: Set(SUBTYPE.to_string()),
                name: Set(name.to_string()),
                value: Set(Some(value.to_string())),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Every setting, for consumers outside the plugin.
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

fn scoped(assignment: i64) -> Select<PluginConfigEntity> {
    PluginConfigEntity::find()
        .filter(plugin_config::Column::Assignment.eq(assignment))
        .filter(plugin_config::Column::Plugin.eq(PLUGIN))
        .filter(plugin_config::Column::Subtype.eq(SUBTYPE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_set_then_load() -> Result<()> {
        let db = setup_test_db().await?;
        let mut config = PluginConfig::load(&db, 7).await?;
        assert!(config.as_map().is_empty());

        config.set(&db, "title_text", "Essay title").await?;
        config.set(&db, "title_enabled", "1").await?;

        let reloaded = PluginConfig::load(&db, 7).await?;
        assert_eq!(reloaded.get("title_text"), Some("Essay title"));
        assert!(reloaded.flag("title_enabled"));
        assert_eq!(reloaded, config);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_overwrites_without_duplicating() -> Result<()> {
        let db = setup_test_db().await?;
        let mut config = PluginConfig::load(&db, 7).await?;
        config.set(&db, "meta1_text", "First").await?;
        config.set(&db, "meta1_text", "Second").await?;

        let rows = PluginConfigEntity::find()
            .filter(plugin_config::Column::Name.eq("meta1_text"))
            .all(&db)
            .await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value.as_deref(), Some("Second"));
        Ok(())
    }

    #[tokio::test]
    async fn test_settings_are_scoped_per_assignment() -> Result<()> {
        let db = setup_test_db().await?;
        PluginConfig::load(&db, 1)
            .await?
            .set(&db, "title_enabled", "1")
            .await?;

        let other = PluginConfig::load(&db, 2).await?;
        assert!(!other.flag("title_enabled"));
        assert_eq!(other.get("title_enabled"), None);
        Ok(())
    }

    #[test]
    fn test_flag_and_non_empty() {
        let config = PluginConfig::new(
            1,
            [
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "0".to_string()),
                ("c".to_string(), String::new()),
            ]
            .into_iter()
            .collect(),
        );
        assert!(config.flag("a"));
        assert!(!config.flag("b"));
        assert!(!config.flag("missing"));
        assert_eq!(config.get_non_empty("c"), None);
        assert_eq!(config.get_non_empty("a"), Some("1"));
    }
}
