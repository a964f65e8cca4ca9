//! Plugin config entity - Key/value settings scoped to one assignment.
//!
//! Rows are shared with other assignment plugins, so every lookup filters on
//! `plugin` and `subtype` as well as `assignment`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plugin configuration database model - one setting per row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assign_plugin_config")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Assignment instance the setting applies to
    pub assignment: i64,
    /// Plugin name (e.g., `"assignmeta"`)
    pub plugin: String,
    /// Plugin family (e.g., `"assignsubmission"`)
    pub subtype: String,
    /// Setting key (e.g., `"title_text"`)
    pub name: String,
    /// Setting value stored as string
    #[sea_orm(column_type = "Text", nullable)]
    pub value: Option<String>,
}

/// `PluginConfig` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
