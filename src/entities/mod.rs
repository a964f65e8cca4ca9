//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables the plugin reads and writes.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod group;
pub mod plugin_config;
pub mod submission_meta;

// Re-export specific types to avoid conflicts
pub use group::{Column as GroupColumn, Entity as Group, Model as GroupModel};
pub use plugin_config::{
    Column as PluginConfigColumn, Entity as PluginConfig, Model as PluginConfigModel,
};
pub use submission_meta::{
    Column as SubmissionMetaColumn, Entity as SubmissionMeta, Model as SubmissionMetaModel,
};
