//! Submission metadata entity - One row of field values per submission.
//!
//! Each row belongs to exactly one submission (the `submission` column is
//! unique) and carries the owning assignment so an assignment's rows can be
//! removed in bulk.

use crate::core::fields::Field;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Submission metadata database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assignsubmission_assignmeta")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Submission this record belongs to
    #[sea_orm(unique)]
    pub submission: i64,
    /// Assignment instance that owns the submission
    pub assignment: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta1: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta2: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta3: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta4: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta5: Option<String>,
}

impl Model {
    /// Stored value for a catalogue field, `None` when the column is null.
    #[must_use]
    pub fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title.as_deref(),
            Field::Meta1 => self.meta1.as_deref(),
            Field::Meta2 => self.meta2.as_deref(),
            Field::Meta3 => self.meta3.as_deref(),
            Field::Meta4 => self.meta4.as_deref(),
            Field::Meta5 => self.meta5.as_deref(),
        }
    }
}

impl ActiveModel {
    /// Marks a catalogue field's column to be written with `value`.
    pub fn set_value(&mut self, field: Field, value: Option<String>) {
        let column = match field {
            Field::Title => &mut self.title,
            Field::Meta1 => &mut self.meta1,
            Field::Meta2 => &mut self.meta2,
            Field::Meta3 => &mut self.meta3,
            Field::Meta4 => &mut self.meta4,
            Field::Meta5 => &mut self.meta5,
        };
        *column = sea_orm::Set(value);
    }
}

/// Submission metadata has no modelled relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
