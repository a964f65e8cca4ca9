//! The assignment metadata submission plugin.
//!
//! [`SubmissionFieldsPlugin`] is built for one assignment within one request:
//! it carries the connection, the language pack, the assignment's settings
//! and the acting user. The host calls its methods at fixed points of the
//! assignment lifecycle (settings screen, submission form, save, summary,
//! resubmission copy, instance deletion).

use crate::{
    config::strings::Strings,
    core::{
        event::{self, AssessableUploaded},
        fields::Field,
        form::{Condition, Element, Form, FormData, ParamType},
        record::{self, CopyOutcome},
        settings::{ENABLED_KEY, PluginConfig},
    },
    entities::submission_meta,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Host checkbox that switches the whole plugin on for an assignment.
pub const PLUGIN_ENABLED_ELEMENT: &str = "assignsubmission_assignmeta_enabled";

/// Display size of the submission form inputs.
pub const INPUT_SIZE: u32 = 100;
/// Maximum accepted length of the submission form inputs.
pub const INPUT_MAX_LENGTH: u32 = 100;

const LOG_MESSAGE: &str = "Some metadata was added to a submission.";
const VIEW_PLACEHOLDER: &str = "Title: Testing the longer form that is hidden.";

/// The parts of a host submission the plugin reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    /// Submission id
    pub id: i64,
    /// Owning user, if the submission is individual
    pub user_id: Option<i64>,
    /// Owning group, if the submission is a group submission
    pub group_id: Option<i64>,
}

impl Submission {
    /// Submission owned by a single user.
    #[must_use]
    pub const fn individual(id: i64, user_id: i64) -> Self {
        Self {
            id,
            user_id: Some(user_id),
            group_id: None,
        }
    }

    /// Submission owned by a group.
    #[must_use]
    pub const fn group(id: i64, group_id: i64) -> Self {
        Self {
            id,
            user_id: None,
            group_id: Some(group_id),
        }
    }
}

/// What [`SubmissionFieldsPlugin::save`] did to the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// First save for the submission
    Created(submission_meta::Model),
    /// The submission's existing record was updated
    Updated(submission_meta::Model),
}

impl SaveOutcome {
    /// The record as stored after the save.
    #[must_use]
    pub const fn record(&self) -> &submission_meta::Model {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    /// Store-level outcome
    pub outcome: SaveOutcome,
    /// Audit event emitted for the save
    pub event: AssessableUploaded,
}

/// Rendered summary of a submission's metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// One `label: value` line per visible field
    pub text: String,
    /// Whether a link to a fuller view should be offered
    pub show_view_link: bool,
}

/// Metadata fields plugin bound to one assignment and one request.
#[derive(Debug)]
pub struct SubmissionFieldsPlugin<'a> {
    db: &'a DatabaseConnection,
    strings: &'a Strings,
    config: PluginConfig,
    acting_user_id: i64,
}

impl<'a> SubmissionFieldsPlugin<'a> {
    /// Builds the plugin around already loaded settings.
    #[must_use]
    pub const fn new(
        db: &'a DatabaseConnection,
        strings: &'a Strings,
        config: PluginConfig,
        acting_user_id: i64,
    ) -> Self {
        Self {
            db,
            strings,
            config,
            acting_user_id,
        }
    }

    /// Loads the settings of `assignment_id` and builds the plugin.
    pub async fn load(
        db: &'a DatabaseConnection,
        strings: &'a Strings,
        assignment_id: i64,
        acting_user_id: i64,
    ) -> Result<Self> {
        let config = PluginConfig::load(db, assignment_id).await?;
        Ok(Self::new(db, strings, config, acting_user_id))
    }

    /// Assignment instance this plugin serves.
    #[must_use]
    pub const fn assignment_id(&self) -> i64 {
        self.config.assignment()
    }

    /// Settings currently in effect.
    #[must_use]
    pub const fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Display name of this submission type.
    #[must_use]
    pub fn get_name(&self) -> String {
        self.strings.get("assignmeta").into_owned()
    }

    /// The field catalogue, in display order.
    #[must_use]
    pub const fn get_fields(&self) -> [Field; 6] {
        Field::ALL
    }

    /// Whether the plugin is switched on for this assignment.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.flag(ENABLED_KEY)
    }

    fn is_hidden(&self, field: Field) -> bool {
        self.strings.is_hidden(field.name())
    }

    fn is_field_enabled(&self, field: Field) -> bool {
        self.config.flag(&field.enabled_key())
    }

    fn is_visible(&self, field: Field) -> bool {
        !self.is_hidden(field) && self.is_field_enabled(field)
    }

    /// Label for a field: the custom text if one is set, else the language pack label.
    #[must_use]
    pub fn field_label(&self, field: Field) -> String {
        self.config.get_non_empty(&field.text_key()).map_or_else(
            || self.strings.get(field.name()).into_owned(),
            str::to_string,
        )
    }

    /// Adds the per-field label and enable controls to the assignment settings form.
    pub fn get_settings(&self, form: &mut Form) {
        for field in Field::ALL {
            if self.is_hidden(field) {
                continue;
            }
            let text_key = field.text_key();
            let enabled_key = field.enabled_key();
            let group_key = field.group_key();
            let label = self.field_label(field);

            form.add_group(
                group_key.as_str(),
                label.as_str(),
                vec![
                    Element::text(text_key.as_str(), label.as_str()),
                    Element::adv_checkbox(enabled_key.as_str(), "", self.strings.get("enable")),
                ],
                " ",
            );
            form.disabled_if(text_key.as_str(), enabled_key.as_str(), Condition::NotChecked);
            form.set_default(text_key.as_str(), label);
            form.set_default(
                enabled_key.as_str(),
                if self.is_field_enabled(field) { "1" } else { "0" },
            );
            form.set_type(text_key, ParamType::Text);
            form.hide_if(group_key, PLUGIN_ENABLED_ELEMENT, Condition::NotChecked);
        }
    }

    /// Stores submitted settings. Fields without a submitted label are left alone.
    #[instrument(skip(self, data), fields(assignment = self.assignment_id()))]
    pub async fn save_settings(&mut self, data: &FormData) -> Result<()> {
        for field in Field::ALL {
            let text_key = field.text_key();
            let Some(text) = data.get(&text_key) else {
                continue;
            };
            let enabled_key = field.enabled_key();
            let enabled = data.get(&enabled_key).unwrap_or("0");

            self.config.set(self.db, &text_key, text).await?;
            self.config.set(self.db, &enabled_key, enabled).await?;
        }
        Ok(())
    }

    /// Adds the submission form inputs for every visible field.
    ///
    /// When `submission` already has stored metadata, its values are copied
    /// into `data` first so the form opens pre-filled.
    pub async fn get_form_elements(
        &self,
        submission: Option<&Submission>,
        form: &mut Form,
        data: &mut FormData,
    ) -> Result<bool> {
        if let Some(submission) = submission {
            if let Some(existing) = record::get_by_submission(self.db, submission.id).await? {
                for field in Field::ALL {
                    match existing.value(field) {
                        Some(value) => data.set(field.name(), value),
                        None => {
                            data.remove(field.name());
                        }
                    }
                }
            }
        }

        for field in Field::ALL.into_iter().filter(|f| self.is_visible(*f)) {
            form.add_element(Element::sized_text(
                field.name(),
                self.field_label(field),
                INPUT_SIZE,
                INPUT_MAX_LENGTH,
            ));
            form.set_type(field.name(), ParamType::Text);
        }
        Ok(true)
    }

    /// Stores the submitted field values of a submission.
    ///
    /// Creates the submission's record on first save and updates it after
    /// that. Only fields present in `data` are written.
    ///
    /// # Errors
    /// Returns an error if the group of a group submission cannot be found or
    /// if the store rejects the write.
    #[instrument(skip(self, data), fields(assignment = self.assignment_id()))]
    pub async fn save(&self, submission: &Submission, data: &FormData) -> Result<Saved> {
        let existing = record::get_by_submission(self.db, submission.id).await?;
        let attribution = event::attribute(
            self.db,
            self.acting_user_id,
            submission.user_id,
            submission.group_id,
        )
        .await?;

        let values: Vec<(Field, String)> = Field::ALL
            .into_iter()
            .filter_map(|field| data.get(field.name()).map(|value| (field, value.to_string())))
            .collect();

        let outcome = match existing {
            Some(existing) => SaveOutcome::Updated(record::update(self.db, existing, &values).await?),
            None => SaveOutcome::Created(
                record::insert(self.db, submission.id, self.assignment_id(), &values).await?,
            ),
        };

        let event = AssessableUploaded {
            description: self.strings.get("eventassessableuploaded").into_owned(),
            assignment_id: self.assignment_id(),
            submission_id: submission.id,
            object_id: outcome.record().id,
            acting_user_id: self.acting_user_id,
            attribution,
            time_created: chrono::Utc::now(),
        };
        event.log();

        Ok(Saved { outcome, event })
    }

    /// Text fields offered to import/export tooling.
    #[must_use]
    pub fn get_editor_fields(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(
            "assignmeta".to_string(),
            self.strings.get("pluginname").into_owned(),
        )])
    }

    /// One `label: value` line per visible field of the submission's record.
    ///
    /// Empty stored values are printed as well, so the reader sees the field
    /// was left blank.
    pub async fn view_summary(&self, submission: &Submission) -> Result<Summary> {
        let mut summary = Summary::default();
        let Some(existing) = record::get_by_submission(self.db, submission.id).await? else {
            return Ok(summary);
        };

        let lines: Vec<String> = Field::ALL
            .into_iter()
            .filter(|field| self.is_visible(*field))
            .map(|field| {
                format!(
                    "{}: {}",
                    self.field_label(field),
                    existing.value(field).unwrap_or_default()
                )
            })
            .collect();
        summary.text = lines.join("\n");
        Ok(summary)
    }

    /// Full view of a submission. Never linked to, since summaries never truncate.
    #[must_use]
    pub fn view(&self, _submission: &Submission) -> String {
        VIEW_PLACEHOLDER.to_string()
    }

    /// This plugin has no predecessor format to upgrade from.
    #[must_use]
    pub const fn can_upgrade(&self, _kind: &str, _version: i64) -> bool {
        false
    }

    /// Line written to the assignment log for a submission.
    #[must_use]
    pub fn format_for_log(&self, _submission: &Submission) -> String {
        LOG_MESSAGE.to_string()
    }

    /// Removes all stored metadata of the assignment, returning how many records went.
    pub async fn delete_instance(&self) -> Result<u64> {
        record::delete_for_assignment(self.db, self.assignment_id()).await
    }

    /// Whether the submission carries no metadata at all.
    ///
    /// True when nothing was stored or every field is blank.
    pub async fn is_empty(&self, submission: &Submission) -> Result<bool> {
        let Some(existing) = record::get_by_submission(self.db, submission.id).await? else {
            return Ok(true);
        };
        Ok(Field::ALL
            .into_iter()
            .all(|field| existing.value(field).is_none_or(|value| value.trim().is_empty())))
    }

    /// Never reports a pending submission as empty; required inputs are
    /// enforced by the form layer.
    #[must_use]
    pub const fn submission_is_empty(&self, _data: &FormData) -> bool {
        false
    }

    /// Carries the metadata of a previous attempt over to a new one.
    pub async fn copy_submission(
        &self,
        source: &Submission,
        destination: &Submission,
    ) -> Result<CopyOutcome> {
        let outcome = record::copy_to_submission(self.db, source.id, destination.id).await?;
        if let CopyOutcome::Copied(copy) = &outcome {
            debug!(
                "Copied metadata of submission {} to {} as record {}",
                source.id, destination.id, copy.id
            );
        }
        Ok(outcome)
    }

    /// All settings of this plugin instance, for external API consumers.
    #[must_use]
    pub fn get_config_for_external(&self) -> BTreeMap<String, String> {
        self.config.as_map().clone()
    }
}
