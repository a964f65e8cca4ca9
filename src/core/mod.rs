//! Core plugin logic, independent of how the host renders or routes requests.

/// Audit attribution and the saved-metadata event
pub mod event;
/// The fixed field catalogue
pub mod fields;
/// Form-building context and form data
pub mod form;
/// The plugin entry points called by the host
pub mod plugin;
/// Submission metadata record store
pub mod record;
/// Per-assignment plugin settings
pub mod settings;

pub use fields::Field;
pub use plugin::{SaveOutcome, Saved, Submission, SubmissionFieldsPlugin, Summary};
