//! Form-building context and submitted form data.
//!
//! [`Form`] records what the plugin asks the host to render: elements,
//! default values, parameter types and the show/hide and enable/disable
//! wiring between controls. The host turns it into markup. [`FormData`] is the
//! flat name/value holder that travels in both directions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value cleaning applied by the host before data reaches the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamType {
    /// Plain text, markup stripped
    Text,
}

/// Condition on a checkbox that triggers a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// Applies while the dependee checkbox is unchecked
    NotChecked,
}

/// Input element variants the plugin uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Single-line text input
    Text {
        /// Visible width in characters
        size: Option<u32>,
        /// Maximum accepted length
        max_length: Option<u32>,
    },
    /// Checkbox that always submits a value, unchecked or not
    AdvCheckbox {
        /// Text shown next to the box
        text: String,
        /// Submitted values for (unchecked, checked)
        values: (String, String),
    },
    /// Several controls rendered on one row
    Group {
        /// Controls inside the group
        elements: Vec<Element>,
        /// Separator placed between the controls
        separator: String,
    },
}

/// One form control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Name the submitted value is bound to
    pub name: String,
    /// Label shown next to the control
    pub label: String,
    /// What kind of control this is
    pub kind: ElementKind,
}

impl Element {
    /// Plain text input without size hints.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: ElementKind::Text {
                size: None,
                max_length: None,
            },
        }
    }

    /// Text input with display size and maximum length.
    pub fn sized_text(
        name: impl Into<String>,
        label: impl Into<String>,
        size: u32,
        max_length: u32,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: ElementKind::Text {
                size: Some(size),
                max_length: Some(max_length),
            },
        }
    }

    /// Checkbox submitting `"0"` when unchecked and `"1"` when checked.
    pub fn adv_checkbox(
        name: impl Into<String>,
        label: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: ElementKind::AdvCheckbox {
                text: text.into(),
                values: ("0".to_string(), "1".to_string()),
            },
        }
    }
}

/// A rule making `target` depend on the state of `dependee`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Element affected by the rule
    pub target: String,
    /// Element whose state is watched
    pub dependee: String,
    /// State that triggers the rule
    pub condition: Condition,
}

/// Form under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    elements: Vec<Element>,
    defaults: BTreeMap<String, String>,
    types: BTreeMap<String, ParamType>,
    disabled_if: Vec<Dependency>,
    hidden_if: Vec<Dependency>,
}

impl Form {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a top-level element.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Appends a group of elements rendered together under one label.
    pub fn add_group(
        &mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        elements: Vec<Element>,
        separator: &str,
    ) {
        self.elements.push(Element {
            name: name.into(),
            label: label.into(),
            kind: ElementKind::Group {
                elements,
                separator: separator.to_string(),
            },
        });
    }

    /// Sets the initial value of an element.
    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.defaults.insert(name.into(), value.into());
    }

    /// Declares how the host should clean an element's submitted value.
    pub fn set_type(&mut self, name: impl Into<String>, param: ParamType) {
        self.types.insert(name.into(), param);
    }

    /// Disables `target` while `dependee` meets `condition`.
    pub fn disabled_if(
        &mut self,
        target: impl Into<String>,
        dependee: impl Into<String>,
        condition: Condition,
    ) {
        self.disabled_if.push(Dependency {
            target: target.into(),
            dependee: dependee.into(),
            condition,
        });
    }

    /// Hides `target` while `dependee` meets `condition`.
    pub fn hide_if(
        &mut self,
        target: impl Into<String>,
        dependee: impl Into<String>,
        condition: Condition,
    ) {
        self.hidden_if.push(Dependency {
            target: target.into(),
            dependee: dependee.into(),
            condition,
        });
    }

    /// Top-level elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Finds an element by name, looking inside groups too.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&Element> {
        fn find<'a>(elements: &'a [Element], name: &str) -> Option<&'a Element> {
            elements.iter().find_map(|element| {
                if element.name == name {
                    return Some(element);
                }
                match &element.kind {
                    ElementKind::Group { elements, .. } => find(elements, name),
                    _ => None,
                }
            })
        }
        find(&self.elements, name)
    }

    /// Default value registered for an element.
    #[must_use]
    pub fn default_for(&self, name: &str) -> Option<&str> {
        self.defaults.get(name).map(String::as_str)
    }

    /// Parameter type registered for an element.
    #[must_use]
    pub fn type_of(&self, name: &str) -> Option<ParamType> {
        self.types.get(name).copied()
    }

    /// Disable rules.
    #[must_use]
    pub fn disabled_rules(&self) -> &[Dependency] {
        &self.disabled_if
    }

    /// Hide rules.
    #[must_use]
    pub fn hidden_rules(&self) -> &[Dependency] {
        &self.hidden_if
    }
}

/// Flat name/value data submitted by, or pre-filled into, a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    /// Empty data holder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submitted value for `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Stores a value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Drops a value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    /// Whether a value is present for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of values held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no values are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_element_lookup_descends_into_groups() {
        let mut form = Form::new();
        form.add_element(Element::text("outer", "Outer"));
        form.add_group(
            "pair",
            "Pair",
            vec![
                Element::text("inner", "Inner"),
                Element::adv_checkbox("flag", "", "Enable"),
            ],
            " ",
        );

        assert_eq!(form.elements().len(), 2);
        assert_eq!(form.element("inner").unwrap().label, "Inner");
        assert!(matches!(
            form.element("flag").unwrap().kind,
            ElementKind::AdvCheckbox { .. }
        ));
        assert!(form.element("missing").is_none());
    }

    #[test]
    fn test_defaults_types_and_rules() {
        let mut form = Form::new();
        form.set_default("title_text", "Title");
        form.set_type("title_text", ParamType::Text);
        form.disabled_if("title_text", "title_enabled", Condition::NotChecked);
        form.hide_if("title_group", "plugin_enabled", Condition::NotChecked);

        assert_eq!(form.default_for("title_text"), Some("Title"));
        assert_eq!(form.type_of("title_text"), Some(ParamType::Text));
        assert_eq!(form.disabled_rules()[0].dependee, "title_enabled");
        assert_eq!(form.hidden_rules()[0].target, "title_group");
    }

    #[test]
    fn test_form_data_collects_and_overwrites() {
        let mut data: FormData = [("title", "Essay"), ("meta1", "")].into_iter().collect();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get("meta1"), Some(""));

        data.set("title", "Essay 2");
        assert_eq!(data.get("title"), Some("Essay 2"));
        assert_eq!(data.remove("meta1").as_deref(), Some(""));
        assert!(!data.contains("meta1"));
    }
}
