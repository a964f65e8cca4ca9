//! The fixed catalogue of metadata fields.
//!
//! Six slots exist: a title and five generic metadata fields. Their order here
//! is the order used everywhere else (settings screen, form, summary), and
//! their names double as column names and form element names.

use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One catalogue slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Title of the submission
    Title,
    /// First free metadata slot
    Meta1,
    /// Second free metadata slot
    Meta2,
    /// Third free metadata slot
    Meta3,
    /// Fourth free metadata slot
    Meta4,
    /// Fifth free metadata slot
    Meta5,
}

impl Field {
    /// Every field, in catalogue order.
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Meta1,
        Self::Meta2,
        Self::Meta3,
        Self::Meta4,
        Self::Meta5,
    ];

    /// Column, form element and language string name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Meta1 => "meta1",
            Self::Meta2 => "meta2",
            Self::Meta3 => "meta3",
            Self::Meta4 => "meta4",
            Self::Meta5 => "meta5",
        }
    }

    /// Config key holding the custom label (`<field>_text`).
    #[must_use]
    pub fn text_key(self) -> String {
        format!("{}_text", self.name())
    }

    /// Config key holding the enabled flag (`<field>_enabled`).
    #[must_use]
    pub fn enabled_key(self) -> String {
        format!("{}_enabled", self.name())
    }

    /// Name of the settings group pairing the label input and the checkbox.
    #[must_use]
    pub fn group_key(self) -> String {
        format!("{}_group", self.name())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| Error::UnknownField {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_catalogue_order() {
        let names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["title", "meta1", "meta2", "meta3", "meta4", "meta5"]);
    }

    #[test]
    fn test_config_keys() {
        assert_eq!(Field::Title.text_key(), "title_text");
        assert_eq!(Field::Meta3.enabled_key(), "meta3_enabled");
        assert_eq!(Field::Meta5.group_key(), "meta5_group");
    }

    #[test]
    fn test_parse() {
        assert_eq!("meta2".parse::<Field>().unwrap(), Field::Meta2);
        assert!(matches!(
            "meta6".parse::<Field>(),
            Err(Error::UnknownField { name: _ })
        ));
    }
}
