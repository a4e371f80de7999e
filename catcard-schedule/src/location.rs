//! Campus locations.

use serde::{Deserialize, Serialize};

/// The class a location belongs to.
///
/// One variant type shared by every lookup and search path, rather than a
/// parallel enum per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationClass {
    /// Full board dining hall.
    DiningHall,
    /// Retail dining / cafe.
    Retail,
    /// Service office (card office, etc).
    Office,
}

impl LocationClass {
    /// Display name for the class.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::DiningHall => "Dining Hall",
            Self::Retail => "Retail Dining",
            Self::Office => "Office",
        }
    }
}

/// One physical location with its search aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Stable identifier, used to key schedule entries.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Which class this location belongs to.
    pub class: LocationClass,
    /// Synonym tokens matched by search, in addition to the name's words.
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_serde_names() {
        let json = serde_json::to_string(&LocationClass::DiningHall).unwrap();
        assert_eq!(json, "\"dining_hall\"");
    }

    #[test]
    fn test_location_aliases_default_empty() {
        let location: Location = serde_json::from_str(
            r#"{"id": "davis", "name": "Davis Center", "class": "retail"}"#,
        )
        .unwrap();
        assert!(location.aliases.is_empty());
    }
}
