use fake::{Dummy, Fake};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque key identifying an item. SonarQube sends numeric ids, other
/// deployments send strings; both compare by their textual form.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId(id.to_owned())
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        ItemId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Integer(i64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Integer(id) => Ok(ItemId(id.to_string())),
            RawId::Text(id) => Ok(ItemId(id)),
        }
    }
}

impl Serialize for ItemId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// Defines a selectable item (a project, for quality gates).
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

impl Item {
    /// Returns the value of the named field, used to build the selection
    /// parameter of select/deselect requests.
    ///
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(self.id.as_str()),
            "name" => Some(&self.name),
            _ => None,
        }
    }
}

/// One page of search results, already split by selection membership.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub selected: Vec<Item>,
    pub available: Vec<Item>,
    pub more: bool,
}

/// Defines quality gate data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct QualityGate {
    pub id: ItemId,
    pub name: String,
    pub default: bool,
}

/// Permissions reported for the current user on quality gates.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Permissions {
    pub edit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_from_integer_or_string() {
        let numeric: ItemId = serde_json::from_str("42").unwrap();
        let text: ItemId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(numeric, text);
        assert_eq!(numeric.to_string(), "42");
    }

    #[test]
    fn item_id_rejects_other_shapes() {
        assert!(serde_json::from_str::<ItemId>("{\"id\": 1}").is_err());
        assert!(serde_json::from_str::<ItemId>("null").is_err());
    }

    #[test]
    fn item_field_lookup() {
        let item = Item {
            id: ItemId::from(7u64),
            name: "Alpha".to_string(),
        };
        assert_eq!(item.field("id"), Some("7"));
        assert_eq!(item.field("name"), Some("Alpha"));
        assert_eq!(item.field("key"), None);
    }
}
