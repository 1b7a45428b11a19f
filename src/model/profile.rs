//! Entity profiles: the read-only input of every pipeline stage.

use serde::{Deserialize, Serialize};

/// A single name/value pair of an entity profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name (not required to be unique within a profile)
    pub name: String,
    /// Raw attribute value
    pub value: String,
}

impl Attribute {
    /// Create a new attribute
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An entity description made of name/value attributes.
///
/// Profiles are addressed downstream by their position within their source
/// collection, never by cloning; the `entity_url` is only a label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityProfile {
    /// External identifier of the entity
    #[serde(default)]
    pub entity_url: String,
    /// Attribute name/value pairs, in no significant order
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl EntityProfile {
    /// Create an empty profile
    pub fn new(entity_url: impl Into<String>) -> Self {
        Self {
            entity_url: entity_url.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute (builder style)
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Add an attribute in place
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push(Attribute::new(name, value));
    }

    /// Iterate over the attribute values
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.value.as_str())
    }

    /// Number of attributes
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the profile carries no attributes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_duplicate_names() {
        let profile = EntityProfile::new("e1")
            .with_attribute("name", "John")
            .with_attribute("name", "Johnny");

        assert_eq!(profile.len(), 2);
        assert_eq!(profile.values().collect::<Vec<_>>(), vec!["John", "Johnny"]);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let profile: EntityProfile =
            serde_json::from_str(r#"{"attributes":[{"name":"title","value":"abc"}]}"#)
                .expect("valid profile JSON");
        assert!(profile.entity_url.is_empty());
        assert_eq!(profile.attributes[0], Attribute::new("title", "abc"));
    }
}
