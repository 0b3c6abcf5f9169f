//! Flattened item properties and their locators.

use std::fmt;
use std::str::FromStr;

use rbxlx_dom::RawNode;

use crate::codec::{self, PropertyValue, PROTECTED_STRING};
use crate::{Error, Result};

/// Locator of the property holding a script's source.
pub const SCRIPT_SOURCE_LOCATOR: &str = "ProtectedString.Source";

/// Locator of the property an item's display name comes from.
pub(crate) const NAME_LOCATOR: &str = "string.Name";

/// A single property of an item, decoded for display.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Property {
    /// Value of the fragment's `name` attribute.
    pub name: String,
    /// Property-type tag the fragment is grouped under.
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub type_name: String,
    /// Decoded display value.
    pub value: PropertyValue,
    /// The fragment as it appears in the document.
    #[cfg_attr(feature = "json", serde(skip))]
    pub original: RawNode,
    /// Locator string, `<type>.<name>`.
    pub path: String,
}

impl Property {
    /// Decode a property fragment found under the given type tag.
    pub fn from_fragment(type_name: &str, fragment: &RawNode) -> Self {
        let name = fragment.attribute("name").unwrap_or_default().to_string();

        Self {
            path: format!("{}.{}", type_name, name),
            value: codec::decode(fragment),
            type_name: type_name.to_string(),
            original: fragment.clone(),
            name,
        }
    }

    /// True for the `ProtectedString` named `Source` that holds script code.
    pub fn is_script_source(&self) -> bool {
        self.type_name == PROTECTED_STRING && self.name == "Source"
    }
}

/// Where a property lives inside an item's `<Properties>` container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyLocator {
    /// Property-type group tag.
    pub type_name: String,
    /// Value of the entry's `name` attribute.
    pub name: String,
}

impl PropertyLocator {
    /// Create a locator from its parts.
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// Locator of a script's source body.
    pub fn script_source() -> Self {
        Self::new(PROTECTED_STRING, "Source")
    }
}

impl FromStr for PropertyLocator {
    type Err = Error;

    /// Split at the first `.`; type tags never contain one, names may.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('.') {
            Some((type_name, name)) if !type_name.is_empty() && !name.is_empty() => {
                Ok(Self::new(type_name, name))
            }
            _ => Err(Error::InvalidLocator(s.to_string())),
        }
    }
}

impl fmt::Display for PropertyLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fragment() {
        let fragment = RawNode::new("bool").attr("name", "Anchored").with_text("true");
        let property = Property::from_fragment("bool", &fragment);

        assert_eq!(property.name, "Anchored");
        assert_eq!(property.type_name, "bool");
        assert_eq!(property.path, "bool.Anchored");
        assert_eq!(property.value, PropertyValue::Text("true".into()));
        assert_eq!(property.original, fragment);
    }

    #[test]
    fn test_parse_locator() {
        let locator: PropertyLocator = "string.Name".parse().unwrap();
        assert_eq!(locator, PropertyLocator::new("string", "Name"));

        let dotted: PropertyLocator = "string.a.b".parse().unwrap();
        assert_eq!(dotted.name, "a.b");

        assert_eq!(PropertyLocator::script_source().to_string(), SCRIPT_SOURCE_LOCATOR);
    }

    #[test]
    fn test_parse_invalid_locator() {
        for input in ["", "Name", ".Name", "string."] {
            let result = input.parse::<PropertyLocator>();
            assert!(matches!(result, Err(Error::InvalidLocator(_))), "{input:?}");
        }
    }
}
