//! Display formatting of canonical names
//!
//! A pure string transform: `gene or gene product` as a class renders as
//! `biolink:GeneOrGeneProduct`, `related to` as a slot as
//! `biolink:related_to`. No schema lookups happen here; the style of each
//! element is decided once when the index is built.

use biolink_toolkit_core::{config::NamingConfig, name::ElementName, types::Element};
use convert_case::{Case, Casing};

/// How an element's name is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayStyle {
    /// Prefixed `PascalCase` (classes and enums)
    Class,
    /// Prefixed `snake_case`
    Slot,
    /// Prefixed `PascalCase` for types defined by the model itself
    Type,
    /// Type prefix and `PascalCase`, for types of the metamodel
    MetaType,
}

impl DisplayStyle {
    /// Style for an element under the given naming configuration
    #[must_use]
    pub fn of(element: &Element, naming: &NamingConfig) -> Self {
        match element {
            Element::Class(_) | Element::Enum(_) => Self::Class,
            Element::Slot(_) => Self::Slot,
            Element::Type(_) => {
                let meta = element
                    .from_schema()
                    .is_some_and(|schema| naming.metatype_schemas.iter().any(|m| m == schema));
                if meta { Self::MetaType } else { Self::Type }
            }
        }
    }
}

/// Stateless name formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormatter {
    prefix: String,
    type_prefix: String,
}

impl DisplayFormatter {
    /// Formatter using the configured prefixes
    #[must_use]
    pub fn new(naming: &NamingConfig) -> Self {
        Self {
            prefix: naming.prefix.clone(),
            type_prefix: naming.type_prefix.clone(),
        }
    }

    /// Render a canonical name in the given style
    #[must_use]
    pub fn format(&self, name: &ElementName, style: DisplayStyle) -> String {
        match style {
            DisplayStyle::Class | DisplayStyle::Type => {
                format!("{}:{}", self.prefix, pascal(name.as_str()))
            }
            DisplayStyle::Slot => format!("{}:{}", self.prefix, snake(name.as_str())),
            DisplayStyle::MetaType => format!("{}:{}", self.type_prefix, pascal(name.as_str())),
        }
    }
}

/// `PascalCase` over whitespace and underscores
///
/// Words already carrying capitals (`RNA`, `DirectionQualifierEnum`) keep
/// them, so `RNA product` renders as `RNAProduct`.
fn pascal(name: &str) -> String {
    words(name)
        .map(|word| {
            if word.chars().any(char::is_uppercase) {
                let mut chars = word.chars();
                chars
                    .next()
                    .map(|first| first.to_uppercase().chain(chars).collect())
                    .unwrap_or_default()
            } else {
                word.to_case(Case::Pascal)
            }
        })
        .collect()
}

fn snake(name: &str) -> String {
    words(name)
        .map(|word| word.from_case(Case::Lower).to_case(Case::Snake))
        .collect::<Vec<_>>()
        .join("_")
}

fn words(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new(&NamingConfig::default())
    }
}
