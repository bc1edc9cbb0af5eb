//! Schema object model handed over by a schema provider
//!
//! These are plain serde definitions in the shape of a `LinkML` schema file.
//! The index never mutates them; it wraps each one in an [`Element`] and
//! derives its adjacency and lookup tables from them once.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Schema definition - the root of a schema document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaDefinition {
    /// Unique identifier for the schema
    #[serde(default)]
    pub id: String,

    /// Name of the schema
    #[serde(default)]
    pub name: String,

    /// Description of the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Version of the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Default prefix for the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_prefix: Option<String>,

    /// Prefix declarations (prefix -> expansion)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub prefixes: IndexMap<String, String>,

    /// Import statements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,

    /// Default range for slots that declare none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_range: Option<String>,

    /// Class definitions
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub classes: IndexMap<String, ClassDefinition>,

    /// Slot definitions
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub slots: IndexMap<String, SlotDefinition>,

    /// Type definitions
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub types: IndexMap<String, TypeDefinition>,

    /// Enum definitions
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub enums: IndexMap<String, EnumDefinition>,
}

/// Mapping fields shared by every element kind
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mappings {
    /// Generic mappings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mappings: Vec<String>,

    /// Exact mappings to external ontology terms
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exact_mappings: Vec<String>,

    /// Close mappings to external ontology terms
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub close_mappings: Vec<String>,

    /// Related mappings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_mappings: Vec<String>,

    /// Narrow mappings (more specific terms)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub narrow_mappings: Vec<String>,

    /// Broad mappings (more general terms)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub broad_mappings: Vec<String>,
}

impl Mappings {
    /// Every declared identifier, generic mappings first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.mappings
            .iter()
            .chain(&self.exact_mappings)
            .chain(&self.close_mappings)
            .chain(&self.related_mappings)
            .chain(&self.narrow_mappings)
            .chain(&self.broad_mappings)
            .map(String::as_str)
    }

    /// Whether no identifier is declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Class definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassDefinition {
    /// Name of the class
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Is this class abstract?
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_: Option<bool>,

    /// Is this a mixin?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixin: Option<bool>,

    /// Parent class (single inheritance)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,

    /// Mixin classes (multiple inheritance via composition)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,

    /// Slots declared directly on this class
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<String>,

    /// Per-slot overrides in the context of this class
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub slot_usage: IndexMap<String, SlotDefinition>,

    /// Class URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_uri: Option<String>,

    /// Alternative names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Deprecation note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,

    /// Schema that defined this class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_schema: Option<String>,

    /// Cross-references to external identifiers
    #[serde(flatten)]
    pub mappings: Mappings,
}

/// Semantic role a slot plays in a statement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationalRole {
    /// Subject of a statement
    Subject,
    /// Object of a statement
    Object,
    /// The relation itself
    Predicate,
    /// A node in a graph
    Node,
    /// Any other role
    OtherRole,
}

/// Slot definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlotDefinition {
    /// Name of the slot
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parent slot (`is_a`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,

    /// Mixins
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,

    /// Is this a mixin?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixin: Option<bool>,

    /// Domain - the class that this slot can be applied to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Range - the class, type or enum of the slot value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// Is this slot multivalued?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multivalued: Option<bool>,

    /// Inverse relationship
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse: Option<String>,

    /// Is the relation symmetric?
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symmetric: Option<bool>,

    /// Explicit semantic role; `PREDICATE` marks a relation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relational_role: Option<RelationalRole>,

    /// Slot URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_uri: Option<String>,

    /// Aliases
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Deprecation note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,

    /// Schema that defined this slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_schema: Option<String>,

    /// Cross-references to external identifiers
    #[serde(flatten)]
    pub mappings: Mappings,
}

/// Type definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TypeDefinition {
    /// Name of the type
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Type this one refines
    #[serde(skip_serializing_if = "Option::is_none", rename = "typeof")]
    pub base_type: Option<String>,

    /// Base representation of values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Type URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Aliases
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Schema that defined this type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_schema: Option<String>,

    /// Cross-references to external identifiers
    #[serde(flatten)]
    pub mappings: Mappings,
}

/// Metadata attached to a permissible value
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissibleValue {
    /// Description of this permissible value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Meaning URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

/// Enum definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnumDefinition {
    /// Name of the enum
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Permissible values keyed by their text
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub permissible_values: IndexMap<String, Option<PermissibleValue>>,

    /// Aliases
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Schema that defined this enum
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_schema: Option<String>,

    /// Cross-references to external identifiers
    #[serde(flatten)]
    pub mappings: Mappings,
}

/// Kind tag of a schema element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Class definition (entities and associations)
    Class,
    /// Slot definition (predicates and attributes)
    Slot,
    /// Primitive type definition
    Type,
    /// Enumerated value set
    Enum,
}

impl ElementKind {
    /// Lowercase label used in messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Slot => "slot",
            Self::Type => "type",
            Self::Enum => "enum",
        }
    }

    /// Whether values of this kind are leaf value types (types and enums)
    #[must_use]
    pub const fn is_value_type(self) -> bool {
        matches!(self, Self::Type | Self::Enum)
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A schema element of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Class element
    Class(ClassDefinition),
    /// Slot element
    Slot(SlotDefinition),
    /// Type element
    Type(TypeDefinition),
    /// Enum element
    Enum(EnumDefinition),
}

impl Element {
    /// Kind tag of this element
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Class(_) => ElementKind::Class,
            Self::Slot(_) => ElementKind::Slot,
            Self::Type(_) => ElementKind::Type,
            Self::Enum(_) => ElementKind::Enum,
        }
    }

    /// Stored name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Class(c) => &c.name,
            Self::Slot(s) => &s.name,
            Self::Type(t) => &t.name,
            Self::Enum(e) => &e.name,
        }
    }

    /// Parent names: primary is-a first, then mixins
    ///
    /// Types and enums are leaves and have none.
    pub fn parent_names(&self) -> impl Iterator<Item = &str> {
        let (is_a, mixins): (Option<&String>, &[String]) = match self {
            Self::Class(c) => (c.is_a.as_ref(), &c.mixins),
            Self::Slot(s) => (s.is_a.as_ref(), &s.mixins),
            Self::Type(_) | Self::Enum(_) => (None, &[]),
        };
        is_a.into_iter().chain(mixins).map(String::as_str)
    }

    /// Declared aliases
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        match self {
            Self::Class(c) => &c.aliases,
            Self::Slot(s) => &s.aliases,
            Self::Type(t) => &t.aliases,
            Self::Enum(e) => &e.aliases,
        }
    }

    /// Declared mapping identifiers
    #[must_use]
    pub fn mappings(&self) -> &Mappings {
        match self {
            Self::Class(c) => &c.mappings,
            Self::Slot(s) => &s.mappings,
            Self::Type(t) => &t.mappings,
            Self::Enum(e) => &e.mappings,
        }
    }

    /// Schema the element came from
    #[must_use]
    pub fn from_schema(&self) -> Option<&str> {
        match self {
            Self::Class(c) => c.from_schema.as_deref(),
            Self::Slot(s) => s.from_schema.as_deref(),
            Self::Type(t) => t.from_schema.as_deref(),
            Self::Enum(e) => e.from_schema.as_deref(),
        }
    }

    /// Whether the element is declared as a mixin
    #[must_use]
    pub fn is_mixin(&self) -> bool {
        match self {
            Self::Class(c) => c.mixin.unwrap_or(false),
            Self::Slot(s) => s.mixin.unwrap_or(false),
            Self::Type(_) | Self::Enum(_) => false,
        }
    }

    /// Class definition, if this is a class
    #[must_use]
    pub const fn as_class(&self) -> Option<&ClassDefinition> {
        match self {
            Self::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Slot definition, if this is a slot
    #[must_use]
    pub const fn as_slot(&self) -> Option<&SlotDefinition> {
        match self {
            Self::Slot(s) => Some(s),
            _ => None,
        }
    }
}
