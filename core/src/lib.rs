//! # Biolink Toolkit Core
//!
//! Core types for the Biolink model toolkit: the schema object model that a
//! schema provider hands to the index, the canonical [`ElementName`], the
//! error taxonomy and the toolkit configuration.
//!
//! ## Design Principles
//!
//! - **Closed element kinds**: every schema element is a class, slot, type or
//!   enum, tagged explicitly rather than inferred from naming conventions
//! - **Canonical names are typed**: [`ElementName`] keeps stored names apart
//!   from raw user input and display strings
//! - **Configuration is data**: roots, aliases and implicit domains travel
//!   alongside the schema instead of being hard-coded

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Error types for toolkit operations
pub mod error;

/// Schema object model produced by a schema provider
pub mod types;

/// Canonical element names and lookup keys
pub mod name;

/// Toolkit configuration
pub mod config;

pub use config::{HierarchyRoots, IndexConfig, NamingConfig, ToolkitConfig};
pub use error::{Result, SchemaDefect, ToolkitError};
pub use name::ElementName;
pub use types::{
    ClassDefinition, Element, ElementKind, EnumDefinition, SchemaDefinition, SlotDefinition,
    TypeDefinition,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::{Result, SchemaDefect, ToolkitError};
    pub use crate::name::ElementName;
    pub use crate::types::*;
}
