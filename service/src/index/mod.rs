//! The hierarchical index over a loaded schema
//!
//! Built once from a [`SchemaDefinition`](biolink_toolkit_core::SchemaDefinition)
//! and immutable afterwards. [`SchemaIndex`] composes the parts:
//!
//! - [`graph`]: canonical names, element records and is-a/mixin adjacency
//! - [`closure`]: ancestor and descendant sets over that DAG
//! - [`resolver`]: case-, separator- and alias-insensitive name lookup
//! - [`mapping`]: external identifier reverse index
//! - [`domain_range`]: slot domains and ranges and their inverse lookups
//! - [`partition`]: entities, associations, properties and predicates
//! - [`format`]: display names

pub mod closure;
pub mod domain_range;
pub mod format;
pub mod graph;
pub mod mapping;
pub mod partition;
pub mod resolver;
pub mod schema_index;
mod validate;

pub use format::{DisplayFormatter, DisplayStyle};
pub use graph::{ElementId, SchemaGraph};
pub use schema_index::{IndexStats, SchemaIndex};
