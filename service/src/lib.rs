//! # Biolink Toolkit
//!
//! Queryable index over the Biolink model, or any schema shaped like it.
//!
//! Given an element name in any accepted spelling (case, underscores,
//! aliases, formatted `biolink:` names) the toolkit answers structural
//! questions about the model: ancestry and descendants over the is-a and
//! mixin DAG, parents and children, domains and ranges of slots with or
//! without inheritance, which slots apply to a class, and which elements map
//! to an external identifier.
//!
//! ## Layout
//!
//! - [`parser`]: reads schema documents (`YAML` or `JSON`) and merges their
//!   imports into one [`SchemaDefinition`](biolink_toolkit_core::SchemaDefinition)
//! - [`index`]: the immutable index built from a schema; every check runs
//!   at build time and all defects are reported together
//! - [`toolkit`]: the string-in, string-out query facade
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use biolink_toolkit::Toolkit;
//! use biolink_toolkit_core::ToolkitConfig;
//!
//! # fn example() -> biolink_toolkit_core::Result<()> {
//! let toolkit = Toolkit::from_file("biolink-model.yaml", ToolkitConfig::default())?;
//!
//! assert_eq!(toolkit.get_element("locus"), toolkit.get_element("gene"));
//! let domain = toolkit.get_slot_domain("treats", true, true);
//! let treats_genes = toolkit.get_all_predicates_with_class_range("gene", true, false);
//! # let _ = (domain, treats_genes);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! An index is built once and only read afterwards. [`Toolkit`] is a cheap
//! `Arc` handle that can be cloned into any number of threads; the only
//! shared mutable state is the descendant memo, a concurrent map.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)] // Biolink, LinkML are proper nouns

/// Schema document parsing and import resolution
pub mod parser;

/// The hierarchical schema index
pub mod index;

/// Query facade
pub mod toolkit;

pub use index::{ElementId, IndexStats, SchemaIndex};
pub use toolkit::Toolkit;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::index::{ElementId, SchemaIndex};
    pub use crate::toolkit::Toolkit;
    pub use biolink_toolkit_core::prelude::*;
}
