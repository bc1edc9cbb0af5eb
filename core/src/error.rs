//! Error types for toolkit operations

use thiserror::Error;

/// Main error type for toolkit operations
#[derive(Error, Debug)]
pub enum ToolkitError {
    /// Schema parsing errors
    #[error("Failed to parse schema: {message}")]
    ParseError {
        /// Error message
        message: String,
        /// Location in schema if available
        location: Option<String>,
    },

    /// Import resolution errors
    #[error("Failed to resolve import '{import}': {reason}")]
    ImportError {
        /// Import that failed
        import: String,
        /// Reason for failure
        reason: String,
    },

    /// Defects found while building the index; the index is not served
    #[error("Schema has {} defect(s): {}", .0.len(), join_defects(.0))]
    SchemaDefects(Vec<SchemaDefect>),

    /// The name matched no element after alias and case folding
    #[error("Element not found: {0}")]
    NotFound(String),

    /// The query does not apply to the kind of element it was given
    #[error("Invalid query '{operation}' on '{element}': {reason}")]
    InvalidQueryShape {
        /// Operation that was requested
        operation: &'static str,
        /// Canonical name of the element it was requested on
        element: String,
        /// Why the query does not apply
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for toolkit operations
pub type Result<T> = std::result::Result<T, ToolkitError>;

/// A structural problem detected while building the schema graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaDefect {
    /// Two distinct elements share a name once case and separators are folded
    #[error("'{first}' and '{second}' collide on lookup key '{key}'")]
    NameCollision {
        /// First element
        first: String,
        /// Second element
        second: String,
        /// Folded key both map to
        key: String,
    },

    /// A reference points at a name that is not defined
    #[error("'{element}' references undefined {field} '{target}'")]
    DanglingReference {
        /// Element (or configuration entry) holding the reference
        element: String,
        /// Field the reference appears in
        field: &'static str,
        /// Missing target
        target: String,
    },

    /// A reference points at an element of the wrong kind
    #[error("'{element}' {field} '{target}' must be a {expected}")]
    WrongKindReference {
        /// Element holding the reference
        element: String,
        /// Field the reference appears in
        field: &'static str,
        /// Referenced element
        target: String,
        /// Kind the field requires
        expected: &'static str,
    },

    /// The is-a/mixin relation contains a cycle
    #[error("Circular inheritance: {}", .cycle.join(" -> "))]
    CyclicInheritance {
        /// Elements on the cycle, first element repeated at the end
        cycle: Vec<String>,
    },

    /// A configured root sentinel is not defined by the schema
    #[error("Configured {role} '{name}' is not defined")]
    MissingRoot {
        /// Which root this is
        role: &'static str,
        /// Configured name
        name: String,
    },

    /// A configured root sentinel has a parent
    #[error("Configured {role} '{name}' must not have a parent")]
    RootHasParent {
        /// Which root this is
        role: &'static str,
        /// Configured name
        name: String,
    },
}

fn join_defects(defects: &[SchemaDefect]) -> String {
    defects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ToolkitError {
    /// Create a new parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: None,
        }
    }

    /// Create a new parse error with location
    #[must_use]
    pub fn parse_at(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: Some(location.into()),
        }
    }

    /// Create a new import error
    #[must_use]
    pub fn import(import: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImportError {
            import: import.into(),
            reason: reason.into(),
        }
    }

    /// Create a not-found error
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create an invalid query shape error
    #[must_use]
    pub fn invalid_query(
        operation: &'static str,
        element: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidQueryShape {
            operation,
            element: element.into(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Defects carried by this error, if it is a build failure
    #[must_use]
    pub fn defects(&self) -> &[SchemaDefect] {
        match self {
            Self::SchemaDefects(defects) => defects,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for ToolkitError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ToolkitError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
