//! Unified error types for sbom-conformance.
//!
//! Adapter failures are described by [`AdapterError`]; everything that can
//! abort a single conformance unit is lifted into [`ConformanceError`] with
//! enough context (fixture, source and destination formats) to triage it.
//! Diff mismatches are results, never errors.

use crate::model::GraphError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sbom-conformance operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConformanceError {
    /// The golden fixture could not be loaded
    #[error("Failed to load fixture {path:?}: {context}")]
    Fixture {
        path: PathBuf,
        context: String,
        #[source]
        source: FixtureErrorKind,
    },

    /// The destination adapter failed to encode the golden graph
    #[error("Encode failed: {context}")]
    Encode {
        context: String,
        #[source]
        source: AdapterError,
    },

    /// The destination adapter failed to decode its own output
    #[error("Decode failed: {context}")]
    Decode {
        context: String,
        #[source]
        source: AdapterError,
    },

    /// No adapter is registered for the requested format
    #[error("No adapter registered for format {0}")]
    UnknownFormat(String),

    /// Evidence could not be written
    #[error("Failed to persist evidence under {path:?}: {context}")]
    Evidence {
        path: PathBuf,
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific fixture error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FixtureErrorKind {
    #[error("fixture file not readable: {0}")]
    Read(#[from] std::io::Error),

    #[error("fixture is not a valid canonical graph: {0}")]
    Invalid(#[from] AdapterError),

    #[error("fixture path has no file name")]
    NoFileName,
}

/// Errors raised by format adapters while encoding or decoding.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AdapterError {
    #[error("Adapter '{adapter}' does not handle format {format}")]
    UnsupportedFormat { adapter: String, format: String },

    #[error("Invalid JSON structure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML structure: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Stream read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Invalid field value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("Document declares version {found}, expected {expected}")]
    VersionMismatch { expected: String, found: String },

    #[error("Decoded document is not a valid graph: {0}")]
    Graph(#[from] GraphError),

    #[error("Graph cannot be represented: {0}")]
    Unrepresentable(String),
}

impl AdapterError {
    /// Create a missing-field error
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create an invalid-value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for sbom-conformance operations
pub type Result<T> = std::result::Result<T, ConformanceError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ConformanceError {
    /// Create a fixture error
    pub fn fixture(
        path: impl Into<PathBuf>,
        context: impl Into<String>,
        source: impl Into<FixtureErrorKind>,
    ) -> Self {
        Self::Fixture {
            path: path.into(),
            context: context.into(),
            source: source.into(),
        }
    }

    /// Create an encode error with context
    pub fn encode(context: impl Into<String>, source: AdapterError) -> Self {
        Self::Encode {
            context: context.into(),
            source,
        }
    }

    /// Create a decode error with context
    pub fn decode(context: impl Into<String>, source: AdapterError) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    /// Create an unknown-format error
    pub fn unknown_format(format: impl std::fmt::Display) -> Self {
        Self::UnknownFormat(format.to_string())
    }

    /// Create an evidence error
    pub fn evidence(
        path: impl Into<PathBuf>,
        context: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Evidence {
            path: path.into(),
            context: context.into(),
            source,
        }
    }

    /// Short category label used in reports.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Fixture { .. } => "fixture",
            Self::Encode { .. } => "encode",
            Self::Decode { .. } => "decode",
            Self::UnknownFormat(_) => "unknown-format",
            Self::Evidence { .. } => "evidence",
        }
    }

    /// Render the error together with its source chain on one line.
    #[must_use]
    pub fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to any existing context, so nested calls
/// produce a chain such as `"running case: loading fixture: base"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ConformanceError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: ConformanceError, new_ctx: &str) -> ConformanceError {
    match err {
        ConformanceError::Fixture {
            path,
            context,
            source,
        } => ConformanceError::Fixture {
            path,
            context: chain_context(new_ctx, &context),
            source,
        },
        ConformanceError::Encode { context, source } => ConformanceError::Encode {
            context: chain_context(new_ctx, &context),
            source,
        },
        ConformanceError::Decode { context, source } => ConformanceError::Decode {
            context: chain_context(new_ctx, &context),
            source,
        },
        ConformanceError::Evidence {
            path,
            context,
            source,
        } => ConformanceError::Evidence {
            path,
            context: chain_context(new_ctx, &context),
            source,
        },
        ConformanceError::UnknownFormat(format) => ConformanceError::UnknownFormat(format),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
