use thiserror::Error;

/// The main error type for MAAS client operations.
///
/// This enum represents all possible errors that can occur while talking to
/// a MAAS region controller: connection and authentication failures from the
/// transport layer, validation failures from client construction, and the
/// two decode outcomes (deserialization failure, unsupported API version).
#[derive(Error, Debug)]
pub enum MaasError {
    /// Represents errors that occur during connection attempts
    #[error("Connection error: {0}")]
    Connection(String),

    /// Represents authentication failures
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Represents validation failures when constructing the client or its
    /// value objects
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A wire payload did not match the expected shape for its entity kind.
    #[error("Deserialization error: {source}")]
    Deserialization {
        #[from]
        source: DeserializationError,
    },

    /// No reader is registered at or below the requested API version for
    /// the named entity kind.
    #[error("No registered reader for {kind} at or below version {version}")]
    UnsupportedVersion { kind: &'static str, version: String },
}

impl MaasError {
    /// Returns `true` if this error came from shape coercion or a nested
    /// decoder, i.e. the payload itself was malformed.
    pub fn is_deserialization(&self) -> bool {
        matches!(self, MaasError::Deserialization { .. })
    }

    /// Returns `true` if the requested API version is below every reader
    /// declared for the entity kind.
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, MaasError::UnsupportedVersion { .. })
    }

    /// Wraps a deserialization error with parent context (field name,
    /// collection index). Other error kinds pass through unchanged so the
    /// taxonomy stays distinguishable.
    pub(crate) fn annotate(self, context: impl Into<String>) -> Self {
        match self {
            MaasError::Deserialization { source } => MaasError::Deserialization {
                source: source.annotate(context),
            },
            other => other,
        }
    }
}

/// Specialized error type for shape-coercion failures.
///
/// Carries enough context to diagnose a bad payload without re-parsing it:
/// the offending field, what was expected versus received, and a short
/// causal chain built as the failure propagates out of nested decoders.
#[derive(Error, Debug)]
pub enum DeserializationError {
    /// A field was present but had the wrong JSON type or an unparseable
    /// value
    #[error("field '{field}': expected {expected}, got {actual}")]
    Shape {
        field: String,
        expected: &'static str,
        actual: String,
    },

    /// A required field was absent from the input map
    #[error("required field '{0}' is missing")]
    MissingField(String),

    /// The input value itself was not the expected container kind
    #[error("expected {expected}, got {actual}")]
    Value {
        expected: &'static str,
        actual: String,
    },

    /// A nested decode failed; `context` names the parent field or the
    /// collection index
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<DeserializationError>,
    },
}

impl DeserializationError {
    pub(crate) fn annotate(self, context: impl Into<String>) -> Self {
        DeserializationError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Specialized error type for validation failures.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    #[error("Format error: {0}")]
    Format(String),
}

/// Type alias for Results that may fail with a MaasError
pub type MaasResult<T> = Result<T, MaasError>;
