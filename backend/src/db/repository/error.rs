//! Error types for document-store operations.
//!
//! Every error carries an [`ErrorContext`] naming the operation and
//! collection involved, so a failed page load can be traced back to the
//! query that caused it.

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structured context for repository errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "fetch_poses")
    pub operation: Option<String>,
    /// The collection involved (e.g., "poses", "pilates_videos")
    pub collection: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
    /// Whether repeating the request may succeed
    pub retryable: bool,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Mark this error as retryable.
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref collection) = self.collection {
            parts.push(format!("collection={}", collection));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        if self.retryable {
            parts.push("retryable=true".to_string());
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The store could not be reached.
    #[error("Connection error: {message} {context}")]
    ConnectionError {
        message: String,
        context: ErrorContext,
    },

    /// A query was sent but failed.
    #[error("Query error: {message} {context}")]
    QueryError {
        message: String,
        context: ErrorContext,
    },

    /// A stored document or seed file could not be decoded at all.
    #[error("Decode error: {message} {context}")]
    DecodeError {
        message: String,
        context: ErrorContext,
    },

    /// Configuration or initialization error.
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    /// Timeout waiting for the store.
    #[error("Timeout error: {message} {context}")]
    TimeoutError {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors.
    #[error("Internal error: {message} {context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context: ErrorContext::default().retryable(),
        }
    }

    /// Create a connection error with full context.
    pub fn connection_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context: context.retryable(),
        }
    }

    /// Create a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::QueryError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a query error with context.
    pub fn query_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::QueryError {
            message: message.into(),
            context,
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a decode error with context.
    pub fn decode_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::DecodeError {
            message: message.into(),
            context,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::TimeoutError {
            message: message.into(),
            context: ErrorContext::default().retryable(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.context().retryable
    }

    /// True when the store itself is unavailable, as opposed to a bad query.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError { .. } | Self::TimeoutError { .. }
        )
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::QueryError { context, .. }
            | Self::DecodeError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::TimeoutError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::QueryError { context, .. }
            | Self::DecodeError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::TimeoutError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Add or update the collection in the error context.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.context_mut().collection = Some(collection.into());
        self
    }
}

impl From<String> for RepositoryError {
    fn from(s: String) -> Self {
        RepositoryError::internal(s)
    }
}

impl From<&str> for RepositoryError {
    fn from(s: &str) -> Self {
        RepositoryError::internal(s.to_string())
    }
}

#[cfg(feature = "mongo-repo")]
impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        let message = err.to_string();
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::DnsResolve { .. } => {
                RepositoryError::connection(message)
            }
            ErrorKind::InvalidArgument { .. } => RepositoryError::configuration(message),
            ErrorKind::Authentication { .. } => RepositoryError::ConnectionError {
                message,
                context: ErrorContext::default().with_details("authentication"),
            },
            ErrorKind::BsonDeserialization(_) => RepositoryError::decode(message),
            _ => RepositoryError::query(message),
        }
    }
}
