//! # Error Types
//!
//! Structured error types for femrest_core. Every session call either
//! succeeds completely or returns one of these. The external application's
//! own message is carried verbatim; the client never rewrites it.
//!
//! ## Example
//!
//! ```rust
//! use femrest_core::errors::{ClientError, ClientResult, OperationKind};
//!
//! fn check_reply(accepted: bool) -> ClientResult<()> {
//!     if !accepted {
//!         return Err(ClientError::application(
//!             "set_bc",
//!             OperationKind::Mutate,
//!             "Node 99 not found",
//!             None,
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_reply(false).unwrap_err();
//! assert_eq!(err.error_code(), "APPLICATION_ERROR");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for femrest_core operations
pub type ClientResult<T> = Result<T, ClientError>;

/// What a request does to the external model.
///
/// Carried on every request and on every application error so callers can
/// tell a rejected model edit apart from a failed result query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Creates an entity and returns its identifier
    Create,
    /// Changes attributes of an existing entity
    Mutate,
    /// Server-side bulk geometry generation
    Generate,
    /// Analysis setup or a blocking solve
    Solve,
    /// Reads a value back from the model or its results
    Query,
    /// Model file and viewport housekeeping
    Persist,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Create => "create",
            OperationKind::Mutate => "mutate",
            OperationKind::Generate => "generate",
            OperationKind::Solve => "solve",
            OperationKind::Query => "query",
            OperationKind::Persist => "persist",
        };
        f.write_str(name)
    }
}

/// Structured error type for session operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ClientError {
    /// The external application could not be reached (refused, timed out,
    /// reset mid-request)
    #[error("Connection error: {endpoint} - {reason}")]
    Connection { endpoint: String, reason: String },

    /// The external application answered but rejected the request
    #[error("Application error in {operation} ({kind}): {message}")]
    Application {
        operation: String,
        kind: OperationKind,
        message: String,
        code: Option<i64>,
    },

    /// A success reply whose payload does not decode into the expected value
    #[error("Unexpected reply to {operation}: {reason} (body: {body:?})")]
    UnexpectedReply {
        operation: String,
        body: String,
        reason: String,
    },

    /// Client configuration is unusable
    #[error("Invalid configuration for '{field}': {reason}")]
    Config { field: String, reason: String },
}

impl ClientError {
    /// Create a Connection error
    pub fn connection(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        ClientError::Connection {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create an Application error
    pub fn application(
        operation: impl Into<String>,
        kind: OperationKind,
        message: impl Into<String>,
        code: Option<i64>,
    ) -> Self {
        ClientError::Application {
            operation: operation.into(),
            kind,
            message: message.into(),
            code,
        }
    }

    /// Create an UnexpectedReply error
    pub fn unexpected_reply(operation: impl Into<String>, body: impl Into<String>, reason: impl Into<String>) -> Self {
        ClientError::UnexpectedReply {
            operation: operation.into(),
            body: body.into(),
            reason: reason.into(),
        }
    }

    /// Create a Config error
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ClientError::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True when the external application was never reached
    pub fn is_connection(&self) -> bool {
        matches!(self, ClientError::Connection { .. })
    }

    /// True when the external application rejected the request
    pub fn is_application(&self) -> bool {
        matches!(self, ClientError::Application { .. })
    }

    /// True when a result or property query was rejected (bad load case,
    /// bad station, unknown entity)
    pub fn is_query_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Application {
                kind: OperationKind::Query,
                ..
            }
        )
    }

    /// Message reported by the external application, if any
    pub fn application_message(&self) -> Option<&str> {
        match self {
            ClientError::Application { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Check if this is a recoverable error (the caller may retry)
    pub fn is_recoverable(&self) -> bool {
        self.is_connection()
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Connection { .. } => "CONNECTION_ERROR",
            ClientError::Application {
                kind: OperationKind::Query,
                ..
            } => "QUERY_ERROR",
            ClientError::Application { .. } => "APPLICATION_ERROR",
            ClientError::UnexpectedReply { .. } => "UNEXPECTED_REPLY",
            ClientError::Config { .. } => "CONFIG_ERROR",
        }
    }
}
