//! Error types shared across the workspace.
//!
//! Domain failures of individual tool calls live in `uigen-tools`; this type
//! covers the ambient concerns around them: configuration, serialization of
//! requests and snapshots, and argument validation at the edges.
//!
//! # Examples
//!
//! ```
//! use uigen_core::{Error, Result};
//!
//! fn queue_capacity(value: usize) -> Result<usize> {
//!     if value == 0 {
//!         return Err(Error::ConfigError {
//!             message: "queue capacity must be greater than zero".to_string(),
//!         });
//!     }
//!     Ok(value)
//! }
//!
//! let err = queue_capacity(0).unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Main error type for ambient workspace failures.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    ///
    /// Raised when configuration is invalid, missing required fields,
    /// or contains contradictory settings.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Serialization/deserialization error.
    ///
    /// Raised when a request, snapshot, or configuration document cannot be
    /// converted to or from its wire format.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error while reading configuration or snapshot files.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being read or written
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "bad value".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a serialization error.
    #[must_use]
    pub const fn is_serialization_error(&self) -> bool {
        matches!(self, Self::SerializationError { .. })
    }

    /// Returns `true` if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::SerializationError {
            message: source.to_string(),
            source: Some(source),
        }
    }
}

/// Result type alias for ambient workspace operations.
pub type Result<T> = std::result::Result<T, Error>;
