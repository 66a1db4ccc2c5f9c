//! Error types for the Archivist library.
//!
//! The search and highlight pipeline itself never fails: a keyword that does
//! not occur simply yields no matches. Errors only surface at the edges, when
//! keywords are validated, configuration is loaded or article files are read.
//! All of them are represented by the [`ArchivistError`] enum.
//!
//! # Examples
//!
//! ```
//! use archivist::error::{ArchivistError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ArchivistError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Archivist operations.
#[derive(Error, Debug)]
pub enum ArchivistError {
    /// I/O errors (reading article or config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Keyword validation errors (too short, empty, duplicate)
    #[error("Keyword error: {0}")]
    Keyword(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with ArchivistError.
pub type Result<T> = std::result::Result<T, ArchivistError>;

impl ArchivistError {
    /// Create a new keyword error.
    pub fn keyword<S: Into<String>>(msg: S) -> Self {
        ArchivistError::Keyword(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ArchivistError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ArchivistError::InvalidArgument(msg.into())
    }
}
