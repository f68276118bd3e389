//! Error types for symbol-layout.
//!
//! Layout errors live next to the layout engine in [`crate::layout`]; this
//! module covers configuration and package file handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors that can occur while reading package sources or writing symbols.
#[derive(Error, Debug)]
pub enum PackageError {
    /// Package source could not be read.
    #[error("failed to read package source: {path}")]
    ReadError {
        /// Path to the source file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Package source is not a valid descriptor.
    #[error("failed to parse package source: {path}")]
    ParseError {
        /// Path to the source file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Generated symbols could not be serialised.
    #[error("failed to serialise symbols for {name}")]
    SerialiseError {
        /// Package name.
        name: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Generated symbols could not be written.
    #[error("failed to write symbols: {path}")]
    WriteError {
        /// Path to the output file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Source file has an extension the tool does not read.
    #[error("unsupported package source: {path}")]
    UnsupportedSource {
        /// Path to the source file.
        path: PathBuf,
    },

    /// Source pattern is not a valid glob.
    #[error("invalid source pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Description of what's wrong.
        message: String,
    },
}
