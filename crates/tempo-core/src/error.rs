//! Centralized error types for the Tempo application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// All errors in the Tempo application should be convertible to this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Server(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Local persistence errors (the selected-cities blob).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read store: {0}")]
    ReadFailed(String),

    #[error("Failed to write store: {0}")]
    WriteFailed(String),

    #[error("Stored data is malformed: {0}")]
    Malformed(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::ReadFailed(_) => "Unable to read saved cities. Starting fresh.",
            StorageError::WriteFailed(_) => "Failed to save your cities. Please try again.",
            StorageError::Malformed(_) => "Saved cities were unreadable. Starting fresh.",
        }
    }
}

/// Static-shell server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {listener} listener on port {port}: {message}")]
    BindFailed {
        listener: &'static str,
        port: u16,
        message: String,
    },

    #[error("TLS material unavailable: {0}")]
    TlsConfig(String),

    #[error("Site root not found: {0}")]
    SiteRootMissing(String),
}

impl ServerError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ServerError::BindFailed { .. } => "The server port is busy. Close other apps and retry.",
            ServerError::TlsConfig(_) => "Secure listener could not start. Check certificate paths.",
            ServerError::SiteRootMissing(_) => "Site files are missing. Check the install.",
        }
    }
}
