//! Common types and utilities shared across the HLTB crates.
//!
//! This crate defines the shared error type and the observability helpers
//! used throughout the workspace. It is intentionally lightweight so that
//! every crate can depend on it without pulling in heavy transitive costs.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`HltbError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! ```rust
//! use hltb_common::HltbError;
//!
//! let err = HltbError::NotFound("NoSuchGameXYZ".into());
//! assert!(err.is_not_found());
//! assert_eq!(err.to_string(), "HLTB page not found for 'NoSuchGameXYZ'");
//! ```

pub mod observability;

/// Error types used across the HLTB service.
#[derive(thiserror::Error, Debug)]
pub enum HltbError {
    /// A required request field was missing or blank.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The search yielded no candidate page for the query.
    #[error("HLTB page not found for '{0}'")]
    NotFound(String),

    /// A driver (browser, network, etc.) reported an error.
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The lookup exceeded its time budget.
    #[error("Timeout occurred after {0}s")]
    Timeout(u64),
}

impl HltbError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Convenient alias for results that use [`HltbError`].
pub type Result<T> = std::result::Result<T, HltbError>;
