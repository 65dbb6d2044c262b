//! Error types for Caravel
//!
//! Uses `thiserror` for library errors. Everything in this enum is a
//! configuration problem: malformed plan, malformed manifest, bad
//! predicate input. Cluster-side failures never surface here - they are
//! converted into group outcomes at the sequencer boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Caravel operations
pub type CaravelResult<T> = Result<T, CaravelError>;

/// Main error type for Caravel operations
#[derive(Error, Debug)]
pub enum CaravelError {
    /// Group declared without a name
    #[error("group at position {index} in {plan} has an empty name")]
    EmptyGroupName { index: usize, plan: PathBuf },

    /// Group resolved to zero manifests
    #[error("group '{group}' contains no resources")]
    EmptyGroup { group: String },

    /// Readiness block missing a field its kind requires
    #[error("readiness check for group '{group}' is missing required field '{field}'")]
    MissingField { group: String, field: &'static str },

    /// Label selector failed syntax validation
    #[error("invalid label selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Timeout must be a positive number of seconds
    #[error("group '{group}' declares a non-positive readiness timeout")]
    InvalidTimeout { group: String },

    /// Poll interval must be a positive number of seconds
    #[error("plan {plan} declares a non-positive poll interval")]
    InvalidPollInterval { plan: PathBuf },

    /// Plan file path does not exist
    #[error("plan file not found: {path}")]
    PlanNotFound { path: PathBuf },

    /// Plan file could not be parsed
    #[error("invalid plan file {path}: {message}")]
    InvalidPlan { path: PathBuf, message: String },

    /// Manifest file could not be parsed as YAML documents
    #[error("invalid manifest in {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    /// Manifest path from the plan does not exist
    #[error("manifest path not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
