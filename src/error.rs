//! Error taxonomy for assembly, inference and resolution.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeverityError>;

/// Failure raised by a [`Predictor`](crate::model::Predictor) implementation.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no model loaded")]
    NotLoaded,

    #[error("model runtime failure: {0}")]
    Runtime(String),

    #[error("expected {expected} values, got {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("invalid probability output: {0}")]
    InvalidProbabilities(String),
}

#[derive(Debug, Error)]
pub enum SeverityError {
    #[error("[SEV-1001] feature vector has {actual} columns, schema requires {expected}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("[SEV-1002] no mapping for {field} value {value:?}")]
    UnmappedCategory { field: String, value: String },

    #[error("[SEV-1003] {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("[SEV-1004] invalid feature schema: {0}")]
    InvalidSchema(String),

    #[error("[SEV-1005] malformed request: {0}")]
    InvalidRequest(String),

    #[error("[SEV-2001] prediction failed: {0}")]
    PredictionFailed(#[source] ModelError),

    #[error("[SEV-2002] class index {index} outside label space of {classes}")]
    UnknownClass { index: usize, classes: usize },

    #[error("[SEV-2003] label {0:?} not in label space")]
    UnknownLabel(String),

    #[error("[SEV-2004] {actual} thresholds configured for {expected} classes")]
    InvalidThresholds { expected: usize, actual: usize },

    #[error("[SEV-2005] invalid label space: {0}")]
    InvalidLabels(String),

    #[error("[SEV-3001] invalid artifact {path}: {details}")]
    Artifact { path: PathBuf, details: String },

    #[error("[SEV-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SeverityError {
    /// Stable machine-parseable error code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SchemaMismatch { .. } => "SEV-1001",
            Self::UnmappedCategory { .. } => "SEV-1002",
            Self::OutOfRange { .. } => "SEV-1003",
            Self::InvalidSchema(_) => "SEV-1004",
            Self::InvalidRequest(_) => "SEV-1005",
            Self::PredictionFailed(_) => "SEV-2001",
            Self::UnknownClass { .. } => "SEV-2002",
            Self::UnknownLabel(_) => "SEV-2003",
            Self::InvalidThresholds { .. } => "SEV-2004",
            Self::InvalidLabels(_) => "SEV-2005",
            Self::Artifact { .. } => "SEV-3001",
            Self::Io { .. } => "SEV-3002",
        }
    }

    pub(crate) fn unmapped(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnmappedCategory {
            field: field.into(),
            value: value.into(),
        }
    }
}
