//! Service configuration: artifact locations, resolver policy, logging.

use crate::error::{Result, SeverityError};
use crate::resolver::SelectionStrategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityConfig {
    /// Model, label and schema files
    pub artifacts: ArtifactsConfig,
    /// Class selection and override rules
    pub resolver: ResolverConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// ONNX classifier
    pub model_path: PathBuf,
    /// JSON array of class labels, index order
    pub classes_path: PathBuf,
    /// JSON array of feature names, model input order
    pub schema_path: PathBuf,
    /// Optional `{column: {code: frequency}}` tables
    pub frequency_maps_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub strategy: SelectionStrategy,
    pub rules: RulesConfig,
    pub labels: SeverityLabels,
    /// Class labels treated as severe when the label space is binary
    pub severe_labels: Vec<String>,
    /// Index used when none of `severe_labels` is a model class
    pub severe_class: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub enabled: bool,
    /// Speed limit strictly above this is severe (mph)
    pub high_speed_limit: u32,
    /// Speed limit at or below this can be overridden to not severe (mph)
    pub safe_speed_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityLabels {
    pub severe: String,
    pub not_severe: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.onnx"),
            classes_path: PathBuf::from("classes.json"),
            schema_path: PathBuf::from("selected_features.json"),
            frequency_maps_path: None,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strategy: SelectionStrategy::ArgMax,
            rules: RulesConfig::default(),
            labels: SeverityLabels::default(),
            severe_labels: vec!["Fatal_Serious".to_string(), "Fatal".to_string(), "Serious".to_string()],
            severe_class: 1,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            high_speed_limit: 60,
            safe_speed_limit: 40,
        }
    }
}

impl Default for SeverityLabels {
    fn default() -> Self {
        Self {
            severe: "SEVERE".to_string(),
            not_severe: "NOT_SEVERE".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl SeverityConfig {
    /// Load from JSON file if present and valid; otherwise return default
    pub fn load(path: &Path) -> Self {
        let (config, problem) = Self::load_or_default(path);
        if let Some(e) = problem {
            tracing::warn!(path = %path.display(), error = %e, "config unusable; using defaults");
        }
        config
    }

    /// Like [`load`](Self::load) but hands back the rejection instead of logging
    /// it, for callers that install the subscriber from the config itself.
    pub fn load_or_default(path: &Path) -> (Self, Option<SeverityError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::try_load(path) {
            Ok(c) => (c, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| SeverityError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|e| SeverityError::Artifact {
            path: path.to_path_buf(),
            details: e.to_string(),
        })
    }
}
