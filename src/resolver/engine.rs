//! Combines model probabilities, class selection and override rules into the
//! final severity label.

use super::rules::{self, OverrideRule, Verdict};
use super::strategy::SelectionStrategy;
use crate::config::ResolverConfig;
use crate::error::{ModelError, Result, SeverityError};
use crate::features::FeatureVector;
use crate::input::RawInput;
use crate::model::{LabelCodec, Predictor};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of one resolution. Probabilities are in class-index order and sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub raw_label: String,
    pub class_index: usize,
    pub class_probabilities: Vec<(String, f64)>,
    pub final_label: String,
    /// Override that replaced the model's decision, if any.
    pub rule: Option<OverrideRule>,
    pub strategy: String,
}

impl PredictionResult {
    pub fn probability_sum(&self) -> f64 {
        self.class_probabilities.iter().map(|(_, p)| p).sum()
    }
}

#[derive(Debug)]
pub struct SeverityResolver {
    config: ResolverConfig,
}

impl SeverityResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Check the policy against the loaded label space so a bad config fails at
    /// startup rather than on every request.
    pub fn validate(&self, codec: &LabelCodec) -> Result<()> {
        if let SelectionStrategy::Thresholded { ref thresholds } = self.config.strategy {
            if thresholds.len() != codec.len() {
                return Err(SeverityError::InvalidThresholds {
                    expected: codec.len(),
                    actual: thresholds.len(),
                });
            }
        }
        if codec.is_binary() {
            self.severe_index(codec)?;
        }
        Ok(())
    }

    /// All-or-nothing: any model or decoding failure returns an error and no label.
    pub fn resolve(
        &self,
        features: &FeatureVector,
        model: &dyn Predictor,
        codec: &LabelCodec,
        raw: &RawInput,
    ) -> Result<PredictionResult> {
        let probs = model
            .predict_proba(features)
            .and_then(|p| normalize(p, codec.len()))
            .map_err(SeverityError::PredictionFailed)?;

        let class_index = self.config.strategy.select(&probs)?;
        let raw_label = codec.decode(class_index)?.to_string();

        let rule = rules::first_match(raw, &self.config.rules);
        let final_label = match rule {
            Some(r) => self.label_for(r.verdict()).to_string(),
            None => self.model_label(class_index, &raw_label, codec)?,
        };

        debug!(
            raw_label = %raw_label,
            final_label = %final_label,
            rule = ?rule,
            strategy = self.config.strategy.name(),
            "severity resolved"
        );

        let class_probabilities: Vec<(String, f64)> = codec
            .classes()
            .iter()
            .cloned()
            .zip(probs)
            .collect();

        Ok(PredictionResult {
            raw_label,
            class_index,
            class_probabilities,
            final_label,
            rule,
            strategy: self.config.strategy.name().to_string(),
        })
    }

    fn label_for(&self, verdict: Verdict) -> &str {
        match verdict {
            Verdict::Severe => self.config.labels.severe.as_str(),
            Verdict::NotSevere => self.config.labels.not_severe.as_str(),
        }
    }

    /// Severe class of a binary label space: matched by label name, so the
    /// encoder's sort order does not matter; otherwise `severe_class`.
    fn severe_index(&self, codec: &LabelCodec) -> Result<usize> {
        let by_name = codec
            .classes()
            .iter()
            .position(|c| self.config.severe_labels.iter().any(|s| s == c));
        match by_name {
            Some(i) => Ok(i),
            None if self.config.severe_class < codec.len() => Ok(self.config.severe_class),
            None => Err(SeverityError::UnknownClass {
                index: self.config.severe_class,
                classes: codec.len(),
            }),
        }
    }

    /// Binary label spaces map onto the severe/not-severe labels; multi-class
    /// labels pass through unchanged.
    fn model_label(&self, class_index: usize, raw_label: &str, codec: &LabelCodec) -> Result<String> {
        if !codec.is_binary() {
            return Ok(raw_label.to_string());
        }
        let verdict = if class_index == self.severe_index(codec)? {
            Verdict::Severe
        } else {
            Verdict::NotSevere
        };
        Ok(self.label_for(verdict).to_string())
    }
}

/// Validate model output against the label space and rescale to sum to 1.
fn normalize(probs: Vec<f64>, classes: usize) -> std::result::Result<Vec<f64>, ModelError> {
    if probs.len() != classes {
        return Err(ModelError::Shape {
            expected: classes,
            actual: probs.len(),
        });
    }
    if let Some(bad) = probs.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(ModelError::InvalidProbabilities(format!("value {bad}")));
    }
    let sum: f64 = probs.iter().sum();
    if sum <= 0.0 {
        return Err(ModelError::InvalidProbabilities("all zero".to_string()));
    }
    Ok(probs.into_iter().map(|p| p / sum).collect())
}
