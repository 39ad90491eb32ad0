//! Class selection over a probability vector.

use crate::error::{Result, SeverityError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Highest probability; ties go to the lowest index.
    #[default]
    #[serde(rename = "argmax")]
    ArgMax,
    /// Per-class minimum probability. Among classes that clear their threshold the
    /// most probable wins (ties to the lowest index); if none clears, arg-max.
    Thresholded { thresholds: Vec<f64> },
}

impl SelectionStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ArgMax => "argmax",
            Self::Thresholded { .. } => "thresholded",
        }
    }

    pub fn select(&self, probs: &[f64]) -> Result<usize> {
        match self {
            Self::ArgMax => Ok(argmax(probs.iter().copied().enumerate())),
            Self::Thresholded { thresholds } => {
                if thresholds.len() != probs.len() {
                    return Err(SeverityError::InvalidThresholds {
                        expected: probs.len(),
                        actual: thresholds.len(),
                    });
                }
                let eligible: Vec<(usize, f64)> = probs
                    .iter()
                    .zip(thresholds)
                    .enumerate()
                    .filter(|(_, (p, t))| *p >= *t)
                    .map(|(i, (p, _))| (i, *p))
                    .collect();
                if eligible.is_empty() {
                    Ok(argmax(probs.iter().copied().enumerate()))
                } else {
                    Ok(argmax(eligible.into_iter()))
                }
            }
        }
    }
}

fn argmax(candidates: impl Iterator<Item = (usize, f64)>) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in candidates {
        match best {
            Some((_, bp)) if p <= bp => {}
            _ => best = Some((i, p)),
        }
    }
    best.map(|(i, _)| i).unwrap_or(0)
}
