//! ONNX Runtime classifier. Input: [1, feature_dim] f32, Output: class probabilities.
//! Uses `ort`; if the model file is missing, runs in no-model mode where every
//! prediction fails with [`ModelError::NotLoaded`].

use super::Predictor;
use crate::error::ModelError;
use crate::features::FeatureVector;
use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use std::path::Path;
use std::sync::Mutex;

/// Output name used by gradient-boosting converters when ZipMap is disabled.
const PROBABILITY_OUTPUT: &str = "probabilities";

pub struct OnnxClassifier {
    session: Option<Mutex<Session>>,
    output_name: String,
    feature_dim: usize,
}

impl OnnxClassifier {
    /// Load model from path. A missing file yields a classifier with no session.
    pub fn load(path: &Path, feature_dim: usize) -> Result<Self, ModelError> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "ONNX model not found; predictions will fail");
            return Ok(Self {
                session: None,
                output_name: String::new(),
                feature_dim,
            });
        }

        let session = Session::builder()
            .map_err(|e| ModelError::Runtime(format!("session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Runtime(format!("optimization level: {e}")))?
            .commit_from_file(path)
            .map_err(|e| ModelError::Runtime(format!("load {}: {e}", path.display())))?;

        let output_name = session
            .outputs()
            .iter()
            .find(|o| o.name() == PROBABILITY_OUTPUT)
            .or_else(|| session.outputs().last())
            .map(|o| o.name().to_string())
            .ok_or_else(|| ModelError::Runtime("model declares no outputs".to_string()))?;

        tracing::info!(path = %path.display(), output = %output_name, feature_dim, "ONNX model loaded");

        Ok(Self {
            session: Some(Mutex::new(session)),
            output_name,
            feature_dim,
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }
}

impl Predictor for OnnxClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ModelError> {
        let Some(ref session) = self.session else {
            return Err(ModelError::NotLoaded);
        };
        if features.len() != self.feature_dim {
            return Err(ModelError::Shape {
                expected: self.feature_dim,
                actual: features.len(),
            });
        }

        let arr = Array2::from_shape_vec((1, self.feature_dim), features.to_f32())
            .map_err(|e| ModelError::Runtime(format!("input array: {e}")))?;
        let input = Value::from_array(arr).map_err(|e| ModelError::Runtime(format!("input tensor: {e}")))?;

        let mut session = session
            .lock()
            .map_err(|_| ModelError::Runtime("session lock poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| ModelError::Runtime(format!("inference: {e}")))?;
        let out = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| ModelError::Runtime(format!("missing output {}", self.output_name)))?;
        let (_, data) = out
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Runtime(format!("extract {}: {e}", self.output_name)))?;

        Ok(data.iter().map(|p| f64::from(*p)).collect())
    }
}
