//! Classifier collaborators: the predictor seam, the label codec and the
//! load-once context that carries them.

mod codec;
mod context;
mod onnx;

pub use codec::LabelCodec;
pub use context::ModelContext;
pub use onnx::OnnxClassifier;

use crate::error::ModelError;
use crate::features::FeatureVector;

/// Anything that turns an aligned feature vector into class probabilities,
/// one per class in label-codec order.
pub trait Predictor: Send + Sync {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ModelError>;
}

impl<F> Predictor for F
where
    F: Fn(&FeatureVector) -> Result<Vec<f64>, ModelError> + Send + Sync,
{
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ModelError> {
        self(features)
    }
}
