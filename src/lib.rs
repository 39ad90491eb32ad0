//! Accident severity decision layer.
//!
//! Modular structure:
//! - [`input`]: Form attributes and the validated raw record
//! - [`features`]: Schema alignment and derived interaction features
//! - [`model`]: Predictor seam, label codec, ONNX classifier, artifact context
//! - [`resolver`]: Class selection and override rules
//! - [`service`]: Request path wiring the above together
//! - [`logging`]: Structured JSON logging

pub mod config;
pub mod error;
pub mod input;
pub mod features;
pub mod model;
pub mod resolver;
pub mod service;
pub mod logging;

mod artifact;

pub use config::SeverityConfig;
pub use error::{ModelError, SeverityError};
pub use input::{FormInput, RawInput};
pub use features::{assemble, FeatureAssembler, FeatureSchema, FeatureVector};
pub use model::{LabelCodec, ModelContext, OnnxClassifier, Predictor};
pub use resolver::{PredictionResult, SelectionStrategy, SeverityResolver};
pub use service::SeverityService;
pub use logging::StructuredLogger;
