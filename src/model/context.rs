//! Immutable bundle of loaded artifacts, built once at startup and passed by reference.

use super::{LabelCodec, OnnxClassifier, Predictor};
use crate::config::ArtifactsConfig;
use crate::error::{Result, SeverityError};
use crate::features::{FeatureSchema, FrequencyMaps};

pub struct ModelContext {
    pub model: Box<dyn Predictor>,
    pub codec: LabelCodec,
    pub schema: FeatureSchema,
    pub frequency_maps: Option<FrequencyMaps>,
}

impl ModelContext {
    pub fn new(model: Box<dyn Predictor>, codec: LabelCodec, schema: FeatureSchema) -> Self {
        Self {
            model,
            codec,
            schema,
            frequency_maps: None,
        }
    }

    pub fn with_frequency_maps(mut self, maps: FrequencyMaps) -> Self {
        self.frequency_maps = Some(maps);
        self
    }

    /// Schema and classes must load; a missing model file leaves the context in
    /// no-model mode (see [`OnnxClassifier::load`]).
    pub fn load(config: &ArtifactsConfig) -> Result<Self> {
        let schema = FeatureSchema::load(&config.schema_path)?;
        let codec = LabelCodec::load(&config.classes_path)?;
        let model = OnnxClassifier::load(&config.model_path, schema.len()).map_err(|e| {
            SeverityError::Artifact {
                path: config.model_path.clone(),
                details: e.to_string(),
            }
        })?;
        if !model.is_loaded() {
            tracing::warn!(path = %config.model_path.display(), "no model loaded; every prediction will fail");
        }
        let mut ctx = Self::new(Box::new(model), codec, schema);
        if let Some(ref path) = config.frequency_maps_path {
            ctx = ctx.with_frequency_maps(FrequencyMaps::load(path)?);
        }
        Ok(ctx)
    }
}

impl std::fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelContext")
            .field("codec", &self.codec)
            .field("schema", &self.schema)
            .field("frequency_maps", &self.frequency_maps.is_some())
            .finish_non_exhaustive()
    }
}
