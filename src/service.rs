//! Request path: form → raw input → aligned features → resolved severity.

use crate::config::SeverityConfig;
use crate::error::{Result, SeverityError};
use crate::features::{CategoryMaps, FeatureAssembler};
use crate::input::{FormInput, RawInput};
use crate::model::ModelContext;
use crate::resolver::{PredictionResult, SeverityResolver};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug)]
pub struct SeverityService {
    context: ModelContext,
    assembler: FeatureAssembler,
    resolver: SeverityResolver,
}

impl SeverityService {
    pub fn new(context: ModelContext, resolver: SeverityResolver) -> Self {
        let mut assembler = FeatureAssembler::new(CategoryMaps::standard());
        if let Some(ref freq) = context.frequency_maps {
            assembler = assembler.with_frequency_maps(freq.clone());
        }
        Self {
            context,
            assembler,
            resolver,
        }
    }

    /// Load all artifacts once; the service is then reused for every request.
    pub fn from_config(config: &SeverityConfig) -> Result<Self> {
        let context = ModelContext::load(&config.artifacts)?;
        let resolver = SeverityResolver::new(config.resolver.clone());
        resolver.validate(&context.codec)?;
        Ok(Self::new(context, resolver))
    }

    pub fn context(&self) -> &ModelContext {
        &self.context
    }

    pub fn predict(&self, raw: &RawInput) -> Result<PredictionResult> {
        let features = self.assembler.assemble(raw, &self.context.schema)?;
        self.resolver.resolve(
            &features,
            self.context.model.as_ref(),
            &self.context.codec,
            raw,
        )
    }

    pub fn predict_form(&self, form: &FormInput) -> Result<PredictionResult> {
        self.predict(&form.parse()?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
}

impl From<&SeverityError> for ErrorReport {
    fn from(e: &SeverityError) -> Self {
        Self {
            code: e.code(),
            message: e.to_string(),
        }
    }
}

/// One output line per request: either a result or an error, never both.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRecord {
    pub request_id: String,
    pub ts: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PredictionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl PredictionRecord {
    pub fn from_outcome(outcome: &Result<PredictionResult>) -> Self {
        let (result, error) = match outcome {
            Ok(r) => (Some(r.clone()), None),
            Err(e) => (None, Some(ErrorReport::from(e))),
        };
        Self {
            request_id: Uuid::new_v4().to_string(),
            ts: Utc::now().to_rfc3339(),
            result,
            error,
        }
    }
}
