use crate::error::{Result, StoryboardError};
use crate::models::{Position, ReferenceImage};
use serde::{Deserialize, Serialize};

/// Generation parameters forwarded unchanged into every node spec of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    pub model: String,
    /// "W:H" with two positive integers, e.g. "16:9".
    pub ratio: String,
    pub batch_size: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        GenerationParams {
            model: "flux-schnell".to_string(),
            ratio: "1:1".to_string(),
            batch_size: 1,
        }
    }
}

impl GenerationParams {
    pub fn new(model: impl Into<String>, ratio: impl Into<String>, batch_size: u32) -> Self {
        GenerationParams {
            model: model.into(),
            ratio: ratio.into(),
            batch_size,
        }
    }

    /// Width/height quotient of `ratio`. Rejects anything that is not
    /// `positive-int:positive-int` so a non-finite value can never leak
    /// into a node spec.
    pub fn aspect_ratio(&self) -> Result<f64> {
        let malformed = || StoryboardError::MalformedRatio(self.ratio.clone());

        let mut parts = self.ratio.split(':');
        let width: u64 = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .ok_or_else(malformed)?;
        let height: u64 = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .ok_or_else(malformed)?;

        if parts.next().is_some() || width == 0 || height == 0 {
            return Err(malformed());
        }

        Ok(width as f64 / height as f64)
    }
}

/// One storyboard run's worth of input, owned by the caller.
#[derive(Debug, Clone)]
pub struct StoryboardRequest {
    pub base_prompt: String,
    pub anchor: Position,
    pub params: GenerationParams,
    pub reference_image: Option<ReferenceImage>,
}

impl StoryboardRequest {
    pub fn new(base_prompt: impl Into<String>, anchor: Position, params: GenerationParams) -> Self {
        StoryboardRequest {
            base_prompt: base_prompt.into(),
            anchor,
            params,
            reference_image: None,
        }
    }

    pub fn with_reference_image(mut self, image: ReferenceImage) -> Self {
        self.reference_image = Some(image);
        self
    }
}
