pub mod composer;
pub mod materializer;
pub mod parser;

use crate::config::StoryboardConfig;
use crate::error::StoryboardError;
use crate::generation::TextGenerator;
use crate::logger;
use crate::models::{beat_keyframes, NodeRequest, StoryboardRequest};
use uuid::Uuid;

pub use materializer::{grid_positions, link_sequence, materialize};
pub use parser::{parse_keyframes, ParseTier, ParsedKeyframes};

#[derive(Debug, Clone, Copy)]
enum RunPhase {
    Composing,
    AwaitingModel,
    Parsing,
    Materialized,
    FallbackMaterialized,
}

/// Orchestrates one storyboard run: prompt composition, the single model
/// call, tiered parsing, and node materialization. Stateless between runs.
pub struct StoryboardPipeline {
    config: StoryboardConfig,
}

impl StoryboardPipeline {
    pub fn new(config: StoryboardConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(StoryboardConfig::default())
    }

    pub fn config(&self) -> &StoryboardConfig {
        &self.config
    }

    /// Image-guided run. Awaits the text-generation capability once; any
    /// failure (capability error, blank response, missing reference image)
    /// is logged and silently recovered through the no-image fallback. The
    /// caller always receives four nodes. Returns `true` only when the
    /// model-guided path completed.
    pub async fn run_with_image<G, F>(
        &self,
        request: &StoryboardRequest,
        generator: &G,
        mut create_node: F,
    ) -> bool
    where
        G: TextGenerator + ?Sized,
        F: FnMut(NodeRequest),
    {
        let run_id = Uuid::new_v4();

        if request.reference_image.is_none() {
            log::warn!(
                "[run {}] Image-guided storyboard requested without a reference image",
                run_id
            );
            self.materialize_fallback(run_id, request, &mut create_node);
            return false;
        }

        log::debug!("[run {}] phase: {:?}", run_id, RunPhase::Composing);
        let instruction = composer::build_instruction(&request.base_prompt, &self.config);

        log::debug!("[run {}] phase: {:?}", run_id, RunPhase::AwaitingModel);
        let response = {
            let _timer = logger::timer("storyboard model call");
            generator.generate(&instruction).await
        };

        let text = match response {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                log::error!("[run {}] {}", run_id, StoryboardError::EmptyResponse);
                self.materialize_fallback(run_id, request, &mut create_node);
                return false;
            }
            Err(e) => {
                log::error!("[run {}] {}", run_id, e);
                self.materialize_fallback(run_id, request, &mut create_node);
                return false;
            }
        };

        log::debug!("[run {}] phase: {:?}", run_id, RunPhase::Parsing);
        let parsed = parser::parse_keyframes(&text);
        log::info!(
            "[run {}] Extracted 4 keyframes via {:?} tier",
            run_id,
            parsed.tier()
        );

        materializer::materialize(
            parsed.into_frames(),
            request,
            &self.config,
            &mut create_node,
        );
        log::debug!("[run {}] phase: {:?}", run_id, RunPhase::Materialized);
        true
    }

    /// No-image run: no model call, deterministic per-beat keyframes. Cannot
    /// fail.
    pub fn run_without_image<F>(&self, request: &StoryboardRequest, mut create_node: F)
    where
        F: FnMut(NodeRequest),
    {
        let run_id = Uuid::new_v4();
        log::info!(
            "[run {}] Generating beat keyframes for '{}'",
            run_id,
            request.base_prompt
        );
        materializer::materialize(
            beat_keyframes(&request.base_prompt),
            request,
            &self.config,
            &mut create_node,
        );
        log::debug!("[run {}] phase: {:?}", run_id, RunPhase::Materialized);
    }

    fn materialize_fallback<F>(
        &self,
        run_id: Uuid,
        request: &StoryboardRequest,
        create_node: &mut F,
    ) where
        F: FnMut(NodeRequest),
    {
        log::info!("[run {}] Falling back to beat keyframes", run_id);
        materializer::materialize(
            beat_keyframes(&request.base_prompt),
            request,
            &self.config,
            create_node,
        );
        log::debug!(
            "[run {}] phase: {:?}",
            run_id,
            RunPhase::FallbackMaterialized
        );
    }
}
