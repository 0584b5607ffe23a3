//! Storyboard generation pipeline for a node-canvas content tool.
//!
//! Given a base prompt (optionally with a reference image), the pipeline
//! produces exactly four visually continuous keyframe node specs: it composes
//! a continuity-constrained analysis instruction, awaits an injected
//! text-generation capability, extracts four keyframes through a tiered
//! fallback chain, and lays the resulting nodes out on a 2x2 canvas grid.
//! A run never fails outright; the worst case is deterministic fallback text.

pub mod config;
pub mod error;
pub mod generation;
pub mod logger;
pub mod models;
pub mod storyboard;

pub use config::StoryboardConfig;
pub use error::{Result, StoryboardError};
#[cfg(any(test, feature = "test-utils"))]
pub use generation::MockTextGenerator;
pub use generation::TextGenerator;
pub use models::*;
pub use storyboard::{
    link_sequence, parse_keyframes, ParseTier, ParsedKeyframes, StoryboardPipeline,
};
