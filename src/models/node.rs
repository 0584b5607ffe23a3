use crate::models::ReferenceImage;
use serde::{Deserialize, Serialize};

/// Grid offset on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The node types the canvas supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Text,
    Image,
    Video,
    Audio,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Text => "text",
            NodeKind::Image => "image",
            NodeKind::Video => "video",
            NodeKind::Audio => "audio",
        }
    }
}

/// Node payload for one storyboard keyframe. Serialized field names are
/// camelCase because this object crosses into the canvas UI as node data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryboardNodeSpec {
    pub prompt: String,
    pub model: String,
    pub ratio: String,
    pub aspect_ratio: f64,
    pub batch_size: u32,
    pub is_storyboard: bool,
    /// 1-based position of this keyframe in the run.
    pub storyboard_index: u8,
    /// Shared across the run's four siblings for later grouping.
    pub storyboard_base_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<ReferenceImage>,
}

/// One node-creation request handed to the caller's callback. The edge hint
/// slot is reserved by the canvas contract; storyboard nodes never set it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRequest {
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub edge_hint: Option<String>,
    pub data: StoryboardNodeSpec,
}
