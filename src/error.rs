use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoryboardError {
    #[error("Model call failed: {0}")]
    ModelCall(String),
    #[error("Model returned an empty response")]
    EmptyResponse,
    #[error("Malformed ratio '{0}', expected 'W:H' with positive integers")]
    MalformedRatio(String),
}

pub type Result<T> = std::result::Result<T, StoryboardError>;
