use crate::error::Result;
use async_trait::async_trait;

/// External text-generation capability, injected by the caller. One request,
/// one response, no streaming. Any `Err` is treated uniformly as a fallback
/// trigger by the pipeline, never as a retryable condition.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, instruction: &str) -> Result<String>;
}

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockTextGenerator;

#[cfg(any(test, feature = "test-utils"))]
mod mock {
    use super::TextGenerator;
    use crate::error::{Result, StoryboardError};
    use async_trait::async_trait;

    /// Canned text generator for tests and downstream UI harnesses.
    pub struct MockTextGenerator {
        outcome: std::result::Result<String, String>,
    }

    impl MockTextGenerator {
        /// Always responds with `text`.
        pub fn respond(text: impl Into<String>) -> Self {
            MockTextGenerator {
                outcome: Ok(text.into()),
            }
        }

        /// Always fails with a `ModelCall` error carrying `message`.
        pub fn fail(message: impl Into<String>) -> Self {
            MockTextGenerator {
                outcome: Err(message.into()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for MockTextGenerator {
        async fn generate(&self, _instruction: &str) -> Result<String> {
            match &self.outcome {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(StoryboardError::ModelCall(message.clone())),
            }
        }
    }
}
