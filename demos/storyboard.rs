use async_trait::async_trait;
use storygen::{
    GenerationParams, Position, ReferenceImage, StoryboardPipeline, StoryboardRequest,
    TextGenerator,
};

/// A capability that answers off-template: no KF tags, just prose paragraphs.
/// The paragraph tier of the fallback chain handles it.
struct ProseGenerator;

#[async_trait]
impl TextGenerator for ProseGenerator {
    async fn generate(&self, _instruction: &str) -> storygen::Result<String> {
        Ok("\
A red kite rests on a windless hill, string coiled in the grass.

The wind picks up and the kite lifts, tugging the line taut.

A sudden gust snaps the string and the kite shoots skyward.

Far above the hill, the kite shrinks to a red speck against the clouds."
            .to_string())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    storygen::logger::init_with_config(storygen::logger::LoggerConfig::development())?;

    let pipeline = StoryboardPipeline::with_defaults();
    let request = StoryboardRequest::new(
        "a red kite on a hill",
        Position::new(0.0, 0.0),
        GenerationParams::new("flux-schnell", "4:3", 1),
    )
    .with_reference_image(ReferenceImage::from_data_uri("data:image/png;base64,aGk="));

    let mut nodes = Vec::new();
    let model_guided = pipeline
        .run_with_image(&request, &ProseGenerator, |node| nodes.push(node))
        .await;

    log::info!("Model guided: {}", model_guided);
    for node in &nodes {
        log::info!(
            "Keyframe {} at ({}, {}): {}",
            node.data.storyboard_index,
            node.x,
            node.y,
            node.data.prompt
        );
    }

    Ok(())
}
