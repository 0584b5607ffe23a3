use async_trait::async_trait;
use storygen::{
    link_sequence, GenerationParams, Position, ReferenceImage, StoryboardConfig,
    StoryboardPipeline, StoryboardRequest, TextGenerator,
};

/// Stands in for the UI layer's real model client.
struct CannedGenerator;

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _instruction: &str) -> storygen::Result<String> {
        Ok("\
[KF1/4 | wide shot | t=0s]
Visual description: A paper lantern hangs over a quiet canal at dusk.
Composition parameters: wide establishing shot, eye level.
Continuity notes: establishes lantern, canal, dusk light.

[KF2/4 | medium shot | t=2s]
Visual description: The lantern sways as a breeze ripples the water.
Composition parameters: medium shot, slight low angle.
Continuity notes: same lantern, same dusk grade.

[KF3/4 | close-up | t=4s]
Visual description: The flame inside flares, casting amber light.
Composition parameters: close-up, shallow depth of field.
Continuity notes: same flame color, same environment.

[KF4/4 | wide shot | t=6s]
Visual description: The lantern settles, mirrored in the still canal.
Composition parameters: wide shot matching keyframe 1.
Continuity notes: echoes the opening composition."
            .to_string())
    }
}

struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, _instruction: &str) -> storygen::Result<String> {
        Err(storygen::StoryboardError::ModelCall(
            "simulated outage".to_string(),
        ))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_loaded = dotenv::dotenv().is_ok();

    storygen::logger::init_with_config(
        storygen::logger::LoggerConfig::development()
            .with_level(storygen::logger::LogLevel::Debug),
    )?;

    storygen::logger::log_startup_info("storygen", env!("CARGO_PKG_VERSION"));
    if env_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = StoryboardConfig::from_env();
    storygen::logger::log_config_info(&config);
    let pipeline = StoryboardPipeline::new(config);

    let params = GenerationParams::new("flux-schnell", "16:9", 1);
    let request = StoryboardRequest::new(
        "a lantern drifting down a canal at dusk",
        Position::new(120.0, 80.0),
        params,
    );

    // Run 1: no reference image, deterministic beat keyframes.
    log::info!("🎬 Storyboard without a reference image...");
    let mut nodes = Vec::new();
    pipeline.run_without_image(&request, |node| nodes.push(node));
    for node in &nodes {
        log::info!(
            "🧩 Node {} at ({}, {}): {}",
            node.data.storyboard_index,
            node.x,
            node.y,
            node.data.prompt
        );
    }

    // Run 2: image-guided, model responds with the strict template.
    log::info!("🎬 Image-guided storyboard...");
    let guided_request = request
        .clone()
        .with_reference_image(ReferenceImage::from_bytes("image/png", b"\x89PNG\r\n"));
    let mut guided_nodes = Vec::new();
    let model_guided = pipeline
        .run_with_image(&guided_request, &CannedGenerator, |node| {
            guided_nodes.push(node)
        })
        .await;
    log::info!("✅ Run completed, model guided: {}", model_guided);
    log::info!(
        "📝 First node data as sent to the canvas:\n{}",
        serde_json::to_string_pretty(&guided_nodes[0].data)?
    );

    // Run 3: the capability is down; the run degrades silently.
    log::info!("🎬 Image-guided storyboard with the model offline...");
    let mut fallback_nodes = Vec::new();
    let model_guided = pipeline
        .run_with_image(&guided_request, &OfflineGenerator, |node| {
            fallback_nodes.push(node)
        })
        .await;
    log::info!(
        "✅ Run completed, model guided: {} ({} nodes produced)",
        model_guided,
        fallback_nodes.len()
    );

    // Chain the four nodes the way the canvas would.
    let node_ids: Vec<String> = guided_nodes
        .iter()
        .map(|_| uuid::Uuid::new_v4().to_string())
        .collect();
    link_sequence(&node_ids, |source, source_port, target, target_port| {
        log::info!(
            "🔗 {}.{} -> {}.{}",
            &source[..8],
            source_port,
            &target[..8],
            target_port
        );
    });

    log::info!("🎉 All storyboard runs completed!");
    Ok(())
}
