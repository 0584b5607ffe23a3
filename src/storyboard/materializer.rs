use crate::config::StoryboardConfig;
use crate::models::{
    NodeKind, NodeRequest, Position, StoryboardNodeSpec, StoryboardRequest, KEYFRAME_COUNT,
};

pub const SOURCE_PORT: &str = "output";
pub const TARGET_PORT: &str = "input";

/// Fixed 2x2 tile layout from a single anchor, independent of node content.
pub fn grid_positions(
    anchor: Position,
    config: &StoryboardConfig,
) -> [Position; KEYFRAME_COUNT] {
    let mut positions = [anchor; KEYFRAME_COUNT];
    for (i, position) in positions.iter_mut().enumerate() {
        *position = anchor.offset(
            (i % 2) as f64 * config.grid_dx,
            (i / 2) as f64 * config.grid_dy,
        );
    }
    positions
}

/// Turns four keyframe strings into four node-creation requests and hands
/// them to the callback synchronously, in index order. The aspect ratio is
/// computed once per run and shared by all four specs; a malformed ratio is
/// logged and replaced with 1.0.
pub fn materialize<F>(
    frames: [String; KEYFRAME_COUNT],
    request: &StoryboardRequest,
    config: &StoryboardConfig,
    mut create_node: F,
) where
    F: FnMut(NodeRequest),
{
    let aspect_ratio = match request.params.aspect_ratio() {
        Ok(aspect) => aspect,
        Err(e) => {
            log::warn!("⚠️  {}, using 1.0 instead", e);
            1.0
        }
    };

    let positions = grid_positions(request.anchor, config);

    for (i, (frame, position)) in frames.into_iter().zip(positions).enumerate() {
        let spec = StoryboardNodeSpec {
            prompt: frame,
            model: request.params.model.clone(),
            ratio: request.params.ratio.clone(),
            aspect_ratio,
            batch_size: request.params.batch_size,
            is_storyboard: true,
            storyboard_index: (i + 1) as u8,
            storyboard_base_prompt: request.base_prompt.clone(),
            reference_image: request.reference_image.clone(),
        };

        create_node(NodeRequest {
            kind: NodeKind::Image,
            x: position.x,
            y: position.y,
            edge_hint: None,
            data: spec,
        });
    }
}

/// Chains the given node ids in order, invoking the connection callback
/// `len - 1` times as `(source, "output", target, "input")`.
pub fn link_sequence<F>(node_ids: &[String], mut connect: F)
where
    F: FnMut(&str, &str, &str, &str),
{
    for pair in node_ids.windows(2) {
        connect(&pair[0], SOURCE_PORT, &pair[1], TARGET_PORT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{beat_keyframes, GenerationParams};

    fn sample_request(ratio: &str) -> StoryboardRequest {
        StoryboardRequest::new(
            "a lantern at dusk",
            Position::new(40.0, 60.0),
            GenerationParams::new("flux-schnell", ratio, 2),
        )
    }

    #[test]
    fn test_grid_positions_form_two_by_two_layout() {
        let config = StoryboardConfig::default();
        let positions = grid_positions(Position::new(40.0, 60.0), &config);
        assert_eq!(
            positions,
            [
                Position::new(40.0, 60.0),
                Position::new(360.0, 60.0),
                Position::new(40.0, 300.0),
                Position::new(360.0, 300.0),
            ]
        );
    }

    #[test]
    fn test_materialize_emits_four_nodes_in_index_order() {
        let config = StoryboardConfig::default();
        let request = sample_request("16:9");
        let mut nodes = Vec::new();

        materialize(
            beat_keyframes(&request.base_prompt),
            &request,
            &config,
            |node| nodes.push(node),
        );

        assert_eq!(nodes.len(), KEYFRAME_COUNT);
        for (i, node) in nodes.iter().enumerate() {
            assert_eq!(node.kind, NodeKind::Image);
            assert_eq!(node.data.storyboard_index, (i + 1) as u8);
            assert!(node.data.is_storyboard);
            assert_eq!(node.data.storyboard_base_prompt, "a lantern at dusk");
            assert_eq!(node.data.batch_size, 2);
            assert!(node.edge_hint.is_none());
        }
        assert_eq!((nodes[1].x, nodes[1].y), (360.0, 60.0));
        assert_eq!((nodes[2].x, nodes[2].y), (40.0, 300.0));
    }

    #[test]
    fn test_aspect_ratio_shared_across_all_specs() {
        let config = StoryboardConfig::default();
        let request = sample_request("16:9");
        let mut nodes = Vec::new();

        materialize(
            beat_keyframes(&request.base_prompt),
            &request,
            &config,
            |node| nodes.push(node),
        );

        let expected = 16.0 / 9.0;
        for node in &nodes {
            assert!((node.data.aspect_ratio - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_malformed_ratio_falls_back_to_one() {
        let config = StoryboardConfig::default();
        let request = sample_request("not-a-ratio");
        let mut nodes = Vec::new();

        materialize(
            beat_keyframes(&request.base_prompt),
            &request,
            &config,
            |node| nodes.push(node),
        );

        assert_eq!(nodes.len(), KEYFRAME_COUNT);
        for node in &nodes {
            assert_eq!(node.data.aspect_ratio, 1.0);
            assert_eq!(node.data.ratio, "not-a-ratio");
        }
    }

    #[test]
    fn test_link_sequence_chains_in_order() {
        let ids: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let mut links = Vec::new();

        link_sequence(&ids, |source, source_port, target, target_port| {
            links.push((
                source.to_string(),
                source_port.to_string(),
                target.to_string(),
                target_port.to_string(),
            ));
        });

        assert_eq!(links.len(), 3);
        assert_eq!(
            links[0],
            (
                "a".to_string(),
                "output".to_string(),
                "b".to_string(),
                "input".to_string()
            )
        );
        assert_eq!(links[2].0, "c");
        assert_eq!(links[2].2, "d");
    }

    #[test]
    fn test_link_sequence_with_single_id_is_noop() {
        let ids = vec!["only".to_string()];
        let mut calls = 0;
        link_sequence(&ids, |_, _, _, _| calls += 1);
        assert_eq!(calls, 0);
    }
}
