use crate::config::StoryboardConfig;

/// Builds the analysis instruction sent to the text-generation capability.
/// The output-format section is a contract: the parser's tagged tier depends
/// on the `KF{n}/4` headers and the labeled fields below staying exactly as
/// written here.
pub fn build_instruction(base_prompt: &str, config: &StoryboardConfig) -> String {
    let closing_beat = if config.loopable {
        "Resolution - the closing beat; make it visually echo keyframe 1 so the sequence can loop."
    } else {
        "Resolution - the closing beat of the sequence."
    };

    format!(
        r#"Analyze the attached reference image together with the creative brief below, then write exactly 4 keyframe descriptions for one visually continuous mini-sequence.

Creative brief: {base_prompt}

Continuity rules, applying to all 4 keyframes:
- Keep the same subject identity, wardrobe, environment, lighting, and color grade throughout.
- Only pose, expression, framing, camera angle, and occlusion may change between keyframes.

Narrative arc:
1. Initial state - establish the subject and setting.
2. Development - the action or situation evolves.
3. Climax/turn - the peak or pivot of the sequence.
4. {closing_beat}

Output format. Repeat this exact template once per keyframe, with headers [KF1/4], [KF2/4], [KF3/4], [KF4/4] in order, and nothing outside the templates:

[KF1/4 | <shot type> | <timepoint>]
Visual description: <what the frame shows>
Composition parameters: <framing, camera angle, lens>
Continuity notes: <what carries over from the previous keyframe>"#
    )
}
