/// Every storyboard run produces exactly this many keyframes.
pub const KEYFRAME_COUNT: usize = 4;

/// The four narrative beats, in storyboard order.
pub const STORY_BEATS: [&str; KEYFRAME_COUNT] = ["开始", "发展", "高潮", "结尾"];

/// Deterministic per-beat keyframes for the no-image run:
/// `场景{i} - {beat}: {base_prompt}`.
pub fn beat_keyframes(base_prompt: &str) -> [String; KEYFRAME_COUNT] {
    let mut index = 0;
    STORY_BEATS.map(|beat| {
        index += 1;
        format!("场景{} - {}: {}", index, beat, base_prompt)
    })
}

/// Fixed generic keyframes, independent of any prompt. Last resort of the
/// parser's fallback chain.
pub fn default_keyframes() -> [String; KEYFRAME_COUNT] {
    STORY_BEATS.map(String::from)
}
