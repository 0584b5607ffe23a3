use crate::models::{default_keyframes, KEYFRAME_COUNT};
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"KF[1-4]/4").unwrap());

static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)visual\s+description\s*[:：]\s*(.*?)(?:\n\s*(?:composition\s+parameters|continuity\s+notes)\s*[:：]|\z)",
    )
    .unwrap()
});

static PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    Tagged,
    Paragraphs,
    Default,
}

/// Four keyframe strings plus the strategy that produced them.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedKeyframes {
    Tagged([String; KEYFRAME_COUNT]),
    Paragraphs([String; KEYFRAME_COUNT]),
    Default([String; KEYFRAME_COUNT]),
}

impl ParsedKeyframes {
    pub fn tier(&self) -> ParseTier {
        match self {
            ParsedKeyframes::Tagged(_) => ParseTier::Tagged,
            ParsedKeyframes::Paragraphs(_) => ParseTier::Paragraphs,
            ParsedKeyframes::Default(_) => ParseTier::Default,
        }
    }

    pub fn frames(&self) -> &[String; KEYFRAME_COUNT] {
        match self {
            ParsedKeyframes::Tagged(frames)
            | ParsedKeyframes::Paragraphs(frames)
            | ParsedKeyframes::Default(frames) => frames,
        }
    }

    pub fn into_frames(self) -> [String; KEYFRAME_COUNT] {
        match self {
            ParsedKeyframes::Tagged(frames)
            | ParsedKeyframes::Paragraphs(frames)
            | ParsedKeyframes::Default(frames) => frames,
        }
    }
}

type Strategy = fn(&str) -> Option<[String; KEYFRAME_COUNT]>;
type Wrap = fn([String; KEYFRAME_COUNT]) -> ParsedKeyframes;

/// Precedence order of the fallback chain. First strategy to produce four
/// non-empty frames wins; anything else degrades to the fixed defaults.
const STRATEGIES: [(Wrap, Strategy); 2] = [
    (ParsedKeyframes::Tagged, tagged_frames),
    (ParsedKeyframes::Paragraphs, paragraph_frames),
];

/// Total function: any input, including empty or malformed text, yields
/// exactly four trimmed non-empty keyframe strings.
pub fn parse_keyframes(response: &str) -> ParsedKeyframes {
    for (wrap, strategy) in STRATEGIES {
        if let Some(frames) = strategy(response) {
            return wrap(frames);
        }
    }
    ParsedKeyframes::Default(default_keyframes())
}

/// Tier 1: split on `KF{n}/4` header tags. Requires exactly four tags; each
/// segment yields its `Visual description` field, or the whole segment with
/// the header stripped when the field is absent.
fn tagged_frames(response: &str) -> Option<[String; KEYFRAME_COUNT]> {
    let tags: Vec<regex::Match> = TAG_RE.find_iter(response).collect();
    if tags.len() != KEYFRAME_COUNT {
        return None;
    }

    let mut frames = Vec::with_capacity(KEYFRAME_COUNT);
    for (i, tag) in tags.iter().enumerate() {
        let segment_end = tags.get(i + 1).map_or(response.len(), |next| next.start());
        let segment = &response[tag.start()..segment_end];

        let text = description_field(segment)
            .unwrap_or_else(|| strip_header(segment, tag.as_str()));
        if text.is_empty() {
            return None;
        }
        frames.push(text);
    }

    frames.try_into().ok()
}

/// Tier 2: blank-line-delimited paragraphs, first four, trimmed.
fn paragraph_frames(response: &str) -> Option<[String; KEYFRAME_COUNT]> {
    let frames: Vec<String> = PARAGRAPH_RE
        .split(response)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .take(KEYFRAME_COUNT)
        .map(String::from)
        .collect();

    if frames.len() < KEYFRAME_COUNT {
        return None;
    }

    frames.try_into().ok()
}

fn description_field(segment: &str) -> Option<String> {
    DESCRIPTION_RE
        .captures(segment)
        .map(|captures| clean(&captures[1]))
        .filter(|text| !text.is_empty())
}

/// Drop the `KF{n}/4` token and, when the tag sat inside a bracketed header
/// line, the remainder of that header through the closing bracket.
fn strip_header(segment: &str, tag: &str) -> String {
    let rest = &segment[tag.len()..];
    let line_end = rest.find('\n').unwrap_or(rest.len());
    let body = match rest[..line_end].find(']') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    clean(body)
}

/// A segment may end right before the next header's opening bracket; drop it
/// along with surrounding whitespace.
fn clean(text: &str) -> String {
    text.trim().trim_end_matches('[').trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::STORY_BEATS;

    const WELL_FORMED: &str = "\
[KF1/4 | wide shot | t=0s]
Visual description: A paper lantern hangs over a quiet canal at dusk.
Composition parameters: wide establishing shot, eye level, 35mm.
Continuity notes: establishes lantern, canal, dusk light.

[KF2/4 | medium shot | t=2s]
Visual description: The lantern sways as a breeze ripples the water.
Composition parameters: medium shot, slight low angle.
Continuity notes: same lantern, same dusk grade.

[KF3/4 | close-up | t=4s]
Visual description: The flame inside flares, casting amber light on the water.
Composition parameters: close-up, shallow depth of field.
Continuity notes: same flame color, same environment.

[KF4/4 | wide shot | t=6s]
Visual description: The lantern settles, mirrored perfectly in the still canal.
Composition parameters: wide shot matching keyframe 1.
Continuity notes: echoes the opening composition.";

    #[test]
    fn test_tagged_extracts_descriptions_in_order() {
        let parsed = parse_keyframes(WELL_FORMED);
        assert_eq!(parsed.tier(), ParseTier::Tagged);
        let frames = parsed.frames();
        assert_eq!(
            frames[0],
            "A paper lantern hangs over a quiet canal at dusk."
        );
        assert_eq!(
            frames[1],
            "The lantern sways as a breeze ripples the water."
        );
        assert_eq!(
            frames[2],
            "The flame inside flares, casting amber light on the water."
        );
        assert_eq!(
            frames[3],
            "The lantern settles, mirrored perfectly in the still canal."
        );
    }

    #[test]
    fn test_tagged_tolerates_fullwidth_separators_and_case() {
        let response = "\
KF1/4
VISUAL DESCRIPTION： frame one
KF2/4
Visual Description: frame two
KF3/4
visual description： frame three
KF4/4
Visual description: frame four";
        let parsed = parse_keyframes(response);
        assert_eq!(parsed.tier(), ParseTier::Tagged);
        assert_eq!(parsed.frames()[0], "frame one");
        assert_eq!(parsed.frames()[2], "frame three");
    }

    #[test]
    fn test_tagged_segment_without_field_uses_stripped_segment() {
        let response = "\
[KF1/4 | wide | t=0s]
Visual description: described normally.

[KF2/4 | medium | t=2s]
The model forgot the label here, free prose only.

[KF3/4 | close | t=4s]
Visual description: back to the template.

[KF4/4 | wide | t=6s]
Visual description: closing frame.";
        let parsed = parse_keyframes(response);
        assert_eq!(parsed.tier(), ParseTier::Tagged);
        assert_eq!(
            parsed.frames()[1],
            "The model forgot the label here, free prose only."
        );
    }

    #[test]
    fn test_three_tags_fall_through_to_paragraphs() {
        let response = "\
[KF1/4] Visual description: one.

[KF2/4] Visual description: two.

[KF3/4] Visual description: three.

And a closing paragraph without a tag.";
        let parsed = parse_keyframes(response);
        assert_eq!(parsed.tier(), ParseTier::Paragraphs);
        assert_eq!(parsed.frames().len(), KEYFRAME_COUNT);
    }

    #[test]
    fn test_paragraph_fallback_takes_first_four_trimmed() {
        let response =
            "  first paragraph  \n\nsecond paragraph\n\n\nthird paragraph\n\nfourth paragraph\n\nfifth paragraph";
        let parsed = parse_keyframes(response);
        assert_eq!(parsed.tier(), ParseTier::Paragraphs);
        assert_eq!(
            parsed.frames(),
            &[
                "first paragraph".to_string(),
                "second paragraph".to_string(),
                "third paragraph".to_string(),
                "fourth paragraph".to_string(),
            ]
        );
    }

    #[test]
    fn test_too_few_paragraphs_degrade_to_defaults() {
        let parsed = parse_keyframes("only one paragraph here\n\nand a second");
        assert_eq!(parsed.tier(), ParseTier::Default);
        assert_eq!(parsed.frames(), &default_keyframes());
    }

    #[test]
    fn test_empty_response_degrades_to_defaults() {
        let parsed = parse_keyframes("");
        assert_eq!(parsed.tier(), ParseTier::Default);
        for (frame, beat) in parsed.frames().iter().zip(STORY_BEATS) {
            assert_eq!(frame, beat);
        }
    }

    #[test]
    fn test_five_tags_fail_tier_one() {
        let response = "\
I will now produce KF1/4 etc.

[KF1/4] Visual description: one.

[KF2/4] Visual description: two.

[KF3/4] Visual description: three.

[KF4/4] Visual description: four.";
        // Five tag occurrences (one in the preamble), so tier 1 must refuse
        // and the paragraph tier takes over.
        let parsed = parse_keyframes(response);
        assert_eq!(parsed.tier(), ParseTier::Paragraphs);
    }

    #[test]
    fn test_tag_only_response_degrades() {
        let parsed = parse_keyframes("KF1/4 KF2/4 KF3/4 KF4/4");
        assert_eq!(parsed.tier(), ParseTier::Default);
    }

    #[test]
    fn test_any_garbage_yields_four_non_empty_frames() {
        for garbage in [
            "",
            "   \n\t\n  ",
            "KF1/4",
            "�����",
            "Visual description:",
            "a\n\nb\n\nc",
            "[KF1/4][KF2/4][KF3/4][KF4/4]",
        ] {
            let frames = parse_keyframes(garbage).into_frames();
            assert_eq!(frames.len(), KEYFRAME_COUNT);
            for frame in &frames {
                assert!(!frame.trim().is_empty(), "input {:?}", garbage);
            }
        }
    }
}
