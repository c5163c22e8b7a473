//! Turning raw model text into typed values.
//!
//! Models routinely wrap JSON in markdown fences even when told not to, so
//! the fence is stripped before parsing. Nothing here trusts the text: every
//! failure becomes [`CoreError::MalformedOutput`].

use serde::de::DeserializeOwned;

use crate::error::CoreError;
use crate::layout::LayoutDecision;
use crate::placement::AssetPlacement;

const FENCE: &str = "```";

/// Remove a surrounding markdown code fence and whitespace.
///
/// Handles an optional language tag on the opening fence (```` ```json ````)
/// and tolerates a missing closing fence.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        // Drop the language tag, if any, up to the end of the opening line.
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_' && c != '-')
            .unwrap_or(rest.len());
        text = &rest[tag_len..];
    }
    if let Some(rest) = text.trim_end().strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}

fn parse_json<T: DeserializeOwned>(raw: &str, what: &str) -> Result<T, CoreError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(CoreError::MalformedOutput(format!("{what}: empty response")));
    }
    serde_json::from_str(body).map_err(|e| CoreError::MalformedOutput(format!("{what}: {e}")))
}

/// Decode the selection call's answer.
pub fn parse_layout_decision(raw: &str) -> Result<LayoutDecision, CoreError> {
    parse_json(raw, "layout decision")
}

/// Decode the arrangement call's answer into placements.
///
/// Only the shape is checked here; see [`crate::arrangement::verify`] for
/// the invariants against the original request.
pub fn parse_placements(raw: &str) -> Result<Vec<AssetPlacement>, CoreError> {
    parse_json(raw, "arrangement")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::layout::LayoutId;

    const PLAIN: &str = r#"{"layoutId":"Calm","explanation":"Quiet."}"#;

    #[test]
    fn strips_fence_with_language_tag() {
        let fenced = format!("```json\n{PLAIN}\n```");
        assert_eq!(strip_code_fence(&fenced), PLAIN);
    }

    #[test]
    fn strips_fence_without_language_tag() {
        let fenced = format!("```\n{PLAIN}\n```");
        assert_eq!(strip_code_fence(&fenced), PLAIN);
    }

    #[test]
    fn strips_surrounding_whitespace_and_unclosed_fence() {
        let fenced = format!("  \n```json\n{PLAIN}  \n");
        assert_eq!(strip_code_fence(&fenced), PLAIN);
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fence(PLAIN), PLAIN);
    }

    #[test]
    fn fenced_and_plain_decode_identically() {
        let plain = parse_layout_decision(PLAIN).unwrap();
        for fenced in [
            format!("```json\n{PLAIN}\n```"),
            format!("```\n{PLAIN}\n```"),
            format!("```JSON {PLAIN}```"),
        ] {
            assert_eq!(parse_layout_decision(&fenced).unwrap(), plain);
        }
        assert_eq!(plain.layout_id, LayoutId::Calm);
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_layout_decision("Sure! I pick Calm.").unwrap_err();
        assert_matches!(err, CoreError::MalformedOutput(_));
    }

    #[test]
    fn missing_explanation_is_malformed() {
        let err = parse_layout_decision(r#"{"layoutId":"Calm"}"#).unwrap_err();
        assert_matches!(err, CoreError::MalformedOutput(msg) if msg.contains("explanation"));
    }

    #[test]
    fn non_string_explanation_is_malformed() {
        let err = parse_layout_decision(r#"{"layoutId":"Calm","explanation":7}"#).unwrap_err();
        assert_matches!(err, CoreError::MalformedOutput(_));
    }

    #[test]
    fn unknown_layout_is_malformed() {
        let err = parse_layout_decision(r#"{"layoutId":"Cozy","explanation":"x"}"#).unwrap_err();
        assert_matches!(err, CoreError::MalformedOutput(_));
    }

    #[test]
    fn empty_fence_is_malformed() {
        let err = parse_layout_decision("```json\n```").unwrap_err();
        assert_matches!(err, CoreError::MalformedOutput(msg) if msg.contains("empty"));
    }

    #[test]
    fn placements_parse_from_fenced_array() {
        let raw = "```json\n[{\"asset_id\":\"desk\",\"position\":[0,0,0],\"rotation\":[0,0,0],\"scale\":null}]\n```";
        let placements = parse_placements(raw).unwrap();
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].asset_id, "desk");
    }

    #[test]
    fn placements_require_top_level_array() {
        let err = parse_placements(r#"{"arrange":[]}"#).unwrap_err();
        assert_matches!(err, CoreError::MalformedOutput(_));
    }

    #[test]
    fn placement_missing_rotation_is_malformed() {
        let err = parse_placements(r#"[{"asset_id":"desk","position":[0,0,0]}]"#).unwrap_err();
        assert_matches!(err, CoreError::MalformedOutput(msg) if msg.contains("rotation"));
    }
}
