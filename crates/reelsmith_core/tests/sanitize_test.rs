//! Tests for model output sanitization.

use reelsmith_core::{SanitizedResult, sanitize, strip_fences};
use serde_json::json;

#[test]
fn test_json_fenced_object_parses() {
    let result = sanitize("```json\n{\"a\":1}\n```");
    assert!(result.is_parsed());
    assert_eq!(result, SanitizedResult::Parsed(json!({"a": 1})));
    assert_eq!(result.diagnostic(), None);
}

#[test]
fn test_untagged_fence_parses() {
    let result = sanitize("```\n[{\"title\": \"Day 1\"}]\n```");
    assert_eq!(result, SanitizedResult::Parsed(json!([{"title": "Day 1"}])));
}

#[test]
fn test_uppercase_tag_and_surrounding_whitespace() {
    let result = sanitize("\n\n   ```JSON\n{\"ok\": true}\n```   \n");
    assert_eq!(result, SanitizedResult::Parsed(json!({"ok": true})));
}

#[test]
fn test_unfenced_json_parses() {
    let result = sanitize("{\"caption\": \"hello\", \"hashtags\": [\"#a\"]}");
    assert_eq!(
        result,
        SanitizedResult::Parsed(json!({"caption": "hello", "hashtags": ["#a"]}))
    );
}

#[test]
fn test_plain_text_falls_back_with_diagnostic() {
    let result = sanitize("not json at all");
    assert!(!result.is_parsed());
    match &result {
        SanitizedResult::Text { text, diagnostic } => {
            assert_eq!(text, "not json at all");
            let diagnostic = diagnostic.as_deref().expect("diagnostic present");
            assert!(!diagnostic.is_empty());
        }
        other => panic!("Expected text fallback, got {:?}", other),
    }
    assert_eq!(result.into_value(), json!("not json at all"));
}

#[test]
fn test_prose_around_json_is_not_recovered() {
    let raw = "Here is your strategy:\n```json\n{\"a\": 1}\n```\nEnjoy!";
    let result = sanitize(raw);
    assert!(!result.is_parsed());
    assert!(result.diagnostic().is_some());
}

#[test]
fn test_truncated_json_is_returned_as_cleaned_text() {
    let result = sanitize("```json\n{\"calendar\": [1, 2,\n```");
    match result {
        SanitizedResult::Text { text, diagnostic } => {
            assert_eq!(text, "{\"calendar\": [1, 2,");
            assert!(diagnostic.is_some());
        }
        other => panic!("Expected text fallback, got {:?}", other),
    }
}

#[test]
fn test_empty_input_is_empty_text_without_diagnostic() {
    assert_eq!(
        sanitize(""),
        SanitizedResult::Text {
            text: String::new(),
            diagnostic: None,
        }
    );
    assert_eq!(
        sanitize("  \n\t "),
        SanitizedResult::Text {
            text: String::new(),
            diagnostic: None,
        }
    );
}

#[test]
fn test_fence_only_output_reports_diagnostic() {
    let result = sanitize("```json\n```");
    match result {
        SanitizedResult::Text { text, diagnostic } => {
            assert!(text.is_empty());
            assert!(diagnostic.is_some());
        }
        other => panic!("Expected text fallback, got {:?}", other),
    }
}

#[test]
fn test_sanitize_is_idempotent_on_clean_json() {
    let first = sanitize("```json\n{\"pillars\": [\"a\", \"b\"], \"n\": 3}\n```");
    let SanitizedResult::Parsed(value) = &first else {
        panic!("Expected parsed output");
    };
    let clean = serde_json::to_string(value).expect("serializable");
    let second = sanitize(&clean);
    assert_eq!(first, second);
}

#[test]
fn test_strip_fences_only_removes_one_layer() {
    assert_eq!(strip_fences("```json\n```inner```\n```"), "```inner```");
    assert_eq!(strip_fences("no fences"), "no fences");
}

#[test]
fn test_parsed_result_serializes_as_value() {
    let parsed = serde_json::to_value(sanitize("[1, 2, 3]")).expect("serializable");
    assert_eq!(parsed, json!([1, 2, 3]));

    let text = serde_json::to_value(sanitize("plain words")).expect("serializable");
    assert_eq!(text, json!("plain words"));
}

#[test]
fn test_single_line_fenced_scalar_is_kept() {
    assert_eq!(sanitize("```42```"), SanitizedResult::Parsed(json!(42)));
    assert_eq!(sanitize("```true```"), SanitizedResult::Parsed(json!(true)));
    assert_eq!(sanitize("```null```"), SanitizedResult::Parsed(json!(null)));
    assert_eq!(sanitize("```\n42\n```"), SanitizedResult::Parsed(json!(42)));
}

#[test]
fn test_tag_followed_by_inline_json() {
    assert_eq!(
        sanitize("```json{\"a\": 1}```"),
        SanitizedResult::Parsed(json!({"a": 1}))
    );
    assert_eq!(
        sanitize("```json [1, 2]```"),
        SanitizedResult::Parsed(json!([1, 2]))
    );
}

#[test]
fn test_bare_word_on_fence_line_is_text() {
    match sanitize("```hello```") {
        SanitizedResult::Text { text, diagnostic } => {
            assert_eq!(text, "hello");
            assert!(diagnostic.is_some());
        }
        other => panic!("Expected text fallback, got {:?}", other),
    }
}
