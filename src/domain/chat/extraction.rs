//! Structured-data extraction from coach replies.
//!
//! The provider is instructed by prompt convention to append a fenced
//! ```json block to its reply when it has enough material, but nothing
//! enforces that. Extraction therefore tolerates absence and malformation:
//! a miss is a normal outcome, never an error.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::card::Formula;

/// Opening marker of a machine-readable data block.
const FENCE_OPEN: &str = "```json";
/// Closing marker of a fenced block.
const FENCE_CLOSE: &str = "```";

/// A completed joy formula recovered from a coach reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompletedFormula {
    /// The five-field formula as the model structured it.
    pub formula: Formula,
    /// One-sentence summary for the card.
    #[serde(default, rename = "card_summary")]
    pub summary: Option<String>,
}

/// Scans a reply for a data object carrying `required_key` and returns the
/// value under that key.
///
/// Two passes:
/// 1. The first ```json fenced block, parsed as JSON.
/// 2. If that yields nothing usable, the region from the first `{` to the
///    last `}` of the raw text, provided it mentions `"required_key"`.
///
/// Both passes hand the candidate span to serde_json; there is no manual
/// bracket counting, so braces inside string values cannot derail matching.
/// Returns `None` on absence or malformation.
pub fn extract(raw: &str, required_key: &str) -> Option<Value> {
    let mut object = find_tagged_object(raw, required_key)?;
    object
        .as_object_mut()
        .and_then(|map| map.remove(required_key))
}

/// Like [`extract`], but returns the whole parsed object containing
/// `required_key` so callers can inspect sibling fields.
pub fn find_tagged_object(raw: &str, required_key: &str) -> Option<Value> {
    if let Some(object) = parse_fenced_block(raw, required_key) {
        return Some(object);
    }
    parse_brace_region(raw, required_key)
}

/// Extracts an array under `required_key`, tolerating a missing block.
pub fn extract_array(raw: &str, required_key: &str) -> Vec<Value> {
    match extract(raw, required_key) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            tracing::warn!(key = required_key, "extracted value is not an array");
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Tests a coach reply for a completed formula.
///
/// The reply must carry a data object that declares `"stage": "complete"`
/// and contains a `"formula"` object. No minimum number of populated
/// formula fields is enforced here: informational sufficiency is the
/// model's call, and this check only detects the signal.
pub fn extract_formula(raw: &str) -> Option<CompletedFormula> {
    let object = find_tagged_object(raw, "formula")?;
    if object.get("stage").and_then(Value::as_str) != Some("complete") {
        return None;
    }
    serde_json::from_value(object).ok()
}

/// First pass: the first ```json fenced block in the reply.
///
/// Only the first fence is considered; later blocks are ignored.
fn parse_fenced_block(raw: &str, required_key: &str) -> Option<Value> {
    let start = raw.find(FENCE_OPEN)? + FENCE_OPEN.len();
    let rest = &raw[start..];
    let end = rest.find(FENCE_CLOSE)?;
    parse_object_with_key(rest[..end].trim(), required_key)
}

/// Second pass: the widest brace-delimited region of the raw text, accepted
/// only when it mentions the required key.
///
/// Handles models that skip the fence but still emit parseable JSON inline.
fn parse_brace_region(raw: &str, required_key: &str) -> Option<Value> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    let span = &raw[start..=end];
    if !span.contains(&format!("\"{}\"", required_key)) {
        return None;
    }
    parse_object_with_key(span, required_key)
}

fn parse_object_with_key(candidate: &str, required_key: &str) -> Option<Value> {
    let value: Value = serde_json::from_str(candidate).ok()?;
    if value.get(required_key).is_some() {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const COMPLETE_REPLY: &str = r#"Love it - I think I found your joy formula here!

```json
{"stage":"complete","formula":{"scene":"a","people":"b","event":"c","trigger":"d","sensation":"e"},"card_summary":"a tiny happy moment"}
```"#;

    #[test]
    fn extracts_formula_from_fenced_block() {
        let completed = extract_formula(COMPLETE_REPLY).unwrap();
        assert_eq!(completed.formula.scene.as_deref(), Some("a"));
        assert_eq!(completed.formula.people.as_deref(), Some("b"));
        assert_eq!(completed.formula.event.as_deref(), Some("c"));
        assert_eq!(completed.formula.trigger.as_deref(), Some("d"));
        assert_eq!(completed.formula.sensation.as_deref(), Some("e"));
        assert_eq!(completed.summary.as_deref(), Some("a tiny happy moment"));
    }

    #[test]
    fn extracts_formula_without_fence() {
        let reply = r#"Here it is: {"stage":"complete","formula":{"scene":"a","people":"b","event":"c","trigger":"d","sensation":"e"}} done"#;
        let completed = extract_formula(reply).unwrap();
        assert_eq!(completed.formula.scene.as_deref(), Some("a"));
    }

    #[test]
    fn fenced_and_unfenced_agree() {
        let unfenced = r#"{"stage":"complete","formula":{"scene":"a","people":"b","event":"c","trigger":"d","sensation":"e"},"card_summary":"a tiny happy moment"}"#;
        assert_eq!(extract_formula(COMPLETE_REPLY), extract_formula(unfenced));
    }

    #[test]
    fn partial_stage_is_absent() {
        let reply = r#"```json
{"stage":"partial","formula":{"scene":"a"}}
```"#;
        assert!(extract_formula(reply).is_none());
    }

    #[test]
    fn missing_stage_is_absent() {
        let reply = r#"```json
{"formula":{"scene":"a"}}
```"#;
        assert!(extract_formula(reply).is_none());
    }

    #[test]
    fn plain_prose_is_absent() {
        assert!(extract_formula("that sounds lovely! who were you with?").is_none());
        assert!(extract("no data here", "insights").is_none());
    }

    #[test]
    fn trailing_comma_is_absent_not_panic() {
        let reply = r#"```json
{"stage":"complete","formula":{"scene":"a",},}
```"#;
        assert!(extract_formula(reply).is_none());
    }

    #[test]
    fn truncated_block_is_absent() {
        let reply = r#"```json
{"stage":"complete","formula":{"scene":"a""#;
        assert!(extract_formula(reply).is_none());
    }

    #[test]
    fn only_first_fence_is_considered() {
        let reply = r#"```json
{"stage":"partial","formula":{}}
```
```json
{"stage":"complete","formula":{"scene":"second"}}
```"#;
        // The first fence parses but declares partial, so no completion.
        assert!(extract_formula(reply).is_none());
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_fallback() {
        let reply = r#"note: {"insights":[{"insight":"loves {cozy} corners and } brackets"}]}"#;
        let value = extract(reply, "insights").unwrap();
        assert_eq!(
            value[0]["insight"],
            json!("loves {cozy} corners and } brackets")
        );
    }

    #[test]
    fn extract_returns_value_under_key() {
        let reply = r#"```json
{"recommendations":[{"title":"walk"}]}
```"#;
        let value = extract(reply, "recommendations").unwrap();
        assert_eq!(value[0]["title"], json!("walk"));
    }

    #[test]
    fn extract_requires_named_key() {
        let reply = r#"```json
{"other":[1,2,3]}
```"#;
        assert!(extract(reply, "recommendations").is_none());
    }

    #[test]
    fn extract_array_tolerates_missing_block() {
        assert!(extract_array("nothing structured", "insights").is_empty());
    }

    #[test]
    fn extract_array_tolerates_wrong_shape() {
        let reply = r#"```json
{"insights":"not an array"}
```"#;
        assert!(extract_array(reply, "insights").is_empty());
    }

    #[test]
    fn malformed_fence_falls_back_to_brace_region() {
        let reply = r#"```json
not even json
```
but later: {"insights":[{"insight":"x"}]}"#;
        let items = extract_array(reply, "insights");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn extraction_is_deterministic_for_fixed_reply() {
        let first = extract_formula(COMPLETE_REPLY);
        for _ in 0..10 {
            assert_eq!(extract_formula(COMPLETE_REPLY), first);
        }
    }

    proptest! {
        #[test]
        fn never_panics_on_arbitrary_text(raw in ".{0,400}") {
            let _ = extract_formula(&raw);
            let _ = extract(&raw, "insights");
        }

        #[test]
        fn deterministic_on_arbitrary_text(raw in ".{0,400}") {
            prop_assert_eq!(extract(&raw, "formula"), extract(&raw, "formula"));
        }
    }
}
