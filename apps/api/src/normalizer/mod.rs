//! Response Normalizer: turns raw model text into one well-formed shape.
//!
//! Callers always get exactly one of `Structured`, `PlainText` or `Error`;
//! never an unvalidated string posing as JSON. Agents then apply their own
//! failure policy (zero-valued result or `{error, raw}`).

pub mod fence;
pub mod lenient;

use serde::de::DeserializeOwned;
use serde_json::Value;

use fence::Raw;

pub const PARSE_FAILED: &str = "Failed to parse";

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedResponse {
    Structured(Value),
    PlainText(String),
    Error { reason: String, raw: String },
}

/// Parse failure with the model's raw output kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    pub reason: String,
    pub raw: String,
}

impl ParseFailure {
    pub(crate) fn new(raw: &str) -> Self {
        Self {
            reason: PARSE_FAILED.to_string(),
            raw: raw.to_string(),
        }
    }
}

pub fn normalize(raw: &str, expect_json: bool) -> NormalizedResponse {
    if !expect_json {
        return NormalizedResponse::PlainText(raw.trim().to_string());
    }
    match Raw::new(raw).strip_fence().parse() {
        Ok(value) => NormalizedResponse::Structured(value),
        Err(_) => NormalizedResponse::Error {
            reason: PARSE_FAILED.to_string(),
            raw: raw.to_string(),
        },
    }
}

impl NormalizedResponse {
    /// Text view for agents that answer in prose.
    pub fn into_text(self) -> Result<String, ParseFailure> {
        match self {
            NormalizedResponse::PlainText(text) => Ok(text),
            NormalizedResponse::Structured(value) => Ok(value.to_string()),
            NormalizedResponse::Error { reason, raw } => Err(ParseFailure { reason, raw }),
        }
    }

    /// Shallow schema check: the value must have the shape of `T`
    /// (object vs array); missing scalar fields are zero-filled by `T`'s serde defaults.
    pub fn into_schema<T: DeserializeOwned>(self) -> Result<T, ParseFailure> {
        match self {
            NormalizedResponse::Structured(value) => {
                let raw = value.to_string();
                serde_json::from_value(value).map_err(|_| ParseFailure::new(&raw))
            }
            NormalizedResponse::PlainText(text) => Err(ParseFailure::new(&text)),
            NormalizedResponse::Error { reason, raw } => Err(ParseFailure { reason, raw }),
        }
    }
}

/// `normalize(raw, true)` followed by the shallow schema check for `T`.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, ParseFailure> {
    normalize(raw, true)
        .into_schema()
        .map_err(|failure| ParseFailure {
            raw: raw.to_string(),
            ..failure
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Item {
        #[serde(deserialize_with = "lenient::string")]
        title: String,
        #[serde(deserialize_with = "lenient::number")]
        rate: f64,
    }

    #[test]
    fn test_plain_text_is_trimmed_not_parsed() {
        assert_eq!(
            normalize("  {\"looks\": \"like json\"}\n", false),
            NormalizedResponse::PlainText("{\"looks\": \"like json\"}".to_string())
        );
    }

    #[test]
    fn test_fenced_and_unwrapped_payloads_normalize_identically() {
        let payload = r#"[{"title": "Rust dev", "rate": 40}, {"title": "Designer", "rate": 25}]"#;
        let fenced = format!("```json\n{payload}\n```");
        assert_eq!(normalize(&fenced, true), normalize(payload, true));
        assert_eq!(
            normalize(payload, true),
            NormalizedResponse::Structured(json!([
                {"title": "Rust dev", "rate": 40},
                {"title": "Designer", "rate": 25}
            ]))
        );
    }

    #[test]
    fn test_malformed_json_is_an_error_with_raw_attached() {
        assert_eq!(
            normalize("not json {{{", true),
            NormalizedResponse::Error {
                reason: PARSE_FAILED.to_string(),
                raw: "not json {{{".to_string()
            }
        );
    }

    #[test]
    fn test_decode_fills_missing_scalars() {
        let items: Vec<Item> = decode(r#"[{"title": "Only a title"}]"#).unwrap();
        assert_eq!(
            items,
            vec![Item {
                title: "Only a title".to_string(),
                rate: 0.0
            }]
        );
    }

    #[test]
    fn test_decode_rejects_wrong_top_level_shape() {
        let failure = decode::<Vec<Item>>(r#"{"title": "not a list"}"#).unwrap_err();
        assert_eq!(failure.reason, PARSE_FAILED);
        assert_eq!(failure.raw, r#"{"title": "not a list"}"#);
    }

    #[test]
    fn test_decode_keeps_original_raw_text_on_failure() {
        let failure = decode::<Vec<Item>>("```json\n{oops\n```").unwrap_err();
        assert_eq!(failure.raw, "```json\n{oops\n```");
    }

    #[test]
    fn test_into_text_passes_plain_text_through() {
        assert_eq!(
            normalize("Dear Hiring Manager,", false).into_text(),
            Ok("Dear Hiring Manager,".to_string())
        );
    }
}
