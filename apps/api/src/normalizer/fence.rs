//! Decoder for JSON embedded in model output.
//!
//! States: `Raw` (model text as received) → `FenceStripped` (code fence and
//! language tag removed) → parsed `serde_json::Value`.

use serde_json::Value;

const FENCE: &str = "```";
const LANGUAGE_TAG: &str = "json";

/// Model output exactly as received.
#[derive(Debug, Clone, Copy)]
pub struct Raw<'a>(&'a str);

/// Model output with any surrounding code fence removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FenceStripped<'a>(&'a str);

impl<'a> Raw<'a> {
    pub fn new(text: &'a str) -> Self {
        Self(text)
    }

    /// Removes a leading fence (with an optional `json` tag, any case) and a
    /// trailing fence. Text without a leading fence is only trimmed.
    pub fn strip_fence(self) -> FenceStripped<'a> {
        let text = self.0.trim();
        let Some(inner) = text.strip_prefix(FENCE) else {
            return FenceStripped(text);
        };
        let inner = inner.trim_start_matches('`');
        let inner = strip_language_tag(inner);
        let inner = inner.trim_end();
        let inner = inner.strip_suffix(FENCE).unwrap_or(inner);
        FenceStripped(inner.trim_end_matches('`').trim())
    }
}

impl<'a> FenceStripped<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    pub fn parse(self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(self.0)
    }

    /// Parses one or more whitespace-separated JSON values, e.g. an array
    /// followed by a trailing summary object.
    pub fn parse_stream(self) -> Result<Vec<Value>, serde_json::Error> {
        serde_json::Deserializer::from_str(self.0)
            .into_iter::<Value>()
            .collect()
    }
}

fn strip_language_tag(text: &str) -> &str {
    match text.get(..LANGUAGE_TAG.len()) {
        Some(tag) if tag.eq_ignore_ascii_case(LANGUAGE_TAG) => &text[LANGUAGE_TAG.len()..],
        _ => text,
    }
}
