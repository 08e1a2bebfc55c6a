// Shared prompt constants and prompt-building utilities.
// Each agent module defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Platform name used in every system instruction.
pub const PLATFORM_NAME: &str = "WorkHive";

/// Rules appended to every prompt that expects structured output.
pub const JSON_ONLY_RULES: &str = "\
- Output must be valid JSON only
- Do NOT include any text outside the JSON
- Do NOT include explanations or apologies";

/// Fills `{slot}` placeholders in a template in a single pass, so slot values
/// are never themselves scanned for placeholders. Unknown `{...}` text is kept.
pub fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let slot = after.find('}').and_then(|close| {
            let name = &after[..close];
            slots
                .iter()
                .find(|(slot_name, _)| *slot_name == name)
                .map(|(_, value)| (*value, close))
        });
        match slot {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
