//! Tool-result formatting with a hard size ceiling.
//!
//! Unbounded upstream responses would otherwise land verbatim in the calling
//! agent's context window. Truncated output is informational text only; once
//! truncation kicks in, the result is no longer guaranteed to be parseable
//! JSON.

use serde_json::Value;

/// Maximum characters in any formatted tool result.
pub const MAX_RESPONSE_CHARS: usize = 800_000;

/// Format a tool result for the text content of a `CallToolResult`.
#[must_use]
pub fn format_result_text(result: &Value) -> String {
    format_with_limit(result, MAX_RESPONSE_CHARS)
}

fn format_with_limit(result: &Value, limit: usize) -> String {
    if let Value::String(s) = result {
        if s.chars().count() <= limit {
            return s.clone();
        }
        return format!(
            "{}\n...[truncated - response exceeded {limit} characters. Use 'fields', 'take', or filters to narrow results.]",
            truncate_chars(s, limit)
        );
    }

    let json = serde_json::to_string(result).unwrap_or_else(|_| result.to_string());
    if json.chars().count() <= limit {
        return json;
    }

    if let Value::Array(items) = result
        && items.len() > 1
    {
        // Average-item-size estimate: best effort for non-uniform items, and
        // never worse than one extra trailing item past the budget.
        let total = items.len();
        let avg = (json.chars().count() / total).max(1);
        let fit = (limit / avg).clamp(1, total);
        let shown = &items[..fit];
        let serialized =
            serde_json::to_string(shown).unwrap_or_else(|_| "[]".to_string());
        return format!(
            "{serialized}\n...[{fit} of {total} records shown. Use 'take', 'skip', 'fields', or filters to narrow results.]"
        );
    }

    format!(
        "{}\n...[truncated - response exceeded {limit} characters. Use 'fields' or filters to narrow results.]",
        truncate_chars(&json, limit)
    )
}

/// Char-safe prefix of at most `max` characters.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
