//! Mutation classification and the read-only gate.
//!
//! Classification is a closed, ordered table of name patterns so the rule
//! stays a single auditable unit. The gate itself is a value constructed at
//! startup and threaded into the registry: no hidden environment reads on
//! the dispatch path.

use serde_json::Value;

/// Environment variable that enables read-only mode process-wide.
pub const READ_ONLY_MODE_ENV_VAR: &str = "JOBBOSS2_READ_ONLY_MODE";

/// The generic pass-through tool. Its mutating-ness depends on the HTTP
/// method supplied at call time, never on the name.
pub const CUSTOM_API_CALL_TOOL: &str = "custom_api_call";

const READ_ONLY_TRUTHY_VALUES: [&str; 4] = ["1", "true", "yes", "on"];

#[derive(Debug, Clone, Copy)]
enum NamePattern {
    Prefix(&'static str),
    Exact(&'static str),
    Contains(&'static str),
}

/// Tool names matching any of these write state. Matched case-insensitively.
const MUTATION_NAME_PATTERNS: [NamePattern; 6] = [
    NamePattern::Prefix("create_"),
    NamePattern::Prefix("update_"),
    NamePattern::Exact("run_report"),
    NamePattern::Contains("authenticate"),
    NamePattern::Contains("_set_"),
    NamePattern::Contains("_reset_"),
];

/// Whether a raw environment value turns read-only mode on.
///
/// Truthy values are `1`, `true`, `yes`, `on` (case-insensitive, surrounding
/// whitespace ignored); absence or anything else leaves mutations permitted.
#[must_use]
pub fn is_read_only_mode_enabled(raw: Option<&str>) -> bool {
    let Some(raw) = raw else {
        return false;
    };
    let normalized = raw.trim().to_ascii_lowercase();
    READ_ONLY_TRUTHY_VALUES.contains(&normalized.as_str())
}

/// Whether a tool name denotes a write operation.
#[must_use]
pub fn is_mutation_tool_name(tool_name: &str) -> bool {
    // custom_api_call is judged by method because GET must stay allowed in
    // read-only mode.
    if tool_name == CUSTOM_API_CALL_TOOL {
        return false;
    }

    let lowered = tool_name.to_ascii_lowercase();
    MUTATION_NAME_PATTERNS.iter().any(|p| match p {
        NamePattern::Prefix(s) => lowered.starts_with(s),
        NamePattern::Exact(s) => lowered == *s,
        NamePattern::Contains(s) => lowered.contains(s),
    })
}

/// Whether an HTTP method denotes a write operation.
///
/// Unknown methods count as non-mutating here; this is only the secondary
/// check behind the explicit method validation done by the client.
#[must_use]
pub fn is_mutating_http_method(method: &str) -> bool {
    matches!(
        method.trim().to_ascii_uppercase().as_str(),
        "POST" | "PUT" | "PATCH" | "DELETE"
    )
}

/// The read-only gate, evaluated once per tool invocation before the
/// handler runs. Blocked calls never reach the upstream API.
#[derive(Debug, Clone, Copy)]
pub struct MutationPolicy {
    read_only: bool,
}

impl MutationPolicy {
    #[must_use]
    pub fn new(read_only: bool) -> Self {
        Self { read_only }
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Reason to block this invocation, or `None` to let it through.
    ///
    /// The reason names the governing environment variable so operators can
    /// self-diagnose from the error text alone.
    #[must_use]
    pub fn block_reason(&self, tool_name: &str, args: &Value) -> Option<String> {
        if !self.read_only {
            return None;
        }

        if tool_name == CUSTOM_API_CALL_TOOL {
            let method = args.get("method").and_then(Value::as_str).unwrap_or("");
            if is_mutating_http_method(method) {
                return Some(format!(
                    "Write operations are disabled by {READ_ONLY_MODE_ENV_VAR} (blocked method: {})",
                    method.trim().to_ascii_uppercase()
                ));
            }
            return None;
        }

        if is_mutation_tool_name(tool_name) {
            return Some(format!(
                "Write operations are disabled by {READ_ONLY_MODE_ENV_VAR} (blocked tool: {tool_name})"
            ));
        }

        None
    }
}
