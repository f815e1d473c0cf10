//! The tool registry.
//!
//! Composes the mutation gate, argument validation, and response formatting
//! around every declared tool. Registration integrity (unique names, schemas
//! that compile) is enforced at startup; a dispatch never throws past the
//! protocol boundary and always yields a well-formed `CallToolResult`.

use crate::format::format_result_text;
use crate::policy::{self, MutationPolicy};
use futures::future::BoxFuture;
use rmcp::model::{CallToolResult, Content, Tool, ToolAnnotations};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

/// Async tool handler. Captures its client; receives the validated
/// arguments object.
pub type ToolHandler =
    Arc<dyn Fn(Value) -> BoxFuture<'static, anyhow::Result<Value>> + Send + Sync>;

/// Short acknowledgement used by mutation tools whose upstream returns no
/// body; takes the call arguments.
pub type SuccessMessage = fn(&Value) -> String;

/// A declared tool: name, description, input schema, handler.
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub handler: ToolHandler,
    pub success_message: Option<SuccessMessage>,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate tool registration detected: {0}")]
    Duplicate(String),
    #[error("Invalid input schema for tool '{name}': {message}")]
    Schema { name: String, message: String },
}

struct RegisteredTool {
    tool: Tool,
    validator: jsonschema::Validator,
    handler: ToolHandler,
    success_message: Option<SuccessMessage>,
}

pub struct ToolRegistry {
    policy: MutationPolicy,
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    #[must_use]
    pub fn new(policy: MutationPolicy) -> Self {
        Self {
            policy,
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register one tool.
    ///
    /// # Errors
    ///
    /// Fails on duplicate names and on input schemas that are not valid JSON
    /// Schema objects. Both are configuration-integrity errors: registration
    /// must abort rather than silently skip a tool.
    pub fn register(&mut self, spec: ToolSpec) -> Result<(), RegistryError> {
        if self.index.contains_key(spec.name) {
            return Err(RegistryError::Duplicate(spec.name.to_string()));
        }

        let schema_obj = spec.input_schema.as_object().cloned().ok_or_else(|| {
            RegistryError::Schema {
                name: spec.name.to_string(),
                message: "input schema must be a JSON object".to_string(),
            }
        })?;
        let validator =
            jsonschema::validator_for(&spec.input_schema).map_err(|e| RegistryError::Schema {
                name: spec.name.to_string(),
                message: e.to_string(),
            })?;

        let mut tool = Tool::new(spec.name, spec.description, Arc::new(schema_obj));
        tool.annotations = Some(annotations_for_tool(spec.name));

        self.index.insert(spec.name.to_string(), self.tools.len());
        self.tools.push(RegisteredTool {
            tool,
            validator,
            handler: spec.handler,
            success_message: spec.success_message,
        });
        Ok(())
    }

    /// Register a whole table, stopping at the first integrity error.
    ///
    /// # Errors
    ///
    /// Propagates the first [`RegistryError`].
    pub fn register_all(
        &mut self,
        specs: impl IntoIterator<Item = ToolSpec>,
    ) -> Result<(), RegistryError> {
        for spec in specs {
            self.register(spec)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// The MCP-visible tool surface, in registration order.
    #[must_use]
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.tool.clone()).collect()
    }

    /// Execute a named tool. Every failure mode becomes an error-flagged
    /// result; the gate short-circuits before the handler runs.
    pub async fn dispatch(&self, tool_name: &str, args: Value) -> CallToolResult {
        let Some(tool) = self.index.get(tool_name).map(|&i| &self.tools[i]) else {
            return error_result(format!("Unknown tool: {tool_name}"));
        };

        let violations: Vec<String> = tool
            .validator
            .iter_errors(&args)
            .map(|e| e.to_string())
            .collect();
        if !violations.is_empty() {
            return error_result(format!(
                "Invalid arguments for tool '{tool_name}': {}",
                violations.join("; ")
            ));
        }

        if let Some(reason) = self.policy.block_reason(tool_name, &args) {
            return error_result(format!("Error: {reason}"));
        }

        match (tool.handler)(args.clone()).await {
            Ok(result) => {
                let text = match tool.success_message {
                    Some(message) => message(&args),
                    None => format_result_text(&result),
                };
                CallToolResult {
                    content: vec![Content::text(text)],
                    structured_content: None,
                    is_error: Some(false),
                    meta: None,
                }
            }
            Err(e) => {
                error!(tool = tool_name, args = %args, error = %e, "tool execution failed");
                error_result(format!("Error: {e}"))
            }
        }
    }
}

fn error_result(text: String) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: None,
        is_error: Some(true),
        meta: None,
    }
}

/// MCP annotations derived from the mutation classification.
///
/// `openWorldHint` is always `true`: every tool talks to an external system.
fn annotations_for_tool(name: &str) -> ToolAnnotations {
    let open_world_hint = Some(true);

    if name == policy::CUSTOM_API_CALL_TOOL {
        // Read- or write-ness depends on the method argument; do not guess.
        return ToolAnnotations {
            title: None,
            read_only_hint: None,
            destructive_hint: None,
            idempotent_hint: None,
            open_world_hint,
        };
    }

    if policy::is_mutation_tool_name(name) {
        ToolAnnotations {
            title: None,
            read_only_hint: Some(false),
            destructive_hint: None,
            idempotent_hint: None,
            open_world_hint,
        }
    } else {
        ToolAnnotations {
            title: None,
            read_only_hint: Some(true),
            destructive_hint: Some(false),
            idempotent_hint: Some(true),
            open_world_hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::CUSTOM_API_CALL_TOOL;
    use futures::FutureExt as _;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_spec(
        name: &'static str,
        input_schema: Value,
        calls: Arc<AtomicUsize>,
    ) -> ToolSpec {
        ToolSpec {
            name,
            description: "test tool",
            input_schema,
            handler: Arc::new(move |args| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(json!({"echo": args}))
                }
                .boxed()
            }),
            success_message: None,
        }
    }

    fn open_schema() -> Value {
        json!({"type": "object", "additionalProperties": true})
    }

    #[test]
    fn duplicate_registration_fails_fast() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new(MutationPolicy::new(false));
        registry
            .register(counting_spec("get_orders", open_schema(), Arc::clone(&calls)))
            .expect("first");
        let err = registry
            .register(counting_spec("get_orders", open_schema(), calls))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(name) if name == "get_orders"));
    }

    #[test]
    fn non_object_schema_is_a_registration_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new(MutationPolicy::new(false));
        let err = registry
            .register(counting_spec("get_orders", json!("not a schema"), calls))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Schema { .. }));
    }

    #[tokio::test]
    async fn unknown_tool_yields_an_error_result() {
        let registry = ToolRegistry::new(MutationPolicy::new(false));
        let result = registry.dispatch("get_orders", json!({})).await;
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn schema_violations_surface_without_running_the_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new(MutationPolicy::new(false));
        registry
            .register(counting_spec(
                "get_order_by_id",
                json!({
                    "type": "object",
                    "properties": {"orderNumber": {"type": "string"}},
                    "required": ["orderNumber"],
                }),
                Arc::clone(&calls),
            ))
            .expect("register");

        let result = registry.dispatch("get_order_by_id", json!({})).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn read_only_gate_blocks_mutation_tools_before_the_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new(MutationPolicy::new(true));
        registry
            .register(counting_spec("create_order", open_schema(), Arc::clone(&calls)))
            .expect("register");

        let result = registry
            .dispatch("create_order", json!({"customerCode": "C-1"}))
            .await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let text = serde_json::to_value(&result).expect("serializes")["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .expect("text");
        assert!(text.contains("JOBBOSS2_READ_ONLY_MODE"));
        assert!(text.contains("create_order"));
    }

    #[tokio::test]
    async fn read_only_gate_judges_the_generic_tool_by_method() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new(MutationPolicy::new(true));
        registry
            .register(counting_spec(
                CUSTOM_API_CALL_TOOL,
                open_schema(),
                Arc::clone(&calls),
            ))
            .expect("register");

        let ok = registry
            .dispatch(
                CUSTOM_API_CALL_TOOL,
                json!({"method": "GET", "endpoint": "orders"}),
            )
            .await;
        assert_eq!(ok.is_error, Some(false));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let blocked = registry
            .dispatch(
                CUSTOM_API_CALL_TOOL,
                json!({"method": "POST", "endpoint": "orders"}),
            )
            .await;
        assert_eq!(blocked.is_error, Some(true));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reads_pass_through_under_read_only_mode() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new(MutationPolicy::new(true));
        registry
            .register(counting_spec("get_orders", open_schema(), Arc::clone(&calls)))
            .expect("register");

        let result = registry.dispatch("get_orders", json!({})).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn handler_errors_become_error_results() {
        let mut registry = ToolRegistry::new(MutationPolicy::new(false));
        registry
            .register(ToolSpec {
                name: "get_orders",
                description: "test tool",
                input_schema: open_schema(),
                handler: Arc::new(|_| {
                    async { Err(anyhow::anyhow!("upstream unavailable")) }.boxed()
                }),
                success_message: None,
            })
            .expect("register");

        let result = registry.dispatch("get_orders", json!({})).await;
        assert_eq!(result.is_error, Some(true));
        let text = serde_json::to_value(&result).expect("serializes")["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .expect("text");
        assert!(text.contains("Error: upstream unavailable"));
    }

    #[tokio::test]
    async fn success_message_replaces_the_record_echo() {
        let mut registry = ToolRegistry::new(MutationPolicy::new(false));
        registry
            .register(ToolSpec {
                name: "update_estimate",
                description: "test tool",
                input_schema: open_schema(),
                handler: Arc::new(|_| async { Ok(Value::Null) }.boxed()),
                success_message: Some(|args| {
                    format!(
                        "Estimate {} updated.",
                        args.get("partNumber").and_then(Value::as_str).unwrap_or("?")
                    )
                }),
            })
            .expect("register");

        let result = registry
            .dispatch("update_estimate", json!({"partNumber": "P-1"}))
            .await;
        assert_eq!(result.is_error, Some(false));
        let text = serde_json::to_value(&result).expect("serializes")["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .expect("text");
        assert_eq!(text, "Estimate P-1 updated.");
    }

    #[test]
    fn annotations_follow_the_mutation_classification() {
        let a = annotations_for_tool("get_orders");
        assert_eq!(a.read_only_hint, Some(true));
        assert_eq!(a.open_world_hint, Some(true));

        let a = annotations_for_tool("create_order");
        assert_eq!(a.read_only_hint, Some(false));

        let a = annotations_for_tool(CUSTOM_API_CALL_TOOL);
        assert_eq!(a.read_only_hint, None);
        assert_eq!(a.open_world_hint, Some(true));
    }
}
