//! Tool tables, one module per JobBOSS2 resource family.
//!
//! Each module exposes `tools(&Jb2Client) -> Vec<ToolSpec>`; [`all_tools`]
//! concatenates them for registration. The shared constructors here cover
//! the three recurring shapes: list endpoints with query parameters, keyed
//! single-record lookups, and create/update calls that forward a request
//! body.

pub mod customers;
pub mod employees;
pub mod general;
pub mod generated;
pub mod inventory;
pub mod orders;
pub mod production;
pub mod quotes;

use crate::registry::{ToolHandler, ToolSpec};
use futures::FutureExt as _;
use jobboss2_client::endpoint::encode_segment;
use jobboss2_client::{Jb2Client, QueryParams};
use serde_json::{Map, Value, json};
use std::future::Future;
use std::sync::Arc;

/// Default page size for list tools that declare one.
const DEFAULT_TAKE: i64 = 200;

/// The full tool surface, in the order the MCP client sees it.
#[must_use]
pub fn all_tools(client: &Jb2Client) -> Vec<ToolSpec> {
    let mut specs = Vec::new();
    specs.extend(orders::tools(client));
    specs.extend(customers::tools(client));
    specs.extend(quotes::tools(client));
    specs.extend(inventory::tools(client));
    specs.extend(production::tools(client));
    specs.extend(employees::tools(client));
    specs.extend(general::tools(client));
    specs.extend(generated::tools(client));
    specs
}

/// Wrap an async tool body into a [`ToolHandler`], cloning the client per
/// invocation.
pub(crate) fn handler<F, Fut>(client: &Jb2Client, run: F) -> ToolHandler
where
    F: Fn(Jb2Client, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
{
    let client = client.clone();
    Arc::new(move |args| run(client.clone(), args).boxed())
}

/// Input schema for list endpoints: the typed query core plus pass-through
/// filter expressions (`status[in]=Open|InProgress`, `dueDate[gte]=...`).
pub(crate) fn list_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "fields": {
                "type": "string",
                "description": "Comma-separated list of fields to return."
            },
            "sort": {
                "type": "string",
                "description": "Sort expression, e.g. '-dateEntered,+customerCode'."
            },
            "skip": {"type": "integer", "minimum": 0},
            "take": {"type": "integer", "minimum": 1},
        },
        "additionalProperties": true
    })
}

/// Keyed-lookup schema: required key properties plus an optional `fields`
/// selection.
pub(crate) fn keyed_schema(keys: &[(&str, Value)]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for (name, schema) in keys {
        properties.insert((*name).to_string(), schema.clone());
        required.push(Value::String((*name).to_string()));
    }
    properties.insert(
        "fields".to_string(),
        json!({
            "type": "string",
            "description": "Comma-separated list of fields to return."
        }),
    );
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

/// Parse list-tool arguments, applying the default page size.
pub(crate) fn list_params(args: &Value) -> anyhow::Result<QueryParams> {
    let mut params: QueryParams = serde_json::from_value(args.clone())?;
    if params.take.is_none() {
        params.take = Some(DEFAULT_TAKE);
    }
    Ok(params)
}

/// Parse list-tool arguments verbatim, with no default page size.
pub(crate) fn raw_params(args: &Value) -> anyhow::Result<QueryParams> {
    Ok(serde_json::from_value(args.clone())?)
}

/// `fields`-only query parameters for keyed lookups.
pub(crate) fn fields_params(args: &Value) -> Option<QueryParams> {
    args.get("fields")
        .and_then(Value::as_str)
        .map(|fields| QueryParams {
            fields: Some(fields.to_string()),
            ..QueryParams::default()
        })
}

/// Required string argument, unencoded.
pub(crate) fn required_str(args: &Value, key: &str) -> anyhow::Result<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Missing required argument: {key}"))
}

/// Percent-encoded path segment from a string or numeric argument.
pub(crate) fn key_segment(args: &Value, key: &str) -> anyhow::Result<String> {
    let value = args
        .get(key)
        .ok_or_else(|| anyhow::anyhow!("Missing required argument: {key}"))?;
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => anyhow::bail!("Argument '{key}' must be a string or number"),
    };
    Ok(encode_segment(&raw))
}

/// Build a request body from the arguments: drop path keys and nulls, then
/// merge the free-form `data` object over the named properties.
pub(crate) fn body_without(args: &Value, exclude: &[&str]) -> Value {
    let mut body = Map::new();
    if let Some(obj) = args.as_object() {
        for (key, value) in obj {
            if key == "data" || exclude.contains(&key.as_str()) || value.is_null() {
                continue;
            }
            body.insert(key.clone(), value.clone());
        }
        if let Some(extra) = obj.get("data").and_then(Value::as_object) {
            for (key, value) in extra {
                if !value.is_null() {
                    body.insert(key.clone(), value.clone());
                }
            }
        }
    }
    Value::Object(body)
}

/// GET-collection tool with the default page size applied.
pub(crate) fn list_tool(
    client: &Jb2Client,
    name: &'static str,
    description: &'static str,
    path: &'static str,
) -> ToolSpec {
    ToolSpec {
        name,
        description,
        input_schema: list_schema(),
        handler: handler(client, move |client, args| async move {
            let params = list_params(&args)?;
            Ok(client.api_call("GET", path, None, Some(&params)).await?)
        }),
        success_message: None,
    }
}

/// GET-collection tool forwarding the query parameters verbatim.
pub(crate) fn collection_tool(
    client: &Jb2Client,
    name: &'static str,
    description: &'static str,
    path: &'static str,
) -> ToolSpec {
    ToolSpec {
        name,
        description,
        input_schema: list_schema(),
        handler: handler(client, move |client, args| async move {
            let params = raw_params(&args)?;
            Ok(client.api_call("GET", path, None, Some(&params)).await?)
        }),
        success_message: None,
    }
}

/// Keyed single-record GET tool. `path` builds the endpoint from the
/// already-validated arguments.
pub(crate) fn keyed_tool(
    client: &Jb2Client,
    name: &'static str,
    description: &'static str,
    input_schema: Value,
    path: fn(&Value) -> anyhow::Result<String>,
) -> ToolSpec {
    ToolSpec {
        name,
        description,
        input_schema,
        handler: handler(client, move |client, args| async move {
            let endpoint = path(&args)?;
            let params = fields_params(&args);
            Ok(client
                .api_call("GET", &endpoint, None, params.as_ref())
                .await?)
        }),
        success_message: None,
    }
}

/// Create/update tool: builds the endpoint from key arguments and forwards
/// the remaining properties as the request body.
pub(crate) fn write_tool(
    client: &Jb2Client,
    name: &'static str,
    description: &'static str,
    input_schema: Value,
    method: &'static str,
    path: fn(&Value) -> anyhow::Result<String>,
    exclude: &'static [&'static str],
) -> ToolSpec {
    ToolSpec {
        name,
        description,
        input_schema,
        handler: handler(client, move |client, args| async move {
            let endpoint = path(&args)?;
            let body = body_without(&args, exclude);
            Ok(client
                .api_call(method, &endpoint, Some(&body), None)
                .await?)
        }),
        success_message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{MutationPolicy, is_mutation_tool_name};
    use crate::registry::ToolRegistry;
    use jobboss2_client::ClientConfig;
    use std::collections::HashSet;
    use std::time::Duration;

    fn test_client() -> Jb2Client {
        Jb2Client::new(ClientConfig {
            api_url: "http://127.0.0.1:1".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            token_url: "http://127.0.0.1:1/token".to_string(),
            timeout: Duration::from_secs(1),
        })
        .expect("client")
    }

    #[test]
    fn every_tool_registers_cleanly() {
        let client = test_client();
        let specs = all_tools(&client);
        assert!(specs.len() > 80, "expected the full surface, got {}", specs.len());

        let mut registry = ToolRegistry::new(MutationPolicy::new(false));
        registry.register_all(specs).expect("unique names and valid schemas");
    }

    #[test]
    fn tool_names_are_unique() {
        let client = test_client();
        let mut seen = HashSet::new();
        for spec in all_tools(&client) {
            assert!(seen.insert(spec.name), "duplicate tool name {}", spec.name);
        }
    }

    #[test]
    fn write_tools_classify_as_mutations() {
        let client = test_client();
        for spec in all_tools(&client) {
            let name = spec.name;
            if name.starts_with("create_") || name.starts_with("update_") || name == "run_report" {
                assert!(is_mutation_tool_name(name), "{name} should be a mutation");
            }
        }
    }

    #[test]
    fn estimate_materials_are_reachable_by_sub_part() {
        let client = test_client();
        let spec = all_tools(&client)
            .into_iter()
            .find(|s| s.name == "get_estimate_material_by_sub_part")
            .expect("bill of materials lookup");
        let required = spec.input_schema["required"]
            .as_array()
            .expect("required keys")
            .clone();
        assert!(required.contains(&json!("partNumber")));
        assert!(required.contains(&json!("subPartNumber")));
    }

    #[test]
    fn body_without_drops_keys_and_nulls_and_merges_data() {
        let args = json!({
            "orderNumber": "ORD-1",
            "status": "Open",
            "dueDate": null,
            "data": {"PONumber": "PO-9", "note": null},
        });
        let body = body_without(&args, &["orderNumber"]);
        assert_eq!(body, json!({"status": "Open", "PONumber": "PO-9"}));
    }

    #[test]
    fn list_params_apply_the_default_page_size() {
        let params = list_params(&json!({"sort": "-dateEntered"})).expect("params");
        assert_eq!(params.take, Some(200));
        assert_eq!(params.sort.as_deref(), Some("-dateEntered"));

        let params = list_params(&json!({"take": 5})).expect("params");
        assert_eq!(params.take, Some(5));
    }

    #[test]
    fn key_segment_encodes_and_accepts_numbers() {
        let args = json!({"orderNumber": "ORD/100 A", "itemNumber": 3});
        assert_eq!(key_segment(&args, "orderNumber").expect("segment"), "ORD%2F100%20A");
        assert_eq!(key_segment(&args, "itemNumber").expect("segment"), "3");
        assert!(key_segment(&args, "missing").is_err());
    }
}
