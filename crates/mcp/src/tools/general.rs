//! Escape-hatch and report tools.

use super::{collection_tool, key_segment, keyed_schema, keyed_tool, required_str};
use crate::registry::ToolSpec;
use jobboss2_client::{Jb2Client, QueryParams};
use serde_json::{Value, json};

pub fn tools(client: &Jb2Client) -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "custom_api_call",
            description: "Make a custom API call to any JobBOSS2 API endpoint. Use for endpoints not covered by a dedicated tool.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "method": {
                        "type": "string",
                        "enum": ["GET", "POST", "PUT", "PATCH", "DELETE"],
                    },
                    "endpoint": {
                        "type": "string",
                        "description": "Relative endpoint path, e.g. 'orders' or 'customers/ACME'."
                    },
                    "data": {
                        "description": "JSON request body for write methods."
                    },
                    "params": {
                        "type": "object",
                        "description": "Query parameters (fields, sort, skip, take, filters)."
                    },
                },
                "required": ["method", "endpoint"],
                "additionalProperties": false
            }),
            handler: super::handler(client, |client, args| async move {
                let method = required_str(&args, "method")?;
                let endpoint = required_str(&args, "endpoint")?;
                let data = args.get("data").filter(|v| !v.is_null()).cloned();
                let params: Option<QueryParams> = match args.get("params") {
                    Some(p) if !p.is_null() => Some(serde_json::from_value(p.clone())?),
                    _ => None,
                };
                Ok(client
                    .api_call(&method, &endpoint, data.as_ref(), params.as_ref())
                    .await?)
            }),
            success_message: None,
        },
        ToolSpec {
            name: "run_report",
            description: "Submit a JobBOSS2 report request.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "body": {
                        "type": "object",
                        "description": "Report request body (report name, parameters)."
                    },
                },
                "required": ["body"],
                "additionalProperties": false
            }),
            handler: super::handler(client, |client, args| async move {
                let body = args.get("body").cloned().unwrap_or(Value::Null);
                Ok(client.api_call("POST", "reports", Some(&body), None).await?)
            }),
            success_message: None,
        },
        keyed_tool(
            client,
            "get_report_status",
            "Fetch the status/result of a previously submitted report.",
            keyed_schema(&[("requestId", json!({"type": "string"}))]),
            |args| Ok(format!("reports/{}", key_segment(args, "requestId")?)),
        ),
        collection_tool(
            client,
            "get_document_controls",
            "Retrieve document control headers.",
            "document-controls",
        ),
        collection_tool(
            client,
            "get_document_histories",
            "Retrieve document history entries.",
            "document-histories",
        ),
        collection_tool(
            client,
            "get_document_reviews",
            "Retrieve document review assignments.",
            "document-review",
        ),
    ]
}
