//! Quote and quote line item tools.

use super::{
    key_segment, keyed_schema, keyed_tool, list_params, list_schema, list_tool, write_tool,
};
use crate::registry::ToolSpec;
use jobboss2_client::Jb2Client;
use serde_json::json;

pub fn tools(client: &Jb2Client) -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "get_quotes",
            description: "Retrieve a list of quotes from JobBOSS2. Supports filtering, sorting, pagination, and field selection.",
            input_schema: list_schema(),
            handler: super::handler(client, |client, args| async move {
                let params = list_params(&args)?;
                Ok(client.get_quotes(Some(&params)).await?)
            }),
            success_message: None,
        },
        keyed_tool(
            client,
            "get_quote_by_id",
            "Retrieve a specific quote by its quote number.",
            keyed_schema(&[("quoteNumber", json!({"type": "string"}))]),
            |args| Ok(format!("quotes/{}", key_segment(args, "quoteNumber")?)),
        ),
        write_tool(
            client,
            "create_quote",
            "Create a new quote in JobBOSS2.",
            json!({
                "type": "object",
                "properties": {
                    "customerCode": {"type": "string"},
                    "quoteNumber": {"type": "string"},
                    "expirationDate": {"type": "string"},
                    "data": {
                        "type": "object",
                        "description": "Additional JobBOSS2 quote fields."
                    },
                },
                "required": ["customerCode"],
                "additionalProperties": false
            }),
            "POST",
            |_| Ok("quotes".to_string()),
            &[],
        ),
        write_tool(
            client,
            "update_quote",
            "Update an existing quote in JobBOSS2.",
            json!({
                "type": "object",
                "properties": {
                    "quoteNumber": {"type": "string"},
                    "customerCode": {"type": "string"},
                    "status": {"type": "string"},
                    "expirationDate": {"type": "string"},
                    "data": {
                        "type": "object",
                        "description": "Additional JobBOSS2 quote fields."
                    },
                },
                "required": ["quoteNumber"],
                "additionalProperties": false
            }),
            "PATCH",
            |args| Ok(format!("quotes/{}", key_segment(args, "quoteNumber")?)),
            &["quoteNumber"],
        ),
        list_tool(
            client,
            "get_quote_line_items",
            "Retrieve quote line items across all quotes. Filter by quoteNumber, partNumber, status, etc.",
            "quote-line-items",
        ),
        keyed_tool(
            client,
            "get_quote_line_item_by_id",
            "Retrieve a specific quote line item using quote number and line item number.",
            keyed_schema(&[
                ("quoteNumber", json!({"type": "string"})),
                ("itemNumber", json!({"type": ["integer", "string"]})),
            ]),
            |args| {
                Ok(format!(
                    "quotes/{}/quote-line-item/{}",
                    key_segment(args, "quoteNumber")?,
                    key_segment(args, "itemNumber")?
                ))
            },
        ),
        write_tool(
            client,
            "create_quote_line_item",
            "Create a new quote line item. Provide any JobBOSS2 quote line item fields.",
            json!({
                "type": "object",
                "properties": {
                    "quoteNumber": {"type": "string"},
                    "data": {
                        "type": "object",
                        "description": "JobBOSS2 quote line item fields."
                    },
                },
                "required": ["quoteNumber", "data"],
                "additionalProperties": false
            }),
            "POST",
            |args| {
                Ok(format!(
                    "quotes/{}/quote-line-items",
                    key_segment(args, "quoteNumber")?
                ))
            },
            &["quoteNumber"],
        ),
        write_tool(
            client,
            "update_quote_line_item",
            "Update an existing quote line item by quote number and item number.",
            json!({
                "type": "object",
                "properties": {
                    "quoteNumber": {"type": "string"},
                    "itemNumber": {"type": ["integer", "string"]},
                    "data": {
                        "type": "object",
                        "description": "JobBOSS2 quote line item fields to change."
                    },
                },
                "required": ["quoteNumber", "itemNumber", "data"],
                "additionalProperties": false
            }),
            "PATCH",
            |args| {
                Ok(format!(
                    "quotes/{}/quote-line-items/{}",
                    key_segment(args, "quoteNumber")?,
                    key_segment(args, "itemNumber")?
                ))
            },
            &["quoteNumber", "itemNumber"],
        ),
    ]
}
