//! Customer master tools.

use super::{fields_params, key_segment, keyed_schema, list_params, list_schema, write_tool};
use crate::registry::ToolSpec;
use jobboss2_client::Jb2Client;
use serde_json::json;

pub fn tools(client: &Jb2Client) -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "get_customers",
            description: "Retrieve a list of customers from JobBOSS2. Supports filtering, sorting, pagination, and field selection.",
            input_schema: list_schema(),
            handler: super::handler(client, |client, args| async move {
                let params = list_params(&args)?;
                Ok(client.get_customers(Some(&params)).await?)
            }),
            success_message: None,
        },
        ToolSpec {
            name: "get_customer_by_code",
            description: "Retrieve a specific customer by their customer code.",
            input_schema: keyed_schema(&[("customerCode", json!({"type": "string"}))]),
            handler: super::handler(client, |client, args| async move {
                let code = super::required_str(&args, "customerCode")?;
                let params = fields_params(&args);
                Ok(client.get_customer_by_code(&code, params.as_ref()).await?)
            }),
            success_message: None,
        },
        write_tool(
            client,
            "create_customer",
            "Create a new customer in JobBOSS2.",
            json!({
                "type": "object",
                "properties": {
                    "customerCode": {"type": "string"},
                    "customerName": {"type": "string"},
                    "phone": {"type": "string"},
                    "billingAddress1": {"type": "string"},
                    "data": {
                        "type": "object",
                        "description": "Additional JobBOSS2 customer fields."
                    },
                },
                "required": ["customerCode", "customerName"],
                "additionalProperties": false
            }),
            "POST",
            |_| Ok("customers".to_string()),
            &[],
        ),
        write_tool(
            client,
            "update_customer",
            "Update an existing customer in JobBOSS2.",
            json!({
                "type": "object",
                "properties": {
                    "customerCode": {"type": "string"},
                    "customerName": {"type": "string"},
                    "phone": {"type": "string"},
                    "billingAddress1": {"type": "string"},
                    "data": {
                        "type": "object",
                        "description": "Additional JobBOSS2 customer fields."
                    },
                },
                "required": ["customerCode"],
                "additionalProperties": false
            }),
            "PATCH",
            |args| Ok(format!("customers/{}", key_segment(args, "customerCode")?)),
            &["customerCode"],
        ),
    ]
}
