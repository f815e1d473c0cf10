//! Order, order line item, order routing, and release tools.

use super::{
    fields_params, key_segment, keyed_schema, keyed_tool, list_params, list_schema, list_tool,
    required_str, write_tool,
};
use crate::registry::ToolSpec;
use jobboss2_client::Jb2Client;
use serde_json::json;

pub fn tools(client: &Jb2Client) -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "get_orders",
            description: "Retrieve a list of orders from JobBOSS2. Supports filtering, sorting, pagination, and field selection. Example filters: customerCode=ACME, status[in]=Open|InProgress, orderTotal[gte]=1000.",
            input_schema: list_schema(),
            handler: super::handler(client, |client, args| async move {
                let params = list_params(&args)?;
                Ok(client.get_orders(Some(&params)).await?)
            }),
            success_message: None,
        },
        ToolSpec {
            name: "get_order_by_id",
            description: "Retrieve a specific order by its order number.",
            input_schema: keyed_schema(&[("orderNumber", json!({"type": "string"}))]),
            handler: super::handler(client, |client, args| async move {
                let order_number = required_str(&args, "orderNumber")?;
                let params = fields_params(&args);
                Ok(client.get_order_by_id(&order_number, params.as_ref()).await?)
            }),
            success_message: None,
        },
        write_tool(
            client,
            "create_order",
            "Create a new order in JobBOSS2.",
            json!({
                "type": "object",
                "properties": {
                    "customerCode": {"type": "string"},
                    "orderNumber": {"type": "string"},
                    "PONumber": {"type": "string"},
                    "status": {"type": "string"},
                    "dueDate": {"type": "string"},
                    "data": {
                        "type": "object",
                        "description": "Additional JobBOSS2 order fields."
                    },
                },
                "required": ["customerCode"],
                "additionalProperties": false
            }),
            "POST",
            |_| Ok("orders".to_string()),
            &[],
        ),
        write_tool(
            client,
            "update_order",
            "Update an existing order in JobBOSS2.",
            json!({
                "type": "object",
                "properties": {
                    "orderNumber": {"type": "string"},
                    "customerCode": {"type": "string"},
                    "PONumber": {"type": "string"},
                    "status": {"type": "string"},
                    "dueDate": {"type": "string"},
                    "data": {
                        "type": "object",
                        "description": "Additional JobBOSS2 order fields."
                    },
                },
                "required": ["orderNumber"],
                "additionalProperties": false
            }),
            "PATCH",
            |args| Ok(format!("orders/{}", key_segment(args, "orderNumber")?)),
            &["orderNumber"],
        ),
        keyed_tool(
            client,
            "get_order_line_items",
            "Retrieve line items for a specific order.",
            keyed_schema(&[("orderNumber", json!({"type": "string"}))]),
            |args| {
                Ok(format!(
                    "orders/{}/order-line-items",
                    key_segment(args, "orderNumber")?
                ))
            },
        ),
        keyed_tool(
            client,
            "get_order_line_item_by_id",
            "Retrieve a specific order line item.",
            keyed_schema(&[
                ("orderNumber", json!({"type": "string"})),
                ("itemNumber", json!({"type": ["integer", "string"]})),
            ]),
            |args| {
                Ok(format!(
                    "orders/{}/order-line-items/{}",
                    key_segment(args, "orderNumber")?,
                    key_segment(args, "itemNumber")?
                ))
            },
        ),
        write_tool(
            client,
            "create_order_line_item",
            "Create a new line item for an order.",
            json!({
                "type": "object",
                "properties": {
                    "orderNumber": {"type": "string"},
                    "partNumber": {"type": "string"},
                    "description": {"type": "string"},
                    "quantity": {"type": "number"},
                    "price": {"type": "number"},
                    "data": {
                        "type": "object",
                        "description": "Additional JobBOSS2 line item fields."
                    },
                },
                "required": ["orderNumber"],
                "additionalProperties": false
            }),
            "POST",
            |args| {
                Ok(format!(
                    "orders/{}/order-line-items",
                    key_segment(args, "orderNumber")?
                ))
            },
            &["orderNumber"],
        ),
        write_tool(
            client,
            "update_order_line_item",
            "Update an existing order line item.",
            json!({
                "type": "object",
                "properties": {
                    "orderNumber": {"type": "string"},
                    "itemNumber": {"type": ["integer", "string"]},
                    "partNumber": {"type": "string"},
                    "description": {"type": "string"},
                    "quantity": {"type": "number"},
                    "price": {"type": "number"},
                    "data": {
                        "type": "object",
                        "description": "Additional JobBOSS2 line item fields."
                    },
                },
                "required": ["orderNumber", "itemNumber"],
                "additionalProperties": false
            }),
            "PATCH",
            |args| {
                Ok(format!(
                    "orders/{}/order-line-items/{}",
                    key_segment(args, "orderNumber")?,
                    key_segment(args, "itemNumber")?
                ))
            },
            &["orderNumber", "itemNumber"],
        ),
        list_tool(
            client,
            "get_order_routings",
            "Retrieve a list of order routings from JobBOSS2 with optional filtering, sorting, and pagination.",
            "order-routings",
        ),
        keyed_tool(
            client,
            "get_order_routing",
            "Retrieve a specific order routing by order number, line item, and step.",
            keyed_schema(&[
                ("orderNumber", json!({"type": "string"})),
                ("itemNumber", json!({"type": ["integer", "string"]})),
                ("stepNumber", json!({"type": ["integer", "string"]})),
            ]),
            |args| {
                Ok(format!(
                    "orders/{}/order-line-items/{}/routings/{}",
                    key_segment(args, "orderNumber")?,
                    key_segment(args, "itemNumber")?,
                    key_segment(args, "stepNumber")?
                ))
            },
        ),
        write_tool(
            client,
            "create_order_routing",
            "Create a new routing for a specific order line item.",
            json!({
                "type": "object",
                "properties": {
                    "orderNumber": {"type": "string"},
                    "itemNumber": {"type": ["integer", "string"]},
                    "data": {
                        "type": "object",
                        "description": "JobBOSS2 routing fields (workCenter, stepNumber, ...)."
                    },
                },
                "required": ["orderNumber", "itemNumber", "data"],
                "additionalProperties": false
            }),
            "POST",
            |args| {
                Ok(format!(
                    "orders/{}/order-line-items/{}/routings",
                    key_segment(args, "orderNumber")?,
                    key_segment(args, "itemNumber")?
                ))
            },
            &["orderNumber", "itemNumber"],
        ),
        write_tool(
            client,
            "update_order_routing",
            "Update an existing order routing.",
            json!({
                "type": "object",
                "properties": {
                    "orderNumber": {"type": "string"},
                    "itemNumber": {"type": ["integer", "string"]},
                    "stepNumber": {"type": ["integer", "string"]},
                    "data": {
                        "type": "object",
                        "description": "JobBOSS2 routing fields to change."
                    },
                },
                "required": ["orderNumber", "itemNumber", "stepNumber", "data"],
                "additionalProperties": false
            }),
            "PATCH",
            |args| {
                Ok(format!(
                    "orders/{}/order-line-items/{}/routings/{}",
                    key_segment(args, "orderNumber")?,
                    key_segment(args, "itemNumber")?,
                    key_segment(args, "stepNumber")?
                ))
            },
            &["orderNumber", "itemNumber", "stepNumber"],
        ),
        list_tool(
            client,
            "get_order_releases",
            "Retrieve a list of order releases with optional filtering, sorting, and pagination.",
            "releases",
        ),
        write_tool(
            client,
            "create_order_release",
            "Create a release for a specific order line item. Releases define delivery schedules with due dates and quantities.",
            json!({
                "type": "object",
                "properties": {
                    "orderNumber": {"type": "string"},
                    "itemNumber": {"type": ["integer", "string"]},
                    "dueDate": {"type": "string"},
                    "quantity": {"type": "number"},
                    "data": {
                        "type": "object",
                        "description": "Additional JobBOSS2 release fields."
                    },
                },
                "required": ["orderNumber", "itemNumber"],
                "additionalProperties": false
            }),
            "POST",
            |args| {
                Ok(format!(
                    "orders/{}/order-line-items/{}/releases",
                    key_segment(args, "orderNumber")?,
                    key_segment(args, "itemNumber")?
                ))
            },
            &["orderNumber", "itemNumber"],
        ),
        keyed_tool(
            client,
            "get_order_release_by_id",
            "Retrieve a specific release for an order line item by unique ID.",
            keyed_schema(&[
                ("orderNumber", json!({"type": "string"})),
                ("itemNumber", json!({"type": ["integer", "string"]})),
                ("uniqueID", json!({"type": ["integer", "string"]})),
            ]),
            |args| {
                Ok(format!(
                    "orders/{}/order-line-items/{}/releases/{}",
                    key_segment(args, "orderNumber")?,
                    key_segment(args, "itemNumber")?,
                    key_segment(args, "uniqueID")?
                ))
            },
        ),
    ]
}
