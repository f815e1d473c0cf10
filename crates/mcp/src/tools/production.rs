//! Estimate (part master), routing, and work center tools.

use super::{collection_tool, key_segment, keyed_schema, keyed_tool, list_tool, write_tool};
use crate::registry::ToolSpec;
use jobboss2_client::Jb2Client;
use serde_json::{Value, json};

pub fn tools(client: &Jb2Client) -> Vec<ToolSpec> {
    let mut update_estimate = write_tool(
        client,
        "update_estimate",
        "Update an existing estimate (part master record) in JobBOSS2.",
        json!({
            "type": "object",
            "properties": {
                "partNumber": {"type": "string"},
                "data": {
                    "type": "object",
                    "description": "JobBOSS2 estimate fields to change."
                },
            },
            "required": ["partNumber", "data"],
            "additionalProperties": false
        }),
        "PUT",
        |args| Ok(format!("estimates/{}", key_segment(args, "partNumber")?)),
        &["partNumber"],
    );
    // The upstream PUT returns no body; acknowledge instead of echoing null.
    update_estimate.success_message = Some(|args| {
        format!(
            "Estimate {} updated.",
            args.get("partNumber").and_then(Value::as_str).unwrap_or("?")
        )
    });

    vec![
        list_tool(
            client,
            "get_estimates",
            "Retrieve a list of estimates (part master records) from JobBOSS2.",
            "estimates",
        ),
        keyed_tool(
            client,
            "get_estimate_by_part_number",
            "Retrieve a specific estimate (part master record) by its part number.",
            keyed_schema(&[("partNumber", json!({"type": "string"}))]),
            |args| Ok(format!("estimates/{}", key_segment(args, "partNumber")?)),
        ),
        write_tool(
            client,
            "create_estimate",
            "Create a new estimate (part master record) in JobBOSS2.",
            json!({
                "type": "object",
                "properties": {
                    "partNumber": {"type": "string"},
                    "data": {
                        "type": "object",
                        "description": "Additional JobBOSS2 estimate fields."
                    },
                },
                "required": ["partNumber"],
                "additionalProperties": false
            }),
            "POST",
            |_| Ok("estimates".to_string()),
            &[],
        ),
        update_estimate,
        keyed_tool(
            client,
            "get_estimate_material_by_sub_part",
            "Retrieve a specific material of an estimate by the parent part number and sub-part (material) number. Useful for checking bill of materials details.",
            keyed_schema(&[
                ("partNumber", json!({"type": "string"})),
                ("subPartNumber", json!({"type": "string"})),
            ]),
            |args| {
                Ok(format!(
                    "estimates/{}/materials/{}",
                    key_segment(args, "partNumber")?,
                    key_segment(args, "subPartNumber")?
                ))
            },
        ),
        collection_tool(
            client,
            "get_routings",
            "Retrieve routings (work center steps) independent of orders.",
            "routings",
        ),
        keyed_tool(
            client,
            "get_routing_by_part_number",
            "Retrieve a specific routing tied to an estimate part number and step number.",
            keyed_schema(&[
                ("partNumber", json!({"type": "string"})),
                ("stepNumber", json!({"type": ["integer", "string"]})),
            ]),
            |args| {
                Ok(format!(
                    "estimates/{}/routings/{}",
                    key_segment(args, "partNumber")?,
                    key_segment(args, "stepNumber")?
                ))
            },
        ),
        collection_tool(
            client,
            "get_work_centers",
            "Retrieve work center definitions.",
            "work-centers",
        ),
        keyed_tool(
            client,
            "get_work_center_by_code",
            "Retrieve a specific work center by its code.",
            keyed_schema(&[("workCenter", json!({"type": "string"}))]),
            |args| Ok(format!("work-centers/{}", key_segment(args, "workCenter")?)),
        ),
    ]
}
