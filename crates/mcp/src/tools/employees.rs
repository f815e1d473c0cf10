//! Employee, attendance, and time ticket tools.

use super::{
    collection_tool, key_segment, keyed_schema, keyed_tool, list_tool, required_str, write_tool,
};
use crate::registry::ToolSpec;
use jobboss2_client::Jb2Client;
use serde_json::{Value, json};

pub fn tools(client: &Jb2Client) -> Vec<ToolSpec> {
    let mut update_detail = write_tool(
        client,
        "update_attendance_ticket_detail",
        "Update an existing attendance ticket detail (clock in/out times).",
        json!({
            "type": "object",
            "properties": {
                "id": {"type": ["integer", "string"]},
                "data": {
                    "type": "object",
                    "description": "Attendance ticket detail fields to change."
                },
            },
            "required": ["id", "data"],
            "additionalProperties": false
        }),
        "PATCH",
        |args| {
            Ok(format!(
                "attendance-ticket-details/{}",
                key_segment(args, "id")?
            ))
        },
        &["id"],
    );
    // The upstream PATCH returns no body; acknowledge instead of echoing null.
    update_detail.success_message = Some(|args| {
        let id = args.get("id").cloned().unwrap_or(Value::Null);
        format!("Attendance ticket detail {id} updated.")
    });

    vec![
        list_tool(
            client,
            "get_employees",
            "Retrieve a list of employees from JobBOSS2. Supports filtering, sorting, pagination, and field selection.",
            "employees",
        ),
        keyed_tool(
            client,
            "get_employee_by_id",
            "Retrieve a specific employee by their employee ID.",
            keyed_schema(&[("employeeID", json!({"type": ["integer", "string"]}))]),
            |args| Ok(format!("employees/{}", key_segment(args, "employeeID")?)),
        ),
        list_tool(
            client,
            "get_attendance_tickets",
            "Retrieve a list of attendance tickets from JobBOSS2.",
            "attendance-tickets",
        ),
        keyed_tool(
            client,
            "get_attendance_ticket_by_id",
            "Retrieve a specific attendance ticket by ticket date and employee code.",
            keyed_schema(&[
                ("ticketDate", json!({"type": "string"})),
                ("employeeCode", json!({"type": ["integer", "string"]})),
            ]),
            |args| {
                Ok(format!(
                    "attendance-tickets/{}/employees/{}",
                    key_segment(args, "ticketDate")?,
                    key_segment(args, "employeeCode")?
                ))
            },
        ),
        write_tool(
            client,
            "create_attendance_ticket",
            "Create a new attendance ticket in JobBOSS2.",
            json!({
                "type": "object",
                "properties": {
                    "employeeCode": {"type": "integer"},
                    "ticketDate": {"type": "string"},
                    "data": {
                        "type": "object",
                        "description": "Additional attendance ticket fields."
                    },
                },
                "required": ["employeeCode", "ticketDate"],
                "additionalProperties": false
            }),
            "POST",
            |_| Ok("attendance-tickets".to_string()),
            &[],
        ),
        list_tool(
            client,
            "get_attendance_ticket_details",
            "Retrieve a list of attendance ticket details (clock in/out times) from JobBOSS2.",
            "attendance-ticket-details",
        ),
        write_tool(
            client,
            "create_attendance_ticket_detail",
            "Create a new attendance ticket detail (clock in/out entry) for a specific ticket.",
            json!({
                "type": "object",
                "properties": {
                    "ticketDate": {"type": "string"},
                    "employeeCode": {"type": ["integer", "string"]},
                    "actualClockInDate": {"type": "string"},
                    "actualClockInTime": {"type": "string"},
                    "actualClockOutDate": {"type": "string"},
                    "actualClockOutTime": {"type": "string"},
                    "data": {
                        "type": "object",
                        "description": "Additional attendance ticket detail fields."
                    },
                },
                "required": ["ticketDate", "employeeCode"],
                "additionalProperties": false
            }),
            "POST",
            |args| {
                Ok(format!(
                    "attendance-tickets/{}/employees/{}/attendance-ticket-details",
                    key_segment(args, "ticketDate")?,
                    key_segment(args, "employeeCode")?
                ))
            },
            &["ticketDate", "employeeCode"],
        ),
        update_detail,
        ToolSpec {
            name: "get_attendance_report",
            description: "Generate a comprehensive attendance report for a date range. Includes ALL attendance types: regular work time, sick time, vacation, and other leave.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "startDate": {"type": "string", "description": "Range start, YYYY-MM-DD."},
                    "endDate": {"type": "string", "description": "Range end, YYYY-MM-DD."},
                    "employeeCodes": {
                        "type": "array",
                        "items": {"type": "integer"},
                        "description": "Restrict the report to these employee codes."
                    },
                },
                "required": ["startDate", "endDate"],
                "additionalProperties": false
            }),
            handler: super::handler(client, |client, args| async move {
                let start = required_str(&args, "startDate")?;
                let end = required_str(&args, "endDate")?;
                let codes: Option<Vec<i64>> = args
                    .get("employeeCodes")
                    .and_then(Value::as_array)
                    .map(|codes| codes.iter().filter_map(Value::as_i64).collect());
                Ok(client
                    .get_attendance_report(&start, &end, codes.as_deref())
                    .await?)
            }),
            success_message: None,
        },
        collection_tool(
            client,
            "get_salespersons",
            "Retrieve salesperson master records.",
            "salespersons",
        ),
        collection_tool(
            client,
            "get_time_tickets",
            "Retrieve time ticket headers.",
            "time-tickets",
        ),
        keyed_tool(
            client,
            "get_time_ticket_by_id",
            "Retrieve a specific time ticket header by ticket date and employee code.",
            keyed_schema(&[
                ("ticketDate", json!({"type": "string"})),
                ("employeeCode", json!({"type": ["integer", "string"]})),
            ]),
            |args| {
                Ok(format!(
                    "time-tickets/{}/employees/{}",
                    key_segment(args, "ticketDate")?,
                    key_segment(args, "employeeCode")?
                ))
            },
        ),
        collection_tool(
            client,
            "get_time_ticket_details",
            "Retrieve shop floor time ticket detail entries.",
            "time-ticket-details",
        ),
        keyed_tool(
            client,
            "get_time_ticket_detail_by_id",
            "Retrieve a single time ticket detail by its GUID.",
            keyed_schema(&[("timeTicketGUID", json!({"type": "string"}))]),
            |args| {
                Ok(format!(
                    "time-ticket-details/{}",
                    key_segment(args, "timeTicketGUID")?
                ))
            },
        ),
    ]
}
