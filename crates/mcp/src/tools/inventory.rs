//! Material, purchasing, and shipping tools.

use super::{collection_tool, key_segment, keyed_schema, keyed_tool, list_tool};
use crate::registry::ToolSpec;
use jobboss2_client::Jb2Client;
use serde_json::json;

pub fn tools(client: &Jb2Client) -> Vec<ToolSpec> {
    vec![
        list_tool(
            client,
            "get_materials",
            "Retrieve a list of materials from JobBOSS2. Supports filtering, sorting, pagination, and field selection.",
            "materials",
        ),
        keyed_tool(
            client,
            "get_material_by_part_number",
            "Retrieve a specific material by its part number.",
            keyed_schema(&[("partNumber", json!({"type": "string"}))]),
            |args| Ok(format!("materials/{}", key_segment(args, "partNumber")?)),
        ),
        list_tool(
            client,
            "get_bin_locations",
            "Retrieve a list of bin locations from JobBOSS2.",
            "bin-locations",
        ),
        list_tool(
            client,
            "get_job_materials",
            "Retrieve job material postings (issues/receipts) with bin locations, costs, and related job/order information.",
            "job-materials",
        ),
        keyed_tool(
            client,
            "get_job_material_by_id",
            "Retrieve a specific job material record by its unique ID.",
            keyed_schema(&[("uniqueID", json!({"type": ["integer", "string"]}))]),
            |args| Ok(format!("job-materials/{}", key_segment(args, "uniqueID")?)),
        ),
        list_tool(
            client,
            "get_job_requirements",
            "Retrieve job requirement/purchase suggestions including vendor codes, lead times, and required quantities.",
            "job-requirements",
        ),
        keyed_tool(
            client,
            "get_job_requirement_by_id",
            "Retrieve a specific job requirement by unique ID.",
            keyed_schema(&[("uniqueID", json!({"type": ["integer", "string"]}))]),
            |args| Ok(format!("job-requirements/{}", key_segment(args, "uniqueID")?)),
        ),
        collection_tool(
            client,
            "get_packing_lists",
            "Retrieve packing list headers including ship-to, freight, and container information.",
            "packing-lists",
        ),
        collection_tool(
            client,
            "get_packing_list_line_items",
            "Retrieve packing list line items showing what was shipped, quantities, and job references.",
            "packing-list-line-items",
        ),
        collection_tool(
            client,
            "get_product_codes",
            "Retrieve product codes with related GL accounts and cash discount settings.",
            "product-codes",
        ),
        keyed_tool(
            client,
            "get_product_code",
            "Retrieve a specific product code by its identifier.",
            keyed_schema(&[("productCode", json!({"type": "string"}))]),
            |args| Ok(format!("product-codes/{}", key_segment(args, "productCode")?)),
        ),
        collection_tool(
            client,
            "get_purchase_orders",
            "Retrieve purchase order headers including vendor, ship-to, and totals.",
            "purchase-orders",
        ),
        keyed_tool(
            client,
            "get_purchase_order_by_number",
            "Retrieve a specific purchase order by PO number.",
            keyed_schema(&[("poNumber", json!({"type": "string"}))]),
            |args| Ok(format!("purchase-orders/{}", key_segment(args, "poNumber")?)),
        ),
        collection_tool(
            client,
            "get_purchase_order_line_items",
            "Retrieve purchase order line items with quantities, costs, and routing information.",
            "purchase-order-line-items",
        ),
        keyed_tool(
            client,
            "get_purchase_order_line_item",
            "Retrieve a specific purchase order line item by PO number, part number, and line item number.",
            keyed_schema(&[
                ("purchaseOrderNumber", json!({"type": "string"})),
                ("partNumber", json!({"type": "string"})),
                ("itemNumber", json!({"type": ["integer", "string"]})),
            ]),
            |args| {
                Ok(format!(
                    "purchase-order-line-items/{}/{}/{}",
                    key_segment(args, "purchaseOrderNumber")?,
                    key_segment(args, "partNumber")?,
                    key_segment(args, "itemNumber")?
                ))
            },
        ),
        collection_tool(
            client,
            "get_purchase_order_releases",
            "Retrieve purchase order release schedules showing quantities and due dates.",
            "purchase-order-releases",
        ),
        collection_tool(
            client,
            "get_vendors",
            "Retrieve vendor master records including payment terms and lead times.",
            "vendors",
        ),
        keyed_tool(
            client,
            "get_vendor_by_code",
            "Retrieve a specific vendor by vendor code.",
            keyed_schema(&[("vendorCode", json!({"type": "string"}))]),
            |args| Ok(format!("vendors/{}", key_segment(args, "vendorCode")?)),
        ),
    ]
}
