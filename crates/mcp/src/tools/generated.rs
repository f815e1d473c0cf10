//! Table-driven GET-collection tools for the long tail of JobBOSS2
//! resources. One row per endpoint, expanded by [`collection_tool`].

use super::collection_tool;
use crate::registry::ToolSpec;
use jobboss2_client::Jb2Client;

const COLLECTIONS: &[(&str, &str, &str)] = &[
    ("get_ar_invoice_details", "Retrieve AR invoice detail rows.", "ar-invoice-details"),
    ("get_ar_invoices", "Retrieve AR invoices.", "ar-invoices"),
    ("get_company_calendars", "Retrieve company calendar definitions.", "company-calendars"),
    ("get_corrective_preventive_actions", "Retrieve corrective and preventive action records.", "corrective-preventive-actions"),
    ("get_currency_codes", "Retrieve supported currency codes.", "currency-codes"),
    ("get_customer_returns", "Retrieve customer return headers.", "customer-returns"),
    ("get_customer_return_releases", "Retrieve customer return releases.", "customer-return-releases"),
    ("get_customer_return_line_items", "Retrieve customer return line items.", "customer-return-line-items"),
    ("get_departments", "Retrieve department master records.", "departments"),
    ("get_employee_trainings", "Retrieve employee training records.", "employee-trainings"),
    ("get_feedback", "Retrieve feedback records.", "feedback"),
    ("get_gl_codes", "Retrieve GL codes.", "gl-codes"),
    ("get_non_conformances", "Retrieve non-conformance records.", "non-conformances"),
    ("get_operation_codes", "Retrieve operation codes.", "operation-codes"),
    ("get_all_order_line_items", "Retrieve order line items across all orders.", "order-line-items"),
    ("get_reason_codes", "Retrieve reason codes.", "reason-codes"),
    ("get_releases", "Retrieve release schedules across orders.", "releases"),
    ("get_shipping_addresses", "Retrieve shipping addresses for customers.", "shipping-addresses"),
    ("get_tax_codes", "Retrieve tax codes.", "tax-codes"),
    ("get_terms", "Retrieve payment terms codes.", "terms"),
    ("get_tooling_maintenance", "Retrieve tooling maintenance records.", "tooling-maintenance"),
    ("get_user_labels", "Retrieve user labels.", "user-labels"),
    ("get_user_transactions", "Retrieve user transactions.", "user-transactions"),
    ("get_vendor_returns", "Retrieve vendor return headers.", "vendor-returns"),
    ("get_vendor_return_line_items", "Retrieve vendor return line items.", "vendor-returns-line-items"),
    ("get_vendor_return_releases", "Retrieve vendor return releases.", "vendor-returns-releases"),
    ("get_work_center_maintenance", "Retrieve work center maintenance records.", "work-center-maintenance"),
    ("shopview_get_filters", "Retrieve ShopView filter definitions.", "shopview/filters"),
    ("shopview_get_jobs", "Retrieve ShopView job data for dashboards.", "shopview/get-jobs"),
    ("shopview_get_grid_options", "Retrieve saved ShopView grid options.", "shopview/grid-options"),
    ("shopview_kpi_jobs_closed", "Retrieve ShopView KPI data for jobs closed.", "shopview/kpi/jobs-closed"),
    ("shopview_kpi_jobs_in_progress", "Retrieve ShopView KPI data for jobs in progress.", "shopview/kpi/jobs-in-progress"),
    ("shopview_kpi_jobs_on_hold", "Retrieve ShopView KPI data for jobs on hold.", "shopview/kpi/jobs-on-hold"),
    ("shopview_kpi_jobs_past_due", "Retrieve ShopView KPI data for jobs past due.", "shopview/kpi/jobs-past-due"),
    ("shopview_kpi_definitions", "Retrieve KPI definitions for ShopView dashboards.", "shopview/kpi-definitions"),
];

pub fn tools(client: &Jb2Client) -> Vec<ToolSpec> {
    COLLECTIONS
        .iter()
        .map(|&(name, description, path)| collection_tool(client, name, description, path))
        .collect()
}
