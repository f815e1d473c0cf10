//! MCP protocol surface over the tool registry.

use crate::policy::MutationPolicy;
use crate::registry::{RegistryError, ToolRegistry};
use crate::tools;
use jobboss2_client::Jb2Client;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorData as McpError, Implementation, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::{Map, Value};
use std::sync::Arc;

/// JobBOSS2 MCP server: the full tool surface behind one registry.
#[derive(Clone)]
pub struct Jb2McpServer {
    registry: Arc<ToolRegistry>,
}

impl Jb2McpServer {
    /// Build the server with every tool registered.
    ///
    /// # Errors
    ///
    /// Fails on duplicate tool names or invalid input schemas.
    pub fn new(client: &Jb2Client, policy: MutationPolicy) -> Result<Self, RegistryError> {
        let mut registry = ToolRegistry::new(policy);
        registry.register_all(tools::all_tools(client))?;
        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}

impl ServerHandler for Jb2McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "jobboss2-mcp".into(),
                title: Some("JobBOSS2 MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Tools for the JobBOSS2 manufacturing ERP: orders, quotes, customers, \
                 inventory, production, employees, and reports. List tools support \
                 'fields', 'sort', 'skip', 'take', and filter expressions like \
                 status[in]=Open|InProgress."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.registry.tools(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(Value::Object)
            .unwrap_or_else(|| Value::Object(Map::new()));
        Ok(self.registry.dispatch(&request.name, args).await)
    }
}
