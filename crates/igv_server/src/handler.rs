//! MCP server handler.
//!
//! Implements `rmcp::ServerHandler` with the tools capability only. Both
//! tool operations go through [`Bridge::handle`].

use crate::dispatch::{Bridge, BridgeReply, BridgeRequest, ToolDescriptor};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ErrorData as McpError;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Name the server reports to MCP clients
pub const SERVER_NAME: &str = "igv-mcp";

const INSTRUCTIONS: &str = "Controls a running IGV (Integrative Genomics Viewer) \
instance through its batch command port. Each tool sends one batch command; \
responses beginning with 'Error: ' come from IGV or the connection to it.";

/// The IGV MCP server handler
#[derive(Debug, Clone)]
pub struct IgvServerHandler {
    bridge: Arc<Bridge>,
}

impl IgvServerHandler {
    /// Create a handler serving `bridge`
    #[must_use]
    pub fn new(bridge: Bridge) -> Self {
        Self {
            bridge: Arc::new(bridge),
        }
    }

    /// The underlying dispatcher
    #[must_use]
    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    /// Every registered tool as an MCP tool
    pub async fn tools(&self) -> Vec<Tool> {
        match self.bridge.handle(BridgeRequest::ListTools).await {
            BridgeReply::Tools(tools) => tools.into_iter().map(to_mcp_tool).collect(),
            BridgeReply::Call(_) => Vec::new(),
        }
    }

    /// Run one tool call and wrap the reply as an MCP result
    pub async fn call(&self, name: &str, arguments: Option<Map<String, Value>>) -> CallToolResult {
        let request = BridgeRequest::CallTool {
            name: name.to_string(),
            arguments: arguments.unwrap_or_default(),
        };

        match self.bridge.handle(request).await {
            BridgeReply::Call(Ok(text)) => CallToolResult::success(vec![Content::text(text)]),
            BridgeReply::Call(Err(err)) => {
                tracing::warn!(tool = err.tool(), error = %err, "Tool call failed");
                CallToolResult::error(vec![Content::text(err.to_string())])
            }
            BridgeReply::Tools(_) => CallToolResult::error(vec![Content::text(format!(
                "Error executing tool '{}': unexpected reply",
                name
            ))]),
        }
    }
}

fn to_mcp_tool(descriptor: ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.name,
        descriptor.description,
        Arc::new(descriptor.input_schema),
    )
}

impl rmcp::ServerHandler for IgvServerHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools().await))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.call(&request.name, request.arguments).await)
    }
}
