//! MCP (Model Context Protocol) server implementation
//!
//! JSON-RPC over stdio for AI tool integration.

pub mod handler;
pub mod protocol;
pub mod tools;

pub use handler::{error_text, AffiliateHandler};
pub use protocol::{
    codes, methods, InitializeResult, McpHandler, McpRequest, McpResponse, McpServer,
    ToolCallResult,
};
pub use tools::{get_tool_definitions, ProductLinkArgs, TOOL_DEFINITIONS};
