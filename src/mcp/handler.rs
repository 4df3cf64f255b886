//! Request dispatch for the affiliate tools

use async_trait::async_trait;
use serde_json::{json, Value};

use super::protocol::{
    codes, methods, InitializeResult, McpError, McpHandler, McpRequest, McpResponse,
    ToolCallResult,
};
use super::tools::{
    get_tool_definitions, ProductLinkArgs, GENERATE_AFFILIATE_HTML, GENERATE_AFFILIATE_LINK,
};
use crate::compose::HtmlComposer;
use crate::config::AffiliateConfig;
use crate::error::{render_chain, AffiliateError, Result};
use crate::link::LinkGenerator;
use crate::scrape::PageScraper;

/// MCP request handler
#[derive(Debug, Clone)]
pub struct AffiliateHandler {
    links: LinkGenerator,
    composer: HtmlComposer,
}

impl AffiliateHandler {
    pub fn new(config: &AffiliateConfig) -> Result<Self> {
        let links = LinkGenerator::new(config);
        let scraper = PageScraper::new(config)?;
        Ok(Self {
            composer: HtmlComposer::new(links.clone(), scraper),
            links,
        })
    }

    /// Run one tool. Protocol-level problems (unknown tool, malformed
    /// arguments) are returned as `Err`; tool failures become error results.
    pub async fn handle_tool_call(
        &self,
        name: &str,
        arguments: Value,
    ) -> std::result::Result<ToolCallResult, McpError> {
        if name != GENERATE_AFFILIATE_LINK && name != GENERATE_AFFILIATE_HTML {
            return Err(McpError {
                code: codes::METHOD_NOT_FOUND,
                message: format!("Unknown tool: {}", name),
                data: None,
            });
        }

        let args: ProductLinkArgs = serde_json::from_value(arguments).map_err(|e| McpError {
            code: codes::INVALID_PARAMS,
            message: format!("Invalid arguments: {}", e),
            data: None,
        })?;

        let outcome = match name {
            GENERATE_AFFILIATE_LINK => self
                .links
                .generate_link(&args.url, args.tag.as_deref())
                .map_err(AffiliateError::link_generation),
            _ => {
                self.composer
                    .compose_html(&args.url, args.tag.as_deref())
                    .await
            }
        };

        Ok(match outcome {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => {
                tracing::warn!(tool = name, code = e.code(), "Tool call failed: {}", render_chain(&e));
                ToolCallResult::error(error_text(&e))
            }
        })
    }
}

/// User-facing text for a failed tool call
///
/// Messages are English throughout; the chain reads outermost layer first,
/// e.g. `Error: Link generation failed: Invalid input: ...`.
pub fn error_text(err: &AffiliateError) -> String {
    format!("Error: {}", render_chain(err))
}

#[async_trait]
impl McpHandler for AffiliateHandler {
    async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        if request.is_notification() {
            if request.method != methods::INITIALIZED {
                tracing::debug!("Ignoring notification: {}", request.method);
            }
            return None;
        }

        let response = match request.method.as_str() {
            methods::INITIALIZE => {
                let result = InitializeResult::default();
                McpResponse::success(request.id, json!(result))
            }
            methods::PING => McpResponse::success(request.id, json!({})),
            methods::LIST_TOOLS => {
                let tools = get_tool_definitions();
                McpResponse::success(request.id, json!({"tools": tools}))
            }
            methods::LIST_RESOURCES => McpResponse::success(request.id, json!({"resources": []})),
            methods::CALL_TOOL => {
                let name = request
                    .params
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                let arguments = request
                    .params
                    .get("arguments")
                    .cloned()
                    .unwrap_or(json!({}));

                match self.handle_tool_call(name, arguments).await {
                    Ok(tool_result) => McpResponse::success(request.id, json!(tool_result)),
                    Err(error) => McpResponse {
                        jsonrpc: "2.0".to_string(),
                        id: request.id,
                        result: None,
                        error: Some(error),
                    },
                }
            }
            _ => McpResponse::error(
                request.id,
                codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        Some(response)
    }
}
