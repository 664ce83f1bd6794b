//! MCP server using rmcp SDK
//!
//! Exposes the diary API as MCP tools over stdio.

use crate::dispatcher::DiaryDispatcher;
use crate::tools::list_tools;
use anzu_diary_api_client::ApiClient;
use anzu_diary_core::{DiaryError, LogLevel};
use rmcp::model::*;
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ServerHandler;
use std::sync::Arc;

/// Tools are listed and dispatched by hand rather than through
/// `#[tool_router]` so that required-argument checks run against the same
/// schema the catalog advertises, with one error path for both tools.
#[derive(Debug, Clone)]
pub struct DiaryService {
    dispatcher: Arc<DiaryDispatcher>,
}

impl DiaryService {
    pub fn new(api_client: ApiClient) -> Self {
        Self {
            dispatcher: Arc::new(DiaryDispatcher::new(api_client)),
        }
    }
}

/// Malformed calls map to invalid request / invalid params; anything the
/// backend did maps to internal error. `data.error_code` carries the kind.
pub fn to_error_data(err: &DiaryError) -> ErrorData {
    let code = match err {
        DiaryError::InvalidToolName(_) => ErrorCode::INVALID_REQUEST,
        DiaryError::MissingArgument(_) | DiaryError::InvalidArgument(_) => {
            ErrorCode::INVALID_PARAMS
        }
        _ => ErrorCode::INTERNAL_ERROR,
    };
    ErrorData::new(
        code,
        err.to_string(),
        Some(serde_json::json!({ "error_code": err.error_code() })),
    )
}

fn log_failure(tool: &str, err: &DiaryError) {
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(tool = %tool, error = %err, "Tool call rejected"),
        LogLevel::Warn => tracing::warn!(tool = %tool, error = %err, "Tool call failed"),
        LogLevel::Error => tracing::error!(tool = %tool, error = %err, "Tool call failed"),
    }
}

impl ServerHandler for DiaryService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "anzu-diary-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
            instructions: Some(
                "Anzu diary MCP: add-note appends an entry for a date, get-note lists a year's \
                 entries. Set DIARY_API_BASE."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let tool = request.name.as_ref();
        tracing::info!(tool = %tool, "Handling tool call");

        match self
            .dispatcher
            .invoke(tool, request.arguments.as_ref())
            .await
        {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(err) => {
                log_failure(tool, &err);
                Err(to_error_data(&err))
            }
        }
    }
}
