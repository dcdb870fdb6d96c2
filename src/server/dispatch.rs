//! POST /tools/call — the invocation endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::ToolError;
use crate::tools::ToolContext;

use super::ServerState;

/// Incoming invocation: a tool name plus a loosely-typed argument bag.
/// Transient; dropped once the handler returns.
#[derive(Debug, Deserialize)]
pub(crate) struct InvocationRequest {
    name: Option<String>,
    arguments: Option<serde_json::Value>,
}

/// Look the tool up, run its handler with the argument bag, and translate
/// the outcome. Arguments are not checked against the advertised schema
/// here; each handler destructures its own.
pub(crate) async fn call_tool(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<InvocationRequest>,
) -> Response {
    let name = request.name.unwrap_or_default();
    let Some(tool) = state.registry.lookup(&name) else {
        let message = ToolError::UnknownTool(name).to_string();
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response();
    };

    let arguments = request.arguments.unwrap_or_else(|| json!({}));
    let context = ToolContext {
        github: state.github.clone(),
    };

    match (tool.handler)(arguments, context).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => {
            tracing::warn!("tool '{name}' failed: {err}");
            let status = StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, err.to_string()).into_response()
        }
    }
}
