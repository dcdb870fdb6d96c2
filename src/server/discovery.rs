//! Read-only discovery endpoints exposing the registry's contents.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::{ServerState, SERVER_NAME};

#[derive(Serialize)]
pub(crate) struct Capabilities {
    name: &'static str,
    tools: Vec<String>,
}

/// Descriptor as advertised to clients. Handlers are never serialized.
#[derive(Serialize)]
pub(crate) struct ToolDescriptor {
    name: String,
    description: String,
    #[serde(rename = "inputSchema")]
    input_schema: serde_json::Value,
}

#[derive(Serialize)]
pub(crate) struct ToolListing {
    name: &'static str,
    tools: Vec<ToolDescriptor>,
}

/// GET /capabilities — identity marker plus tool names in registration order.
pub(crate) async fn capabilities(State(state): State<Arc<ServerState>>) -> Json<Capabilities> {
    Json(Capabilities {
        name: SERVER_NAME,
        tools: state.registry.names().map(str::to_string).collect(),
    })
}

/// GET /tools/list — full descriptors with schemas, in registration order.
pub(crate) async fn list_tools(State(state): State<Arc<ServerState>>) -> Json<ToolListing> {
    let tools = state
        .registry
        .iter()
        .map(|tool| ToolDescriptor {
            name: tool.name.clone(),
            description: tool.description.clone(),
            input_schema: tool.input_schema.clone(),
        })
        .collect();
    Json(ToolListing {
        name: SERVER_NAME,
        tools,
    })
}
