//! Tool definitions and the name-keyed registry.

pub mod github;
pub mod registry;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::ToolResult;
use crate::github::RepoClient;

pub use registry::ToolRegistry;

/// Handler type: JSON argument bag + shared context in, JSON value out.
pub type ToolHandler = Arc<
    dyn Fn(
            serde_json::Value,
            ToolContext,
        ) -> Pin<Box<dyn Future<Output = ToolResult<serde_json::Value>> + Send>>
        + Send
        + Sync,
>;

pub fn boxed_tool_future<F>(
    future: F,
) -> Pin<Box<dyn Future<Output = ToolResult<serde_json::Value>> + Send>>
where
    F: Future<Output = ToolResult<serde_json::Value>> + Send + 'static,
{
    Box::pin(future)
}

/// Shared context handed to every handler invocation.
///
/// The client is stateless, so concurrent invocations share it read-only.
#[derive(Clone)]
pub struct ToolContext {
    pub github: Arc<dyn RepoClient>,
}

/// Complete tool definition: identity, discovery metadata, and handler.
///
/// Immutable once registered; the registry owns it for the process lifetime.
#[derive(Clone)]
pub struct ToolDefinition {
    /// Unique, stable identifier.
    pub name: String,
    /// Human-readable description advertised on `/tools/list`.
    pub description: String,
    /// JSON-Schema-shaped input contract. Advertised for discovery only;
    /// handlers destructure and validate their own arguments.
    pub input_schema: serde_json::Value,
    /// The async handler to execute.
    pub handler: ToolHandler,
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}
