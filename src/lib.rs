//! mcp-github: an HTTP tool server exposing GitHub repository mutations
//! (branch creation, file writes, pull requests) as named, schema-described
//! tools behind a dispatch endpoint.

pub mod config;
pub mod error;
pub mod github;
pub mod server;
pub mod tools;

pub use crate::config::Config;
pub use crate::error::{ToolError, ToolResult};
pub use crate::github::{GitHubClient, RepoClient};
pub use crate::server::{Server, SERVER_NAME};
pub use crate::tools::{ToolDefinition, ToolRegistry};
