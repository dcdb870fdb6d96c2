use std::fmt;

/// Unified error type for the mcp-github crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Required process configuration is missing or malformed.
    Config(String),
    /// The requested tool name is not present in the registry.
    UnknownTool(String),
    /// A handler could not destructure its arguments.
    InvalidArguments(String),
    /// The GitHub API answered with a non-success status.
    Remote { status: u16, message: String },
    /// A network-level failure before any HTTP status was produced.
    Transport(String),
}

impl ToolError {
    /// HTTP status the dispatch layer should answer with for this error.
    ///
    /// Remote errors reuse the upstream status when it is a valid HTTP code;
    /// anything else falls back to 500.
    pub fn http_status(&self) -> u16 {
        match self {
            ToolError::UnknownTool(_) | ToolError::InvalidArguments(_) => 400,
            ToolError::Remote { status, .. } if (100..=599).contains(status) => *status,
            _ => 500,
        }
    }

    /// True when this is a GitHub "unprocessable" answer (422), which ref
    /// creation treats as "branch already exists".
    pub fn is_remote_conflict(&self) -> bool {
        matches!(self, ToolError::Remote { status: 422, .. })
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::Config(msg) => write!(f, "configuration error: {msg}"),
            ToolError::UnknownTool(name) => write!(f, "Unknown tool: {name}"),
            ToolError::InvalidArguments(msg) => write!(f, "invalid arguments: {msg}"),
            ToolError::Remote { message, .. } => write!(f, "{message}"),
            ToolError::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for ToolError {}

/// Result type alias using [`ToolError`].
pub type ToolResult<T> = Result<T, ToolError>;
