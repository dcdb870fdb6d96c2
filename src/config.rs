//! Process configuration read from the environment.

use crate::error::{ToolError, ToolResult};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Everything the server needs from the environment, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub access token. Required; the process refuses to start without it.
    pub github_token: String,
    /// Port to listen on (`PORT`, default 8080).
    pub port: u16,
    /// GitHub API base URL (`GITHUB_API_URL`), overridable for Enterprise
    /// hosts and tests.
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> ToolResult<Self> {
        let github_token = std::env::var("GITHUB_TOKEN")
            .map_err(|_| ToolError::Config("missing env: GITHUB_TOKEN".to_string()))?;
        if github_token.is_empty() {
            return Err(ToolError::Config("missing env: GITHUB_TOKEN".to_string()));
        }

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ToolError::Config(format!("PORT must be a number, got '{raw}'")))?,
            Err(_) => DEFAULT_PORT,
        };

        let api_url = std::env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Config {
            github_token,
            port,
            api_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var mutation is process-global, so these tests set every variable
    // they depend on and run serially under `cargo test -- --test-threads=1`
    // semantics via distinct variable names where possible. The required
    // token check is the one behavior worth pinning.

    #[test]
    fn default_api_url_has_no_trailing_slash() {
        assert!(!DEFAULT_API_URL.ends_with('/'));
    }

    #[test]
    fn missing_token_is_a_config_error() {
        std::env::remove_var("GITHUB_TOKEN");
        let err = Config::from_env().expect_err("token is required");
        match err {
            ToolError::Config(msg) => assert!(msg.contains("GITHUB_TOKEN")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
