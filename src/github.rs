//! GitHub REST API client adapter.
//!
//! [`RepoClient`] is the exact capability surface the tools consume; the
//! production implementation [`GitHubClient`] speaks GitHub REST v3 over
//! `reqwest`. Tests substitute their own `RepoClient` to avoid the network.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ToolError, ToolResult};

#[cfg(test)]
pub mod mock;

/// A single file write against a branch. Presence of `sha` signals update
/// semantics to GitHub, absence signals create.
#[derive(Debug, Clone)]
pub struct FileWrite {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub message: String,
    /// File content, already base64-encoded.
    pub content: String,
    pub branch: String,
    pub sha: Option<String>,
}

/// Commit produced by a file write.
#[derive(Debug, Clone)]
pub struct FileCommit {
    pub path: String,
    pub commit_sha: String,
    pub html_url: String,
}

/// Parameters for opening a pull request.
#[derive(Debug, Clone)]
pub struct NewPullRequest {
    pub owner: String,
    pub repo: String,
    pub title: String,
    pub body: Option<String>,
    pub head: String,
    pub base: String,
    pub draft: bool,
}

#[derive(Debug, Clone)]
pub struct CreatedPullRequest {
    pub number: u64,
    pub html_url: String,
}

/// Capability surface of the remote repository host.
///
/// Stateless and shared read-only across concurrent tool invocations.
#[async_trait]
pub trait RepoClient: Send + Sync {
    /// Default branch of the repository.
    async fn default_branch(&self, owner: &str, repo: &str) -> ToolResult<String>;

    /// Commit SHA a ref currently points at. `git_ref` is the short form,
    /// e.g. `heads/main`.
    async fn ref_sha(&self, owner: &str, repo: &str, git_ref: &str) -> ToolResult<String>;

    /// Create a new ref pointing at `sha`. `git_ref` is the full form,
    /// e.g. `refs/heads/feature`. GitHub answers 422 when the ref exists.
    async fn create_ref(&self, owner: &str, repo: &str, git_ref: &str, sha: &str)
        -> ToolResult<()>;

    /// Blob SHA of the file at `path` on `git_ref`, or `None` when the path
    /// does not exist or resolves to a directory listing.
    async fn content_sha(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> ToolResult<Option<String>>;

    /// Create or update a file in a single commit.
    async fn write_content(&self, write: FileWrite) -> ToolResult<FileCommit>;

    /// Open a pull request.
    async fn create_pull_request(&self, pr: NewPullRequest) -> ToolResult<CreatedPullRequest>;
}

const USER_AGENT: &str = concat!("mcp-github/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// Production [`RepoClient`] over the GitHub REST v3 API.
pub struct GitHubClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl GitHubClient {
    /// Build a client against `base_url` (no trailing slash) authenticating
    /// with `token`.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> ToolResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ToolError::Config(format!("failed to build http client: {e}")))?;
        Ok(GitHubClient {
            http,
            token: token.into(),
            base_url: base_url.into(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Send a request and parse the JSON body, mapping non-success statuses
    /// to [`ToolError::Remote`] with GitHub's own `message` when present.
    async fn send(&self, req: reqwest::RequestBuilder) -> ToolResult<Value> {
        let response = req
            .send()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<Value>().await {
                Ok(body) => body
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| status.to_string()),
                Err(_) => status.to_string(),
            };
            return Err(ToolError::Remote {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| ToolError::Transport(format!("failed to read body: {e}")))
    }
}

/// Percent-encode a single URL path segment. A raw `#`, `?`, or `%` in an
/// owner, repo, or file name would otherwise truncate or corrupt the
/// request URL.
fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Percent-encode a multi-segment path (file path or ref), keeping its `/`
/// separators intact.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn str_field(value: &Value, pointer: &str) -> ToolResult<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ToolError::Transport(format!("malformed GitHub response: missing {pointer}")))
}

#[async_trait]
impl RepoClient for GitHubClient {
    async fn default_branch(&self, owner: &str, repo: &str) -> ToolResult<String> {
        let body = self
            .send(self.request(
                reqwest::Method::GET,
                &format!(
                    "/repos/{}/{}",
                    encode_segment(owner),
                    encode_segment(repo)
                ),
            ))
            .await?;
        str_field(&body, "/default_branch")
    }

    async fn ref_sha(&self, owner: &str, repo: &str, git_ref: &str) -> ToolResult<String> {
        let body = self
            .send(self.request(
                reqwest::Method::GET,
                &format!(
                    "/repos/{}/{}/git/ref/{}",
                    encode_segment(owner),
                    encode_segment(repo),
                    encode_path(git_ref)
                ),
            ))
            .await?;
        str_field(&body, "/object/sha")
    }

    async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        sha: &str,
    ) -> ToolResult<()> {
        self.send(
            self.request(
                reqwest::Method::POST,
                &format!(
                    "/repos/{}/{}/git/refs",
                    encode_segment(owner),
                    encode_segment(repo)
                ),
            )
            .json(&serde_json::json!({ "ref": git_ref, "sha": sha })),
        )
        .await?;
        Ok(())
    }

    async fn content_sha(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> ToolResult<Option<String>> {
        let body = self
            .send(
                self.request(
                    reqwest::Method::GET,
                    &format!(
                        "/repos/{}/{}/contents/{}",
                        encode_segment(owner),
                        encode_segment(repo),
                        encode_path(path)
                    ),
                )
                .query(&[("ref", git_ref)]),
            )
            .await?;
        // A directory answers with an array; only a single file carries a sha.
        Ok(body
            .as_object()
            .and_then(|obj| obj.get("sha"))
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    async fn write_content(&self, write: FileWrite) -> ToolResult<FileCommit> {
        let mut payload = serde_json::json!({
            "message": write.message,
            "content": write.content,
            "branch": write.branch,
        });
        // Absence of `sha` is what signals create semantics, so it must be
        // omitted entirely rather than sent as null.
        if let Some(sha) = &write.sha {
            payload["sha"] = Value::String(sha.clone());
        }
        let body = self
            .send(
                self.request(
                    reqwest::Method::PUT,
                    &format!(
                        "/repos/{}/{}/contents/{}",
                        encode_segment(&write.owner),
                        encode_segment(&write.repo),
                        encode_path(&write.path)
                    ),
                )
                .json(&payload),
            )
            .await?;
        Ok(FileCommit {
            path: str_field(&body, "/content/path")?,
            commit_sha: str_field(&body, "/commit/sha")?,
            html_url: str_field(&body, "/content/html_url")?,
        })
    }

    async fn create_pull_request(&self, pr: NewPullRequest) -> ToolResult<CreatedPullRequest> {
        let mut payload = serde_json::json!({
            "title": pr.title,
            "head": pr.head,
            "base": pr.base,
            "draft": pr.draft,
        });
        // Omitted entirely when absent, same as `sha` on file writes.
        if let Some(text) = &pr.body {
            payload["body"] = Value::String(text.clone());
        }
        let body = self
            .send(
                self.request(
                    reqwest::Method::POST,
                    &format!(
                        "/repos/{}/{}/pulls",
                        encode_segment(&pr.owner),
                        encode_segment(&pr.repo)
                    ),
                )
                .json(&payload),
            )
            .await?;
        let number = body
            .get("number")
            .and_then(Value::as_u64)
            .ok_or_else(|| ToolError::Transport("malformed GitHub response: missing /number".to_string()))?;
        Ok(CreatedPullRequest {
            number,
            html_url: str_field(&body, "/html_url")?,
        })
    }
}
