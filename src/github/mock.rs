//! In-memory [`RepoClient`] used by tool and server tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ToolError, ToolResult};

use super::{CreatedPullRequest, FileCommit, FileWrite, NewPullRequest, RepoClient};

/// One recorded adapter call, with enough detail to assert on arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    DefaultBranch(String),
    RefSha(String, String),
    CreateRef(String, String, String),
    ContentSha(String, String, String),
    WriteContent(String, String),
    CreatePullRequest(String, String),
}

/// Scriptable fake remote: records every call, answers with canned data,
/// and can be told to fail specific operations.
///
/// Refs created through it are remembered, so a second identical
/// `create_ref` answers 422 the way GitHub does.
#[derive(Default)]
pub struct MockRepoClient {
    calls: Mutex<Vec<MockCall>>,
    existing_refs: Mutex<HashSet<String>>,
    content_sha: Mutex<Option<String>>,
    content_lookup_fails: Mutex<bool>,
    create_ref_error: Mutex<Option<ToolError>>,
    write_error: Mutex<Option<ToolError>>,
    writes: Mutex<Vec<FileWrite>>,
    pull_requests: Mutex<Vec<NewPullRequest>>,
    latency: Mutex<Option<Duration>>,
}

impl MockRepoClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_content_sha(&self, sha: &str) {
        *self.content_sha.lock().unwrap() = Some(sha.to_string());
    }

    pub fn fail_content_lookup(&self) {
        *self.content_lookup_fails.lock().unwrap() = true;
    }

    pub fn fail_create_ref_with_conflict(&self) {
        self.fail_create_ref_with(ToolError::Remote {
            status: 422,
            message: "Reference already exists".to_string(),
        });
    }

    pub fn fail_create_ref_with(&self, err: ToolError) {
        *self.create_ref_error.lock().unwrap() = Some(err);
    }

    pub fn fail_write_with(&self, err: ToolError) {
        *self.write_error.lock().unwrap() = Some(err);
    }

    /// Delay every call, forcing concurrent invocations to interleave.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_write(&self) -> Option<FileWrite> {
        self.writes.lock().unwrap().last().cloned()
    }

    pub fn last_pull_request(&self) -> Option<NewPullRequest> {
        self.pull_requests.lock().unwrap().last().cloned()
    }

    async fn record(&self, call: MockCall) {
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RepoClient for MockRepoClient {
    async fn default_branch(&self, owner: &str, repo: &str) -> ToolResult<String> {
        self.record(MockCall::DefaultBranch(format!("{owner}/{repo}")))
            .await;
        Ok("main".to_string())
    }

    async fn ref_sha(&self, owner: &str, repo: &str, git_ref: &str) -> ToolResult<String> {
        self.record(MockCall::RefSha(
            format!("{owner}/{repo}"),
            git_ref.to_string(),
        ))
        .await;
        Ok("sha-main".to_string())
    }

    async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        sha: &str,
    ) -> ToolResult<()> {
        self.record(MockCall::CreateRef(
            format!("{owner}/{repo}"),
            git_ref.to_string(),
            sha.to_string(),
        ))
        .await;
        if let Some(err) = self.create_ref_error.lock().unwrap().clone() {
            return Err(err);
        }
        let key = format!("{owner}/{repo}:{git_ref}");
        if !self.existing_refs.lock().unwrap().insert(key) {
            return Err(ToolError::Remote {
                status: 422,
                message: "Reference already exists".to_string(),
            });
        }
        Ok(())
    }

    async fn content_sha(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> ToolResult<Option<String>> {
        self.record(MockCall::ContentSha(
            format!("{owner}/{repo}"),
            path.to_string(),
            git_ref.to_string(),
        ))
        .await;
        if *self.content_lookup_fails.lock().unwrap() {
            return Err(ToolError::Remote {
                status: 404,
                message: "Not Found".to_string(),
            });
        }
        Ok(self.content_sha.lock().unwrap().clone())
    }

    async fn write_content(&self, write: FileWrite) -> ToolResult<FileCommit> {
        self.record(MockCall::WriteContent(
            format!("{}/{}", write.owner, write.repo),
            write.path.clone(),
        ))
        .await;
        if let Some(err) = self.write_error.lock().unwrap().clone() {
            return Err(err);
        }
        let commit = FileCommit {
            path: write.path.clone(),
            commit_sha: "new-commit-sha".to_string(),
            html_url: format!(
                "https://github.com/{}/{}/blob/{}/{}",
                write.owner, write.repo, write.branch, write.path
            ),
        };
        self.writes.lock().unwrap().push(write);
        Ok(commit)
    }

    async fn create_pull_request(&self, pr: NewPullRequest) -> ToolResult<CreatedPullRequest> {
        self.record(MockCall::CreatePullRequest(
            format!("{}/{}", pr.owner, pr.repo),
            pr.title.clone(),
        ))
        .await;
        let number = self.pull_requests.lock().unwrap().len() as u64 + 1;
        let created = CreatedPullRequest {
            number,
            html_url: format!("https://github.com/{}/{}/pull/{number}", pr.owner, pr.repo),
        };
        self.pull_requests.lock().unwrap().push(pr);
        Ok(created)
    }
}
