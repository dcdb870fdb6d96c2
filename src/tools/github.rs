//! The GitHub tool table: createBranch, createOrUpdateFile, createPullRequest.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{ToolError, ToolResult};
use crate::github::{FileWrite, NewPullRequest};

use super::{boxed_tool_future, ToolContext, ToolDefinition};

/// The fixed tool table, in advertisement order. Consumed once at startup by
/// [`ToolRegistry::from_definitions`](super::ToolRegistry::from_definitions).
pub fn definitions() -> Vec<ToolDefinition> {
    vec![create_branch(), create_or_update_file(), create_pull_request()]
}

fn required_str(args: &Value, key: &str) -> ToolResult<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ToolError::InvalidArguments(format!("missing required argument: '{key}'")))
}

fn optional_str(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

fn create_branch() -> ToolDefinition {
    ToolDefinition {
        name: "createBranch".to_string(),
        description: "Create a branch from a base branch".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "owner": { "type": "string" },
                "repo": { "type": "string" },
                "branch": { "type": "string" },
                "from_branch": { "type": "string" }
            },
            "required": ["owner", "repo", "branch"]
        }),
        handler: Arc::new(|args: Value, ctx: ToolContext| {
            boxed_tool_future(async move {
                let owner = required_str(&args, "owner")?;
                let repo = required_str(&args, "repo")?;
                let branch = required_str(&args, "branch")?;

                let base = match optional_str(&args, "from_branch") {
                    Some(base) => base,
                    None => ctx.github.default_branch(&owner, &repo).await?,
                };
                let sha = ctx
                    .github
                    .ref_sha(&owner, &repo, &format!("heads/{base}"))
                    .await?;

                match ctx
                    .github
                    .create_ref(&owner, &repo, &format!("refs/heads/{branch}"), &sha)
                    .await
                {
                    Ok(()) => Ok(json!({ "ok": true, "created": true })),
                    // 422 means the ref already exists; report success so the
                    // operation is effectively idempotent.
                    Err(err) if err.is_remote_conflict() => {
                        tracing::debug!("branch '{branch}' already exists in {owner}/{repo}");
                        Ok(json!({ "ok": true, "existing": true }))
                    }
                    Err(err) => Err(err),
                }
            })
        }),
    }
}

fn create_or_update_file() -> ToolDefinition {
    ToolDefinition {
        name: "createOrUpdateFile".to_string(),
        description: "Create or update a file on a branch".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "owner": { "type": "string" },
                "repo": { "type": "string" },
                "path": { "type": "string" },
                "content": { "type": "string" },
                "message": { "type": "string" },
                "branch": { "type": "string" }
            },
            "required": ["owner", "repo", "path", "content", "message", "branch"]
        }),
        handler: Arc::new(|args: Value, ctx: ToolContext| {
            boxed_tool_future(async move {
                let owner = required_str(&args, "owner")?;
                let repo = required_str(&args, "repo")?;
                let path = required_str(&args, "path")?;
                let content = required_str(&args, "content")?;
                let message = required_str(&args, "message")?;
                let branch = required_str(&args, "branch")?;

                // Discover the existing blob's sha so the write becomes an
                // update. Any lookup failure degrades to a create.
                let sha = ctx
                    .github
                    .content_sha(&owner, &repo, &path, &branch)
                    .await
                    .unwrap_or(None);

                let commit = ctx
                    .github
                    .write_content(FileWrite {
                        owner,
                        repo,
                        path,
                        message,
                        content: BASE64.encode(content.as_bytes()),
                        branch,
                        sha,
                    })
                    .await?;

                Ok(json!({
                    "path": commit.path,
                    "commit": commit.commit_sha,
                    "url": commit.html_url,
                }))
            })
        }),
    }
}

fn create_pull_request() -> ToolDefinition {
    ToolDefinition {
        name: "createPullRequest".to_string(),
        description: "Open a pull request".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "owner": { "type": "string" },
                "repo": { "type": "string" },
                "title": { "type": "string" },
                "body": { "type": "string" },
                "head": { "type": "string" },
                "base": { "type": "string" },
                "draft": { "type": "boolean" }
            },
            "required": ["owner", "repo", "title", "head", "base"]
        }),
        handler: Arc::new(|args: Value, ctx: ToolContext| {
            boxed_tool_future(async move {
                let pr = NewPullRequest {
                    owner: required_str(&args, "owner")?,
                    repo: required_str(&args, "repo")?,
                    title: required_str(&args, "title")?,
                    body: optional_str(&args, "body"),
                    head: required_str(&args, "head")?,
                    base: required_str(&args, "base")?,
                    draft: args.get("draft").and_then(Value::as_bool).unwrap_or(false),
                };
                let created = ctx.github.create_pull_request(pr).await?;
                Ok(json!({ "number": created.number, "url": created.html_url }))
            })
        }),
    }
}
