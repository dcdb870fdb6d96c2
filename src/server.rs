//! HTTP surface: dispatch and discovery endpoints over axum.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use crate::error::{ToolError, ToolResult};
use crate::github::RepoClient;
use crate::tools::ToolRegistry;

pub mod discovery;
pub mod dispatch;


/// Identity marker advertised on the discovery endpoints.
pub const SERVER_NAME: &str = "mcp-github";

/// Invocation bodies larger than this are rejected before parsing.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub(crate) struct ServerState {
    pub(crate) registry: ToolRegistry,
    pub(crate) github: Arc<dyn RepoClient>,
}

/// A running server. Dropping it (or calling [`Server::shutdown`]) stops the
/// accept loop gracefully.
pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Server {
    /// Bind `addr` and start serving the registry. The registry is frozen
    /// here: the state is shared immutably across all request tasks.
    pub async fn bind(
        addr: SocketAddr,
        registry: ToolRegistry,
        github: Arc<dyn RepoClient>,
    ) -> ToolResult<Self> {
        let state = Arc::new(ServerState { registry, github });
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        let app = Router::new()
            .route("/health", get(health))
            .route("/capabilities", get(discovery::capabilities))
            .route("/tools/list", get(discovery::list_tools))
            .route("/tools/call", post(dispatch::call_tool))
            .with_state(state)
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(cors);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ToolError::Config(format!("failed to bind {addr}: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ToolError::Config(format!("failed to read local addr: {e}")))?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
        })
    }

    /// The address actually bound (resolves port 0).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal the accept loop to stop. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn health() -> &'static str {
    "ok"
}
