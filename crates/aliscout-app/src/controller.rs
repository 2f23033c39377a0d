use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::handlers::router;
use crate::state::AppState;

/// Server lifecycle: serving and graceful shutdown
pub struct AppController {
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Serve until `shutdown` is called, then drain in-flight requests
    pub async fn serve(&self, listener: TcpListener) -> anyhow::Result<()> {
        let token = self.cancel_token.child_token();

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
