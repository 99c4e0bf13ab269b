//! Web server hosting the board.
//!
//! The fetch session starts with the server; each page request renders
//! whatever the view holds at that moment, so the loading indicator and late
//! results are visible. `POST /refresh` discards the view and fetches again.

mod handlers;
mod routes;

pub use routes::create_router;

use std::sync::Arc;

use crate::config::Settings;
use crate::render::PageOptions;
use crate::session::{FetchSession, ViewHandle};

/// Seconds between self-reloads of the page while loading.
const LOADING_REFRESH_SECS: u32 = 2;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub view: ViewHandle,
    pub session: Arc<FetchSession>,
    pub page_options: PageOptions,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self::with_session(settings.fetch_session()?))
    }

    pub fn with_session(session: FetchSession) -> Self {
        Self {
            view: ViewHandle::new(),
            session: Arc::new(session),
            page_options: PageOptions {
                auto_refresh: Some(LOADING_REFRESH_SECS),
                refresh_button: true,
            },
        }
    }

    /// Reset the view and fetch in the background.
    pub async fn start_fetch(&self) {
        // Detached: the task ends when both requests settle.
        let _ = self.session.clone().spawn(self.view.clone()).await;
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    state.start_fetch().await;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
