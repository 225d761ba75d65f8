//! Preview server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use sitenav_directory::{DirectoryConfig, DirectoryGenerator};
use sitenav_nav::{NavConfig, NavError, NavInjector, SiteFragments};

use crate::watcher::{FileWatcher, WatchEvent};

/// Pages larger than this are served without navigation.
const MAX_PAGE_BYTES: usize = 16 * 1024 * 1024;

/// Quiet period before a burst of file events triggers one regeneration.
const REGENERATE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Configuration for the preview server.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Site root served as static files
    pub root: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Navigation injection settings
    pub nav: NavConfig,

    /// Regenerate the directory page when pages are added or removed
    pub watch: Option<DirectoryConfig>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            port: 4000,
            host: "127.0.0.1".to_string(),
            open: false,
            nav: NavConfig::default(),
            watch: None,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("Site root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error(transparent)]
    Nav(#[from] NavError),

    #[error("Server error: {0}")]
    ServeError(String),
}

/// Shared server state.
struct ServerState {
    injector: NavInjector<SiteFragments>,
}

/// Serves a static site, injecting the shared navigation into every page.
pub struct PreviewServer {
    config: PreviewConfig,
}

impl PreviewServer {
    /// Create a new preview server.
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    /// Build the router: static files with navigation injected into HTML.
    pub fn router(&self) -> Result<Router, ServerError> {
        let state = Arc::new(ServerState {
            injector: NavInjector::new(
                self.config.nav.clone(),
                SiteFragments::new(&self.config.root),
            )?,
        });

        Ok(Router::new()
            .fallback_service(ServeDir::new(&self.config.root))
            .layer(middleware::from_fn_with_state(state, inject_nav)))
    }

    /// Start the preview server.
    pub async fn start(self) -> Result<(), ServerError> {
        if !self.config.root.is_dir() {
            return Err(ServerError::RootNotFound(self.config.root.clone()));
        }

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        // Keep the watcher alive for as long as the server runs
        let _watcher = match &self.config.watch {
            Some(directory) => Some(spawn_regenerator(directory.clone())?),
            None => None,
        };

        let app = self.router()?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        tracing::info!(
            "Serving {} at http://{}",
            self.config.root.display(),
            addr
        );

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()))?;

        Ok(())
    }
}

/// Middleware that injects the navigation into successful HTML responses.
async fn inject_nav(
    State(state): State<Arc<ServerState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let is_get = request.method() == Method::GET;
    let response = next.run(request).await;

    if !is_get || !is_html(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_PAGE_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let page = match String::from_utf8(bytes.to_vec()) {
        Ok(page) => page,
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };

    let html = match state.injector.inject(&page, &path).await {
        Ok(injection) => injection.html,
        Err(NavError::PlaceholderMissing(_)) => {
            tracing::debug!("No navigation placeholder in {}", path);
            page
        }
        Err(e) => {
            tracing::warn!("Navigation not injected into {}: {}", path, e);
            page
        }
    };

    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from(html.len()));
    Response::from_parts(parts, Body::from(html))
}

fn is_html(response: &Response) -> bool {
    response.status().is_success()
        && response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/html"))
}

/// Watch the generator inputs and regenerate the directory page on change.
fn spawn_regenerator(directory: DirectoryConfig) -> Result<FileWatcher, ServerError> {
    let inputs = vec![directory.exclude_list.clone(), directory.template.clone()];
    let ignore: Vec<String> = directory
        .output
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| vec![n.to_string()])
        .unwrap_or_default();

    let (watcher, mut rx) = FileWatcher::new(&directory.pages_dir, &inputs, &ignore)
        .map_err(|e| ServerError::WatchError(e.to_string()))?;

    tracing::info!(
        "Watching {} for page changes",
        directory.pages_dir.display()
    );

    let generator = Arc::new(DirectoryGenerator::new(directory));
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            log_watch_event(&event);

            // Collapse a burst of events into a single run
            tokio::time::sleep(REGENERATE_DEBOUNCE).await;
            while rx.try_recv().is_ok() {}

            let generator = Arc::clone(&generator);
            match tokio::task::spawn_blocking(move || generator.generate()).await {
                Ok(Ok(report)) => {
                    tracing::info!(
                        "Regenerated {} ({} pages)",
                        report.output.display(),
                        report.pages
                    );
                }
                Ok(Err(e)) => tracing::error!("Directory regeneration failed: {}", e),
                Err(e) => tracing::error!("Directory regeneration panicked: {}", e),
            }
        }
    });

    Ok(watcher)
}

fn log_watch_event(event: &WatchEvent) {
    match event {
        WatchEvent::PageAdded(path) => tracing::info!("Page added: {}", path.display()),
        WatchEvent::PageRemoved(path) => tracing::info!("Page removed: {}", path.display()),
        WatchEvent::PageRenamed(path) => tracing::info!("Page renamed: {}", path.display()),
        WatchEvent::InputChanged(path) => tracing::info!("Input changed: {}", path.display()),
    }
}
