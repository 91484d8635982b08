//! Development server implementation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::sync::{mpsc, RwLock};
use tower_http::services::ServeDir;

use folio_static::{BuildConfig, SiteBuilder};

use crate::reload::{
    next_message, reload_client_script, ReloadHub, ReloadMessage, RELOAD_SCRIPT_PATH,
    RELOAD_SOCKET_PATH,
};
use crate::watcher::{FileWatcher, WatchEvent, WatchRoots};

/// Quiet period before a burst of file events triggers one rebuild.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Reloads the build configuration after the config file changes.
pub type ConfigLoader = Arc<dyn Fn() -> Result<BuildConfig, String> + Send + Sync>;

/// Configuration for the development server.
#[derive(Clone)]
pub struct DevServerConfig {
    /// Site build settings; the output directory is what gets served
    pub build: BuildConfig,

    /// Config file to watch
    pub config_path: Option<PathBuf>,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            config_path: None,
            port: 4321,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state.
pub(crate) struct ServerState {
    builder: RwLock<SiteBuilder>,
    reload: ReloadHub,
    loader: Option<ConfigLoader>,
}

impl ServerState {
    pub(crate) fn new(build: BuildConfig, loader: Option<ConfigLoader>) -> Self {
        Self {
            builder: RwLock::new(SiteBuilder::new(with_reload_script(build))),
            reload: ReloadHub::new(),
            loader,
        }
    }
}

fn with_reload_script(mut build: BuildConfig) -> BuildConfig {
    build.live_reload = Some(RELOAD_SCRIPT_PATH.to_string());
    build
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
    loader: Option<ConfigLoader>,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self {
            config,
            loader: None,
        }
    }

    /// Re-read build settings with `loader` whenever the config file changes.
    pub fn with_config_loader(mut self, loader: ConfigLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Build once, then serve the output and rebuild on change.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = socket_addr(&self.config.host, self.config.port)?;
        let build = self.config.build.clone();

        let state = Arc::new(ServerState::new(build.clone(), self.loader));
        rebuild(&state, false).await;

        let (watcher, rx) = FileWatcher::new(WatchRoots {
            content: build.content_dir.clone(),
            public: build.public_dir.clone(),
            config: self.config.config_path.clone(),
        })
        .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            rebuild_loop(&state_clone, rx).await;
            // Keep watcher alive
            drop(watcher);
        });

        let app = dev_router(state, &build.output_dir);

        tracing::info!("Dev server running at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            if let Err(e) = open::that(&url) {
                tracing::debug!("Could not open browser: {}", e);
            }
        }

        serve(addr, app).await
    }
}

fn socket_addr(host: &str, port: u16) -> Result<SocketAddr, ServerError> {
    format!("{}:{}", host, port)
        .parse()
        .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", host, port)))
}

async fn serve(addr: SocketAddr, app: Router) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::BindError(addr, e.to_string()))
}

pub(crate) fn dev_router(state: Arc<ServerState>, output_dir: &Path) -> Router {
    Router::new()
        .route(RELOAD_SOCKET_PATH, get(ws_handler))
        .route(RELOAD_SCRIPT_PATH, get(reload_script_handler))
        .fallback_service(ServeDir::new(output_dir))
        .with_state(state)
}

/// Coalesce bursts of events into single rebuilds, one at a time.
async fn rebuild_loop(state: &ServerState, mut rx: mpsc::Receiver<WatchEvent>) {
    while let Some(first) = rx.recv().await {
        tokio::time::sleep(DEBOUNCE).await;

        let mut events = vec![first];
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }

        for event in &events {
            tracing::debug!("Changed: {}", event.path().display());
        }
        let config_changed = events.iter().any(|e| matches!(e, WatchEvent::Config(_)));
        rebuild(state, config_changed).await;
    }
}

/// Rebuild the site and tell browsers the outcome.
pub(crate) async fn rebuild(state: &ServerState, reload_config: bool) {
    if reload_config {
        if let Some(loader) = &state.loader {
            match loader() {
                Ok(build) => {
                    tracing::info!("Config changed, reloading");
                    let mut builder = state.builder.write().await;
                    for dir in moved_dirs(builder.config(), &build) {
                        tracing::warn!(
                            "The {} directory changed; restart the dev server to watch and serve it",
                            dir
                        );
                    }
                    *builder = SiteBuilder::new(with_reload_script(build));
                }
                Err(message) => {
                    tracing::warn!("Keeping previous config: {}", message);
                    state.reload.send(ReloadMessage::BuildFailed { message });
                    return;
                }
            }
        }
    }

    let builder = state.builder.read().await;
    match builder.build().await {
        Ok(result) => {
            tracing::info!(
                "Built {} pages in {}ms",
                result.pages,
                result.duration_ms
            );
            state.reload.send(ReloadMessage::Reload);
        }
        Err(e) => {
            tracing::warn!("Build failed: {}", e);
            state.reload.send(ReloadMessage::BuildFailed {
                message: e.to_string(),
            });
        }
    }
}

/// Directories the watcher and file server were set up with that `new`
/// relocates. Those only take effect after a restart.
fn moved_dirs(old: &BuildConfig, new: &BuildConfig) -> Vec<&'static str> {
    [
        ("content", &old.content_dir, &new.content_dir),
        ("public", &old.public_dir, &new.public_dir),
        ("output", &old.output_dir, &new.output_dir),
    ]
    .into_iter()
    .filter(|(_, before, after)| before != after)
    .map(|(name, _, _)| name)
    .collect()
}

/// Handler for the reload WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Forward reload messages to one browser.
async fn handle_ws(mut socket: WebSocket, state: Arc<ServerState>) {
    let mut rx = state.reload.subscribe();

    if send_json(&mut socket, &ReloadMessage::Connected).await.is_err() {
        return;
    }

    while let Some(msg) = next_message(&mut rx).await {
        if send_json(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_json(socket: &mut WebSocket, msg: &ReloadMessage) -> Result<(), ()> {
    let json = serde_json::to_string(msg).map_err(|_| ())?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}

/// Handler for the live reload client script.
async fn reload_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        reload_client_script(),
    )
}
