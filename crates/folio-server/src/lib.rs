//! Development server with rebuild-on-change and live reload.
//!
//! Watches content, public files and the config file, rebuilds the site on
//! change and tells connected browsers to reload over a WebSocket.

pub mod reload;
pub mod server;
pub mod watcher;

pub use reload::{ReloadHub, ReloadMessage};
pub use server::{ConfigLoader, DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent, WatchRoots};
