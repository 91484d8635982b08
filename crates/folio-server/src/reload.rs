//! WebSocket-based live reload.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Route of the reload WebSocket.
pub const RELOAD_SOCKET_PATH: &str = "/__reload";

/// Route of the client script injected into every page.
pub const RELOAD_SCRIPT_PATH: &str = "/__reload.js";

/// Messages sent to connected browsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReloadMessage {
    /// Connection established
    Connected,

    /// The site was rebuilt; reload the page
    Reload,

    /// The last rebuild failed; the served output is stale
    BuildFailed {
        /// Error rendered for display
        message: String,
    },
}

/// Hub for broadcasting reload messages to all connected clients.
#[derive(Debug, Clone)]
pub struct ReloadHub {
    sender: broadcast::Sender<ReloadMessage>,
}

impl ReloadHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send a message to all connected clients.
    pub fn send(&self, msg: ReloadMessage) {
        // No receivers is fine
        let _ = self.sender.send(msg);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadMessage> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Wait for the next message, skipping past any a slow client missed.
///
/// Returns `None` once the hub is gone.
pub async fn next_message(rx: &mut broadcast::Receiver<ReloadMessage>) -> Option<ReloadMessage> {
    loop {
        match rx.recv().await {
            Ok(msg) => return Some(msg),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!("Reload client lagged, skipped {} messages", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Client script connecting back to the page's own host.
pub fn reload_client_script() -> String {
    format!(
        r#"
(function() {{
  'use strict';

  const scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  let retries = 0;

  function showError(message) {{
    let box = document.getElementById('folio-build-error');
    if (!box) {{
      box = document.createElement('pre');
      box.id = 'folio-build-error';
      box.style.cssText = 'position:fixed;inset:auto 0 0 0;margin:0;padding:1rem;max-height:50vh;overflow:auto;background:#7f1d1d;color:#fef2f2;font-size:13px;z-index:9999;white-space:pre-wrap';
      document.body.appendChild(box);
    }}
    box.textContent = message;
  }}

  function connect() {{
    const ws = new WebSocket(scheme + location.host + '{socket}');

    ws.onopen = function() {{
      retries = 0;
    }};

    ws.onmessage = function(event) {{
      const msg = JSON.parse(event.data);
      switch (msg.type) {{
        case 'reload':
          location.reload();
          break;
        case 'build_failed':
          console.error('[folio] build failed:', msg.message);
          showError(msg.message);
          break;
        case 'connected':
          console.log('[folio] live reload connected');
          break;
      }}
    }};

    ws.onclose = function() {{
      if (retries < 10) {{
        retries++;
        setTimeout(connect, 500 * retries);
      }}
    }};
  }}

  connect();
}})();
"#,
        socket = RELOAD_SOCKET_PATH
    )
}
