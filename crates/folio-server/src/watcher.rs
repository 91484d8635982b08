//! File watching for rebuild-on-change.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A markdown post or page changed
    Content(PathBuf),

    /// A file under the public directory changed
    Public(PathBuf),

    /// The project config file changed
    Config(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::Content(p) | Self::Public(p) | Self::Config(p) => p,
        }
    }
}

/// What the watcher observes.
#[derive(Debug, Clone, Default)]
pub struct WatchRoots {
    pub content: PathBuf,
    pub public: PathBuf,
    /// Config file; its directory is watched non-recursively
    pub config: Option<PathBuf>,
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given roots.
    ///
    /// Returns the watcher and a channel to receive events. Dropping the
    /// watcher stops the events.
    pub fn new(
        roots: WatchRoots,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for dir in [&roots.content, &roots.public] {
            if dir.exists() {
                watcher
                    .watch(dir, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            } else {
                tracing::debug!("Not watching missing directory {}", dir.display());
            }
        }

        // Editors often replace the file, so watch its directory.
        if let Some(config) = &roots.config {
            let dir = config
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .map_err(std::io::Error::other)?;
        }

        let roots = WatchRoots {
            content: absolute(&roots.content),
            public: absolute(&roots.public),
            config: roots.config.as_deref().map(absolute),
        };

        // Forward classified events to the async side
        std::thread::spawn(move || {
            while let Ok(event) = sync_rx.recv() {
                for path in &event.paths {
                    if let Some(e) = classify_event(path, &event.kind, &roots) {
                        if async_tx.blocking_send(e).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &EventKind, roots: &WatchRoots) -> Option<WatchEvent> {
    if !matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return None;
    }

    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if is_scratch_file(name) {
        return None;
    }

    if roots.config.as_deref().is_some_and(|c| c == path) {
        return Some(WatchEvent::Config(path.to_path_buf()));
    }
    if path.starts_with(&roots.content) {
        return Some(WatchEvent::Content(path.to_path_buf()));
    }
    if path.starts_with(&roots.public) {
        return Some(WatchEvent::Public(path.to_path_buf()));
    }
    None
}

/// Editor swap and backup files.
fn is_scratch_file(name: &str) -> bool {
    name.starts_with(".#")
        || name.ends_with('~')
        || name.ends_with(".swp")
        || name.ends_with(".swx")
        || name == "4913"
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn roots() -> WatchRoots {
        WatchRoots {
            content: PathBuf::from("/site/content"),
            public: PathBuf::from("/site/public"),
            config: Some(PathBuf::from("/site/folio.toml")),
        }
    }

    #[test]
    fn classifies_by_root() {
        let modify = EventKind::Modify(ModifyKind::Any);
        let roots = roots();

        assert_eq!(
            classify_event(Path::new("/site/content/posts/a.md"), &modify, &roots),
            Some(WatchEvent::Content(PathBuf::from("/site/content/posts/a.md")))
        );
        assert_eq!(
            classify_event(Path::new("/site/public/logo.png"), &modify, &roots),
            Some(WatchEvent::Public(PathBuf::from("/site/public/logo.png")))
        );
        assert_eq!(
            classify_event(Path::new("/site/folio.toml"), &modify, &roots),
            Some(WatchEvent::Config(PathBuf::from("/site/folio.toml")))
        );
        assert_eq!(
            classify_event(Path::new("/site/dist/index.html"), &modify, &roots),
            None
        );
    }

    #[test]
    fn ignores_access_and_scratch_files() {
        let roots = roots();
        let access = EventKind::Access(notify::event::AccessKind::Any);
        let create = EventKind::Create(CreateKind::File);

        assert_eq!(
            classify_event(Path::new("/site/content/a.md"), &access, &roots),
            None
        );
        assert_eq!(
            classify_event(Path::new("/site/content/.a.md.swp"), &create, &roots),
            None
        );
        assert_eq!(
            classify_event(Path::new("/site/content/a.md~"), &create, &roots),
            None
        );
    }

    #[tokio::test]
    async fn watches_content_changes() {
        let temp = tempdir().unwrap();
        let content = temp.path().join("content");
        fs::create_dir_all(&content).unwrap();

        let (watcher, mut rx) = FileWatcher::new(WatchRoots {
            content: content.clone(),
            public: temp.path().join("public"),
            config: None,
        })
        .unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(content.join("post.md"), "# Created").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;
        drop(watcher);

        let event = event
            .expect("timeout waiting for file watch event")
            .expect("channel should not be closed");
        assert!(matches!(event, WatchEvent::Content(_)));
        assert!(event.path().ends_with("post.md"));
    }
}
