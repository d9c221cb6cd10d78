//! Hot reload of the gateway configuration file.
//!
//! A save that renames a temporary file over the config replaces its inode,
//! so the watch sits on the parent directory and events are filtered by
//! file name.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::GatewayConfig;

/// Sends a freshly loaded and validated [`GatewayConfig`] whenever the file
/// at `path` changes. Invalid files are logged and skipped.
pub struct ConfigWatcher {
    path: PathBuf,
    updates: mpsc::UnboundedSender<GatewayConfig>,
}

impl ConfigWatcher {
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<GatewayConfig>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            updates,
        };
        (watcher, rx)
    }

    /// Start watching. Dropping the returned handle stops the watch.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let (dir, file_name) = watch_target(&self.path);
        let path = self.path;
        let updates = self.updates;
        let watched_name = file_name.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) if touches(&event, &watched_name) => {
                tracing::info!(path = %path.display(), kind = ?event.kind, "Config file changed, reloading");
                match load_config(&path) {
                    Ok(config) => {
                        let _ = updates.send(config);
                    }
                    Err(e) => {
                        tracing::error!(path = %path.display(), error = %e, "Ignoring invalid config, keeping current one");
                    }
                }
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Config watch error"),
        })?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(dir = %dir.display(), file = ?file_name, "Config watcher started");
        Ok(watcher)
    }
}

/// Directory to watch and the file name to filter for.
fn watch_target(path: &Path) -> (PathBuf, OsString) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path.file_name().map(OsString::from).unwrap_or_default();
    (dir, file_name)
}

/// Whether `event` leaves new content at the watched file name.
fn touches(event: &Event, file_name: &OsString) -> bool {
    let writes = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_));
    writes
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use std::fs;
    use std::time::Duration;

    fn config_with_deadline(deadline_ms: u64) -> String {
        format!("[race]\ndeadline_ms = {deadline_ms}\n")
    }

    /// Wait until a config with the given deadline arrives; earlier
    /// duplicates from the same save are skipped.
    async fn next_deadline(
        rx: &mut mpsc::UnboundedReceiver<GatewayConfig>,
        expected: u64,
    ) -> Option<u64> {
        tokio::time::timeout(Duration::from_secs(5), async {
            while let Some(config) = rx.recv().await {
                if config.race.deadline_ms == expected {
                    return Some(expected);
                }
            }
            None
        })
        .await
        .ok()
        .flatten()
    }

    #[test]
    fn test_watch_target_for_bare_file_name() {
        let (dir, name) = watch_target(Path::new("gateway.toml"));
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, OsString::from("gateway.toml"));

        let (dir, name) = watch_target(Path::new("/etc/cep/gateway.toml"));
        assert_eq!(dir, PathBuf::from("/etc/cep"));
        assert_eq!(name, OsString::from("gateway.toml"));
    }

    #[test]
    fn test_touches_filters_by_name_and_kind() {
        let name = OsString::from("gateway.toml");
        let write = Event::new(EventKind::Modify(ModifyKind::Any)).add_path("/cfg/gateway.toml".into());
        let sibling = Event::new(EventKind::Create(CreateKind::File)).add_path("/cfg/.gateway.toml.swp".into());
        let removal = Event::new(EventKind::Remove(RemoveKind::File)).add_path("/cfg/gateway.toml".into());

        assert!(touches(&write, &name));
        assert!(!touches(&sibling, &name));
        assert!(!touches(&removal, &name));
    }

    #[tokio::test]
    async fn test_reloads_after_write_and_rename_over() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gateway.toml");
        fs::write(&path, config_with_deadline(100)).unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        let _handle = watcher.run().unwrap();

        fs::write(&path, config_with_deadline(200)).unwrap();
        assert_eq!(next_deadline(&mut rx, 200).await, Some(200));

        let staged = dir.path().join("gateway.toml.tmp");
        fs::write(&staged, config_with_deadline(300)).unwrap();
        fs::rename(&staged, &path).unwrap();
        assert_eq!(next_deadline(&mut rx, 300).await, Some(300));

        // The file now has a new inode; later writes must still be seen.
        fs::write(&path, config_with_deadline(400)).unwrap();
        assert_eq!(next_deadline(&mut rx, 400).await, Some(400));
    }

    #[tokio::test]
    async fn test_invalid_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gateway.toml");
        fs::write(&path, config_with_deadline(100)).unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        let _handle = watcher.run().unwrap();

        fs::write(&path, "[race]\ndeadline_ms = 0\n").unwrap();
        fs::write(&path, config_with_deadline(250)).unwrap();
        assert_eq!(next_deadline(&mut rx, 250).await, Some(250));
    }
}
