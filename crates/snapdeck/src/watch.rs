use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context, Result};
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Watches a deck file for changes.
///
/// Editors often replace files instead of writing in place, so the parent
/// directory is watched and events are filtered down to the deck path.
pub struct DeckWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
    events: Receiver<DebounceEventResult>,
    path: PathBuf,
}

impl DeckWatcher {
    /// `on_event` runs on the watcher thread after every debounced batch,
    /// typically to wake the UI.
    pub fn spawn(path: &Path, on_event: impl Fn() + Send + 'static) -> Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Cannot watch {}", path.display()))?;
        let dir = path
            .parent()
            .with_context(|| format!("{} has no parent directory", path.display()))?
            .to_path_buf();

        let (tx, events) = mpsc::channel();
        let mut debouncer = new_debouncer(DEBOUNCE, move |result: DebounceEventResult| {
            if tx.send(result).is_ok() {
                on_event();
            }
        })
        .context("Failed to start file watcher")?;
        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;

        tracing::info!(path = %path.display(), "watching deck for changes");
        Ok(Self {
            _debouncer: debouncer,
            events,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending events; true if any of them touched the deck file.
    pub fn poll(&self) -> bool {
        let mut changed = false;
        for result in self.events.try_iter() {
            match result {
                Ok(events) => {
                    changed |= events.iter().any(|e| is_same_file(&e.path, &self.path));
                }
                Err(e) => tracing::warn!("file watcher error: {e}"),
            }
        }
        changed
    }
}

fn is_same_file(event_path: &Path, target: &Path) -> bool {
    event_path == target
        || event_path
            .canonicalize()
            .is_ok_and(|canonical| canonical == target)
}
