//! Re-render a document whenever it changes on disk.

use crate::config::Config;
use crate::text::load_text;
use notify::{
    event::{ModifyKind, RemoveKind},
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};

/// What a file system event means for the watched document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Updated,
    Removed,
}

/// Watches one document and hands every new rendering to a callback.
///
/// The parent directory is watched rather than the file itself so that
/// editors which save by renaming a temp file are still picked up.
pub struct DocumentWatcher {
    path: PathBuf,
    config: Config,
    _watcher: RecommendedWatcher,
    events: Receiver<Event>,
    stop_rx: Receiver<()>,
    stop_tx: Sender<()>,
}

impl DocumentWatcher {
    pub fn new(path: &Path, config: &Config) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (tx, events) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    let _ = tx.send(event);
                }
                Err(e) => tracing::warn!("watch error: {e}"),
            },
            NotifyConfig::default().with_poll_interval(config.poll_interval),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %path.display(), "watching document");

        let (stop_tx, stop_rx) = channel();
        Ok(Self {
            path,
            config: config.clone(),
            _watcher: watcher,
            events,
            stop_rx,
            stop_tx,
        })
    }

    /// Handle that ends [`DocumentWatcher::run`] when sent to.
    pub fn stop_handle(&self) -> Sender<()> {
        self.stop_tx.clone()
    }

    /// Render once, then again after every change, until stopped.
    ///
    /// An error from `on_render` ends the loop and is returned.
    pub fn run(self, mut on_render: impl FnMut(&str) -> anyhow::Result<()>) -> anyhow::Result<()> {
        let mut last_text = None;
        self.reload(&mut last_text, &mut on_render)?;

        loop {
            if self.stop_rx.try_recv().is_ok() {
                break;
            }

            match self.events.recv_timeout(self.config.debounce) {
                Ok(event) => match classify(&event, &self.path) {
                    Some(Change::Updated) => self.reload(&mut last_text, &mut on_render)?,
                    Some(Change::Removed) => {
                        tracing::warn!(path = %self.path.display(), "document removed");
                    }
                    None => {}
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::info!("watcher stopped");
        Ok(())
    }

    fn reload(
        &self,
        last_text: &mut Option<String>,
        on_render: &mut impl FnMut(&str) -> anyhow::Result<()>,
    ) -> anyhow::Result<()> {
        let text = match load_text(&self.path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("{e}");
                return Ok(());
            }
        };

        // One save often produces several events.
        if last_text.as_deref() == Some(text.as_str()) {
            return Ok(());
        }

        on_render(&quizlet_core::render(&text))?;
        *last_text = Some(text);
        Ok(())
    }
}

/// Map a raw event to a change of `path`, ignoring other files and metadata noise.
pub fn classify(event: &Event, path: &Path) -> Option<Change> {
    if !event.paths.iter().any(|p| p.as_path() == path) {
        return None;
    }

    match &event.kind {
        EventKind::Create(_)
        | EventKind::Modify(ModifyKind::Data(_))
        | EventKind::Modify(ModifyKind::Name(_))
        | EventKind::Modify(ModifyKind::Any) => Some(Change::Updated),
        EventKind::Remove(RemoveKind::File) | EventKind::Remove(RemoveKind::Any) => {
            Some(Change::Removed)
        }
        _ => None,
    }
}
