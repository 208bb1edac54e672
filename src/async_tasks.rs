//! Async task management for background operations
//!
//! This module handles all background tasks including:
//! - Loading the persisted marks at startup
//! - Delayed scroll commands after a jump
//! - Writing marks without blocking the UI
//! - The audio progress ticker
//! - Resize debouncing

use crate::bookmarks::BookmarkStore;
use crate::types::Marks;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Which mark a save targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Reading,
    Hifdh,
}

/// Messages sent from background tasks to the main thread
#[derive(Debug)]
pub enum TaskMessage {
    /// Marks read from storage
    MarksLoaded { marks: Marks },

    /// A mark write finished; `saved` is false when storage failed
    MarkSaved {
        kind: MarkKind,
        page: u16,
        saved: bool,
    },

    /// A memorized toggle was written; `pages` is the stored list
    HifdhPagesUpdated { pages: Vec<u16> },

    /// The auto-save preference was written
    AutoSaveUpdated { enabled: bool },

    /// The bookmark page was written or cleared
    BookmarkSaved { page: Option<u16>, saved: bool },

    /// A jump's scroll command is due
    ScrollDue {
        generation: u64,
        display_index: usize,
    },

    /// Periodic audio progress refresh
    AudioTick,

    /// Resize event after debounce timeout
    ResizeComplete { width: u16, height: u16 },
}

/// Manages spawning and communication with background tasks
pub struct AsyncTaskRunner {
    tx: mpsc::UnboundedSender<TaskMessage>,
}

impl AsyncTaskRunner {
    /// Create a new task runner
    pub fn new(tx: mpsc::UnboundedSender<TaskMessage>) -> Self {
        Self { tx }
    }

    /// Read every mark; the result arrives as `MarksLoaded`
    pub fn spawn_load_marks(&self, marks: BookmarkStore) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let loaded = marks.load().await;
            let _ = tx.send(TaskMessage::MarksLoaded { marks: loaded });
        })
    }

    pub fn spawn_save_mark(&self, marks: BookmarkStore, kind: MarkKind, page: u16) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let saved = match kind {
                MarkKind::Reading => marks.save_reading_mark(page).await,
                MarkKind::Hifdh => marks.save_hifdh_mark(page).await,
            };
            let _ = tx.send(TaskMessage::MarkSaved { kind, page, saved });
        });
    }

    pub fn spawn_toggle_hifdh_page(&self, marks: BookmarkStore, page: u16) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let pages = marks.toggle_hifdh_page(page).await;
            let _ = tx.send(TaskMessage::HifdhPagesUpdated { pages });
        });
    }

    pub fn spawn_set_auto_save(&self, marks: BookmarkStore, enabled: bool) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            marks.set_auto_save_enabled(enabled).await;
            let _ = tx.send(TaskMessage::AutoSaveUpdated { enabled });
        });
    }

    pub fn spawn_save_bookmark(&self, marks: BookmarkStore, page: Option<u16>) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let saved = marks.save_bookmark_page(page).await;
            let _ = tx.send(TaskMessage::BookmarkSaved { page, saved });
        });
    }

    /// Deliver a scroll command after `delay`
    ///
    /// Stale commands are filtered by the receiver through `generation`.
    pub fn spawn_delayed_scroll(&self, generation: u64, display_index: usize, delay: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let _ = tx.send(TaskMessage::ScrollDue {
                generation,
                display_index,
            });
        });
    }

    /// Send `AudioTick` every `interval_ms` until the receiver goes away
    pub fn spawn_audio_ticker(&self, interval_ms: u64) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
            loop {
                interval.tick().await;
                if tx.send(TaskMessage::AudioTick).is_err() {
                    tracing::debug!("Audio ticker stopped");
                    break;
                }
            }
        })
    }

    /// Spawn a resize debouncer
    ///
    /// Collects resize events and sends a single resize message after debounce timeout
    pub fn spawn_resize_debouncer(&self, debounce_ms: u64) -> mpsc::UnboundedSender<(u16, u16)> {
        let tx = self.tx.clone();
        let (resize_tx, resize_rx) = mpsc::unbounded_channel::<(u16, u16)>();

        tokio::spawn(async move { resize_debounce_task(resize_rx, tx, debounce_ms).await });

        resize_tx
    }
}

/// Background task for debouncing resize events
async fn resize_debounce_task(
    mut resize_rx: mpsc::UnboundedReceiver<(u16, u16)>,
    tx: mpsc::UnboundedSender<TaskMessage>,
    debounce_ms: u64,
) {
    tracing::debug!("Resize debouncer started (debounce: {}ms)", debounce_ms);
    let mut last_size: Option<(u16, u16)> = None;

    loop {
        match tokio::time::timeout(Duration::from_millis(debounce_ms), resize_rx.recv()).await {
            Ok(Some(size)) => {
                last_size = Some(size);
            }
            Ok(None) => {
                tracing::debug!("Resize channel closed");
                break;
            }
            Err(_) => {
                // No more resize events for the debounce period
                if let Some((width, height)) = last_size.take() {
                    tracing::debug!("Debounced resize event: {}x{}", width, height);
                    let _ = tx.send(TaskMessage::ResizeComplete { width, height });
                }
            }
        }
    }
}
