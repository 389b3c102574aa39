//! Settings file watcher for hot reload.
//!
//! Watches `settings.yaml` and emits a `SettingsReloadEvent` when it is
//! modified or recreated. Rapid saves from editors are debounced.

use anyhow::{Context, Result};
use notify::{Config as NotifyConfig, Event, PollWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};

/// The settings file changed and should be reloaded.
#[derive(Debug, Clone)]
pub struct SettingsReloadEvent {
    /// Canonical path of the settings file.
    pub path: PathBuf,
}

/// Drops events that arrive within `delay` of the last accepted one.
#[derive(Debug)]
struct Debouncer {
    delay: Duration,
    last: Mutex<Option<Instant>>,
}

impl Debouncer {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            last: Mutex::new(None),
        }
    }

    fn accept(&self, now: Instant) -> bool {
        let mut last = self.last.lock();
        match *last {
            Some(prev) if now.duration_since(prev) < self.delay => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}

/// Watches the settings file and queues reload events.
pub struct SettingsWatcher {
    /// Kept alive to keep watching.
    _watcher: Box<dyn Watcher + Send>,
    event_receiver: Receiver<SettingsReloadEvent>,
}

impl std::fmt::Debug for SettingsWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsWatcher").finish_non_exhaustive()
    }
}

fn make_event_handler(
    filename: OsString,
    canonical_path: PathBuf,
    debouncer: Arc<Debouncer>,
    tx: Sender<SettingsReloadEvent>,
) -> impl Fn(std::result::Result<Event, notify::Error>) + Send + 'static {
    move |result: std::result::Result<Event, notify::Error>| {
        let Ok(event) = result else {
            return;
        };

        // Create covers editors that save by rename
        if !matches!(
            event.kind,
            notify::EventKind::Modify(_) | notify::EventKind::Create(_)
        ) {
            return;
        }

        let touches_settings = event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|f| f == filename));
        if !touches_settings {
            return;
        }

        if !debouncer.accept(Instant::now()) {
            log::trace!("Debouncing settings reload event");
            return;
        }

        log::info!("Settings file changed: {}", canonical_path.display());
        if let Err(e) = tx.send(SettingsReloadEvent {
            path: canonical_path.clone(),
        }) {
            log::error!("Failed to send settings reload event: {}", e);
        }
    }
}

impl SettingsWatcher {
    /// Start watching `settings_path`.
    ///
    /// Uses the platform's native backend and falls back to a 500 ms
    /// `PollWatcher` where that is unavailable (containers, network mounts).
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist or both backends fail.
    pub fn new(settings_path: &Path, debounce_delay_ms: u64) -> Result<Self> {
        if !settings_path.exists() {
            anyhow::bail!("Settings file not found: {}", settings_path.display());
        }

        let canonical = settings_path
            .canonicalize()
            .unwrap_or_else(|_| settings_path.to_path_buf());
        let filename = canonical
            .file_name()
            .context("Settings path has no filename")?
            .to_os_string();
        let parent_dir = canonical
            .parent()
            .context("Settings path has no parent directory")?
            .to_path_buf();

        let (tx, rx) = channel::<SettingsReloadEvent>();
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(debounce_delay_ms)));

        let native = notify::recommended_watcher(make_event_handler(
            filename.clone(),
            canonical.clone(),
            Arc::clone(&debouncer),
            tx.clone(),
        ));
        let mut watcher: Box<dyn Watcher + Send> = match native {
            Ok(w) => {
                log::debug!("Settings watcher: using native backend");
                Box::new(w)
            }
            Err(e) => {
                log::warn!(
                    "Settings watcher: native backend unavailable ({}); falling back to PollWatcher",
                    e
                );
                let poll = PollWatcher::new(
                    make_event_handler(filename, canonical.clone(), debouncer, tx),
                    NotifyConfig::default().with_poll_interval(Duration::from_millis(500)),
                )
                .context("Failed to create fallback PollWatcher")?;
                Box::new(poll)
            }
        };

        watcher
            .watch(&parent_dir, RecursiveMode::NonRecursive)
            .with_context(|| {
                format!("Failed to watch settings directory: {}", parent_dir.display())
            })?;

        log::info!("Settings hot reload: watching {}", canonical.display());

        Ok(Self {
            _watcher: watcher,
            event_receiver: rx,
        })
    }

    /// Next pending reload event, if any (non-blocking).
    pub fn try_recv(&self) -> Option<SettingsReloadEvent> {
        self.event_receiver.try_recv().ok()
    }
}
