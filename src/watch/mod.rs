//! Debounced watch loop.
//!
//! # Architecture
//!
//! ```text
//! notify backend thread ──Event──▶ mpsc channel ──▶ WatchLoop (caller's thread)
//!                                                    ├─ EventFilter  (drop irrelevant)
//!                                                    ├─ Debouncer    (Idle / Pending)
//!                                                    └─ ManifestGenerator::generate
//! ```
//!
//! The loop runs the generator once up front, then blocks on the channel for at
//! most the time left on the pending deadline. When the deadline passes with no
//! further qualifying events, the manifest is regenerated exactly once.

/// Debounce state machine.
pub mod debounce;
/// Event filtering.
pub mod filter;

pub use debounce::{DebounceState, Debouncer};
pub use filter::EventFilter;

use crate::manifest::{Manifest, ManifestError, ManifestGenerator};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{Level, debug, info, span, trace, warn};

/// Channel item delivered by `notify`.
pub type EventResult = notify::Result<Event>;

/// Failures that stop the watch loop.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The filesystem watcher could not be started.
    #[error("failed to watch {}", .path.display())]
    Start {
        /// Directory that was to be watched.
        path: PathBuf,
        /// Backend error.
        #[source]
        source: notify::Error,
    },

    /// Regenerating the manifest failed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Watches the media directory and keeps the manifest current.
pub struct WatchLoop {
    /// Produces the manifest.
    generator: ManifestGenerator,
    /// Drops events that cannot change the manifest.
    filter: EventFilter,
    /// Coalesces bursts of events.
    debouncer: Debouncer,
    /// Incoming filesystem events.
    events: Receiver<EventResult>,
    /// Keeps the backend alive for as long as the loop exists.
    _watcher: Option<RecommendedWatcher>,
    /// Debounced regenerations performed so far.
    regenerations: usize,
}

impl WatchLoop {
    /// Starts a non-recursive filesystem watcher on the generator's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform watcher cannot be created or the
    /// directory cannot be watched.
    pub fn new(generator: ManifestGenerator, quiet_period: Duration) -> Result<Self, WatchError> {
        let path = generator.media_dir().to_path_buf();
        let start_error = |source| WatchError::Start {
            path: path.clone(),
            source,
        };

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx).map_err(start_error)?;
        watcher
            .watch(&path, RecursiveMode::NonRecursive)
            .map_err(start_error)?;

        debug!(path = %path.display(), "Filesystem watcher started");

        let mut watch_loop = Self::with_receiver(generator, quiet_period, rx);
        watch_loop._watcher = Some(watcher);
        Ok(watch_loop)
    }

    /// Builds a loop over a caller-supplied event channel.
    ///
    /// Dropping every sender ends [`WatchLoop::run`] once any pending
    /// regeneration has been flushed.
    #[must_use]
    pub fn with_receiver(
        generator: ManifestGenerator,
        quiet_period: Duration,
        events: Receiver<EventResult>,
    ) -> Self {
        Self {
            filter: EventFilter::for_generator(&generator),
            generator,
            debouncer: Debouncer::new(quiet_period),
            events,
            _watcher: None,
            regenerations: 0,
        }
    }

    /// Number of debounced regenerations performed, excluding the initial run.
    #[must_use]
    pub const fn regenerations(&self) -> usize {
        self.regenerations
    }

    /// Generator driven by this loop.
    #[must_use]
    pub const fn generator(&self) -> &ManifestGenerator {
        &self.generator
    }

    /// Runs the generator once, then regenerates after each burst of changes.
    ///
    /// `on_generate` is called after every successful write with the name that
    /// triggered it (`None` for the initial run). With a real watcher this never
    /// returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns the first generator failure. Watcher errors delivered through the
    /// channel are logged and skipped.
    pub fn run<F>(&mut self, mut on_generate: F) -> Result<(), WatchError>
    where
        F: FnMut(Option<&str>, &Manifest),
    {
        let span = span!(Level::INFO, "watch", dir = %self.generator.media_dir().display());
        let _guard = span.enter();

        let manifest = self.generator.generate()?;
        on_generate(None, &manifest);

        loop {
            let received = match self.debouncer.time_until_due(Instant::now()) {
                Some(wait) => self.events.recv_timeout(wait),
                None => self
                    .events
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(Ok(event)) => self.process_event(&event, Instant::now(), &mut on_generate)?,
                Ok(Err(err)) => warn!(error = %err, "File watcher reported an error"),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    if let Some(deadline) = self.debouncer.deadline() {
                        thread::sleep(deadline.saturating_duration_since(Instant::now()));
                        self.fire_if_due(Instant::now(), &mut on_generate)?;
                    }
                    info!("Event source closed, watch loop stopping");
                    return Ok(());
                }
            }

            self.fire_if_due(Instant::now(), &mut on_generate)?;
        }
    }

    /// Settles a burst whose deadline already passed, then records `event`.
    fn process_event<F>(
        &mut self,
        event: &Event,
        now: Instant,
        on_generate: &mut F,
    ) -> Result<(), WatchError>
    where
        F: FnMut(Option<&str>, &Manifest),
    {
        self.fire_if_due(now, on_generate)?;
        self.handle_event(event, now);
        Ok(())
    }

    /// Feeds one event through the filter into the debouncer.
    fn handle_event(&mut self, event: &Event, now: Instant) {
        match self.filter.qualifying_name(event) {
            Some(name) => {
                debug!(name = %name, kind = ?event.kind, "Change detected, (re)arming timer");
                self.debouncer.observe(name, now);
            }
            None => trace!(kind = ?event.kind, paths = ?event.paths, "Ignoring event"),
        }
    }

    /// Regenerates if the quiet period has elapsed.
    fn fire_if_due<F>(&mut self, now: Instant, on_generate: &mut F) -> Result<(), WatchError>
    where
        F: FnMut(Option<&str>, &Manifest),
    {
        if let Some(trigger) = self.debouncer.poll(now) {
            let manifest = self.generator.generate()?;
            self.regenerations += 1;
            on_generate(Some(&trigger), &manifest);
        }
        Ok(())
    }
}
