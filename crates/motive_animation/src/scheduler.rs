//! Frame scheduler
//!
//! The rendering driver behind every sequence: it owns the compiled
//! playback handles, advances them once per frame, and dispatches the two
//! one-shot notifications the sequencer relies on, "about to render"
//! (layout gating) and "playback finished" (completion chaining).
//!
//! The host UI loop drives the scheduler by calling
//! [`FrameScheduler::tick`] once per rendering frame. There is no
//! background thread: "parallel" tracks are logically concurrent within a
//! frame tick, on the UI thread that owns the targets.

use crate::playback::Playback;
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, OnceLock, Weak};

// ============================================================================
// Global Scheduler State
// ============================================================================

/// Global scheduler handle for access from anywhere in the application
static GLOBAL_SCHEDULER: OnceLock<SchedulerHandle> = OnceLock::new();

/// Set the global frame scheduler handle
///
/// Call once at app startup after creating the [`FrameScheduler`]; the
/// [`animate`](crate::builder::animate) entry point resolves it.
///
/// # Panics
///
/// Panics if called more than once.
pub fn set_global_scheduler(handle: SchedulerHandle) {
    if GLOBAL_SCHEDULER.set(handle).is_err() {
        panic!("set_global_scheduler() called more than once");
    }
}

/// Get the global frame scheduler handle
///
/// # Panics
///
/// Panics if `set_global_scheduler()` has not been called.
pub fn get_scheduler() -> SchedulerHandle {
    GLOBAL_SCHEDULER
        .get()
        .expect("Frame scheduler not initialized. Call set_global_scheduler() at app startup.")
        .clone()
}

/// Try to get the global scheduler (returns None if not initialized)
pub fn try_get_scheduler() -> Option<SchedulerHandle> {
    GLOBAL_SCHEDULER.get().cloned()
}

/// Check if the global scheduler has been initialized
pub fn is_scheduler_initialized() -> bool {
    GLOBAL_SCHEDULER.get().is_some()
}

new_key_type! {
    /// Handle to a registered playback
    pub struct PlaybackId;
    /// Handle to a pending one-shot pre-draw subscription
    pub struct SubscriptionId;
}

/// Callback invoked once when a playback finishes its final cycle
pub type CompletionFn = Box<dyn FnOnce() + Send>;

/// Callback invoked once at the start of the next frame tick
pub type PreDrawFn = Box<dyn FnOnce() + Send>;

struct PlaybackSlot {
    playback: Playback,
    on_complete: Option<CompletionFn>,
}

/// Internal state of the frame scheduler
struct SchedulerInner {
    playbacks: SlotMap<PlaybackId, PlaybackSlot>,
    predraw: SlotMap<SubscriptionId, PreDrawFn>,
}

/// The frame scheduler that advances all in-flight playbacks
///
/// Typically owned by the application context and shared via
/// [`SchedulerHandle`]. Sequences register their compiled handles
/// implicitly when started.
pub struct FrameScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                playbacks: SlotMap::with_key(),
                predraw: SlotMap::with_key(),
            })),
        }
    }

    /// Get a weak handle for passing to builders and sequences
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Advance one rendering frame
    ///
    /// Phase order is load-bearing for the layout gate and for chaining:
    /// 1. drain and run the one-shot pre-draw subscribers; a gated
    ///    sequence begins playback here, after the frame's layout pass;
    /// 2. advance every playing handle by `dt_ms` under the lock, then
    ///    write the sampled frames to their targets after release, so
    ///    custom update callbacks may re-enter the scheduler;
    /// 3. dispatch completion callbacks for handles that finished this
    ///    tick. A completion may re-enter the scheduler to begin the
    ///    successor node, so callbacks run with the lock released.
    ///
    /// Returns true while any playback or pending subscription remains.
    pub fn tick(&self, dt_ms: f32) -> bool {
        let subscribers: Vec<PreDrawFn> = {
            let mut inner = self.inner.lock().unwrap();
            inner.predraw.drain().map(|(_, f)| f).collect()
        };
        for notify in subscribers {
            notify();
        }

        let (samples, completions) = {
            let mut inner = self.inner.lock().unwrap();
            let mut samples = Vec::new();
            let mut finished: Vec<CompletionFn> = Vec::new();
            for (id, slot) in inner.playbacks.iter_mut() {
                let (done, sample) = slot.playback.advance(dt_ms);
                if let Some(sample) = sample {
                    samples.push(sample);
                }
                if done {
                    tracing::debug!(?id, "playback finished");
                    if let Some(on_complete) = slot.on_complete.take() {
                        finished.push(on_complete);
                    }
                }
            }
            (samples, finished)
        };
        // Final frames land before their completion callbacks fire
        for sample in samples {
            sample.render();
        }
        for on_complete in completions {
            on_complete();
        }

        let inner = self.inner.lock().unwrap();
        inner.playbacks.iter().any(|(_, s)| s.playback.is_playing()) || !inner.predraw.is_empty()
    }

    /// Check if any playbacks are still running
    pub fn has_active_animations(&self) -> bool {
        self.inner
            .lock()
            .unwrap()
            .playbacks
            .iter()
            .any(|(_, s)| s.playback.is_playing())
    }

    /// Number of registered playback handles
    pub fn playback_count(&self) -> usize {
        self.inner.lock().unwrap().playbacks.len()
    }

    /// Number of pending pre-draw subscriptions
    pub fn pending_predraw_count(&self) -> usize {
        self.inner.lock().unwrap().predraw.len()
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the frame scheduler
///
/// Passed to builders and sequences that need to register playbacks.
/// It won't prevent the scheduler from being dropped; every operation
/// no-ops (or returns `None`) once the scheduler is gone.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Register a compiled playback and its completion callback
    pub fn register_playback(
        &self,
        playback: Playback,
        on_complete: Option<CompletionFn>,
    ) -> Option<PlaybackId> {
        self.inner.upgrade().map(|inner| {
            inner.lock().unwrap().playbacks.insert(PlaybackSlot {
                playback,
                on_complete,
            })
        })
    }

    /// Begin a registered playback from its first keyframe
    pub fn begin_playback(&self, id: PlaybackId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(slot) = inner.lock().unwrap().playbacks.get_mut(id) {
                slot.playback.begin();
            }
        }
    }

    /// Cancel and discard a playback
    ///
    /// The completion callback is dropped unfired, so chaining to a
    /// successor is suppressed.
    pub fn cancel_playback(&self, id: PlaybackId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(mut slot) = inner.lock().unwrap().playbacks.remove(id) {
                slot.playback.cancel();
            }
        }
    }

    /// Remove a finished playback's handle
    pub fn remove_playback(&self, id: PlaybackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().playbacks.remove(id);
        }
    }

    /// Check whether a playback is currently running
    pub fn is_playback_playing(&self, id: PlaybackId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| {
                inner
                    .lock()
                    .unwrap()
                    .playbacks
                    .get(id)
                    .map(|s| s.playback.is_playing())
            })
            .unwrap_or(false)
    }

    /// Inspect a registered playback
    ///
    /// Returns `None` if the scheduler is gone or the handle was removed.
    pub fn with_playback<F, R>(&self, id: PlaybackId, f: F) -> Option<R>
    where
        F: FnOnce(&Playback) -> R,
    {
        self.inner.upgrade().and_then(|inner| {
            inner.lock().unwrap().playbacks.get(id).map(|s| f(&s.playback))
        })
    }

    /// Subscribe a one-shot "about to render a frame" callback
    ///
    /// The callback fires at the start of the next [`FrameScheduler::tick`]
    /// and the subscription is consumed. The returned id can dispose of it
    /// before it fires.
    pub fn subscribe_predraw(&self, f: PreDrawFn) -> Option<SubscriptionId> {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().unwrap().predraw.insert(f))
    }

    /// Dispose of a pending pre-draw subscription
    pub fn unsubscribe_predraw(&self, id: SubscriptionId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().predraw.remove(id);
        }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
