//! Compiled playback handles
//!
//! A [`Playback`] is the realized form of one animation group: every track
//! across every target set in the group, sharing a single timeline,
//! duration, start delay, and repeat policy. Handles are created fresh on
//! every `start()` and advanced once per frame by the
//! [`FrameScheduler`](crate::scheduler::FrameScheduler).

use std::sync::Arc;

use crate::easing::Easing;
use crate::track::PropertyTrack;

/// Default group duration in milliseconds
pub const DEFAULT_DURATION_MS: u32 = 3000;

/// What happens when a repeat cycle ends
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepeatMode {
    /// Jump back to the first keyframe each cycle
    #[default]
    Restart,
    /// Alternate direction each cycle
    Reverse,
}

/// Shared timing configuration for a compiled group
#[derive(Clone, Copy, Debug)]
pub struct GroupTiming {
    pub duration_ms: u32,
    pub delay_ms: u32,
    /// -1 = infinite, 0 = play once, N = N extra cycles after the first
    pub repeat_count: i32,
    pub repeat_mode: RepeatMode,
    /// Group easing; tracks with their own easing ignore this
    pub easing: Easing,
}

impl Default for GroupTiming {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            delay_ms: 0,
            repeat_count: 0,
            repeat_mode: RepeatMode::Restart,
            easing: Easing::Linear,
        }
    }
}

/// A synchronized multi-track animation in flight
///
/// All tracks advance together: one elapsed clock, one delay, one repeat
/// policy. A handle with zero tracks still runs its full (delayed)
/// duration so chain semantics stay uniform.
pub struct Playback {
    tracks: Arc<Vec<PropertyTrack>>,
    timing: GroupTiming,
    elapsed_ms: f32,
    playing: bool,
    finished: bool,
}

/// One frame's resolved position across every track of a playback
///
/// Produced by [`Playback::advance`] under the scheduler lock and written
/// to the targets after the lock is released, so per-frame custom
/// callbacks may safely re-enter the scheduler.
pub(crate) struct FrameSample {
    tracks: Arc<Vec<PropertyTrack>>,
    frac: f32,
    easing: Easing,
}

impl FrameSample {
    /// Write every track's sampled value to its target
    pub(crate) fn render(&self) {
        for track in self.tracks.iter() {
            let eased = track.easing.unwrap_or(self.easing).apply(self.frac);
            track.apply(eased);
        }
    }
}

impl Playback {
    pub fn new(tracks: Vec<PropertyTrack>, timing: GroupTiming) -> Self {
        Self {
            tracks: Arc::new(tracks),
            timing,
            elapsed_ms: 0.0,
            playing: false,
            finished: false,
        }
    }

    /// Begin playback from the first keyframe
    pub fn begin(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = true;
        self.finished = false;
    }

    /// Halt playback without marking it finished
    ///
    /// Cancellation is terminal and distinct from completion: a cancelled
    /// handle never reports `is_finished`, so completion-driven chaining
    /// is suppressed.
    pub fn cancel(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True once the full duration (including repeats) has elapsed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn duration_ms(&self) -> u32 {
        self.timing.duration_ms
    }

    pub fn delay_ms(&self) -> u32 {
        self.timing.delay_ms
    }

    pub fn repeat_count(&self) -> i32 {
        self.timing.repeat_count
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.timing.repeat_mode
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Advance by `dt_ms` and write all targets
    ///
    /// Returns true exactly once, on the tick that completes the final
    /// cycle. Infinite repeats never complete.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let (finished, sample) = self.advance(dt_ms);
        if let Some(sample) = sample {
            sample.render();
        }
        finished
    }

    /// Advance the clock and sample the frame without writing targets
    ///
    /// The scheduler renders the returned sample with its lock released;
    /// target writes and custom update callbacks must never run under it.
    pub(crate) fn advance(&mut self, dt_ms: f32) -> (bool, Option<FrameSample>) {
        if !self.playing {
            return (false, None);
        }

        self.elapsed_ms += dt_ms;
        let local = self.elapsed_ms - self.timing.delay_ms as f32;
        if local < 0.0 {
            // Still inside the start delay; nothing is written yet
            return (false, None);
        }

        let duration = self.timing.duration_ms as f32;
        let total_cycles = match self.timing.repeat_count {
            n if n < 0 => None,
            n => Some((n + 1) as f32),
        };

        if duration <= 0.0 {
            // Degenerate duration: snap to the final frame and complete
            self.playing = false;
            self.finished = true;
            let last_cycle = self.timing.repeat_count.max(0) as u64;
            return (true, Some(self.sample_at(1.0, last_cycle)));
        }

        if let Some(total) = total_cycles {
            if local >= duration * total {
                let last_cycle = (total - 1.0) as u64;
                self.playing = false;
                self.finished = true;
                return (true, Some(self.sample_at(1.0, last_cycle)));
            }
        }

        let cycle = (local / duration) as u64;
        let frac = (local % duration) / duration;
        (false, Some(self.sample_at(frac, cycle)))
    }

    /// Sample every track at intra-cycle time `frac` of cycle `cycle`
    fn sample_at(&self, frac: f32, cycle: u64) -> FrameSample {
        let frac = match self.timing.repeat_mode {
            RepeatMode::Restart => frac,
            RepeatMode::Reverse if cycle % 2 == 1 => 1.0 - frac,
            RepeatMode::Reverse => frac,
        };
        FrameSample {
            tracks: self.tracks.clone(),
            frac,
            easing: self.timing.easing,
        }
    }
}
