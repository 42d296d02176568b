//! Motive Animation Sequencing
//!
//! Fluent composition of multi-property animations into synchronized
//! groups and ordered chains.
//!
//! # Features
//!
//! - **Fluent Builders**: `animate(targets).alpha(..).translate_y(..)`
//! - **Synchronized Groups**: every track in a group shares one timeline,
//!   duration, start delay, and repeat policy
//! - **Chaining**: `then_animate` queues a group to play after the
//!   current one completes; `and_animate` widens the current group
//! - **Layout Gating**: `wait_for_layout` defers playback until one
//!   render pass has happened, for tracks that need post-layout geometry
//! - **Lifecycle Callbacks**: `on_start` / `on_stop` per group, custom
//!   per-frame value callbacks per track
//! - **Frame Scheduler**: single-threaded driver ticked by the host UI's
//!   render loop
//!
//! # Example
//!
//! ```ignore
//! use motive_animation::{animate, Easing};
//!
//! animate(&[pill.clone()])
//!     .dip()
//!     .width(&[60.0, 250.0])
//!     .easing(Easing::Decelerate)
//!     .duration_ms(800)
//!     .then_animate(&[label.clone()])
//!     .dip()
//!     .translate_y(&[50.0, 0.0])
//!     .alpha(&[0.1, 1.0])
//!     .single_easing(Easing::Overshoot)
//!     .duration_ms(800)
//!     .start()?;
//! ```

pub mod builder;
pub mod color;
pub mod easing;
pub mod error;
pub mod playback;
pub mod scheduler;
pub mod sequencer;
pub mod target;
pub mod track;

pub use builder::{animate, animate_with, AnimationBuilder, Animator};
pub use color::Color;
pub use easing::Easing;
pub use error::{Result, SequenceError};
pub use playback::{GroupTiming, Playback, RepeatMode, DEFAULT_DURATION_MS};
pub use scheduler::{
    get_scheduler, is_scheduler_initialized, set_global_scheduler, try_get_scheduler,
    CompletionFn, FrameScheduler, PlaybackId, PreDrawFn, SchedulerHandle, SubscriptionId,
};
pub use sequencer::{LifecycleFn, NodeId, NodeState, SequenceHandle};
pub use target::{shared, AnimTarget, Property, SharedTarget};
pub use track::{PropertyTrack, TrackPayload, UpdateFn};
