//! Error types for motive_animation

use thiserror::Error;

/// Errors surfaced when starting or resuming a sequence
///
/// Configuration mistakes (empty target sets, repeat counts below -1,
/// empty keyframe lists) are precondition violations and panic at
/// builder-call time instead of returning one of these.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    /// The chain's head node is already playing; restarting mid-flight
    /// is rejected rather than silently restarting
    #[error("sequence is already playing")]
    AlreadyPlaying,

    /// The node was cancelled before it could start
    #[error("sequence was cancelled")]
    Cancelled,

    /// The frame scheduler behind this sequence has been dropped
    #[error("frame scheduler has been dropped")]
    SchedulerGone,
}

/// Result type for sequence operations
pub type Result<T> = std::result::Result<T, SequenceError>;
