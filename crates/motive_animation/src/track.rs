//! Property tracks
//!
//! A track is one animated property on one target: a keyframe value
//! sequence plus an optional easing override. Tracks are accumulated by
//! the builders and compiled into a [`Playback`](crate::playback::Playback)
//! when a sequence starts.

use std::sync::Arc;

use crate::color::Color;
use crate::easing::Easing;
use crate::target::{AnimTarget, Property, SharedTarget};

/// Per-frame callback for custom value tracks
///
/// Receives the track's target and the current interpolated value.
/// Width/height tracks are built on this: the callback writes the layout
/// dimension and requests a layout pass.
pub type UpdateFn = Arc<dyn Fn(&mut dyn AnimTarget, f32) + Send + Sync>;

/// What a track writes each frame
#[derive(Clone)]
pub enum TrackPayload {
    /// A named numeric property
    Property { prop: Property, values: Vec<f32> },
    /// Background color, interpolated per ARGB channel
    Color { values: Vec<Color> },
    /// Arbitrary numeric value delivered to a callback
    Custom { update: UpdateFn, values: Vec<f32> },
}

/// One property's keyframe sequence for one target
#[derive(Clone)]
pub struct PropertyTrack {
    pub target: SharedTarget,
    pub payload: TrackPayload,
    /// Per-track easing; overrides the group easing when set
    pub easing: Option<Easing>,
}

impl PropertyTrack {
    /// Number of keyframe values in this track
    pub fn value_count(&self) -> usize {
        match &self.payload {
            TrackPayload::Property { values, .. } => values.len(),
            TrackPayload::Color { values } => values.len(),
            TrackPayload::Custom { values, .. } => values.len(),
        }
    }

    /// Sample at eased progress and write the target
    pub(crate) fn apply(&self, progress: f32) {
        match &self.payload {
            TrackPayload::Property { prop, values } => {
                let value = sample(values, progress);
                self.target.lock().unwrap().set_property(*prop, value);
            }
            TrackPayload::Color { values } => {
                let color = sample_color(values, progress);
                self.target.lock().unwrap().set_background_color(color);
            }
            TrackPayload::Custom { update, values } => {
                let value = sample(values, progress);
                update(&mut *self.target.lock().unwrap(), value);
            }
        }
    }
}

/// Sample evenly spaced keyframe values at `progress`
///
/// Two values form a from/to pair; N values split the timeline into N-1
/// equal segments. Progress outside [0, 1] extrapolates the end segments
/// so overshoot easings travel past the final value. A single value is a
/// constant track.
pub(crate) fn sample(values: &[f32], progress: f32) -> f32 {
    debug_assert!(!values.is_empty(), "track has no keyframe values");
    if values.len() == 1 {
        return values[0];
    }
    let pos = progress * (values.len() - 1) as f32;
    let seg = (pos.floor() as isize).clamp(0, values.len() as isize - 2) as usize;
    let t = pos - seg as f32;
    values[seg] + (values[seg + 1] - values[seg]) * t
}

/// Sample evenly spaced color keyframes at `progress`
pub(crate) fn sample_color(values: &[Color], progress: f32) -> Color {
    debug_assert!(!values.is_empty(), "track has no keyframe values");
    if values.len() == 1 {
        return values[0];
    }
    let pos = progress * (values.len() - 1) as f32;
    let seg = (pos.floor() as isize).clamp(0, values.len() as isize - 2) as usize;
    let t = pos - seg as f32;
    values[seg].lerp(&values[seg + 1], t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::testing::StubView;
    use crate::target::shared;
    use std::sync::Mutex;

    #[test]
    fn test_sample_two_values() {
        assert!((sample(&[0.0, 100.0], 0.0) - 0.0).abs() < 1e-6);
        assert!((sample(&[0.0, 100.0], 0.5) - 50.0).abs() < 1e-6);
        assert!((sample(&[0.0, 100.0], 1.0) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_multi_segment() {
        // Three values, two equal segments
        let values = [0.0, 100.0, 50.0];
        assert!((sample(&values, 0.25) - 50.0).abs() < 1e-4);
        assert!((sample(&values, 0.5) - 100.0).abs() < 1e-4);
        assert!((sample(&values, 0.75) - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_sample_extrapolates_overshoot() {
        // Overshoot easings produce progress > 1.0
        assert!(sample(&[0.0, 100.0], 1.1) > 100.0);
        assert!(sample(&[0.0, 100.0], -0.1) < 0.0);
    }

    #[test]
    fn test_sample_single_value_is_constant() {
        assert_eq!(sample(&[42.0], 0.0), 42.0);
        assert_eq!(sample(&[42.0], 1.0), 42.0);
    }

    #[test]
    fn test_property_track_writes_target() {
        let view = shared(StubView::new());
        let track = PropertyTrack {
            target: view.clone(),
            payload: TrackPayload::Property {
                prop: Property::TranslateY,
                values: vec![0.0, 10.0],
            },
            easing: None,
        };
        track.apply(0.5);
        assert!((view.lock().unwrap().get_property(Property::TranslateY) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_custom_track_invokes_callback() {
        // Concrete handle kept for field access; the track holds the coercion
        let view = Arc::new(Mutex::new(StubView::new()));
        let track = PropertyTrack {
            target: view.clone(),
            payload: TrackPayload::Custom {
                update: Arc::new(|target, value| {
                    target.set_property(Property::Width, value);
                    target.request_layout();
                }),
                values: vec![60.0, 250.0],
            },
            easing: None,
        };
        track.apply(1.0);
        let view = view.lock().unwrap();
        assert!((view.get_property(Property::Width) - 250.0).abs() < 1e-6);
        assert_eq!(view.layout_requests, 1);
    }
}
