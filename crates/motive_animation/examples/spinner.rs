//! Spinner Demo
//!
//! An indefinitely repeating rotation track, driven for a couple of
//! seconds and then stopped through its sequence handle. Infinite
//! repeats never complete on their own, so cancellation is the only
//! way such a sequence ends.
//!
//! Run with: cargo run -p motive_animation --example spinner

use motive_animation::{animate_with, shared, AnimTarget, Color, FrameScheduler, Property};

/// An element that only cares about its rotation
struct SpinnerIcon {
    rotation: f32,
}

impl AnimTarget for SpinnerIcon {
    fn get_property(&self, prop: Property) -> f32 {
        match prop {
            Property::Rotation => self.rotation,
            _ => 0.0,
        }
    }

    fn set_property(&mut self, prop: Property, value: f32) {
        if prop == Property::Rotation {
            self.rotation = value;
        }
    }

    fn set_background_color(&mut self, _color: Color) {}

    fn scale_factor(&self) -> f32 {
        1.0
    }

    fn request_layout(&mut self) {}
}

fn main() -> motive_animation::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let scheduler = FrameScheduler::new();
    let icon = shared(SpinnerIcon { rotation: 0.0 });

    let handle = animate_with(scheduler.handle(), &[icon.clone()])
        .rotation(&[0.0, 360.0])
        .duration_ms(1000)
        .repeat_count(-1)
        .start()?;

    for _ in 0..120 {
        scheduler.tick(16.0);
    }
    let degrees = icon.lock().unwrap().get_property(Property::Rotation);
    tracing::info!(degrees, "spun for roughly two seconds");

    handle.cancel();
    assert!(!scheduler.tick(16.0));
    assert!(!handle.is_active());
    tracing::info!("spinner cancelled");
    Ok(())
}
