//! Expanding Pill Demo
//!
//! A headless walkthrough of a chained sequence:
//! - a pill expands its width in device-independent units, gated behind
//!   one layout pass
//! - a caption slides up and fades in once the pill settles
//! - after a short beat the caption fades back out while the pill
//!   collapses and darkens
//!
//! The host loop here is a plain fixed-step tick driver; in a real
//! toolkit the frame scheduler ticks once per rendering frame.
//!
//! Run with: cargo run -p motive_animation --example expanding_pill

use std::sync::{Arc, Mutex};

use motive_animation::{
    animate, set_global_scheduler, AnimTarget, Color, Easing, FrameScheduler, Property,
    SharedTarget,
};

/// Minimal stand-in for a toolkit element
struct DemoView {
    name: &'static str,
    translate_x: f32,
    translate_y: f32,
    alpha: f32,
    scale_x: f32,
    scale_y: f32,
    rotation: f32,
    width: f32,
    height: f32,
    background: Color,
    density: f32,
}

impl DemoView {
    fn new(name: &'static str, density: f32) -> Self {
        Self {
            name,
            translate_x: 0.0,
            translate_y: 0.0,
            alpha: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            width: 0.0,
            height: 0.0,
            background: Color::TRANSPARENT,
            density,
        }
    }
}

impl AnimTarget for DemoView {
    fn get_property(&self, prop: Property) -> f32 {
        match prop {
            Property::TranslateX => self.translate_x,
            Property::TranslateY => self.translate_y,
            Property::Alpha => self.alpha,
            Property::ScaleX => self.scale_x,
            Property::ScaleY => self.scale_y,
            Property::Rotation => self.rotation,
            Property::Width => self.width,
            Property::Height => self.height,
        }
    }

    fn set_property(&mut self, prop: Property, value: f32) {
        match prop {
            Property::TranslateX => self.translate_x = value,
            Property::TranslateY => self.translate_y = value,
            Property::Alpha => self.alpha = value,
            Property::ScaleX => self.scale_x = value,
            Property::ScaleY => self.scale_y = value,
            Property::Rotation => self.rotation = value,
            Property::Width => self.width = value,
            Property::Height => self.height = value,
        }
    }

    fn set_background_color(&mut self, color: Color) {
        self.background = color;
    }

    fn scale_factor(&self) -> f32 {
        self.density
    }

    fn request_layout(&mut self) {
        tracing::trace!(name = self.name, width = self.width, "layout requested");
    }
}

fn main() -> motive_animation::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let scheduler = FrameScheduler::new();
    set_global_scheduler(scheduler.handle());

    // Density 2.0, so the 60..250 dip keyframes become 120..500 pixels
    let pill_view = Arc::new(Mutex::new(DemoView::new("pill", 2.0)));
    let label_view = Arc::new(Mutex::new(DemoView::new("label", 2.0)));
    let pill: SharedTarget = pill_view.clone();
    let label: SharedTarget = label_view.clone();

    animate(&[pill.clone()])
        .dip()
        .width(&[60.0, 250.0])
        .wait_for_layout()
        .duration_ms(800)
        .easing(Easing::Decelerate)
        .on_start(|| tracing::info!("pill expanding"))
        .then_animate(&[label.clone()])
        .translate_y(&[50.0, 0.0])
        .alpha(&[0.1, 1.0])
        .duration_ms(800)
        .easing(Easing::Overshoot)
        .on_stop(|| tracing::info!("caption revealed"))
        .then_animate(&[label.clone()])
        .alpha(&[1.0, 0.0])
        .and_animate(&[pill.clone()])
        .dip()
        .width(&[250.0, 60.0])
        .background_color(&[Color::from_argb(0xff3d5afe), Color::from_argb(0xff263260)])
        .start_delay_ms(400)
        .duration_ms(1200)
        .accelerate()
        .start()?;

    let mut frames = 0u32;
    while scheduler.tick(16.0) {
        frames += 1;
    }

    let pill_width = pill_view.lock().unwrap().get_property(Property::Width);
    let pill_background = pill_view.lock().unwrap().background.to_argb();
    let label_alpha = label_view.lock().unwrap().alpha;
    tracing::info!(
        frames,
        pill_width,
        pill_background = format!("{pill_background:#010x}"),
        label_alpha,
        "sequence finished"
    );
    Ok(())
}
