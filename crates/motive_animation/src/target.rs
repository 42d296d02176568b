//! Target element contract
//!
//! The sequencing core never creates or destroys visual elements; callers
//! hand it shared references to elements that expose numeric properties,
//! a density factor for device-independent units, and a way to request a
//! layout pass. Anything that implements [`AnimTarget`] can be animated.

use std::sync::{Arc, Mutex};

use crate::color::Color;

/// Animatable property kinds addressed by tracks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    TranslateX,
    TranslateY,
    Alpha,
    ScaleX,
    ScaleY,
    /// Rotation in degrees
    Rotation,
    /// Layout width; writes normally go through a custom track that
    /// also requests a layout pass
    Width,
    /// Layout height; see [`Property::Width`]
    Height,
}

/// A visual element the sequencer can drive
///
/// Implementations are supplied by the host toolkit. Property reads and
/// writes happen once per animation frame on the UI thread.
pub trait AnimTarget: Send {
    /// Read the current value of a numeric property
    fn get_property(&self, prop: Property) -> f32;

    /// Write a numeric property
    fn set_property(&mut self, prop: Property, value: f32);

    /// Write the background color (driven by ARGB-evaluated tracks)
    fn set_background_color(&mut self, color: Color);

    /// Device-independent-unit conversion factor (display density)
    fn scale_factor(&self) -> f32;

    /// Ask the host to re-run layout for this element
    ///
    /// Width/height tracks call this after each frame's write so the
    /// toolkit recomputes dependent geometry.
    fn request_layout(&mut self);
}

/// Shared handle to an animatable element
pub type SharedTarget = Arc<Mutex<dyn AnimTarget>>;

/// Wrap an element in the shared handle the builders expect
pub fn shared<T: AnimTarget + 'static>(target: T) -> SharedTarget {
    Arc::new(Mutex::new(target))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// In-memory element used by tests across the crate
    #[derive(Debug)]
    pub struct StubView {
        pub translate_x: f32,
        pub translate_y: f32,
        pub alpha: f32,
        pub scale_x: f32,
        pub scale_y: f32,
        pub rotation: f32,
        pub width: f32,
        pub height: f32,
        pub background: Color,
        pub density: f32,
        pub layout_requests: usize,
    }

    impl StubView {
        pub fn new() -> Self {
            Self::with_density(1.0)
        }

        pub fn with_density(density: f32) -> Self {
            Self {
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
                layout_requests: 0,
            }
        }
    }

    impl AnimTarget for StubView {
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
            self.layout_requests += 1;
        }
    }
}
