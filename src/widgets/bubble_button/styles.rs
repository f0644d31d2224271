//! Style properties derived from the button's animated values.
//!
//! Everything here is a pure function of progress and the touch offset; the
//! button recomputes it every frame instead of caching.

use crate::animation::Interpolation;
use crate::config::ButtonConfig;
use crate::transform::Transform;
use crate::widgets::{Color, Point};

/// Label color once the fill has covered the button
pub const PRESSED_LABEL: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

/// Resolved styles for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyles {
    /// Top-left of the unscaled fill circle
    pub fill_offset: Point,
    pub fill_scale: f32,
    pub fill_transform: Transform,
    pub label_color: Color,
    pub icon_color: Color,
}

/// Interpolation tables built once from the configuration.
#[derive(Debug, Clone)]
pub struct StyleTables {
    radius: f32,
    scale: Interpolation<f32>,
    label: Interpolation<Color>,
    icon: Interpolation<Color>,
}

impl StyleTables {
    pub fn new(config: &ButtonConfig) -> Self {
        // At full progress the circle spans the larger screen side, so it
        // covers the button wherever the touch landed.
        let full_scale = config.screen_size.max_side() / config.circle_diameter;
        Self {
            radius: config.circle_diameter / 2.0,
            scale: Interpolation::unit(0.0, full_scale),
            label: Interpolation::unit(config.theme.neutral, PRESSED_LABEL),
            icon: Interpolation::unit(config.theme.brand, config.theme.on_brand),
        }
    }

    pub fn fill_scale(&self, progress: f32) -> f32 {
        self.scale.evaluate(progress)
    }

    /// Move the circle to `offset`, then scale it about its own center.
    pub fn fill_transform(&self, offset: Point, progress: f32) -> Transform {
        Transform::translate(offset.x, offset.y).then(&Transform::scale_about(
            self.fill_scale(progress),
            self.radius,
            self.radius,
        ))
    }

    pub fn label_color(&self, progress: f32) -> Color {
        self.label.evaluate(progress)
    }

    pub fn icon_color(&self, progress: f32) -> Color {
        self.icon.evaluate(progress)
    }

    pub fn resolve(&self, offset: Point, wave: f32, tint: f32) -> ButtonStyles {
        ButtonStyles {
            fill_offset: offset,
            fill_scale: self.fill_scale(wave),
            fill_transform: self.fill_transform(offset, wave),
            label_color: self.label_color(tint),
            icon_color: self.icon_color(tint),
        }
    }
}
