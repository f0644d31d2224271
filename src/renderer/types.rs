//! Shared types for the renderer.

use crate::widgets::Color;

/// Shadow configuration for shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Shadow offset in logical pixels (x, y)
    pub offset: (f32, f32),
    /// Blur radius in logical pixels
    pub blur: f32,
    /// Shadow color
    pub color: Color,
}

impl Shadow {
    pub fn new(offset: (f32, f32), blur: f32, color: Color) -> Self {
        Self {
            offset,
            blur,
            color,
        }
    }
}

/// Horizontal placement of a text run inside its box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Start,
    #[default]
    Center,
    End,
}
