//! Draw command definitions for the render tree.

use super::types::{Shadow, TextAlign};
use crate::widgets::{Color, Rect};

/// A single draw operation in local coordinates.
///
/// All coordinates and sizes are in the node's local coordinate space.
/// World transforms are applied during tree flattening.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draw a rounded rectangle with an optional drop shadow.
    RoundedRect {
        /// Rectangle bounds in local coordinates
        rect: Rect,
        /// Fill color
        color: Color,
        /// Corner radius in logical pixels
        radius: f32,
        /// Optional shadow
        shadow: Option<Shadow>,
    },

    /// Draw a filled circle.
    Circle {
        /// Center point in local coordinates
        center: (f32, f32),
        /// Radius in logical pixels
        radius: f32,
        /// Fill color
        color: Color,
    },

    /// Draw a single line of text.
    Text {
        text: String,
        /// The box the text is aligned within
        rect: Rect,
        color: Color,
        font_size: f32,
        align: TextAlign,
    },

    /// Draw an SVG path, scaled from its square view box into `rect`.
    Icon {
        /// SVG path data (`d` attribute)
        path: &'static str,
        /// Side length of the square view box the path is authored in
        view_box: f32,
        rect: Rect,
        color: Color,
    },
}

impl DrawCommand {
    /// Create a simple rounded rectangle.
    pub fn rounded_rect(rect: Rect, color: Color, radius: f32) -> Self {
        Self::RoundedRect {
            rect,
            color,
            radius,
            shadow: None,
        }
    }

    /// Create a circle.
    pub fn circle(center: (f32, f32), radius: f32, color: Color) -> Self {
        Self::Circle {
            center,
            radius,
            color,
        }
    }

    /// Fill or text color of the command
    pub fn color(&self) -> Color {
        match self {
            DrawCommand::RoundedRect { color, .. }
            | DrawCommand::Circle { color, .. }
            | DrawCommand::Text { color, .. }
            | DrawCommand::Icon { color, .. } => *color,
        }
    }
}
