//! Named style constants consumed by the button.
//!
//! These belong to the host application's design system; the button reads
//! them and never validates them.

use crate::widgets::Color;

pub mod colors {
    use crate::widgets::Color;

    pub const NEUTRAL_500: Color = Color::from_hex(0x737373);
    pub const BLUE_500: Color = Color::from_hex(0x3B82F6);
    pub const WHITE: Color = Color::WHITE;
    pub const SHADOW: Color = Color::from_hex(0x3E3E3E);
}

pub mod sizes {
    /// Base spacing unit
    pub const GUTTER: f32 = 8.0;
}

/// The subset of the design system the button draws with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Label color at rest
    pub neutral: Color,
    /// Fill circle color and icon color at rest
    pub brand: Color,
    /// Container background and pressed label/icon color
    pub on_brand: Color,
    pub shadow: Color,
    pub gutter: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            neutral: colors::NEUTRAL_500,
            brand: colors::BLUE_500,
            on_brand: colors::WHITE,
            shadow: colors::SHADOW,
            gutter: sizes::GUTTER,
        }
    }
}
