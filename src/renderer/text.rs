use std::cell::RefCell;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};

use crate::layout::Size;
use crate::widgets::Color;

/// Shapes, measures and rasterizes single-line labels.
pub struct TextEngine {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl TextEngine {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }

    fn shape(&mut self, text: &str, font_size: f32, max_width: Option<f32>) -> Buffer {
        let metrics = Metrics::new(font_size, font_size * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        buffer.set_size(&mut self.font_system, max_width, None);
        buffer.set_text(
            &mut self.font_system,
            text,
            &Attrs::new().family(Family::SansSerif),
            Shaping::Advanced,
            None,
        );
        buffer.shape_until_scroll(&mut self.font_system, true);
        buffer
    }

    pub fn measure(&mut self, text: &str, font_size: f32, max_width: Option<f32>) -> Size {
        let buffer = self.shape(text, font_size, max_width);

        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;
        }

        // Ensure minimum height for empty text
        if height == 0.0 {
            height = font_size * 1.2;
        }

        Size::new(width, height)
    }

    /// Rasterize `text` with its top-left at the origin, reporting each
    /// covered span as `(x, y, width, height, color)`.
    pub fn draw<F>(&mut self, text: &str, font_size: f32, color: Color, mut span: F)
    where
        F: FnMut(i32, i32, u32, u32, Color),
    {
        let buffer = self.shape(text, font_size, None);
        let [r, g, b, a] = color.to_rgba8();
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            cosmic_text::Color::rgba(r, g, b, a),
            |x, y, w, h, c| {
                span(x, y, w, h, Color::from_rgba8(c.r(), c.g(), c.b(), c.a() as f32 / 255.0))
            },
        );
    }
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static TEXT_ENGINE: RefCell<TextEngine> = RefCell::new(TextEngine::new());
}

/// Measure text dimensions using the font system
pub fn measure_text(text: &str, font_size: f32, max_width: Option<f32>) -> Size {
    TEXT_ENGINE.with_borrow_mut(|engine| engine.measure(text, font_size, max_width))
}

/// Run `f` against this thread's text engine
pub fn with_text_engine<R>(f: impl FnOnce(&mut TextEngine) -> R) -> R {
    TEXT_ENGINE.with_borrow_mut(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_keeps_line_height() {
        let size = measure_text("", 14.0, None);
        assert_eq!(size.width, 0.0);
        assert!((size.height - 14.0 * 1.2).abs() < 1e-3);
    }

    #[test]
    fn test_measure_is_stable_and_grows_with_text() {
        let short = measure_text("use", 14.0, None);
        let long = measure_text("use my location", 14.0, None);
        assert_eq!(short, measure_text("use", 14.0, None));
        assert!(long.width >= short.width);
        assert!(long.height > 0.0);
    }
}
