pub mod animation;
pub mod config;
pub mod error;
pub mod layout;
pub mod state;
pub mod theme;
pub mod transform;
pub mod widgets;

// Public for hosts that consume the render tree directly
pub mod renderer;

use std::time::{Duration, Instant};

use layout::Constraints;
use renderer::{rasterize, RenderNode};
use resvg::tiny_skia::Pixmap;
use widgets::{Color, Widget};

pub use config::ButtonConfig;
pub use error::{Error, Result};

pub mod prelude {
    pub use crate::animation::{
        AnimatedValue, Animatable, Driver, Extrapolate, Interpolation, PropertyKind,
        TimingFunction, Transition,
    };
    pub use crate::layout::{Constraints, Size};
    pub use crate::renderer::{DrawCommand, RenderNode};
    pub use crate::state::StateSlot;
    pub use crate::theme::Theme;
    pub use crate::transform::Transform;
    pub use crate::widgets::{
        BubbleButton, ButtonStyles, Color, Event, EventResponse, Phase, Point, Rect, Widget,
    };
    pub use crate::{App, AppConfig, ButtonConfig, Error, Frame, Result};
}

/// Surface settings for the headless host.
pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 240,
            background_color: Color::rgb(0.95, 0.95, 0.95),
        }
    }
}

/// One produced frame: the render tree and its rasterization.
pub struct Frame {
    pub tree: RenderNode,
    pub pixmap: Pixmap,
    /// Whether the widget asked for another frame
    pub animating: bool,
}

impl Frame {
    pub fn to_image(&self) -> image::RgbaImage {
        renderer::to_image(&self.pixmap)
    }
}

/// Headless host that drives a widget through the frame loop on a CPU
/// surface: advance animations, lay out, paint and rasterize.
pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.config.height = height;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background_color = color;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Produce the frame for timestamp `now`.
    pub fn frame<W: Widget>(&self, root: &mut W, now: Instant) -> Result<Frame> {
        let animating = root.advance_animations(now);

        let constraints = Constraints::new(
            0.0,
            0.0,
            self.config.width as f32,
            self.config.height as f32,
        );
        root.layout(constraints);

        let tree = root.paint();
        let pixmap = rasterize(
            &tree,
            self.config.width,
            self.config.height,
            self.config.background_color,
        )?;

        Ok(Frame {
            tree,
            pixmap,
            animating,
        })
    }

    /// Produce frames every `interval` starting at `start` until the widget
    /// stops animating or `max_frames` is reached. Returns the last frame and
    /// the timestamp it was produced for.
    pub fn run_until_idle<W: Widget>(
        &self,
        root: &mut W,
        start: Instant,
        interval: Duration,
        max_frames: usize,
    ) -> Result<(Frame, Instant)> {
        let mut now = start;
        let mut frame = self.frame(root, now)?;
        let mut produced = 1;

        while frame.animating && produced < max_frames {
            now += interval;
            frame = self.frame(root, now)?;
            produced += 1;
        }

        log::debug!(
            "App: produced {} frames, still animating: {}",
            produced,
            frame.animating
        );
        Ok((frame, now))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
