//! "Use my location" pill button with a bubble fill on press.
//!
//! Pressing grows a solid circle from the touch point until it covers the
//! button while the label and icon fade to white; releasing plays the same
//! animation backwards from wherever it currently is.
//!
//! # Example
//! ```ignore
//! let mut button = BubbleButton::new();
//! button.layout(Constraints::loose(Size::new(390.0, 844.0)));
//!
//! button.event(&Event::PressIn { x: 40.0, y: 25.0 });
//! while button.advance(Instant::now()) {
//!     present(button.paint());
//! }
//! ```

mod icon;
mod styles;

pub use icon::{LOCATION_ARROW, VIEW_BOX as ICON_VIEW_BOX};
pub use styles::{ButtonStyles, StyleTables, PRESSED_LABEL};

use std::time::Instant;

use crate::animation::{AnimatedValue, Driver, PropertyKind, Transition};
use crate::config::ButtonConfig;
use crate::error::Result;
use crate::layout::{Constraints, Size};
use crate::renderer::{ClipRegion, DrawCommand, RenderNode, Shadow, TextAlign};
use crate::state::StateSlot;
use crate::widgets::{Color, Event, EventResponse, Point, Rect, Widget};

/// Where the button is in its press cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// At rest, no fill
    Idle,
    /// Fill growing toward full coverage
    Expanding,
    /// Fully covered, held while pressed
    Expanded,
    /// Fill shrinking back to rest
    Collapsing,
}

pub struct BubbleButton {
    config: ButtonConfig,
    tables: StyleTables,
    /// Fill-circle scale progress
    wave: AnimatedValue<f32>,
    /// Label/icon color progress
    tint: AnimatedValue<f32>,
    wave_transition: Transition,
    tint_transition: Transition,
    /// Top-left of the unscaled circle, set on press-in
    touch_offset: StateSlot<Point>,
    /// Last size reported by a layout pass. Nothing reads it for styling yet.
    measured: StateSlot<Size>,
    pressed: bool,
    /// Button box in the parent, from the last layout pass
    frame: Rect,
}

impl BubbleButton {
    pub fn new() -> Self {
        Self::build(ButtonConfig::default())
    }

    pub fn with_config(config: ButtonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ButtonConfig) -> Self {
        let base = Transition::new(config.duration_ms, config.timing.clone());
        // Scale only feeds a transform, so it may run on the native lane;
        // colors have to be written on the main lane.
        let wave_transition = base
            .clone()
            .driver(Driver::Native)
            .for_property(PropertyKind::Transform);
        let tint_transition = base
            .driver(Driver::Main)
            .for_property(PropertyKind::Color);

        let frame = Rect::new(
            config.margin_horizontal,
            config.margin_top,
            (config.screen_size.width - config.margin_horizontal * 2.0).max(0.0),
            config.button_height,
        );

        Self {
            tables: StyleTables::new(&config),
            wave: AnimatedValue::new(0.0),
            tint: AnimatedValue::new(0.0),
            wave_transition,
            tint_transition,
            touch_offset: StateSlot::new(Point::default()),
            measured: StateSlot::new(Size::zero()),
            pressed: false,
            frame,
            config,
        }
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Handle an input event as if it arrived at `now`.
    pub fn event_at(&mut self, event: &Event, now: Instant) -> EventResponse {
        match *event {
            Event::PressIn { x, y } => {
                let radius = self.config.circle_diameter / 2.0;
                self.touch_offset.set(Point::new(x - radius, y - radius));
                self.pressed = true;
                log::debug!("BubbleButton: press in at ({}, {})", x, y);
                self.animate(1.0, now);
            }
            Event::PressOut { x, y } => {
                self.pressed = false;
                log::debug!(
                    "BubbleButton: press out at ({}, {}), progress {:.3}",
                    x,
                    y,
                    self.progress()
                );
                self.animate(0.0, now);
            }
            Event::Layout { width, height } => {
                self.record_layout(Size::new(width, height));
            }
        }
        EventResponse::Handled
    }

    /// Retarget both values. In-flight tweens are preempted and continue
    /// from their current value.
    fn animate(&mut self, target: f32, now: Instant) {
        self.wave
            .animate_to(target, &self.wave_transition, now, Some(Box::new(|_| {})));
        self.tint
            .animate_to(target, &self.tint_transition, now, Some(Box::new(|_| {})));
    }

    fn record_layout(&mut self, size: Size) {
        if self.measured.set(size) {
            log::trace!("BubbleButton: measured {}x{}", size.width, size.height);
        }
    }

    /// Step both animations to `now`. Returns true while either is running.
    pub fn advance(&mut self, now: Instant) -> bool {
        let wave = self.wave.advance(now);
        let tint = self.tint.advance(now);
        if wave.is_changed() || tint.is_changed() {
            log::trace!(
                "BubbleButton: wave {:.3}, tint {:.3}",
                self.wave.value(),
                self.tint.value()
            );
        }
        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        self.wave.is_animating() || self.tint.is_animating()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Fill-scale progress in `0..=1`
    pub fn progress(&self) -> f32 {
        *self.wave.value()
    }

    /// Color progress in `0..=1`
    pub fn tint_progress(&self) -> f32 {
        *self.tint.value()
    }

    /// Lanes of the running tweens, `(wave, tint)`
    pub fn drivers(&self) -> (Option<Driver>, Option<Driver>) {
        (self.wave.driver(), self.tint.driver())
    }

    pub fn phase(&self) -> Phase {
        let toward_full = *self.wave.target() >= 1.0;
        let at_rest = *self.wave.value() <= 0.0;
        match (self.wave.is_animating(), toward_full) {
            (true, true) => Phase::Expanding,
            // A release with nothing filled has nothing to collapse
            (true, false) if at_rest => Phase::Idle,
            (true, false) => Phase::Collapsing,
            (false, true) => Phase::Expanded,
            (false, false) => Phase::Idle,
        }
    }

    pub fn touch_offset(&self) -> Point {
        self.touch_offset.get()
    }

    pub fn measured_size(&self) -> Size {
        self.measured.get()
    }

    /// Number of times a layout pass changed the measured size
    pub fn measurement_version(&self) -> u64 {
        self.measured.version()
    }

    /// Button box from the last layout pass, in parent coordinates
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn styles(&self) -> ButtonStyles {
        self.tables.resolve(
            self.touch_offset.get(),
            *self.wave.value(),
            *self.tint.value(),
        )
    }

    fn label_rect(&self) -> Rect {
        let inset = self.config.padding_horizontal + self.config.theme.gutter * 2.0 + 20.0;
        Rect::new(
            inset,
            0.0,
            (self.frame.width - inset * 2.0).max(0.0),
            self.frame.height,
        )
    }

    fn icon_rect(&self) -> Rect {
        let size = self.config.icon_size;
        Rect::new(
            self.frame.width - self.config.theme.gutter * 2.0 - size,
            (self.frame.height - size) / 2.0,
            size,
            size,
        )
    }
}

impl Default for BubbleButton {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for BubbleButton {
    fn advance_animations(&mut self, now: Instant) -> bool {
        self.advance(now)
    }

    /// The button fills the available width minus its horizontal margins and
    /// sits `margin_top` below the top edge.
    fn layout(&mut self, constraints: Constraints) -> Size {
        let config = &self.config;
        let outer = constraints.constrain(Size::new(
            constraints.max_width,
            config.margin_top + config.button_height,
        ));

        self.frame = Rect::new(
            config.margin_horizontal,
            config.margin_top,
            (outer.width - config.margin_horizontal * 2.0).max(0.0),
            config.button_height,
        );
        self.record_layout(self.frame.size());
        outer
    }

    fn paint(&self) -> RenderNode {
        let styles = self.styles();
        let theme = &self.config.theme;
        let bounds = Rect::from_size(self.frame.size());
        let radius = self.config.corner_radius;
        let diameter = self.config.circle_diameter;

        let fill = RenderNode::with_bounds("fill", Rect::new(0.0, 0.0, diameter, diameter))
            .transform(styles.fill_transform)
            .command(DrawCommand::circle(
                (diameter / 2.0, diameter / 2.0),
                diameter / 2.0,
                theme.brand,
            ));

        let label_rect = self.label_rect();
        let label = RenderNode::with_bounds("label", label_rect).command(DrawCommand::Text {
            text: self.config.label.clone(),
            rect: Rect::from_size(label_rect.size()),
            color: styles.label_color,
            font_size: self.config.font_size,
            align: TextAlign::Center,
        });

        let icon_rect = self.icon_rect();
        let icon = RenderNode::with_bounds("icon", icon_rect).command(DrawCommand::Icon {
            path: LOCATION_ARROW,
            view_box: ICON_VIEW_BOX,
            rect: Rect::from_size(icon_rect.size()),
            color: styles.icon_color,
        });

        // Overflow is hidden on the surface only, so the shadow stays visible
        let surface = RenderNode::with_bounds("surface", bounds)
            .clip(ClipRegion {
                rect: bounds,
                corner_radius: radius,
            })
            .child(fill)
            .child(label)
            .child(icon);

        RenderNode::with_bounds("bubble-button", self.frame)
            .command(DrawCommand::RoundedRect {
                rect: bounds,
                color: Color::WHITE,
                radius,
                shadow: Some(Shadow::new((0.0, 0.0), 3.0, theme.shadow)),
            })
            .child(surface)
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        self.event_at(event, Instant::now())
    }
}
