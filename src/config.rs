use crate::animation::TimingFunction;
use crate::error::{Error, Result};
use crate::layout::Size;
use crate::theme::Theme;

/// Static configuration for a [`BubbleButton`](crate::widgets::BubbleButton).
///
/// The defaults describe the one button this crate draws; overriding fields is
/// supported for hosts with a different screen or palette.
#[derive(Clone, Debug)]
pub struct ButtonConfig {
    pub label: String,
    /// Unscaled diameter of the fill circle
    pub circle_diameter: f32,
    pub button_height: f32,
    pub corner_radius: f32,
    pub margin_top: f32,
    pub margin_horizontal: f32,
    pub padding_horizontal: f32,
    pub font_size: f32,
    pub icon_size: f32,
    /// Length of both the press-in and press-out animations
    pub duration_ms: f32,
    pub timing: TimingFunction,
    /// Window size; the larger side bounds how far the fill circle grows
    pub screen_size: Size,
    pub theme: Theme,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            label: "use my location".to_string(),
            circle_diameter: 50.0,
            button_height: 50.0,
            corner_radius: 25.0,
            margin_top: 100.0,
            margin_horizontal: 20.0,
            padding_horizontal: 8.0,
            font_size: 14.0,
            icon_size: 30.0,
            duration_ms: 500.0,
            timing: TimingFunction::standard(),
            screen_size: Size::new(1080.0, 1920.0),
            theme: Theme::default(),
        }
    }
}

impl ButtonConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn circle_diameter(mut self, diameter: f32) -> Self {
        self.circle_diameter = diameter;
        self
    }

    pub fn duration_ms(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    pub fn screen_size(mut self, width: f32, height: f32) -> Self {
        self.screen_size = Size::new(width, height);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("circle_diameter", self.circle_diameter),
            ("button_height", self.button_height),
            ("duration_ms", self.duration_ms),
            ("screen width", self.screen_size.width),
            ("screen height", self.screen_size.height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("corner_radius", self.corner_radius),
            ("margin_top", self.margin_top),
            ("margin_horizontal", self.margin_horizontal),
            ("padding_horizontal", self.padding_horizontal),
            ("font_size", self.font_size),
            ("icon_size", self.icon_size),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ButtonConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_values() {
        assert!(ButtonConfig::new().circle_diameter(0.0).validate().is_err());
        assert!(ButtonConfig::new().duration_ms(-1.0).validate().is_err());
        assert!(ButtonConfig::new()
            .screen_size(f32::NAN, 800.0)
            .validate()
            .is_err());

        let mut config = ButtonConfig::new();
        config.margin_top = -4.0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
