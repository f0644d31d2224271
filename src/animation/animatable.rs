use crate::widgets::{Color, Point};

/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Clone + PartialEq + 'static {
    /// Linear interpolation between two values
    /// t = 0.0 returns `from`, t = 1.0 returns `to`
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for Color {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Color {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }
}

impl Animatable for Point {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Point {
            x: from.x + (to.x - from.x) * t,
            y: from.y + (to.y - from.y) * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(f32::lerp(&0.0, &10.0, 0.0), 0.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 0.5), 5.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 1.0), 10.0);
    }

    #[test]
    fn test_color_lerp() {
        let gray = Color::rgb(0.5, 0.5, 0.5);
        let mid = Color::lerp(&gray, &Color::WHITE, 0.5);
        assert_eq!(mid.r, 0.75);
        assert_eq!(mid.g, 0.75);
        assert_eq!(mid.b, 0.75);
        assert_eq!(mid.a, 1.0);
    }

    #[test]
    fn test_point_lerp() {
        let mid = Point::lerp(&Point::new(-25.0, 0.0), &Point::new(25.0, 50.0), 0.5);
        assert_eq!(mid, Point::new(0.0, 25.0));
    }
}
