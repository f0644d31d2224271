mod animatable;
mod interpolate;
mod timing;
mod value;

pub use animatable::Animatable;
pub use interpolate::{Extrapolate, Interpolation};
pub use timing::TimingFunction;
pub use value::{AdvanceResult, AnimatedValue, CompletionCallback};

/// Which lane a tween runs on.
///
/// Transform-only properties may be updated off the synchronous render path;
/// anything else (colors, layout) has to be written on the main lane. Both
/// lanes are served by the same frame clock here, the flag records intent and
/// is checked against the property a value drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Driver {
    /// May run outside the render path (transforms and opacity only)
    Native,
    /// Runs on the render path
    #[default]
    Main,
}

/// Kind of style property an animated value feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Transform,
    Color,
}

impl Driver {
    /// Whether this lane is allowed to drive the given property
    pub fn supports(self, kind: PropertyKind) -> bool {
        match self {
            Driver::Native => kind == PropertyKind::Transform,
            Driver::Main => true,
        }
    }
}

/// Configuration for how a value should animate toward a new target
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the animation in milliseconds
    pub duration_ms: f32,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
    /// Delay before animation starts in milliseconds
    pub delay_ms: f32,
    /// Execution lane
    pub driver: Driver,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0.0,
            driver: Driver::Main,
        }
    }

    /// Set the delay before the animation starts
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    /// Set the execution lane
    pub fn driver(mut self, driver: Driver) -> Self {
        self.driver = driver;
        self
    }

    /// Resolve the lane for a value driving `kind`, demoting to the main lane
    /// when the requested one can't write that property.
    pub fn for_property(mut self, kind: PropertyKind) -> Self {
        if !self.driver.supports(kind) {
            log::warn!(
                "{:?} driver cannot animate {:?} properties, falling back to main lane",
                self.driver,
                kind
            );
            self.driver = Driver::Main;
        }
        self
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(500.0, TimingFunction::standard())
    }
}
