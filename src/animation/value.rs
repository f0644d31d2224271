use std::time::Instant;

use super::{Animatable, Driver, Transition};

/// Invoked once when a tween ends. The flag is `true` when the tween reached
/// its target and `false` when it was preempted or stopped.
pub type CompletionCallback = Box<dyn FnOnce(bool)>;

/// Result of advancing an animation, indicating whether the value changed
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult<T> {
    /// Value did not change (animation not running or same value)
    NoChange,
    /// Value changed to a new value
    Changed(T),
}

impl<T> AdvanceResult<T> {
    /// Returns true if the value changed
    pub fn is_changed(&self) -> bool {
        matches!(self, AdvanceResult::Changed(_))
    }
}

struct Tween<T> {
    start: T,
    target: T,
    start_time: Instant,
    transition: Transition,
    on_complete: Option<CompletionCallback>,
}

impl<T> Tween<T> {
    fn finish(mut self, finished: bool) {
        if let Some(callback) = self.on_complete.take() {
            callback(finished);
        }
    }
}

/// A value driven by at most one tween at a time.
///
/// The host's frame loop calls [`advance`](Self::advance) with the frame
/// timestamp; derived properties read [`value`](Self::value) afterwards.
/// Starting a new tween retargets from wherever the value currently is.
pub struct AnimatedValue<T: Animatable> {
    current: T,
    tween: Option<Tween<T>>,
}

impl<T: Animatable> AnimatedValue<T> {
    pub fn new(initial_value: T) -> Self {
        Self {
            current: initial_value,
            tween: None,
        }
    }

    /// Get current value
    pub fn value(&self) -> &T {
        &self.current
    }

    /// Target of the running tween, or the current value when idle
    pub fn target(&self) -> &T {
        self.tween
            .as_ref()
            .map(|tween| &tween.target)
            .unwrap_or(&self.current)
    }

    /// Lane of the running tween
    pub fn driver(&self) -> Option<Driver> {
        self.tween.as_ref().map(|tween| tween.transition.driver)
    }

    /// Check if a tween is running
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Start animating toward `target`, beginning at `now`.
    ///
    /// A tween already in flight is preempted: its callback fires with
    /// `false` and the new tween starts from the current value.
    pub fn animate_to(
        &mut self,
        target: T,
        transition: &Transition,
        now: Instant,
        on_complete: Option<CompletionCallback>,
    ) {
        if let Some(previous) = self.tween.take() {
            log::debug!("retargeting in-flight tween");
            previous.finish(false);
        }

        self.tween = Some(Tween {
            start: self.current.clone(),
            target,
            start_time: now,
            transition: transition.clone(),
            on_complete,
        });
    }

    /// Advance the running tween to `now` and report whether the value changed
    pub fn advance(&mut self, now: Instant) -> AdvanceResult<T> {
        let Some(tween) = self.tween.as_ref() else {
            return AdvanceResult::NoChange;
        };

        let duration_ms = tween.transition.duration_ms;
        let elapsed_ms = now.saturating_duration_since(tween.start_time).as_secs_f32() * 1000.0
            - tween.transition.delay_ms;

        // Still in delay period. A zero-length tween fires once the delay
        // has passed, so only its own start instant counts as waiting.
        let waiting = if duration_ms > 0.0 {
            elapsed_ms <= 0.0
        } else {
            elapsed_ms < 0.0
        };
        if waiting {
            return AdvanceResult::NoChange;
        }

        let t = if duration_ms > 0.0 {
            (elapsed_ms / duration_ms).min(1.0)
        } else {
            1.0
        };

        // Land exactly on the target so endpoint styles carry no float drift
        let new_value = if t >= 1.0 {
            tween.target.clone()
        } else {
            T::lerp(&tween.start, &tween.target, tween.transition.timing.evaluate(t))
        };

        log::trace!("tween at t={:.3}", t);

        let changed = new_value != self.current;
        self.current = new_value;

        if t >= 1.0 {
            if let Some(done) = self.tween.take() {
                done.finish(true);
            }
        }

        if changed {
            AdvanceResult::Changed(self.current.clone())
        } else {
            AdvanceResult::NoChange
        }
    }

    /// Jump to `value`, stopping any running tween
    pub fn set_value(&mut self, value: T) {
        self.stop();
        self.current = value;
    }

    /// Freeze the value where it is, stopping any running tween
    pub fn stop(&mut self) {
        if let Some(tween) = self.tween.take() {
            tween.finish(false);
        }
    }
}

impl<T: Animatable + std::fmt::Debug> std::fmt::Debug for AnimatedValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("current", &self.current)
            .field("target", self.target())
            .field("animating", &self.is_animating())
            .finish()
    }
}
