//! Input/output range tables for deriving style properties from a driven value.

use super::Animatable;
use crate::error::{Error, Result};

/// What happens when the input falls outside the declared input range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Extrapolate {
    /// Hold the endpoint output
    #[default]
    Clamp,
    /// Keep following the first/last segment
    Extend,
    /// Pass the input straight through (only meaningful for `f32` outputs)
    Identity,
}

/// Maps a scalar through a piecewise-linear table of `input -> output` stops.
#[derive(Clone, Debug)]
pub struct Interpolation<T: Animatable> {
    input: Vec<f32>,
    output: Vec<T>,
    extrapolate: Extrapolate,
}

impl<T: Animatable> Interpolation<T> {
    /// Build a table. The input range must be strictly increasing, finite and
    /// match the output range in length, with at least two stops.
    pub fn new(input: Vec<f32>, output: Vec<T>) -> Result<Self> {
        if input.len() < 2 {
            return Err(Error::InvalidInterpolation(format!(
                "need at least 2 stops, got {}",
                input.len()
            )));
        }
        if input.len() != output.len() {
            return Err(Error::InvalidInterpolation(format!(
                "input has {} stops but output has {}",
                input.len(),
                output.len()
            )));
        }
        if input.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidInterpolation(
                "input range must be finite".to_string(),
            ));
        }
        if input.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(Error::InvalidInterpolation(format!(
                "input range must be strictly increasing: {:?}",
                input
            )));
        }

        Ok(Self {
            input,
            output,
            extrapolate: Extrapolate::Clamp,
        })
    }

    /// Two-stop table mapping `[0, 1]` onto `[from, to]`
    pub fn unit(from: T, to: T) -> Self {
        Self {
            input: vec![0.0, 1.0],
            output: vec![from, to],
            extrapolate: Extrapolate::Clamp,
        }
    }

    pub fn extrapolate(mut self, extrapolate: Extrapolate) -> Self {
        self.extrapolate = extrapolate;
        self
    }

    pub fn evaluate(&self, value: f32) -> T {
        let last = self.input.len() - 1;

        if value <= self.input[0] || value >= self.input[last] {
            let (edge, segment) = if value <= self.input[0] {
                (0, 0)
            } else {
                (last, last - 1)
            };
            if value == self.input[edge] || self.extrapolate == Extrapolate::Clamp {
                return self.output[edge].clone();
            }
            if self.extrapolate == Extrapolate::Identity {
                if let Some(identity) = identity_output::<T>(value) {
                    return identity;
                }
            }
            return self.lerp_segment(segment, value);
        }

        let segment = self
            .input
            .windows(2)
            .position(|pair| value < pair[1])
            .unwrap_or(last - 1);
        self.lerp_segment(segment, value)
    }

    fn lerp_segment(&self, segment: usize, value: f32) -> T {
        let (lo, hi) = (self.input[segment], self.input[segment + 1]);
        let t = (value - lo) / (hi - lo);
        T::lerp(&self.output[segment], &self.output[segment + 1], t)
    }
}

/// `Some(value)` when `T` is `f32`, used by [`Extrapolate::Identity`]
fn identity_output<T: Animatable>(value: f32) -> Option<T> {
    let boxed: Box<dyn std::any::Any> = Box::new(value);
    boxed.downcast::<T>().ok().map(|v| *v)
}
