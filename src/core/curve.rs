//! Piecewise-linear keyframe curves over any interpolable value.
//!
//! A curve is a list of `(position, value)` keys sorted by position. Sampling
//! below the first key or above the last returns the boundary value. Repeated
//! positions form an instantaneous step where the later key wins.

use bevy::color::Srgba;
use thiserror::Error;

/// Values that can be blended linearly.
pub trait Lerp: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Srgba {
    fn lerp(self, other: Self, t: f32) -> Self {
        Srgba::new(
            self.red.lerp(other.red, t),
            self.green.lerp(other.green, t),
            self.blue.lerp(other.blue, t),
            self.alpha.lerp(other.alpha, t),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<T> {
    pub position: f32,
    pub value: T,
}

impl<T> Keyframe<T> {
    pub const fn new(position: f32, value: T) -> Self {
        Self { position, value }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("curve has no keyframes")]
    Empty,
    #[error("keyframe {index} at position {position} breaks non-decreasing order")]
    Unordered { index: usize, position: f32 },
}

/// An immutable, validated curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient<T> {
    keys: Vec<Keyframe<T>>,
}

impl<T: Lerp> Gradient<T> {
    pub fn new(keys: impl Into<Vec<Keyframe<T>>>) -> Result<Self, CurveError> {
        let keys = keys.into();
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        for (index, key) in keys.iter().enumerate() {
            let previous = if index == 0 {
                key.position
            } else {
                keys[index - 1].position
            };
            if key.position.is_nan() || key.position < previous {
                return Err(CurveError::Unordered {
                    index,
                    position: key.position,
                });
            }
        }
        Ok(Self { keys })
    }

    pub fn sample(&self, position: f32) -> T {
        sample_sorted(&self.keys, position)
    }
}

/// Samples a raw key slice. Ordering is the caller's responsibility.
pub fn evaluate<T: Lerp>(keys: &[Keyframe<T>], position: f32) -> Result<T, CurveError> {
    if keys.is_empty() {
        return Err(CurveError::Empty);
    }
    Ok(sample_sorted(keys, position))
}

/// Samples a fixed-size key table; an empty table fails to compile.
pub fn sample_array<T: Lerp, const N: usize>(keys: &[Keyframe<T>; N], position: f32) -> T {
    const { assert!(N > 0, "keyframe table must not be empty") };
    sample_sorted(keys, position)
}

fn sample_sorted<T: Lerp>(keys: &[Keyframe<T>], position: f32) -> T {
    let first = &keys[0];
    let last = &keys[keys.len() - 1];

    if position.is_nan() || position <= first.position {
        return first.value;
    }
    if position >= last.position {
        return last.value;
    }

    // first.position < position < last.position, so both neighbours exist.
    let upper = keys.partition_point(|key| key.position <= position);
    let from = &keys[upper - 1];
    let to = &keys[upper];

    let span = to.position - from.position;
    if span <= 0.0 {
        return to.value;
    }
    from.value.lerp(to.value, (position - from.position) / span)
}
