#![forbid(unsafe_code)]

//! Easing curves and value interpolation.
//!
//! Animations in the workbench are step based: a run of `n` ticks reports the
//! value at `t = i / n` for `i = 1..=n`, shaped by an easing curve and mapped
//! onto the animated property through [`Lerp`].
//!
//! # Invariants
//!
//! 1. Every easing function maps `0.0 → 0.0` and `1.0 → 1.0` exactly.
//! 2. [`Lerp::lerp`] returns `b` unchanged for any `t >= 1.0`, so the final
//!    tick of a run always lands on the requested endpoint.
//! 3. Integer impls truncate toward zero, matching how pixel properties are
//!    snapped on every intermediate step.

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end): `1 - (1 - t)^2`.
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Scalar linear interpolation, `a + (b - a) * t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A value that can be interpolated between two endpoints.
pub trait Lerp: Copy {
    /// Interpolate from `a` to `b` at parameter `t`.
    ///
    /// `t <= 0.0` yields `a`; `t >= 1.0` yields `b` exactly.
    fn lerp(a: Self, b: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        if t >= 1.0 {
            return b;
        }
        if t <= 0.0 {
            return a;
        }
        lerp(a, b, t)
    }
}

impl Lerp for f64 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        if t >= 1.0 {
            return b;
        }
        if t <= 0.0 {
            return a;
        }
        a + (b - a) * f64::from(t)
    }
}

impl Lerp for i32 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        if t >= 1.0 {
            return b;
        }
        if t <= 0.0 {
            return a;
        }
        let v = f64::from(a) + (f64::from(b) - f64::from(a)) * f64::from(t);
        v.trunc() as i32
    }
}

impl Lerp for u32 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        if t >= 1.0 {
            return b;
        }
        if t <= 0.0 {
            return a;
        }
        let v = f64::from(a) + (f64::from(b) - f64::from(a)) * f64::from(t);
        v.trunc().max(0.0) as u32
    }
}

impl Lerp for u8 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        if t >= 1.0 {
            return b;
        }
        if t <= 0.0 {
            return a;
        }
        let v = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
        v.trunc().clamp(0.0, 255.0) as u8
    }
}
