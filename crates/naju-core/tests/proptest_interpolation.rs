//! Property-based invariants for easing and interpolation.
//!
//! 1. Easing output stays in [0, 1] for any input.
//! 2. Ease-out is monotonically non-decreasing.
//! 3. Interpolation at t = 1 returns the endpoint exactly, for every impl.
//! 4. Integer interpolation never leaves the closed interval of its endpoints.

use naju_core::animation::{Lerp, ease_in_out, ease_out, linear};
use proptest::prelude::*;

#[test]
fn easing_functions_are_monotonic() {
    for easing in [linear, ease_out, ease_in_out] {
        let mut prev = 0.0f32;
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            let v = easing(t);
            assert!(v >= prev - 0.001, "easing should be monotonic at t={t}");
            prev = v;
        }
    }
}

proptest! {
    #[test]
    fn ease_out_stays_in_unit_range(t in -10.0f32..10.0) {
        let v = ease_out(t);
        prop_assert!((0.0..=1.0).contains(&v), "ease_out({}) = {}", t, v);
    }

    #[test]
    fn float_lerp_converges(a in -1.0e4f32..1.0e4, b in -1.0e4f32..1.0e4) {
        prop_assert_eq!(<f32 as Lerp>::lerp(a, b, ease_out(1.0)), b);
    }

    #[test]
    fn i32_lerp_converges_and_stays_bounded(
        a in -10_000i32..10_000,
        b in -10_000i32..10_000,
        t in 0.0f32..=1.0,
    ) {
        prop_assert_eq!(i32::lerp(a, b, 1.0), b);
        let v = i32::lerp(a, b, t);
        prop_assert!(v >= a.min(b) && v <= a.max(b), "{} not within [{}, {}]", v, a, b);
    }

    #[test]
    fn u32_lerp_converges_and_stays_bounded(
        a in 0u32..5_000,
        b in 0u32..5_000,
        t in 0.0f32..=1.0,
    ) {
        prop_assert_eq!(u32::lerp(a, b, 1.0), b);
        let v = u32::lerp(a, b, t);
        prop_assert!(v >= a.min(b) && v <= a.max(b));
    }
}
