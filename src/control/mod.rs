//! Closed-loop regulation.

pub mod fan;

/// Constrain `x` to `[min, max]`, evaluating `x` once.
///
/// Unlike [`Ord::clamp`] this never panics on an inverted range; `min`
/// wins in that case.
pub fn clamp<T: PartialOrd + Copy>(x: T, min: T, max: T) -> T {
    if x <= min {
        min
    } else if x >= max {
        max
    } else {
        x
    }
}
