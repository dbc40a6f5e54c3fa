//! Keyframe interpolation for animation channels

use glam::{Quat, Vec3};

use super::track::Keyframe;

/// Trait for values that can be blended between two keyframes
pub trait Lerp: Clone {
    /// Interpolate between self and other by factor `t` in `[0, 1]`
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::lerp(*self, *other, t)
    }
}

impl Lerp for Quat {
    /// Spherical interpolation along the shorter arc, renormalized
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let end = if self.dot(*other) < 0.0 { -*other } else { *other };
        self.slerp(end, t).normalize()
    }
}

/// Find the index of the keyframe at or before the given time
///
/// Returns None if there are no keyframes. Times before the first keyframe
/// map to index 0; times past the last map to the last index. Otherwise the
/// result is the earlier keyframe of the bracketing pair `[index, index + 1]`.
pub fn find_keyframe_index<T>(keys: &[Keyframe<T>], time: f32) -> Option<usize> {
    if keys.is_empty() {
        return None;
    }

    // Number of keyframes with timestamp <= time
    let at_or_before = keys.partition_point(|k| k.time <= time);
    Some(at_or_before.saturating_sub(1))
}

/// Sample a channel at the given time
///
/// Clamps to the first/last keyframe outside the keyed range and returns
/// stored values unchanged when `time` hits a keyframe exactly.
pub fn sample_keyframes<T: Lerp>(keys: &[Keyframe<T>], time: f32) -> Option<T> {
    let first = keys.first()?;
    let last = keys.last()?;

    if keys.len() == 1 || time.is_nan() || time <= first.time {
        return Some(first.value.clone());
    }
    if time >= last.time {
        return Some(last.value.clone());
    }

    let index = find_keyframe_index(keys, time)?;
    let k0 = &keys[index];
    if time == k0.time {
        return Some(k0.value.clone());
    }
    let k1 = keys.get(index + 1)?;

    Some(k0.value.lerp(&k1.value, interpolation_factor(k0.time, k1.time, time)))
}

/// Normalized position of `time` within `[t0, t1]`, zero for a degenerate interval
pub fn interpolation_factor(t0: f32, t1: f32, time: f32) -> f32 {
    let span = t1 - t0;
    if span > 0.0 {
        ((time - t0) / span).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
