//! Per-node keyframe tracks

use glam::{Mat4, Quat, Vec3};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use super::interpolation::sample_keyframes;
use crate::error::TrackDefect;

/// A single timed sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Keyframe<T> {
    /// Timestamp in ticks
    pub time: f32,
    pub value: T,
}

impl<T> Keyframe<T> {
    pub const fn new(time: f32, value: T) -> Self {
        Self { time, value }
    }
}

/// Translation, rotation and scale channels for one node
///
/// Every channel holds at least one keyframe with strictly increasing
/// timestamps; [`KeyframeTrack::new`] rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack {
    positions: Vec<Keyframe<Vec3>>,
    rotations: Vec<Keyframe<Quat>>,
    scales: Vec<Keyframe<Vec3>>,
}

impl KeyframeTrack {
    /// Create a validated track
    ///
    /// Rotations are normalized on the way in.
    pub fn new(
        positions: Vec<Keyframe<Vec3>>,
        rotations: Vec<Keyframe<Quat>>,
        scales: Vec<Keyframe<Vec3>>,
    ) -> Result<Self, TrackDefect> {
        validate_channel("position", &positions, |v| v.is_finite())?;
        validate_channel("rotation", &rotations, |q| {
            q.is_finite() && q.length_squared() > 0.0
        })?;
        validate_channel("scale", &scales, |v| v.is_finite())?;

        let rotations = rotations
            .into_iter()
            .map(|k| Keyframe::new(k.time, k.value.normalize()))
            .collect();

        Ok(Self {
            positions,
            rotations,
            scales,
        })
    }

    /// A track holding a single pose for all times
    pub fn constant(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            positions: vec![Keyframe::new(0.0, translation)],
            rotations: vec![Keyframe::new(0.0, rotation.normalize())],
            scales: vec![Keyframe::new(0.0, scale)],
        }
    }

    /// Interpolated `(translation, rotation, scale)` at the given tick
    pub fn sample_at(&self, time_ticks: f32) -> (Vec3, Quat, Vec3) {
        let translation = sample_keyframes(&self.positions, time_ticks).unwrap_or(Vec3::ZERO);
        let rotation = sample_keyframes(&self.rotations, time_ticks).unwrap_or(Quat::IDENTITY);
        let scale = sample_keyframes(&self.scales, time_ticks).unwrap_or(Vec3::ONE);
        (translation, rotation, scale)
    }

    /// Local transform `T * R * S` at the given tick
    pub fn local_transform_at(&self, time_ticks: f32) -> Mat4 {
        let (translation, rotation, scale) = self.sample_at(time_ticks);
        Mat4::from_scale_rotation_translation(scale, rotation, translation)
    }

    pub fn positions(&self) -> &[Keyframe<Vec3>] {
        &self.positions
    }

    pub fn rotations(&self) -> &[Keyframe<Quat>] {
        &self.rotations
    }

    pub fn scales(&self) -> &[Keyframe<Vec3>] {
        &self.scales
    }

    /// Latest timestamp across all three channels
    pub fn end_time(&self) -> f32 {
        [
            self.positions.last().map(|k| k.time),
            self.rotations.last().map(|k| k.time),
            self.scales.last().map(|k| k.time),
        ]
        .into_iter()
        .flatten()
        .fold(0.0, f32::max)
    }
}

fn validate_channel<T>(
    channel: &'static str,
    keys: &[Keyframe<T>],
    is_valid: impl Fn(&T) -> bool,
) -> Result<(), TrackDefect> {
    if keys.is_empty() {
        return Err(TrackDefect::EmptyChannel { channel });
    }

    for (index, key) in keys.iter().enumerate() {
        if !key.time.is_finite() || !is_valid(&key.value) {
            return Err(TrackDefect::NonFinite { channel, index });
        }
        if index > 0 && key.time <= keys[index - 1].time {
            return Err(TrackDefect::NotIncreasing { channel, index });
        }
    }

    Ok(())
}
