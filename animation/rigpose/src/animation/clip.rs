//! Animation clips bound to a skeleton

use std::sync::Arc;

use glam::Mat4;
use log::{debug, warn};

use super::track::{Keyframe, KeyframeTrack};
use crate::error::{AnimationError, Result, TrackDefect};
use crate::scene::{ChannelDescription, ClipDescription};
use crate::skeleton::Skeleton;

/// Tick rate assumed when the source data does not state one
pub const DEFAULT_TICKS_PER_SECOND: f32 = 25.0;

/// Options applied while loading clips
#[derive(Debug, Clone, PartialEq)]
pub struct ClipLoadOptions {
    /// Used when a clip's tick rate is missing or zero
    pub default_ticks_per_second: f32,
}

impl Default for ClipLoadOptions {
    fn default() -> Self {
        Self {
            default_ticks_per_second: DEFAULT_TICKS_PER_SECOND,
        }
    }
}

/// A named, timed set of keyframe tracks targeting one skeleton
///
/// Immutable once built. Tracks are stored per node index so the animator
/// can look them up without hashing during the hierarchy walk.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    name: String,
    duration_ticks: f32,
    ticks_per_second: f32,
    tracks: Vec<Option<KeyframeTrack>>,
    skeleton: Arc<Skeleton>,
}

impl AnimationClip {
    /// Bind ready-made tracks to a skeleton
    ///
    /// Every track must name a node of `skeleton`, and no node may be
    /// animated twice.
    pub fn new(
        name: impl Into<String>,
        duration_ticks: f32,
        ticks_per_second: Option<f32>,
        tracks: Vec<(String, KeyframeTrack)>,
        skeleton: Arc<Skeleton>,
        options: &ClipLoadOptions,
    ) -> Result<Self> {
        let name = name.into();
        let ticks_per_second = resolve_tick_rate(&name, ticks_per_second, options)?;

        if !duration_ticks.is_finite() || duration_ticks <= 0.0 {
            return Err(AnimationError::InvalidClip {
                clip: name,
                reason: format!("duration must be positive, got {duration_ticks}"),
            });
        }

        let mut slots = vec![None; skeleton.node_count()];
        for (node_name, track) in tracks {
            let node = skeleton
                .node_index(&node_name)
                .ok_or_else(|| AnimationError::BindingMismatch {
                    clip: name.clone(),
                    node: node_name.clone(),
                })?;

            if slots[node].is_some() {
                return Err(AnimationError::MalformedTrack {
                    clip: name,
                    node: node_name,
                    reason: TrackDefect::DuplicateChannel,
                });
            }

            if track.end_time() > duration_ticks {
                warn!(
                    "Clip '{}': track for '{}' ends at tick {} past the clip duration {}",
                    name,
                    node_name,
                    track.end_time(),
                    duration_ticks
                );
            }

            slots[node] = Some(track);
        }

        let clip = Self {
            name,
            duration_ticks,
            ticks_per_second,
            tracks: slots,
            skeleton,
        };

        debug!(
            "Bound clip '{}': {} ticks at {} ticks/s, {} tracks",
            clip.name,
            clip.duration_ticks,
            clip.ticks_per_second,
            clip.track_count()
        );

        Ok(clip)
    }

    /// Build a clip from imported channel data
    ///
    /// Components a channel leaves out keep the node's bind-pose value.
    pub fn from_description(
        description: &ClipDescription,
        skeleton: Arc<Skeleton>,
        options: &ClipLoadOptions,
    ) -> Result<Self> {
        let tracks = description
            .channels
            .iter()
            .map(|channel| {
                let track = channel_to_track(&description.name, channel, &skeleton)?;
                Ok((channel.node.clone(), track))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(
            description.name.clone(),
            description.duration_ticks,
            description.ticks_per_second,
            tracks,
            skeleton,
            options,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration_ticks(&self) -> f32 {
        self.duration_ticks
    }

    pub fn ticks_per_second(&self) -> f32 {
        self.ticks_per_second
    }

    /// Clip length in seconds
    ///
    /// This is what playback timers compare elapsed wall-clock time against.
    pub fn duration_seconds(&self) -> f32 {
        self.duration_ticks / self.ticks_per_second
    }

    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    /// Track animating the named node, if any
    pub fn track_for(&self, node_name: &str) -> Option<&KeyframeTrack> {
        self.skeleton
            .node_index(node_name)
            .and_then(|index| self.track_for_node(index))
    }

    /// Track animating the node at `node_index`, if any
    pub fn track_for_node(&self, node_index: usize) -> Option<&KeyframeTrack> {
        self.tracks.get(node_index).and_then(Option::as_ref)
    }

    pub fn track_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_some()).count()
    }

    /// Local transform of a node at the given tick
    ///
    /// Untracked nodes keep their bind-pose transform.
    pub fn local_transform(&self, node_index: usize, time_ticks: f32) -> Mat4 {
        match self.track_for_node(node_index) {
            Some(track) => track.local_transform_at(time_ticks),
            None => self
                .skeleton
                .node(node_index)
                .map_or(Mat4::IDENTITY, |node| node.local_bind_transform),
        }
    }
}

fn resolve_tick_rate(clip: &str, rate: Option<f32>, options: &ClipLoadOptions) -> Result<f32> {
    match rate {
        None => Ok(options.default_ticks_per_second),
        Some(r) if r == 0.0 => Ok(options.default_ticks_per_second),
        Some(r) if r.is_finite() && r > 0.0 => Ok(r),
        Some(r) => Err(AnimationError::InvalidClip {
            clip: clip.to_string(),
            reason: format!("ticks per second must be positive, got {r}"),
        }),
    }
}

fn channel_to_track(
    clip: &str,
    channel: &ChannelDescription,
    skeleton: &Skeleton,
) -> Result<KeyframeTrack> {
    let node = skeleton
        .node_index(&channel.node)
        .and_then(|index| skeleton.node(index))
        .ok_or_else(|| AnimationError::BindingMismatch {
            clip: clip.to_string(),
            node: channel.node.clone(),
        })?;

    let (bind_scale, bind_rotation, bind_translation) =
        node.local_bind_transform.to_scale_rotation_translation();

    let positions = keys_or_bind(channel.positions.as_deref(), bind_translation);
    let rotations = keys_or_bind(channel.rotations.as_deref(), bind_rotation);
    let scales = keys_or_bind(channel.scales.as_deref(), bind_scale);

    KeyframeTrack::new(positions, rotations, scales).map_err(|reason| {
        AnimationError::MalformedTrack {
            clip: clip.to_string(),
            node: channel.node.clone(),
            reason,
        }
    })
}

fn keys_or_bind<T: Copy>(keys: Option<&[Keyframe<T>]>, bind: T) -> Vec<Keyframe<T>> {
    keys.map_or_else(|| vec![Keyframe::new(0.0, bind)], <[_]>::to_vec)
}
