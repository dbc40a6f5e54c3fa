//! Per-character playback state
//!
//! The [`Animator`] holds the clip currently playing, a time cursor in the
//! clip's ticks, and the fixed-length array of skinning matrices handed to
//! the renderer. Clips are shared; the animator's state is not.

use std::sync::Arc;

use glam::Mat4;
use log::{debug, trace, warn};

use super::clip::AnimationClip;
use crate::error::{AnimationError, Result};
use crate::skeleton::Skeleton;

/// Bone-count ceiling of the final matrix array
pub const MAX_BONES: usize = 100;

/// Options for constructing an [`Animator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatorOptions {
    /// Length of the final bone matrix array
    pub bone_capacity: usize,
}

impl Default for AnimatorOptions {
    fn default() -> Self {
        Self {
            bone_capacity: MAX_BONES,
        }
    }
}

/// Animation playback for one character
#[derive(Debug, Clone)]
pub struct Animator {
    /// Clip currently playing
    current_clip: Arc<AnimationClip>,
    /// Time cursor in ticks, always within `[0, duration_ticks)`
    current_time_ticks: f32,
    /// Skinning matrices indexed by bone id
    final_bone_matrices: Vec<Mat4>,
    /// Traversal stack reused across frames
    stack: Vec<(usize, Mat4)>,
}

impl Animator {
    /// Create an animator playing `clip` from tick 0 with [`MAX_BONES`] slots
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self::with_options(clip, &AnimatorOptions::default())
    }

    /// Create an animator with a custom matrix capacity
    ///
    /// All matrices start as identity until the first update.
    pub fn with_options(clip: Arc<AnimationClip>, options: &AnimatorOptions) -> Self {
        Self {
            current_clip: clip,
            current_time_ticks: 0.0,
            final_bone_matrices: vec![Mat4::IDENTITY; options.bone_capacity],
            stack: Vec::new(),
        }
    }

    /// Switch to another clip, restarting it from tick 0
    ///
    /// Passing the clip that is already playing does nothing and leaves the
    /// time cursor alone. Returns whether a switch happened.
    pub fn play_animation(&mut self, clip: &Arc<AnimationClip>) -> bool {
        if Arc::ptr_eq(&self.current_clip, clip) {
            return false;
        }

        debug!(
            "Switching animation '{}' -> '{}'",
            self.current_clip.name(),
            clip.name()
        );
        self.current_clip = Arc::clone(clip);
        self.current_time_ticks = 0.0;
        true
    }

    /// Advance playback by `delta_seconds` and recompute all bone matrices
    ///
    /// Every clip loops. Fails without touching the matrices if the clip's
    /// skeleton has more bones than the array can hold.
    pub fn update_animation(&mut self, delta_seconds: f32) -> Result<()> {
        self.advance(delta_seconds);
        self.compute_bone_transforms()
    }

    /// Skinning matrices from the last update, one per bone slot
    pub fn final_bone_matrices(&self) -> &[Mat4] {
        &self.final_bone_matrices
    }

    /// Final matrices flattened column-major for uniform upload
    pub fn gpu_data(&self) -> Vec<f32> {
        self.final_bone_matrices
            .iter()
            .flat_map(Mat4::to_cols_array)
            .collect()
    }

    pub fn current_clip(&self) -> &Arc<AnimationClip> {
        &self.current_clip
    }

    pub fn current_time_ticks(&self) -> f32 {
        self.current_time_ticks
    }

    /// Number of bone slots in the final matrix array
    pub fn capacity(&self) -> usize {
        self.final_bone_matrices.len()
    }

    fn advance(&mut self, delta_seconds: f32) {
        if !delta_seconds.is_finite() {
            warn!("Ignoring non-finite animation delta {delta_seconds}");
            return;
        }

        let duration = self.current_clip.duration_ticks();
        let advanced =
            self.current_time_ticks + delta_seconds * self.current_clip.ticks_per_second();
        if !advanced.is_finite() {
            warn!("Ignoring animation delta {delta_seconds} that overflows the time cursor");
            return;
        }
        self.current_time_ticks = wrap_time(advanced, duration);

        trace!(
            "Animation '{}' at tick {}",
            self.current_clip.name(),
            self.current_time_ticks
        );
    }

    /// Walk the hierarchy root to leaf writing `global * offset` per bone
    fn compute_bone_transforms(&mut self) -> Result<()> {
        let clip = &self.current_clip;
        let skeleton = clip.skeleton();
        let capacity = self.final_bone_matrices.len();

        if skeleton.bone_count() > capacity {
            return Err(AnimationError::CapacityExceeded {
                bone_index: skeleton.bone_count() - 1,
                capacity,
            });
        }

        let time = self.current_time_ticks;
        let nodes = skeleton.nodes();
        let bones = skeleton.bones();

        self.stack.clear();
        self.stack.push((Skeleton::ROOT, Mat4::IDENTITY));

        while let Some((node_index, parent_transform)) = self.stack.pop() {
            let node = &nodes[node_index];
            let global_transform = parent_transform * clip.local_transform(node_index, time);

            if let Some(bone_index) = node.bone_index {
                let slot = self
                    .final_bone_matrices
                    .get_mut(bone_index)
                    .ok_or(AnimationError::CapacityExceeded {
                        bone_index,
                        capacity,
                    })?;
                *slot = global_transform * bones[bone_index].offset;
            }

            self.stack.extend(
                node.children
                    .iter()
                    .rev()
                    .map(|&child| (child, global_transform)),
            );
        }

        Ok(())
    }
}

/// Wrap a tick count into `[0, duration)`
fn wrap_time(time: f32, duration: f32) -> f32 {
    let wrapped = time.rem_euclid(duration);
    // rem_euclid can round up to exactly `duration` for tiny negative input
    if wrapped >= duration { 0.0 } else { wrapped }
}
