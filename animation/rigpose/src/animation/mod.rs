//! Animation playback
//!
//! This module turns keyframe data into per-frame skinning matrices:
//! - Keyframe tracks with linear/spherical interpolation
//! - Clips binding tracks to a shared skeleton
//! - The per-character animator that walks the hierarchy every frame
//! - A character controller that picks clips by action priority
//!
//! # Example
//!
//! ```rust,ignore
//! use rigpose::animation::{AnimationLibrary, Animator, ClipLoadOptions};
//!
//! let library = AnimationLibrary::load(&scene, &ClipLoadOptions::default())?;
//! let mut animator = Animator::new(library.clip("stand")?);
//!
//! // Switching takes effect on the next update
//! animator.play_animation(&library.clip("walk")?);
//! animator.update_animation(delta_seconds)?;
//!
//! upload_bone_matrices(animator.final_bone_matrices());
//! ```

mod animator;
mod clip;
mod controller;
mod interpolation;
mod library;
mod track;

pub use animator::{Animator, AnimatorOptions, MAX_BONES};
pub use clip::{AnimationClip, ClipLoadOptions, DEFAULT_TICKS_PER_SECOND};
pub use controller::{CharacterAction, CharacterController, ClipSet, ControlInput};
pub use interpolation::{Lerp, find_keyframe_index, interpolation_factor, sample_keyframes};
pub use library::AnimationLibrary;
pub use track::{Keyframe, KeyframeTrack};
