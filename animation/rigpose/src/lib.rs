//! Skeletal animation core
//!
//! Computes, every frame, the skinning matrices that deform a mesh from its
//! bind pose into the pose of the clip currently playing.
//!
//! - [`Skeleton`]: bind-pose node tree, bone table and inverse-bind matrices
//! - [`KeyframeTrack`]: per-node translation/rotation/scale channels
//! - [`AnimationClip`]: timed set of tracks bound to a skeleton
//! - [`Animator`]: playback cursor and final bone matrix array
//!
//! Skeletons and clips are built once from a [`SceneDescription`] and
//! shared read-only; each character owns its own [`Animator`].

pub mod animation;
pub mod error;
pub mod scene;
pub mod skeleton;
pub mod skinning;

// Re-export common types
pub use animation::{
    AnimationClip, AnimationLibrary, Animator, AnimatorOptions, CharacterAction,
    CharacterController, ClipLoadOptions, ClipSet, ControlInput, Keyframe, KeyframeTrack,
    MAX_BONES,
};
pub use error::{AnimationError, Result, TrackDefect};
pub use scene::{BoneDescription, ChannelDescription, ClipDescription, SceneDescription, SceneNode};
pub use skeleton::{Bone, Node, Skeleton, SkeletonBuilder};

// Math types used throughout the public API
pub use glam;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
