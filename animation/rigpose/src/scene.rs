//! Scene description consumed from the asset importer
//!
//! These types mirror what an interchange-format importer hands over after
//! parsing: an owned node tree with bind-pose transforms, the list of
//! skinned bones with their inverse-bind matrices, and the raw keyframe
//! channels of every animation. Nothing here is validated; validation
//! happens when a [`Skeleton`](crate::Skeleton) or
//! [`AnimationClip`](crate::AnimationClip) is built from it.
//!
//! With the `serde-support` feature the whole description can be read from
//! JSON, matrices as 16 column-major floats, quaternions as `[x, y, z, w]`.

use glam::{Mat4, Quat, Vec3};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::animation::Keyframe;
#[cfg(feature = "serde-support")]
use crate::error::{AnimationError, Result};

/// One node of the imported scene graph
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct SceneNode {
    /// Node name, unique within the scene
    pub name: String,
    /// Bind-pose transform relative to the parent node
    #[cfg_attr(feature = "serde-support", serde(default = "identity"))]
    pub transform: Mat4,
    /// Child nodes in import order
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create a leaf node
    pub fn new(name: impl Into<String>, transform: Mat4) -> Self {
        Self {
            name: name.into(),
            transform,
            children: Vec::new(),
        }
    }

    /// Append a child and return self, for building trees inline
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

/// A skinned bone as reported by the importer
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct BoneDescription {
    /// Name of the node driving this bone
    pub name: String,
    /// Inverse bind-pose matrix
    #[cfg_attr(feature = "serde-support", serde(default = "identity"))]
    pub offset: Mat4,
}

/// Keyframes for one animated node
///
/// A component the source does not animate is `None` and keeps the node's
/// bind-pose value. `Some(vec![])` claims a channel without samples and is
/// rejected at load time.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct ChannelDescription {
    /// Name of the animated node
    pub node: String,
    #[cfg_attr(
        feature = "serde-support",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub positions: Option<Vec<Keyframe<Vec3>>>,
    #[cfg_attr(
        feature = "serde-support",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub rotations: Option<Vec<Keyframe<Quat>>>,
    #[cfg_attr(
        feature = "serde-support",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub scales: Option<Vec<Keyframe<Vec3>>>,
}

/// An imported animation
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct ClipDescription {
    pub name: String,
    /// Clip length in ticks
    pub duration_ticks: f32,
    /// Ticks per second; `None` or zero when the source file omits it
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub ticks_per_second: Option<f32>,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub channels: Vec<ChannelDescription>,
}

/// Everything the importer produced for one rigged character
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct SceneDescription {
    pub root: SceneNode,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub bones: Vec<BoneDescription>,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub clips: Vec<ClipDescription>,
}

#[cfg(feature = "serde-support")]
fn identity() -> Mat4 {
    Mat4::IDENTITY
}

#[cfg(feature = "serde-support")]
impl SceneDescription {
    /// Decode a scene description from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| AnimationError::Scene(e.to_string()))
    }

    /// Decode a scene description from a JSON stream
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| AnimationError::Scene(e.to_string()))
    }

    /// Encode the scene description as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| AnimationError::Scene(e.to_string()))
    }
}
