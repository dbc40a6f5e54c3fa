//! Load-time assembly of a skeleton and its clips

use std::sync::Arc;

use log::debug;

use super::clip::{AnimationClip, ClipLoadOptions};
use crate::error::{AnimationError, Result};
use crate::scene::SceneDescription;
use crate::skeleton::Skeleton;

/// A skeleton and every clip that targets it
///
/// Both are shared read-only; any number of animators may hold the clips.
#[derive(Debug, Clone)]
pub struct AnimationLibrary {
    skeleton: Arc<Skeleton>,
    clips: Vec<Arc<AnimationClip>>,
}

impl AnimationLibrary {
    /// Build the skeleton and bind all clips of an imported scene
    ///
    /// Fails on the first clip that does not match the skeleton.
    pub fn load(scene: &SceneDescription, options: &ClipLoadOptions) -> Result<Self> {
        let skeleton = Arc::new(Skeleton::from_scene(scene)?);
        let mut clips: Vec<Arc<AnimationClip>> = Vec::with_capacity(scene.clips.len());

        for description in &scene.clips {
            if clips.iter().any(|c| c.name() == description.name) {
                return Err(AnimationError::InvalidClip {
                    clip: description.name.clone(),
                    reason: "clip name is used more than once".to_string(),
                });
            }
            let clip = AnimationClip::from_description(description, Arc::clone(&skeleton), options)?;
            clips.push(Arc::new(clip));
        }

        debug!("Loaded animation library with {} clips", clips.len());

        Ok(Self { skeleton, clips })
    }

    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    pub fn clips(&self) -> &[Arc<AnimationClip>] {
        &self.clips
    }

    /// Shared handle to the named clip
    pub fn clip(&self, name: &str) -> Result<Arc<AnimationClip>> {
        self.clips
            .iter()
            .find(|c| c.name() == name)
            .cloned()
            .ok_or_else(|| AnimationError::ClipNotFound(name.to_string()))
    }

    pub fn clip_names(&self) -> impl Iterator<Item = &str> {
        self.clips.iter().map(|c| c.name())
    }
}
