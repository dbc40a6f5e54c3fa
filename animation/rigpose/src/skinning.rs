//! CPU reference for vertex skinning
//!
//! Mirrors the sum a skinning vertex shader performs with the matrices
//! produced by [`Animator`](crate::Animator): each vertex carries up to
//! [`MAX_BONE_INFLUENCE`] `(bone id, weight)` pairs and its position is the
//! weighted sum of the position transformed by each bone's matrix.

use glam::{Mat4, Vec3, Vec4};

/// Bone influences per vertex
pub const MAX_BONE_INFLUENCE: usize = 4;

/// Bone ids and weights for one vertex; `-1` marks an unused slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexInfluence {
    pub bone_ids: [i32; MAX_BONE_INFLUENCE],
    pub weights: [f32; MAX_BONE_INFLUENCE],
}

impl Default for VertexInfluence {
    fn default() -> Self {
        Self {
            bone_ids: [-1; MAX_BONE_INFLUENCE],
            weights: [0.0; MAX_BONE_INFLUENCE],
        }
    }
}

impl VertexInfluence {
    /// Fully bound to one bone
    pub fn single(bone_id: i32) -> Self {
        let mut influence = Self::default();
        influence.bone_ids[0] = bone_id;
        influence.weights[0] = 1.0;
        influence
    }

    /// Store the pair in the first free slot; false when all slots are taken
    pub fn add(&mut self, bone_id: i32, weight: f32) -> bool {
        match self.bone_ids.iter().position(|&id| id < 0) {
            Some(slot) => {
                self.bone_ids[slot] = bone_id;
                self.weights[slot] = weight;
                true
            }
            None => false,
        }
    }
}

/// Skin one position
///
/// A bone id outside `matrices` leaves the vertex unskinned, as does an
/// influence with no used slots.
pub fn skin_position(matrices: &[Mat4], influence: &VertexInfluence, position: Vec3) -> Vec3 {
    let point = position.extend(1.0);
    let mut total = Vec4::ZERO;
    let mut used = false;

    for (&bone_id, &weight) in influence.bone_ids.iter().zip(&influence.weights) {
        if bone_id < 0 {
            continue;
        }
        let Some(matrix) = matrices.get(bone_id as usize) else {
            return position;
        };
        total += (*matrix * point) * weight;
        used = true;
    }

    if used { total.truncate() } else { position }
}
