//! Shared rigs for integration tests

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use rigpose::{
    AnimationLibrary, BoneDescription, ChannelDescription, ClipDescription, ClipLoadOptions,
    Keyframe, SceneDescription, SceneNode,
};

/// Root with one child, both skinned, identity bind pose at the root
pub fn two_bone_scene(clips: Vec<ClipDescription>) -> SceneDescription {
    let child_bind = Mat4::from_translation(Vec3::Y);
    SceneDescription {
        root: SceneNode::new("root", Mat4::IDENTITY)
            .with_child(SceneNode::new("child", child_bind)),
        bones: vec![
            BoneDescription {
                name: "root".into(),
                offset: Mat4::IDENTITY,
            },
            BoneDescription {
                name: "child".into(),
                offset: child_bind.inverse(),
            },
        ],
        clips,
    }
}

/// Spine with a non-trivial bind pose and an unskinned helper node
pub fn humanoid_scene(clips: Vec<ClipDescription>) -> SceneDescription {
    let hips = Mat4::from_scale_rotation_translation(
        Vec3::ONE,
        Quat::from_rotation_x(-FRAC_PI_2),
        Vec3::new(0.0, 1.0, 0.0),
    );
    let spine = Mat4::from_translation(Vec3::new(0.0, 0.0, 0.3));
    let head = Mat4::from_scale_rotation_translation(
        Vec3::splat(1.1),
        Quat::from_rotation_z(0.2),
        Vec3::new(0.0, 0.1, 0.5),
    );
    let leg = Mat4::from_translation(Vec3::new(0.2, 0.0, -0.1));

    let root = SceneNode::new("Armature", Mat4::from_scale(Vec3::splat(0.5))).with_child(
        SceneNode::new("Hips", hips)
            .with_child(
                SceneNode::new("Spine", spine)
                    .with_child(SceneNode::new("Head", head))
                    .with_child(SceneNode::new("HeadTop_End", Mat4::IDENTITY)),
            )
            .with_child(SceneNode::new("LeftLeg", leg)),
    );

    let scene = SceneDescription {
        root,
        bones: vec![],
        clips,
    };

    // Inverse-bind offsets derived from the global bind pose
    let skeleton = rigpose::Skeleton::from_scene(&scene).unwrap();
    let globals = skeleton.global_bind_transforms();
    let bones = ["Hips", "Spine", "Head", "LeftLeg"]
        .iter()
        .map(|name| BoneDescription {
            name: (*name).to_string(),
            offset: globals[skeleton.node_index(name).unwrap()].inverse(),
        })
        .collect();

    SceneDescription { bones, ..scene }
}

/// Rotation-only channel turning about Y from `from` to `to` radians
pub fn yaw_channel(node: &str, end_tick: f32, from: f32, to: f32) -> ChannelDescription {
    ChannelDescription {
        node: node.into(),
        rotations: Some(vec![
            Keyframe::new(0.0, Quat::from_rotation_y(from)),
            Keyframe::new(end_tick, Quat::from_rotation_y(to)),
        ]),
        ..Default::default()
    }
}

/// Translation-only channel sliding along X
pub fn slide_channel(node: &str, end_tick: f32, distance: f32) -> ChannelDescription {
    ChannelDescription {
        node: node.into(),
        positions: Some(vec![
            Keyframe::new(0.0, Vec3::ZERO),
            Keyframe::new(end_tick, Vec3::new(distance, 0.0, 0.0)),
        ]),
        ..Default::default()
    }
}

pub fn clip(
    name: &str,
    duration_ticks: f32,
    ticks_per_second: f32,
    channels: Vec<ChannelDescription>,
) -> ClipDescription {
    ClipDescription {
        name: name.into(),
        duration_ticks,
        ticks_per_second: Some(ticks_per_second),
        channels,
    }
}

/// Route library logs through the test harness; `RUST_LOG=debug` shows them
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load(scene: &SceneDescription) -> Arc<AnimationLibrary> {
    init_logging();
    Arc::new(AnimationLibrary::load(scene, &ClipLoadOptions::default()).unwrap())
}

pub fn assert_matrices_close(actual: &[Mat4], expected: &[Mat4], epsilon: f32) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            a.abs_diff_eq(*e, epsilon),
            "bone {i} differs:\n  actual   {a:?}\n  expected {e:?}"
        );
    }
}
