//! Playback laws of the animator

use std::sync::Arc;

use glam::Mat4;
use pretty_assertions::assert_eq;
use rigpose::{AnimationClip, Animator, MAX_BONES};
use test_case::test_case;

use crate::common::{
    assert_matrices_close, clip, humanoid_scene, load, slide_channel, two_bone_scene, yaw_channel,
};

#[test]
fn test_bind_pose_reproduction_without_tracks() {
    let library = load(&humanoid_scene(vec![clip("rest", 10.0, 25.0, vec![])]));
    let skeleton = library.skeleton();
    let globals = skeleton.global_bind_transforms();

    let mut animator = Animator::new(library.clip("rest").unwrap());
    animator.update_animation(0.0).unwrap();

    let expected: Vec<Mat4> = skeleton
        .bones()
        .iter()
        .map(|bone| globals[bone.node] * bone.offset)
        .collect();
    let count = skeleton.bone_count();
    assert_matrices_close(&animator.final_bone_matrices()[..count], &expected, 1e-5);

    // Offsets are the inverse bind pose, so nothing moves
    for m in &animator.final_bone_matrices()[..count] {
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }
}

#[test]
fn test_untracked_bones_follow_animated_parent() {
    let library = load(&humanoid_scene(vec![clip(
        "turn",
        10.0,
        10.0,
        vec![yaw_channel("Hips", 10.0, 0.0, 1.0)],
    )]));
    let turn = library.clip("turn").unwrap();
    let skeleton = library.skeleton();

    let mut animator = Animator::new(Arc::clone(&turn));
    animator.update_animation(0.5).unwrap();

    // Head is untracked: its matrix equals the hips' skinning delta
    let hips = animator.final_bone_matrices()[skeleton.index_of("Hips").unwrap()];
    let head = animator.final_bone_matrices()[skeleton.index_of("Head").unwrap()];
    assert!(hips.abs_diff_eq(head, 1e-4));
    assert!(!hips.abs_diff_eq(Mat4::IDENTITY, 1e-3));
}

#[test]
fn test_exact_keyframe_returns_stored_sample() {
    let library = load(&two_bone_scene(vec![clip(
        "turn",
        4.0,
        1.0,
        vec![yaw_channel("root", 4.0, 0.3, 1.2)],
    )]));
    let turn = library.clip("turn").unwrap();
    let track = turn.track_for("root").unwrap();

    for key in track.rotations() {
        let (_, rotation, _) = track.sample_at(key.time);
        assert_eq!(rotation, key.value);
    }
    for key in track.positions() {
        let (translation, _, _) = track.sample_at(key.time);
        assert_eq!(translation, key.value);
    }
}

#[test]
fn test_wrapped_time_matches_direct_seek() {
    let library = load(&two_bone_scene(vec![clip(
        "slide",
        10.0,
        10.0,
        vec![slide_channel("root", 10.0, 5.0)],
    )]));
    let slide = library.clip("slide").unwrap();

    let mut looped = Animator::new(Arc::clone(&slide));
    for _ in 0..3 {
        looped.update_animation(0.7).unwrap();
    }
    assert!(looped.current_time_ticks() < slide.duration_ticks());
    assert!((looped.current_time_ticks() - 1.0).abs() < 1e-3);

    let mut direct = Animator::new(Arc::clone(&slide));
    direct.update_animation(0.1).unwrap();

    assert_matrices_close(
        looped.final_bone_matrices(),
        direct.final_bone_matrices(),
        1e-3,
    );
}

#[test]
fn test_play_same_clip_twice_keeps_time() {
    let library = load(&two_bone_scene(vec![
        clip("stand", 10.0, 10.0, vec![]),
        clip("walk", 10.0, 10.0, vec![slide_channel("root", 10.0, 1.0)]),
    ]));
    let walk = library.clip("walk").unwrap();

    let mut animator = Animator::new(library.clip("stand").unwrap());
    assert!(animator.play_animation(&walk));
    animator.update_animation(0.4).unwrap();

    assert!(!animator.play_animation(&walk));
    assert!(!animator.play_animation(&library.clip("walk").unwrap()));
    assert!((animator.current_time_ticks() - 4.0).abs() < 1e-5);
}

#[test]
fn test_separately_loaded_equal_clips_are_distinct() {
    let scene = two_bone_scene(vec![clip("stand", 10.0, 10.0, vec![])]);
    let first = load(&scene).clip("stand").unwrap();
    let second = load(&scene).clip("stand").unwrap();

    let mut animator = Animator::new(first);
    animator.update_animation(0.2).unwrap();
    assert!(animator.play_animation(&second));
    assert_eq!(animator.current_time_ticks(), 0.0);
}

#[test_case(0.0; "at start")]
#[test_case(0.35; "mid clip")]
#[test_case(12.5; "after many loops")]
fn test_matrix_array_has_fixed_length(seconds: f32) {
    let library = load(&humanoid_scene(vec![clip(
        "turn",
        10.0,
        10.0,
        vec![yaw_channel("Spine", 10.0, 0.0, 2.0)],
    )]));
    let mut animator = Animator::new(library.clip("turn").unwrap());
    animator.update_animation(seconds).unwrap();

    assert_eq!(animator.final_bone_matrices().len(), MAX_BONES);
    assert_eq!(animator.gpu_data().len(), MAX_BONES * 16);
    let bones = library.skeleton().bone_count();
    assert!(animator.final_bone_matrices()[bones..]
        .iter()
        .all(|m| *m == Mat4::IDENTITY));
}

#[test]
fn test_clips_shared_across_animators() {
    let library = load(&two_bone_scene(vec![clip(
        "slide",
        10.0,
        10.0,
        vec![slide_channel("root", 10.0, 5.0)],
    )]));
    let slide: Arc<AnimationClip> = library.clip("slide").unwrap();

    let mut a = Animator::new(Arc::clone(&slide));
    let mut b = Animator::new(Arc::clone(&slide));
    a.update_animation(0.2).unwrap();
    b.update_animation(0.6).unwrap();

    assert!((a.current_time_ticks() - 2.0).abs() < 1e-5);
    assert!((b.current_time_ticks() - 6.0).abs() < 1e-5);
    assert!(!a.final_bone_matrices()[0].abs_diff_eq(b.final_bone_matrices()[0], 1e-3));
}
