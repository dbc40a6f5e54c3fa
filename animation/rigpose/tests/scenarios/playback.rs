//! End-to-end playback scenarios

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{Mat4, Quat};
use rigpose::Animator;

use crate::common::{assert_matrices_close, clip, load, slide_channel, two_bone_scene, yaw_channel};

#[test]
fn test_root_rotation_halfway_is_slerp_midpoint() {
    // Identity at t=0, 90 degrees about Y at t=1s, one tick per second
    let library = load(&two_bone_scene(vec![clip(
        "turn",
        1.0,
        1.0,
        vec![yaw_channel("root", 1.0, 0.0, FRAC_PI_2)],
    )]));

    let mut animator = Animator::new(library.clip("turn").unwrap());
    animator.update_animation(0.5).unwrap();

    let expected = Mat4::from_quat(Quat::from_rotation_y(FRAC_PI_2 / 2.0));
    let matrices = animator.final_bone_matrices();

    // Root offset is identity, so its matrix is the local rotation
    assert!(matrices[0].abs_diff_eq(expected, 1e-5));

    // The child rides along: bind offset cancels its own translation
    assert!(matrices[1].abs_diff_eq(expected, 1e-5));

    let (_, rotation, _) = matrices[0].to_scale_rotation_translation();
    assert!(rotation.dot(Quat::from_rotation_y(FRAC_PI_2 / 2.0)).abs() > 0.99999);
}

#[test]
fn test_switch_after_one_shot_has_no_residual_pose() {
    let library = load(&two_bone_scene(vec![
        clip(
            "dance",
            50.0,
            25.0,
            vec![
                yaw_channel("root", 50.0, 0.0, 3.0),
                slide_channel("child", 40.0, 2.0),
            ],
        ),
        clip("stand", 25.0, 25.0, vec![yaw_channel("root", 25.0, 0.1, 0.4)]),
    ]));
    let dance = library.clip("dance").unwrap();
    let stand = library.clip("stand").unwrap();
    assert!((dance.duration_seconds() - 2.0).abs() < 1e-6);

    let mut animator = Animator::new(Arc::clone(&stand));
    animator.play_animation(&dance);

    // Run the one-shot right up to its end, the way a timer would
    let mut elapsed = 0.0;
    let step = 0.25;
    while elapsed < dance.duration_seconds() - step / 2.0 {
        animator.update_animation(step).unwrap();
        elapsed += step;
    }
    assert!((elapsed - dance.duration_seconds()).abs() < 1e-6);

    assert!(animator.play_animation(&stand));
    assert_eq!(animator.current_time_ticks(), 0.0);
    animator.update_animation(0.0).unwrap();

    let mut fresh = Animator::new(Arc::clone(&stand));
    fresh.update_animation(0.0).unwrap();

    assert_matrices_close(
        animator.final_bone_matrices(),
        fresh.final_bone_matrices(),
        1e-6,
    );
}

#[test]
fn test_switch_takes_effect_on_next_update() {
    let library = load(&two_bone_scene(vec![
        clip("stand", 10.0, 10.0, vec![]),
        clip("walk", 10.0, 10.0, vec![slide_channel("root", 10.0, 10.0)]),
    ]));
    let walk = library.clip("walk").unwrap();

    let mut animator = Animator::new(library.clip("stand").unwrap());
    animator.update_animation(0.5).unwrap();
    let before = animator.final_bone_matrices()[0];

    animator.play_animation(&walk);
    // Nothing recomputed until the next update
    assert_eq!(animator.final_bone_matrices()[0], before);

    animator.update_animation(0.3).unwrap();
    let moved = animator.final_bone_matrices()[0].w_axis.x;
    assert!((moved - 3.0).abs() < 1e-4);
}

#[test]
fn test_frozen_pose_without_updates() {
    let library = load(&two_bone_scene(vec![clip(
        "walk",
        10.0,
        10.0,
        vec![slide_channel("root", 10.0, 10.0)],
    )]));
    let mut animator = Animator::new(library.clip("walk").unwrap());
    animator.update_animation(0.2).unwrap();

    let snapshot = animator.final_bone_matrices().to_vec();
    let time = animator.current_time_ticks();
    assert_eq!(animator.final_bone_matrices(), snapshot.as_slice());
    assert_eq!(animator.current_time_ticks(), time);
}
