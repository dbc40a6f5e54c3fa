//! Clip selection for a playable character
//!
//! Input handling reduces to one [`CharacterAction`] per frame, resolved
//! with the priority Die > Dance > Walk > Stand. One-shot actions (dying,
//! dancing) run for the length of their clip in seconds and then hand
//! control back to the next pending action: a dance that death interrupted,
//! otherwise walking or standing.

use std::fmt;
use std::sync::Arc;

use glam::Mat4;
use log::debug;

use super::animator::{Animator, AnimatorOptions};
use super::clip::AnimationClip;
use super::library::AnimationLibrary;
use crate::error::Result;

/// What the character is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterAction {
    Stand,
    Walk,
    Die,
    Dance,
}

impl CharacterAction {
    /// Actions that end on their own once their clip has played through
    pub fn is_one_shot(self) -> bool {
        matches!(self, Self::Die | Self::Dance)
    }
}

impl fmt::Display for CharacterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stand => "stand",
            Self::Walk => "walk",
            Self::Die => "die",
            Self::Dance => "dance",
        };
        f.write_str(name)
    }
}

/// Clip played for each action
#[derive(Debug, Clone)]
pub struct ClipSet {
    pub stand: Arc<AnimationClip>,
    pub walk: Arc<AnimationClip>,
    pub die: Arc<AnimationClip>,
    pub dance: Arc<AnimationClip>,
}

impl ClipSet {
    /// Look up the four clips by name
    pub fn from_library(
        library: &AnimationLibrary,
        stand: &str,
        walk: &str,
        die: &str,
        dance: &str,
    ) -> Result<Self> {
        Ok(Self {
            stand: library.clip(stand)?,
            walk: library.clip(walk)?,
            die: library.clip(die)?,
            dance: library.clip(dance)?,
        })
    }

    pub fn clip_for(&self, action: CharacterAction) -> &Arc<AnimationClip> {
        match action {
            CharacterAction::Stand => &self.stand,
            CharacterAction::Walk => &self.walk,
            CharacterAction::Die => &self.die,
            CharacterAction::Dance => &self.dance,
        }
    }
}

/// One frame of polled input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// Any movement key is held
    pub moving: bool,
    /// The die key is held
    pub die_requested: bool,
    /// The dance key is held
    pub dance_requested: bool,
}

/// Pending actions; more than one may be active at once
///
/// A dance interrupted by death keeps its timer running underneath and
/// takes over again if it outlasts the death clip.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ControlState {
    walking: bool,
    /// Seconds since dying began
    dying: Option<f32>,
    /// Seconds since dancing began
    dancing: Option<f32>,
}

impl ControlState {
    fn action(self) -> CharacterAction {
        match self {
            Self { dying: Some(_), .. } => CharacterAction::Die,
            Self { dancing: Some(_), .. } => CharacterAction::Dance,
            Self { walking: true, .. } => CharacterAction::Walk,
            _ => CharacterAction::Stand,
        }
    }
}

/// Owns a character's action state and its animator
#[derive(Debug, Clone)]
pub struct CharacterController {
    clips: ClipSet,
    state: ControlState,
    animator: Animator,
}

impl CharacterController {
    /// Start standing
    pub fn new(clips: ClipSet, options: &AnimatorOptions) -> Self {
        let animator = Animator::with_options(Arc::clone(&clips.stand), options);
        Self {
            clips,
            state: ControlState::default(),
            animator,
        }
    }

    /// Run one frame: expire one-shots, apply input, pick the clip, animate
    pub fn frame(&mut self, input: ControlInput, delta_seconds: f32) -> Result<()> {
        self.state = self.expire_one_shot(delta_seconds);
        self.state = Self::apply_input(self.state, input);

        let action = self.state.action();
        let clip = self.clips.clip_for(action);
        if self.animator.play_animation(clip) {
            debug!("Character action is now {action}");
        }

        self.animator.update_animation(delta_seconds)
    }

    pub fn action(&self) -> CharacterAction {
        self.state.action()
    }

    /// Seconds spent in the current one-shot action
    pub fn one_shot_elapsed(&self) -> Option<f32> {
        match self.state.action() {
            CharacterAction::Die => self.state.dying,
            CharacterAction::Dance => self.state.dancing,
            CharacterAction::Stand | CharacterAction::Walk => None,
        }
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn clips(&self) -> &ClipSet {
        &self.clips
    }

    pub fn final_bone_matrices(&self) -> &[Mat4] {
        self.animator.final_bone_matrices()
    }

    fn expire_one_shot(&self, delta_seconds: f32) -> ControlState {
        let tick = |timer: Option<f32>, duration: f32| {
            timer
                .map(|elapsed| elapsed + delta_seconds)
                .filter(|&elapsed| elapsed < duration)
        };

        ControlState {
            dying: tick(self.state.dying, self.clips.die.duration_seconds()),
            dancing: tick(self.state.dancing, self.clips.dance.duration_seconds()),
            ..self.state
        }
    }

    fn apply_input(state: ControlState, input: ControlInput) -> ControlState {
        let mut state = ControlState {
            walking: input.moving,
            ..state
        };

        // Movement cancels dying but not dancing
        if input.moving {
            state.dying = None;
        }
        if input.die_requested && state.dying.is_none() {
            state.dying = Some(0.0);
        }
        if input.dance_requested && state.dancing.is_none() && state.dying.is_none() {
            state.dancing = Some(0.0);
        }

        state
    }
}
