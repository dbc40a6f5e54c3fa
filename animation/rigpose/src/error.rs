use thiserror::Error;

/// Error types for skeleton loading, clip binding and pose evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// A clip channel targets a node that the skeleton does not contain
    #[error("Binding mismatch: clip '{clip}' animates unknown node '{node}'")]
    BindingMismatch { clip: String, node: String },

    /// Bone lookup by name failed
    #[error("Unknown bone: {0}")]
    UnknownBone(String),

    /// A bone names a node that is absent from the hierarchy
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// A child was attached to a node index that does not exist
    #[error("Invalid parent node index: {0}")]
    InvalidParent(usize),

    /// Two nodes or two bones share the same name
    #[error("Duplicate name in skeleton: {0}")]
    DuplicateName(String),

    /// A keyframe channel is empty or out of order
    #[error("Malformed track for node '{node}' in clip '{clip}': {reason}")]
    MalformedTrack {
        clip: String,
        node: String,
        reason: TrackDefect,
    },

    /// Clip-level data is unusable (duration, tick rate)
    #[error("Invalid clip '{clip}': {reason}")]
    InvalidClip { clip: String, reason: String },

    /// A bone index does not fit in the final matrix array
    #[error("Bone index {bone_index} exceeds matrix capacity {capacity}")]
    CapacityExceeded { bone_index: usize, capacity: usize },

    /// Clip lookup by name failed
    #[error("Clip not found: {0}")]
    ClipNotFound(String),

    /// Scene description could not be decoded
    #[error("Scene error: {0}")]
    Scene(String),
}

/// Result type using AnimationError
pub type Result<T> = std::result::Result<T, AnimationError>;

/// What is wrong with a keyframe channel
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackDefect {
    #[error("{channel} channel has no keyframes")]
    EmptyChannel { channel: &'static str },

    #[error("{channel} keyframe {index} is not after its predecessor")]
    NotIncreasing { channel: &'static str, index: usize },

    #[error("{channel} keyframe {index} is not a finite value")]
    NonFinite { channel: &'static str, index: usize },

    #[error("node is animated by more than one channel")]
    DuplicateChannel,
}
