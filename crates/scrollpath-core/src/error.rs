use thiserror::Error;

/// Failures surfaced by the keyframe store and the session context.
///
/// Refusing to drop below the minimum keyframe count is not an error; see
/// [`crate::KeyframeStore::remove_keyframe`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("keyframe index {index} out of range (sequence has {len} keyframes)")]
    KeyframeIndexOutOfRange { index: usize, len: usize },
    #[error("a camera path needs at least {min} keyframes, got {got}")]
    TooFewKeyframes { min: usize, got: usize },
    #[error("unknown easing type `{0}`")]
    UnknownEasing(String),
    #[error("camera path context used outside of an initialized session")]
    ContextUnavailable,
}

pub type Result<T> = std::result::Result<T, PathError>;
