use crate::loader::DecodeError;
use thiserror::Error;

/// Error types for engine operations.
///
/// Nothing here is fatal: every failure path leaves the image store in its
/// prior valid state, and the user may simply retry. Cancellation is a
/// normal terminal state, not an error.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("another effect job is in progress")]
    Busy,

    #[error("no image is loaded")]
    NoImage,

    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
}
