use thiserror::Error;

/// Errors raised while setting up a match
///
/// Player input never produces one of these; bad moves degrade into
/// warnings and move notes instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("field must be at least 4x4, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}
