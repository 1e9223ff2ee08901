/// Errors shared by every crate in the workspace.
///
/// The enum is `Clone` so that lazily built banks can cache a construction
/// failure and hand it out on every later access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: isize, len: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("non-finite value at index {index}")]
    InvalidNumeric { index: usize },

    #[error("allocation of {requested} elements failed")]
    Allocation { requested: usize },

    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("invalid stride")]
    InvalidStride,

    #[error("invalid filter parameters: {0}")]
    Construction(String),

    #[error("interpolator not initialized")]
    NotInitialized,
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }
}

pub type Result<T> = core::result::Result<T, Error>;
