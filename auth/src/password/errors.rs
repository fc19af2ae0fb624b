use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password longer than {0} bytes")]
    TooLong(usize),

    #[error("Unsupported work factor: {0}")]
    InvalidCost(u32),
}
