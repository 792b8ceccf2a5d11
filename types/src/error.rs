//! Parse errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid voter address: {0}")]
    InvalidAddress(String),

    #[error("proposal label is {len} bytes, at most {max} allowed")]
    LabelTooLong { len: usize, max: usize },
}
