//! Fixed-length proposal labels.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// A 32-byte proposal label, zero-padded on the right.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalName([u8; 32]);

impl ProposalName {
    /// Longest text label accepted by [`ProposalName::from_label`].
    ///
    /// One byte is reserved so every text label keeps a terminating zero.
    pub const MAX_LABEL_LEN: usize = 31;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Encode a text label, right-padding with zero bytes.
    pub fn from_label(label: &str) -> Result<Self, TypesError> {
        let raw = label.as_bytes();
        if raw.len() > Self::MAX_LABEL_LEN {
            return Err(TypesError::LabelTooLong {
                len: raw.len(),
                max: Self::MAX_LABEL_LEN,
            });
        }
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Text up to the first zero byte.
    pub fn as_label(&self) -> String {
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(self.0.len());
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl fmt::Debug for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProposalName({:?})", self.as_label())
    }
}

impl fmt::Display for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_label())
    }
}
