// Copyright (c) 2020, Jason Fritcher <jkf@wolfnet.org>
// All rights reserved.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum KeyWrapError {
    /// An input or output buffer has a length the algorithm can't accept.
    #[error("invalid length {len}: {reason}")]
    InvalidLength { len: usize, reason: &'static str },

    /// The recovered integrity register did not match the IV.
    #[error("Failed to successfully unwrap key.")]
    IntegrityFailure,

    #[error("Key must be 16, 24 or 32 octets in length, got {0}")]
    InvalidKeyLength(usize),
}

impl KeyWrapError {
    pub(crate) fn invalid_length(len: usize, reason: &'static str) -> Self {
        tracing::debug!(len, reason, "rejected key wrap input");
        KeyWrapError::InvalidLength { len, reason }
    }
}
