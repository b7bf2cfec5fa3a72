// Copyright (c) 2020,2021, Jason Fritcher <jkf@wolfnet.org>
// All rights reserved.

use crate::{
    cipher::{AesKek, BlockCipher},
    error::KeyWrapError,
    unwrap::{unwrap_into, unwrap_vec},
    wrap::{wrap_into, wrap_vec},
};

/// RFC 3394 key wrap over an injected block cipher.
///
/// The engine holds nothing but the cipher, so every call is independent.
/// Sharing one engine between threads is fine as long as the cipher is
/// `Sync`; each call works on its own output buffer.
///
/// ```
/// use rfc3394_kw::{AesKek, KeyWrap};
///
/// let kw = KeyWrap::new(AesKek::new(&[0x42; 32])?);
/// let wrapped = kw.wrap(&[0x17; 32])?;
/// assert_eq!(wrapped.len(), 40);
/// assert_eq!(kw.unwrap(&wrapped)?, vec![0x17; 32]);
/// # Ok::<(), rfc3394_kw::KeyWrapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct KeyWrap<C> {
    cipher: C,
}

impl KeyWrap<AesKek> {
    /// Engine backed by AES, the key size picked from `kek.len()`.
    pub fn with_aes_kek(kek: &[u8]) -> Result<Self, KeyWrapError> {
        Ok(KeyWrap::new(AesKek::new(kek)?))
    }
}

impl<C: BlockCipher> KeyWrap<C> {
    pub fn new(cipher: C) -> Self {
        KeyWrap { cipher }
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    pub fn into_inner(self) -> C {
        self.cipher
    }

    /// Wrap `pt`, returning C[0] | C[1] | ... | C[n].
    ///
    /// `pt` must be at least 16 octets and a multiple of 8.
    pub fn wrap(&self, pt: &[u8]) -> Result<Vec<u8>, KeyWrapError> {
        wrap_vec(&self.cipher, pt)
    }

    /// Wrap `pt` into `out`, which must be exactly `pt.len() + 8` octets.
    /// Returns the number of octets written.
    pub fn wrap_into(&self, pt: &[u8], out: &mut [u8]) -> Result<usize, KeyWrapError> {
        wrap_into(&self.cipher, pt, out)
    }

    /// Unwrap `ct` and verify its integrity block.
    ///
    /// `ct` must be at least 24 octets and a multiple of 8.
    pub fn unwrap(&self, ct: &[u8]) -> Result<Vec<u8>, KeyWrapError> {
        unwrap_vec(&self.cipher, ct)
    }

    /// Unwrap `ct` into `out`, which must be exactly `ct.len() - 8` octets.
    ///
    /// On [`KeyWrapError::IntegrityFailure`] all of `out` is zeroed, so no
    /// unauthenticated key material is left behind.
    pub fn unwrap_into(&self, ct: &[u8], out: &mut [u8]) -> Result<usize, KeyWrapError> {
        unwrap_into(&self.cipher, ct, out)
    }
}
