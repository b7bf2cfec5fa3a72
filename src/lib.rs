// Copyright (c) 2020, Jason Fritcher <jkf@wolfnet.org>
// All rights reserved.

//! AES Key Wrap (RFC 3394) over a pluggable single block cipher.
//!
//! ```
//! use hex_literal::hex;
//! use rfc3394_kw::{aes_unwrap_with_nopadding, aes_wrap_with_nopadding};
//!
//! let kek = hex!("000102030405060708090A0B0C0D0E0F");
//! let key = hex!("00112233445566778899AABBCCDDEEFF");
//! let wrapped = aes_wrap_with_nopadding(&key, &kek)?;
//! assert_eq!(wrapped, hex!("1FA68B0A8112B447AEF34BD8FB5A7B829D3E862371D2CFE5"));
//! assert_eq!(aes_unwrap_with_nopadding(&wrapped, &kek)?, key);
//! # Ok::<(), rfc3394_kw::KeyWrapError>(())
//! ```

#[cfg(test)]
#[macro_use]
extern crate hex_literal;

mod types;

mod cipher;
mod engine;
mod error;
mod unwrap;
mod wrap;
pub use cipher::{AesKek, BlockCipher, CallbackCipher};
pub use engine::KeyWrap;
pub use error::KeyWrapError;
pub use types::{DEFAULT_IV, MIN_CIPHERTEXT_LEN, MIN_PLAINTEXT_LEN};
pub use unwrap::aes_unwrap_with_nopadding;
pub use wrap::aes_wrap_with_nopadding;
