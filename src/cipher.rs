// Copyright (c) 2020,2021, Jason Fritcher <jkf@wolfnet.org>
// All rights reserved.

//! Single block cipher capabilities used by the wrap and unwrap transforms.

use std::fmt;

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, NewBlockCipher};
use aes::{Aes128, Aes192, Aes256};

use crate::{error::KeyWrapError, types::AES_BLOCK_LEN};

/// A 128-bit block cipher keyed with a KEK.
///
/// Both operations transform exactly one block in place (ECB on a single
/// block). The key schedule must not change after construction, so an
/// implementation that is `Sync` can serve concurrent wraps by reference.
pub trait BlockCipher {
    fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_LEN]);
    fn decrypt_block(&self, block: &mut [u8; AES_BLOCK_LEN]);
}

impl<T: BlockCipher + ?Sized> BlockCipher for &T {
    fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_LEN]) {
        (**self).encrypt_block(block)
    }

    fn decrypt_block(&self, block: &mut [u8; AES_BLOCK_LEN]) {
        (**self).decrypt_block(block)
    }
}

/// AES keyed with a KEK, the key size picked from the KEK length.
#[derive(Clone)]
pub enum AesKek {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl AesKek {
    pub fn new(kek: &[u8]) -> Result<Self, KeyWrapError> {
        // new_from_slice can only fail on length, which is matched first
        let invalid = |_| KeyWrapError::InvalidKeyLength(kek.len());
        let cipher = match kek.len() {
            16 => AesKek::Aes128(Aes128::new_from_slice(kek).map_err(invalid)?),
            24 => AesKek::Aes192(Aes192::new_from_slice(kek).map_err(invalid)?),
            32 => AesKek::Aes256(Aes256::new_from_slice(kek).map_err(invalid)?),
            len => return Err(KeyWrapError::InvalidKeyLength(len)),
        };
        Ok(cipher)
    }

    /// KEK size in bits.
    pub fn key_bits(&self) -> usize {
        match self {
            AesKek::Aes128(_) => 128,
            AesKek::Aes192(_) => 192,
            AesKek::Aes256(_) => 256,
        }
    }
}

impl fmt::Debug for AesKek {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AesKek(AES-{})", self.key_bits())
    }
}

impl BlockCipher for AesKek {
    fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_LEN]) {
        let block = GenericArray::from_mut_slice(&mut block[..]);
        match self {
            AesKek::Aes128(c) => c.encrypt_block(block),
            AesKek::Aes192(c) => c.encrypt_block(block),
            AesKek::Aes256(c) => c.encrypt_block(block),
        }
    }

    fn decrypt_block(&self, block: &mut [u8; AES_BLOCK_LEN]) {
        let block = GenericArray::from_mut_slice(&mut block[..]);
        match self {
            AesKek::Aes128(c) => c.decrypt_block(block),
            AesKek::Aes192(c) => c.decrypt_block(block),
            AesKek::Aes256(c) => c.decrypt_block(block),
        }
    }
}

/// A capability built from an encrypt and a decrypt callback, for block
/// ciphers that live outside this crate (hardware engines, HSMs, mocks).
#[derive(Clone)]
pub struct CallbackCipher<E, D> {
    encrypt: E,
    decrypt: D,
}

impl<E, D> CallbackCipher<E, D>
where
    E: Fn(&mut [u8; AES_BLOCK_LEN]),
    D: Fn(&mut [u8; AES_BLOCK_LEN]),
{
    pub fn new(encrypt: E, decrypt: D) -> Self {
        CallbackCipher { encrypt, decrypt }
    }
}

impl<E, D> fmt::Debug for CallbackCipher<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("CallbackCipher")
    }
}

impl<E, D> BlockCipher for CallbackCipher<E, D>
where
    E: Fn(&mut [u8; AES_BLOCK_LEN]),
    D: Fn(&mut [u8; AES_BLOCK_LEN]),
{
    fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_LEN]) {
        (self.encrypt)(block)
    }

    fn decrypt_block(&self, block: &mut [u8; AES_BLOCK_LEN]) {
        (self.decrypt)(block)
    }
}
