// Copyright (c) 2020, Jason Fritcher <jkf@wolfnet.org>
// All rights reserved.

use zeroize::Zeroize;

use crate::{
    cipher::{AesKek, BlockCipher},
    engine::KeyWrap,
    error::KeyWrapError,
    types::{constant_time_eq, xor_counter, AES_BLOCK_LEN, BLOCK_LEN, DEFAULT_IV, MAX_SEMIBLOCKS},
};

/// Unwrap `ct` under `key` with AES, the key size picked from `key.len()`.
pub fn aes_unwrap_with_nopadding(ct: &[u8], key: &[u8]) -> Result<Vec<u8>, KeyWrapError> {
    KeyWrap::new(AesKek::new(key)?).unwrap(ct)
}

/// Number of plaintext semiblocks in a ciphertext of `ct_len` octets.
fn ciphertext_blocks(ct_len: usize) -> Result<usize, KeyWrapError> {
    let ct_len = match ct_len {
        ct_len if (ct_len % BLOCK_LEN) > 0 => {
            return Err(KeyWrapError::invalid_length(
                ct_len,
                "Ciphertext length must be a multiple of 8 octets in length",
            ))
        },
        ct_len => ct_len,  // ct should be a multiple of BLOCK_LEN
    };

    match (ct_len / BLOCK_LEN).saturating_sub(1) {
        0 | 1 => Err(KeyWrapError::invalid_length(
            ct_len,
            "Ciphertext length must be atleast 24 octets",
        )),
        n if n > MAX_SEMIBLOCKS => Err(KeyWrapError::invalid_length(
            ct_len,
            "Ciphertext is too long for a 32-bit wrap counter",
        )),
        n => Ok(n),  // ct must be at least 3 blocks in size
    }
}

pub(crate) fn unwrap_vec<C: BlockCipher>(cipher: &C, ct: &[u8]) -> Result<Vec<u8>, KeyWrapError> {
    ciphertext_blocks(ct.len())?;
    let mut pt = vec![0u8; ct.len() - BLOCK_LEN];
    // pt is already zeroed by unwrap_into on failure
    unwrap_into(cipher, ct, &mut pt)?;
    Ok(pt)
}

pub(crate) fn unwrap_into<C: BlockCipher>(
    cipher: &C,
    ct: &[u8],
    pt: &mut [u8],
) -> Result<usize, KeyWrapError> {
    let n = ciphertext_blocks(ct.len())?;
    if pt.len() != ct.len() - BLOCK_LEN {
        return Err(KeyWrapError::invalid_length(
            pt.len(),
            "Output buffer must be 8 octets shorter than the ciphertext",
        ));
    }

    tracing::trace!(n, "unwrapping key");

    // R[1..n] = C[1..n], A stays with the core
    pt.copy_from_slice(&ct[BLOCK_LEN..]);
    #[allow(non_snake_case)]
    let mut A: [u8; BLOCK_LEN] = Default::default();
    A.copy_from_slice(&ct[..BLOCK_LEN]);

    unwrap_core(cipher, n, &mut A, pt);

    // Validate the IV
    let valid = constant_time_eq(&A, &DEFAULT_IV);
    A.zeroize();
    if !valid {
        pt.zeroize();
        tracing::debug!(n, "key unwrap integrity check failed");
        return Err(KeyWrapError::IntegrityFailure);
    }

    Ok(pt.len())
}

/// RFC 3394 section 2.2.2, index based. On entry `a` holds C[0] and `pt`
/// holds C[1] | ... | C[n]; on return they hold the recovered A and
/// R[1] | ... | R[n].
pub(crate) fn unwrap_core<C: BlockCipher>(
    cipher: &C,
    n: usize,
    a: &mut [u8; BLOCK_LEN],
    pt: &mut [u8],
) {
    // tmp = (A ^ t) | R[i]
    let mut tmp = [0u8; AES_BLOCK_LEN];
    // n is bounded by MAX_SEMIBLOCKS so 6n fits
    let mut t = (6 * n) as u32;

    // Copy A into buffer
    tmp[..BLOCK_LEN].copy_from_slice(a);

    for _j in (0..6).rev() {
        for i in (0..n).rev() {
            let idx = i * BLOCK_LEN;

            // A ^ t where t = (n*j)+i+1
            xor_counter(&mut tmp[..BLOCK_LEN], t);
            tmp[BLOCK_LEN..].copy_from_slice(&pt[idx..idx + BLOCK_LEN]);

            // B = AES-1(K, (A ^ t) | R[i])
            cipher.decrypt_block(&mut tmp);

            // A = MSB(64, B), R[i] = LSB(64, B)
            pt[idx..idx + BLOCK_LEN].copy_from_slice(&tmp[BLOCK_LEN..]);
            t -= 1;
        }
    }

    a.copy_from_slice(&tmp[..BLOCK_LEN]);
    tmp.zeroize();
}
