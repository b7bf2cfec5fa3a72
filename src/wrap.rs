// Copyright (c) 2020, Jason Fritcher <jkf@wolfnet.org>
// All rights reserved.

use zeroize::Zeroize;

use crate::{
    cipher::{AesKek, BlockCipher},
    engine::KeyWrap,
    error::KeyWrapError,
    types::{xor_counter, AES_BLOCK_LEN, BLOCK_LEN, DEFAULT_IV, MAX_SEMIBLOCKS},
};

/// Wrap `pt` under `key` with AES, the key size picked from `key.len()`.
pub fn aes_wrap_with_nopadding(pt: &[u8], key: &[u8]) -> Result<Vec<u8>, KeyWrapError> {
    KeyWrap::new(AesKek::new(key)?).wrap(pt)
}

/// Number of semiblocks in a plaintext of `pt_len` octets.
fn plaintext_blocks(pt_len: usize) -> Result<usize, KeyWrapError> {
    let pt_len = match pt_len {
        pt_len if (pt_len % BLOCK_LEN) > 0 => {
            return Err(KeyWrapError::invalid_length(
                pt_len,
                "Plaintext length must be a multiple of 8 octets in length",
            ))
        },
        pt_len => pt_len,  // pt should be a multiple of BLOCK_LEN
    };

    match pt_len / BLOCK_LEN {
        0 | 1 => Err(KeyWrapError::invalid_length(
            pt_len,
            "Plaintext length must be atleast 16 octets",
        )),
        n if n > MAX_SEMIBLOCKS => Err(KeyWrapError::invalid_length(
            pt_len,
            "Plaintext is too long for a 32-bit wrap counter",
        )),
        n => Ok(n),  // pt must be at least 2 blocks in size
    }
}

pub(crate) fn wrap_vec<C: BlockCipher>(cipher: &C, pt: &[u8]) -> Result<Vec<u8>, KeyWrapError> {
    plaintext_blocks(pt.len())?;
    let mut ct = vec![0u8; BLOCK_LEN + pt.len()];
    wrap_into(cipher, pt, &mut ct)?;
    Ok(ct)
}

pub(crate) fn wrap_into<C: BlockCipher>(
    cipher: &C,
    pt: &[u8],
    ct: &mut [u8],
) -> Result<usize, KeyWrapError> {
    let n = plaintext_blocks(pt.len())?;
    if ct.len() != pt.len() + BLOCK_LEN {
        return Err(KeyWrapError::invalid_length(
            ct.len(),
            "Output buffer must be 8 octets longer than the plaintext",
        ));
    }

    tracing::trace!(n, "wrapping key");

    // Because we're encrypting in place, copy A and pt into ct
    ct[..BLOCK_LEN].copy_from_slice(&DEFAULT_IV);
    ct[BLOCK_LEN..].copy_from_slice(pt);

    wrap_core(cipher, n, ct);

    Ok(ct.len())
}

/// RFC 3394 section 2.2.1, index based. `ct` holds A | R[1] | ... | R[n]
/// on entry and C[0] | C[1] | ... | C[n] on return.
pub(crate) fn wrap_core<C: BlockCipher>(cipher: &C, n: usize, ct: &mut [u8]) {
    // tmp = A | R[i]
    let mut tmp = [0u8; AES_BLOCK_LEN];
    let mut t: u32 = 0;

    // Copy A into buffer
    tmp[..BLOCK_LEN].copy_from_slice(&ct[..BLOCK_LEN]);

    for _j in 0..6 {
        for i in 1..=n {
            let idx = i * BLOCK_LEN;
            tmp[BLOCK_LEN..].copy_from_slice(&ct[idx..idx + BLOCK_LEN]);

            // B = AES(K, A | R[i])
            cipher.encrypt_block(&mut tmp);

            // A = MSB(64, B) ^ t where t = (n*j)+i
            t += 1;
            xor_counter(&mut tmp[..BLOCK_LEN], t);

            // R[i] = LSB(64, B)
            ct[idx..idx + BLOCK_LEN].copy_from_slice(&tmp[BLOCK_LEN..]);
        }
    }

    // C[0] = A
    ct[..BLOCK_LEN].copy_from_slice(&tmp[..BLOCK_LEN]);
    tmp.zeroize();
}

#[cfg(test)]
mod tests {
    use super::{aes_wrap_with_nopadding, plaintext_blocks};
    use crate::{cipher::AesKek, engine::KeyWrap, error::KeyWrapError};

    #[test]
    fn test_wrap_nopad_invalid_key_length() {
        let pt = hex!("000102030405060708090a0b0c0d0e0f").to_vec();
        let key = hex!("000102030405060708090a0b0c0d0e").to_vec();
        let ct = aes_wrap_with_nopadding(&pt, &key);
        assert_eq!(ct, Err(KeyWrapError::InvalidKeyLength(15)));
    }

    #[test]
    fn test_wrap_nopad_invalid_pt_length() {
        let key = hex!("000102030405060708090A0B0C0D0E0F").to_vec();
        for len in [0usize, 8, 17, 23] {
            let pt = vec![0u8; len];
            let ct = aes_wrap_with_nopadding(&pt, &key);
            assert!(
                matches!(ct, Err(KeyWrapError::InvalidLength { len: l, .. }) if l == len),
                "Invalid plaintext length {} erroneously passed: {:?}",
                len,
                ct
            );
        }
    }

    #[test]
    fn test_plaintext_blocks() {
        assert_eq!(plaintext_blocks(16), Ok(2));
        assert_eq!(plaintext_blocks(24), Ok(3));
        assert!(plaintext_blocks(8).is_err());
        assert!(plaintext_blocks(17).is_err());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_plaintext_blocks_counter_overflow() {
        let max = 8 * (u32::MAX as usize / 6);
        assert_eq!(plaintext_blocks(max), Ok(max / 8));
        assert!(matches!(
            plaintext_blocks(max + 8),
            Err(KeyWrapError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_wrap_into_wrong_output_length() {
        let engine = KeyWrap::new(AesKek::new(&[0u8; 16]).unwrap());
        let pt = [0u8; 16];

        let mut short = [0u8; 23];
        assert!(matches!(
            engine.wrap_into(&pt, &mut short),
            Err(KeyWrapError::InvalidLength { len: 23, .. })
        ));

        let mut long = [0u8; 32];
        assert!(matches!(
            engine.wrap_into(&pt, &mut long),
            Err(KeyWrapError::InvalidLength { len: 32, .. })
        ));
    }

    #[test]
    fn test_wrap_into_matches_wrap() {
        let engine = KeyWrap::new(AesKek::new(&hex!("000102030405060708090A0B0C0D0E0F")).unwrap());
        let pt = hex!("00112233445566778899AABBCCDDEEFF");
        let mut ct = [0u8; 24];
        assert_eq!(engine.wrap_into(&pt, &mut ct), Ok(24));
        assert_eq!(ct, hex!("1FA68B0A8112B447AEF34BD8FB5A7B829D3E862371D2CFE5"));
    }

    //
    // RFC3394 Test Vectors
    //
    #[test]
    fn test_wrap_nopad_16_byte_key_16_byte_data() {
        let pt = hex!("00112233445566778899AABBCCDDEEFF").to_vec();
        let key = hex!("000102030405060708090A0B0C0D0E0F").to_vec();
        let ct = aes_wrap_with_nopadding(&pt, &key);
        assert!(ct.is_ok(), "Test unexpectantly failed: {:?}", ct);
        assert_eq!(
            ct.unwrap(),
            hex!("1FA68B0A8112B447AEF34BD8FB5A7B829D3E862371D2CFE5").to_vec()
        );
    }

    #[test]
    fn test_wrap_nopad_24_byte_key_16_byte_data() {
        let pt = hex!("00112233445566778899AABBCCDDEEFF").to_vec();
        let key = hex!("000102030405060708090A0B0C0D0E0F1011121314151617").to_vec();
        let ct = aes_wrap_with_nopadding(&pt, &key);
        assert!(ct.is_ok(), "Test unexpectantly failed: {:?}", ct);
        assert_eq!(
            ct.unwrap(),
            hex!("96778B25AE6CA435F92B5B97C050AED2468AB8A17AD84E5D").to_vec()
        );
    }

    #[test]
    fn test_wrap_nopad_32_byte_key_16_byte_data() {
        let pt = hex!("00112233445566778899AABBCCDDEEFF").to_vec();
        let key = hex!("000102030405060708090A0B0C0D0E0F101112131415161718191A1B1C1D1E1F").to_vec();
        let ct = aes_wrap_with_nopadding(&pt, &key);
        assert!(ct.is_ok(), "Test unexpectantly failed: {:?}", ct);
        assert_eq!(
            ct.unwrap(),
            hex!("64E8C3F9CE0F5BA263E9777905818A2A93C8191E7D6E8AE7").to_vec()
        );
    }

    #[test]
    fn test_wrap_nopad_24_byte_key_24_byte_data() {
        let pt = hex!("00112233445566778899AABBCCDDEEFF0001020304050607").to_vec();
        let key = hex!("000102030405060708090A0B0C0D0E0F1011121314151617").to_vec();
        let ct = aes_wrap_with_nopadding(&pt, &key);
        assert!(ct.is_ok(), "Test unexpectantly failed: {:?}", ct);
        assert_eq!(
            ct.unwrap(),
            hex!("031D33264E15D33268F24EC260743EDCE1C6C7DDEE725A936BA814915C6762D2").to_vec()
        );
    }

    #[test]
    fn test_wrap_nopad_32_byte_key_24_byte_data() {
        let pt = hex!("00112233445566778899AABBCCDDEEFF0001020304050607").to_vec();
        let key = hex!("000102030405060708090A0B0C0D0E0F101112131415161718191A1B1C1D1E1F").to_vec();
        let ct = aes_wrap_with_nopadding(&pt, &key);
        assert!(ct.is_ok(), "Test unexpectantly failed: {:?}", ct);
        assert_eq!(
            ct.unwrap(),
            hex!("A8F9BC1612C68B3FF6E6F4FBE30E71E4769C8B80A32CB8958CD5D17D6B254DA1").to_vec()
        );
    }

    #[test]
    fn test_wrap_nopad_32_byte_key_32_byte_data() {
        let pt = hex!("00112233445566778899AABBCCDDEEFF000102030405060708090A0B0C0D0E0F").to_vec();
        let key = hex!("000102030405060708090A0B0C0D0E0F101112131415161718191A1B1C1D1E1F").to_vec();
        let ct = aes_wrap_with_nopadding(&pt, &key);
        assert!(ct.is_ok(), "Test unexpectantly failed: {:?}", ct);
        assert_eq!(
            ct.unwrap(),
            hex!("28C9F404C4B810F4CBCCB35CFB87F8263F5786E2D80ED326CBC7F0E71A99F43BFB988B9B7A02DD21").to_vec()
        );
    }
}
