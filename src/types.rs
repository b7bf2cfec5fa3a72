// Copyright (c) 2020,2021, Jason Fritcher <jkf@wolfnet.org>
// All rights reserved.

pub(crate) const BLOCK_LEN: usize = 8;
pub(crate) const AES_BLOCK_LEN: usize = 16;

/// Default initial value from RFC 3394 section 2.2.3.1.
pub const DEFAULT_IV: [u8; BLOCK_LEN] = [0xa6; BLOCK_LEN];

/// Smallest plaintext accepted by wrap, two semiblocks.
pub const MIN_PLAINTEXT_LEN: usize = 2 * BLOCK_LEN;
/// Smallest ciphertext accepted by unwrap, the integrity block plus two semiblocks.
pub const MIN_CIPHERTEXT_LEN: usize = MIN_PLAINTEXT_LEN + BLOCK_LEN;

// The counter tops out at 6n and must fit in the low 4 bytes of A
pub(crate) const MAX_SEMIBLOCKS: usize = (u32::MAX / 6) as usize;

/// XOR the big-endian counter into the last 4 bytes of the register.
/// The first 4 bytes are left untouched.
pub(crate) fn xor_counter(a: &mut [u8], t: u32) {
    a[4..BLOCK_LEN]
        .iter_mut()
        .zip(t.to_be_bytes().iter())
        .for_each(|(x1, x2)| *x1 ^= *x2);
}

pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    // Not constant time if the lengths differ
    if a.len() != b.len() {
        return false;
    }
    let c = a.iter().zip(b.iter()).fold(0, |acc, (a, b)| acc | (a ^ b));
    c == 0
}
