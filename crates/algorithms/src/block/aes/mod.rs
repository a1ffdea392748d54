//! AES block cipher (encryption direction)
//!
//! This module implements the forward cipher of the Advanced Encryption
//! Standard as specified in FIPS 197, for 128, 192 and 256-bit keys. GCM
//! never runs the inverse cipher, so it is not provided.
//!
//! ## Constant-Time Guarantees
//!
//! - The S-box is computed arithmetically (inversion in GF(2^8) followed by
//!   the affine map) instead of through a lookup table
//! - GF(2^8) doubling uses masks rather than branches
//! - Round keys are zeroized when the cipher is dropped

use core::sync::atomic::{compiler_fence, Ordering};

use byteorder::{BigEndian, ByteOrder};
use sgcm_params::utils::symmetric::{
    AES128_KEY_SIZE, AES192_KEY_SIZE, AES256_KEY_SIZE, AES_BLOCK_SIZE,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::BlockCipher;
use crate::error::{validate, Result};

/// Round constants for AES key expansion
const RCON: [u32; 11] = [
    0x00000000, 0x01000000, 0x02000000, 0x04000000, 0x08000000, 0x10000000, 0x20000000,
    0x40000000, 0x80000000, 0x1b000000, 0x36000000,
];

/// Multiply two bytes in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1
#[inline(always)]
fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut p = 0u8;
    for _ in 0..8 {
        p ^= a & (b & 1).wrapping_neg();
        a = xtime(a);
        b >>= 1;
    }
    p
}

/// Multiply by x in GF(2^8)
#[inline(always)]
fn xtime(byte: u8) -> u8 {
    (byte << 1) ^ ((byte >> 7).wrapping_neg() & 0x1b)
}

/// x^254 = x^-1 in GF(2^8), with 0 mapped to 0
#[inline(always)]
fn gf_inv(x: u8) -> u8 {
    let x2 = gf_mul(x, x);
    let x3 = gf_mul(x2, x);
    let x6 = gf_mul(x3, x3);
    let x12 = gf_mul(x6, x6);
    let x15 = gf_mul(x12, x3);
    let x30 = gf_mul(x15, x15);
    let x60 = gf_mul(x30, x30);
    let x120 = gf_mul(x60, x60);
    let x126 = gf_mul(x120, x6);
    let x127 = gf_mul(x126, x);
    gf_mul(x127, x127)
}

/// Forward S-box: affine transform of the field inverse
#[inline(always)]
fn sbox(x: u8) -> u8 {
    let i = gf_inv(x);
    i ^ i.rotate_left(1) ^ i.rotate_left(2) ^ i.rotate_left(3) ^ i.rotate_left(4) ^ 0x63
}

#[inline(always)]
fn sub_word(word: u32) -> u32 {
    let mut bytes = word.to_be_bytes();
    for b in bytes.iter_mut() {
        *b = sbox(*b);
    }
    u32::from_be_bytes(bytes)
}

/// FIPS 197 key expansion into `round_keys` (4 * Nb * (Nr + 1) bytes)
fn expand_key(key: &[u8], round_keys: &mut [u8]) {
    let nk = key.len() / 4;
    let total = round_keys.len() / 4;
    let mut w = [0u32; 60];

    for (i, chunk) in key.chunks_exact(4).enumerate() {
        w[i] = BigEndian::read_u32(chunk);
    }
    for i in nk..total {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(temp.rotate_left(8)) ^ RCON[i / nk];
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w[i] = w[i - nk] ^ temp;
    }
    for (i, chunk) in round_keys.chunks_exact_mut(4).enumerate() {
        BigEndian::write_u32(chunk, w[i]);
    }

    w.zeroize();
}

fn sub_bytes(state: &mut [u8; 16]) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
    compiler_fence(Ordering::SeqCst);
}

fn shift_rows(state: &mut [u8; 16]) {
    let s = *state;
    for c in 0..4 {
        for r in 0..4 {
            state[4 * c + r] = s[4 * ((c + r) % 4) + r];
        }
    }
}

fn mix_columns(state: &mut [u8; 16]) {
    for col in state.chunks_exact_mut(4) {
        let (s0, s1, s2, s3) = (col[0], col[1], col[2], col[3]);
        let all = s0 ^ s1 ^ s2 ^ s3;
        col[0] ^= all ^ xtime(s0 ^ s1);
        col[1] ^= all ^ xtime(s1 ^ s2);
        col[2] ^= all ^ xtime(s2 ^ s3);
        col[3] ^= all ^ xtime(s3 ^ s0);
    }
}

fn add_round_key(state: &mut [u8; 16], round_key: &[u8]) {
    for (s, k) in state.iter_mut().zip(round_key) {
        *s ^= k;
    }
}

/// Run the forward cipher with an expanded key schedule
fn encrypt_with(round_keys: &[u8], block: &mut [u8]) -> Result<()> {
    validate::length("AES block", block.len(), AES_BLOCK_SIZE)?;

    let rounds = round_keys.len() / AES_BLOCK_SIZE - 1;
    let mut state = [0u8; 16];
    state.copy_from_slice(block);

    add_round_key(&mut state, &round_keys[..16]);
    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, &round_keys[round * 16..(round + 1) * 16]);
    }
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, &round_keys[rounds * 16..]);

    block.copy_from_slice(&state);
    state.zeroize();
    Ok(())
}

/// Expanded key schedule of `RK` bytes
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct KeySchedule<const RK: usize> {
    round_keys: [u8; RK],
}

impl<const RK: usize> KeySchedule<RK> {
    fn expand(key: &[u8], expected: usize, context: &'static str) -> Result<Self> {
        validate::length(context, key.len(), expected)?;
        let mut round_keys = [0u8; RK];
        expand_key(key, &mut round_keys);
        Ok(Self { round_keys })
    }
}

macro_rules! aes_cipher {
    ($name:ident, $rk:literal, $key_size:expr, $label:literal) => {
        #[doc = concat!($label, " block cipher")]
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct $name {
            schedule: KeySchedule<$rk>,
        }

        impl BlockCipher for $name {
            const BLOCK_SIZE: usize = AES_BLOCK_SIZE;
            const KEY_SIZE: usize = $key_size;

            fn new(key: &[u8]) -> Result<Self> {
                Ok(Self {
                    schedule: KeySchedule::expand(key, $key_size, concat!($label, " key"))?,
                })
            }

            fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
                encrypt_with(&self.schedule.round_keys, block)
            }

            fn name() -> &'static str {
                $label
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    };
}

aes_cipher!(Aes128, 176, AES128_KEY_SIZE, "AES-128");
aes_cipher!(Aes192, 208, AES192_KEY_SIZE, "AES-192");
aes_cipher!(Aes256, 240, AES256_KEY_SIZE, "AES-256");
