//! GHASH universal hash for Galois/Counter Mode
//!
//! GHASH evaluates a polynomial over GF(2^128) keyed by `H = E_K(0^128)`.
//! Field elements use the GCM bit order: the most significant bit of the
//! first byte is the coefficient of x^0. Loading a block as a big-endian
//! `u128` therefore puts x^0 in bit 127, and multiplication by x is a right
//! shift followed by a conditional reduction with `0xE1 || 0^120`.
//!
//! The accumulator is not stored in [`GHash`]: callers own their running
//! [`FieldElement`] and fold data into it with [`GHash::update`]. This lets
//! a single keyed instance serve the one-shot engine, counter derivation and
//! any number of streaming states.
//!
//! ## Constant-Time Guarantees
//!
//! Multiplication processes all 128 bits of the operand and selects with
//! masks; neither the data nor the key influence control flow.

use core::fmt;
use core::ops::{BitXor, BitXorAssign};

use zeroize::{Zeroize, ZeroizeOnDrop};

const GCM_BLOCK_SIZE: usize = 16;

/// Reduction constant for x^128 + x^7 + x^2 + x + 1 in GCM bit order
const R: u128 = 0xe1 << 120;

/// An element of GF(2^128) in GCM representation
#[derive(Clone, Copy, Default, PartialEq, Eq, Zeroize)]
pub struct FieldElement(u128);

impl FieldElement {
    /// The additive identity
    pub const ZERO: Self = Self(0);

    /// Interpret a 16-byte block as a field element
    pub fn from_block(block: &[u8; GCM_BLOCK_SIZE]) -> Self {
        Self(u128::from_be_bytes(*block))
    }

    /// Interpret up to 16 bytes as a field element, zero-padding on the right
    pub fn from_partial(bytes: &[u8]) -> Self {
        let mut block = [0u8; GCM_BLOCK_SIZE];
        block[..bytes.len()].copy_from_slice(bytes);
        let fe = Self::from_block(&block);
        block.zeroize();
        fe
    }

    /// Build a field element from its two big-endian 64-bit halves
    pub fn from_halves(high: u64, low: u64) -> Self {
        Self(((high as u128) << 64) | low as u128)
    }

    /// Serialize as a 16-byte block (both halves big-endian)
    pub fn to_bytes(self) -> [u8; GCM_BLOCK_SIZE] {
        self.0.to_be_bytes()
    }
}

impl BitXor for FieldElement {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for FieldElement {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldElement(..)")
    }
}

/// Multiply two elements of GF(2^128) (NIST SP 800-38D, Algorithm 1)
fn gf_multiply(x: u128, y: u128) -> u128 {
    let mut z = 0u128;
    let mut v = y;
    for i in 0..128 {
        let bit = (x >> (127 - i)) & 1;
        z ^= v & bit.wrapping_neg();
        let lsb = v & 1;
        v = (v >> 1) ^ (R & lsb.wrapping_neg());
    }
    z
}

/// GHASH keyed with the hash subkey `H`
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct GHash {
    h: FieldElement,
}

impl GHash {
    /// Creates a new `GHash` instance with the hash subkey `h`
    pub fn new(h: &[u8; GCM_BLOCK_SIZE]) -> Self {
        Self {
            h: FieldElement::from_block(h),
        }
    }

    /// `y = y · H`
    #[inline]
    pub fn mul(&self, y: &mut FieldElement) {
        y.0 = gf_multiply(y.0, self.h.0);
    }

    /// Fold `data` into the accumulator `y`
    ///
    /// Data is processed in 16-byte blocks; a trailing partial block is
    /// zero-padded. Feeding data in several calls is only equivalent to a
    /// single call when every call but the last is a multiple of 16 bytes.
    pub fn update(&self, y: &mut FieldElement, data: &[u8]) {
        let mut blocks = data.chunks_exact(GCM_BLOCK_SIZE);
        for block in &mut blocks {
            *y ^= FieldElement::from_partial(block);
            self.mul(y);
        }
        let rest = blocks.remainder();
        if !rest.is_empty() {
            *y ^= FieldElement::from_partial(rest);
            self.mul(y);
        }
    }

    /// Fold the length block `[len(A)]_64 || [len(C)]_64` (in bits) into `y`
    ///
    /// Lengths are given in bytes.
    pub fn update_lengths(&self, y: &mut FieldElement, aad_len: u64, ct_len: u64) {
        *y ^= FieldElement::from_halves(aad_len * 8, ct_len * 8);
        self.mul(y);
    }

    /// Apply the length block and return the GHASH output `S`
    pub fn finalize(
        &self,
        y: &mut FieldElement,
        aad_len: u64,
        ct_len: u64,
    ) -> [u8; GCM_BLOCK_SIZE] {
        self.update_lengths(y, aad_len, ct_len);
        y.to_bytes()
    }
}

/// GHASH of `aad` and `ciphertext`, each zero-padded, followed by the
/// length block
pub fn process_ghash(
    h: &[u8; GCM_BLOCK_SIZE],
    aad: &[u8],
    ciphertext: &[u8],
) -> [u8; GCM_BLOCK_SIZE] {
    let ghash = GHash::new(h);
    let mut y = FieldElement::ZERO;
    ghash.update(&mut y, aad);
    ghash.update(&mut y, ciphertext);
    let s = ghash.finalize(&mut y, aad.len() as u64, ciphertext.len() as u64);
    y.zeroize();
    s
}
