//! Galois/Counter Mode (GCM) authenticated encryption
//!
//! Implementation of GCM as specified in NIST SP 800-38D. [`Gcm`] offers the
//! usual one-shot [`seal`](Gcm::seal) and [`open`](Gcm::open) and, in
//! addition, the building blocks a streaming layer needs: pre-counter block
//! derivation, counter-mode keystream application and GHASH accumulation
//! over a caller-owned [`FieldElement`].
//!
//! Nonces of any non-zero length are accepted. A 12-byte nonce yields the
//! pre-counter block `nonce || 0^31 || 1`; every other length is hashed with
//! GHASH together with its bit length.
//!
//! ## Constant-Time Guarantees
//!
//! Tag comparison uses [`subtle::ConstantTimeEq`]. The expected tag is
//! zeroized before an authentication failure is reported and no plaintext
//! is produced for a message whose tag does not verify.

use core::fmt;

use sgcm_params::utils::symmetric::{
    GCM_BLOCK_SIZE, GCM_MAX_MESSAGE_SIZE, GCM_MIN_NONCE_SIZE, GCM_STANDARD_NONCE_SIZE,
    GCM_TAG_SIZE,
};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::block::modes::ctr;
use crate::block::BlockCipher;
use crate::error::{validate, Result};

pub mod ghash;
pub use ghash::{FieldElement, GHash};

/// GCM mode over a 128-bit block cipher
#[derive(Clone)]
pub struct Gcm<B: BlockCipher> {
    cipher: B,
    ghash: GHash,
    nonce_size: usize,
}

impl<B: BlockCipher> Gcm<B> {
    /// Create a GCM instance expecting the standard 12-byte nonce
    pub fn new(cipher: B) -> Result<Self> {
        Self::with_nonce_size(cipher, GCM_STANDARD_NONCE_SIZE)
    }

    /// Create a GCM instance expecting nonces of exactly `nonce_size` bytes
    pub fn with_nonce_size(cipher: B, nonce_size: usize) -> Result<Self> {
        validate::length("GCM block size", B::BLOCK_SIZE, GCM_BLOCK_SIZE)?;
        validate::parameter(
            nonce_size >= GCM_MIN_NONCE_SIZE,
            "nonce_size",
            "GCM nonce must be at least one byte",
        )?;

        // H = E_K(0^128)
        let mut h = [0u8; GCM_BLOCK_SIZE];
        cipher.encrypt_block(&mut h)?;
        let ghash = GHash::new(&h);
        h.zeroize();

        Ok(Self {
            cipher,
            ghash,
            nonce_size,
        })
    }

    /// Nonce length this instance accepts
    pub fn nonce_size(&self) -> usize {
        self.nonce_size
    }

    /// Authentication tag length in bytes
    pub fn tag_size(&self) -> usize {
        GCM_TAG_SIZE
    }

    /// Encrypt one block in place with the underlying cipher
    pub fn encrypt_block(&self, block: &mut [u8; GCM_BLOCK_SIZE]) -> Result<()> {
        self.cipher.encrypt_block(&mut block[..])
    }

    /// Derive the pre-counter block `J0` for `nonce`
    pub fn derive_counter(&self, nonce: &[u8]) -> Result<[u8; GCM_BLOCK_SIZE]> {
        validate::length("GCM nonce", nonce.len(), self.nonce_size)?;

        let mut j0 = [0u8; GCM_BLOCK_SIZE];
        if nonce.len() == GCM_STANDARD_NONCE_SIZE {
            j0[..GCM_STANDARD_NONCE_SIZE].copy_from_slice(nonce);
            j0[GCM_BLOCK_SIZE - 1] = 1;
        } else {
            // GHASH(nonce || 0^s || 0^64 || [len(nonce)]_64)
            let mut y = FieldElement::ZERO;
            self.ghash.update(&mut y, nonce);
            j0 = self.ghash.finalize(&mut y, 0, nonce.len() as u64);
            y.zeroize();
        }
        Ok(j0)
    }

    /// XOR `data` with the keystream starting at `counter`
    ///
    /// `counter` is left pointing at the block after the last one used.
    pub fn counter_crypt(
        &self,
        counter: &mut [u8; GCM_BLOCK_SIZE],
        data: &mut [u8],
    ) -> Result<()> {
        ctr::apply_keystream(&self.cipher, counter, data)
    }

    /// Fold `data` into the GHASH accumulator `y`
    pub fn ghash_update(&self, y: &mut FieldElement, data: &[u8]) {
        self.ghash.update(y, data);
    }

    /// Fold the length block into `y` and return the GHASH output
    ///
    /// `aad_len` and `ct_len` are byte counts.
    pub fn ghash_finalize(
        &self,
        y: &mut FieldElement,
        aad_len: u64,
        ct_len: u64,
    ) -> [u8; GCM_BLOCK_SIZE] {
        self.ghash.finalize(y, aad_len, ct_len)
    }

    /// Compute the tag `GHASH_H(A, C) ^ E_K(J0)`
    fn compute_tag(
        &self,
        j0: &[u8; GCM_BLOCK_SIZE],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<[u8; GCM_TAG_SIZE]> {
        let mut y = FieldElement::ZERO;
        self.ghash.update(&mut y, aad);
        self.ghash.update(&mut y, ciphertext);
        let mut tag = self.ghash.finalize(&mut y, aad.len() as u64, ciphertext.len() as u64);
        y.zeroize();

        let mut mask = *j0;
        self.encrypt_block(&mut mask)?;
        for (t, m) in tag.iter_mut().zip(mask.iter()) {
            *t ^= m;
        }
        mask.zeroize();
        Ok(tag)
    }

    /// Encrypt `plaintext` and authenticate it together with `aad`
    ///
    /// Returns `ciphertext || tag`.
    pub fn seal(&self, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        validate::max_size(
            "GCM plaintext",
            plaintext.len() as u64,
            GCM_MAX_MESSAGE_SIZE,
        )?;

        let j0 = self.derive_counter(nonce)?;
        let mut counter = j0;
        ctr::inc32(&mut counter);

        let mut out = Vec::with_capacity(plaintext.len() + GCM_TAG_SIZE);
        out.extend_from_slice(plaintext);
        self.counter_crypt(&mut counter, &mut out)?;

        let tag = self.compute_tag(&j0, aad, &out)?;
        out.extend_from_slice(&tag);
        Ok(out)
    }

    /// Verify and decrypt `ciphertext || tag`
    ///
    /// The tag is checked before any plaintext is produced.
    pub fn open(&self, nonce: &[u8], ciphertext_and_tag: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        validate::min_length("GCM ciphertext", ciphertext_and_tag.len(), GCM_TAG_SIZE)?;

        let body_len = ciphertext_and_tag.len() - GCM_TAG_SIZE;
        let (ciphertext, tag) = ciphertext_and_tag.split_at(body_len);
        validate::max_size("GCM ciphertext", body_len as u64, GCM_MAX_MESSAGE_SIZE)?;

        let j0 = self.derive_counter(nonce)?;
        let mut expected = self.compute_tag(&j0, aad, ciphertext)?;
        let valid: bool = expected[..].ct_eq(tag).into();
        expected.zeroize();
        validate::authentication(valid, "GCM")?;

        let mut counter = j0;
        ctr::inc32(&mut counter);
        let mut plaintext = ciphertext.to_vec();
        self.counter_crypt(&mut counter, &mut plaintext)?;
        Ok(plaintext)
    }
}

impl<B: BlockCipher> fmt::Debug for Gcm<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gcm")
            .field("cipher", &B::name())
            .field("nonce_size", &self.nonce_size)
            .finish_non_exhaustive()
    }
}
