//! Streaming GCM decryption and verification

use sgcm_algorithms::{BlockCipher, Gcm};
use sgcm_api::error::validation;
use sgcm_api::{AeadDecryptor, Result};
use sgcm_params::utils::symmetric::GCM_TAG_SIZE;
use subtle::ConstantTimeEq;

use crate::state::{Mode, Phase, StreamState};

/// Decrypts or verifies a message fragment by fragment
///
/// Ciphertext (without the tag) is fed through
/// [`next`](AeadDecryptor::next); the tag is supplied to
/// [`finalize`](AeadDecryptor::finalize).
///
/// # Warning
///
/// In decrypt mode, plaintext for every complete block is released by
/// `next` before the tag is known. If `finalize` fails with an
/// authentication error the caller must discard all plaintext released for
/// that message. The final partial block is never released unless the tag
/// verifies. In verify-only mode no plaintext is ever produced.
#[derive(Debug)]
pub struct GcmDecryptor<B: BlockCipher> {
    pub(crate) state: StreamState<B>,
}

impl<B: BlockCipher> GcmDecryptor<B> {
    pub(crate) fn from_engine(gcm: Gcm<B>) -> Self {
        Self {
            state: StreamState::new(gcm),
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Nonce length accepted by [`initialize`](AeadDecryptor::initialize)
    pub fn nonce_size(&self) -> usize {
        self.state.nonce_size()
    }

    /// Ciphertext bytes accepted so far for the current message
    pub fn bytes_processed(&self) -> u64 {
        self.state.ciphertext_len()
    }
}

impl<B: BlockCipher> AeadDecryptor for GcmDecryptor<B> {
    fn tag_size(&self) -> usize {
        GCM_TAG_SIZE
    }

    fn initialize(&mut self, nonce: &[u8], aad: &[u8]) -> Result<()> {
        self.state.begin(nonce, aad, Mode::Decrypt)
    }

    fn initialize_verify_only(&mut self, nonce: &[u8], aad: &[u8]) -> Result<()> {
        self.state.begin(nonce, aad, Mode::VerifyOnly)
    }

    fn next(&mut self, fragment: &[u8], out: &mut Vec<u8>) -> Result<usize> {
        let mode = self.state.active_mode("decrypt next")?;
        self.state.reserve("decrypt next", fragment.len())?;

        let mut blocks = self.state.take_blocks(fragment);
        self.state.absorb(&blocks);

        let emitted = if mode == Mode::VerifyOnly {
            0
        } else {
            if let Err(err) = self.state.apply_keystream(&mut blocks) {
                return Err(self.state.fail("decrypt next", err));
            }
            out.extend_from_slice(&blocks);
            blocks.len()
        };

        tracing::trace!(
            fragment_len = fragment.len(),
            absorbed = blocks.len(),
            emitted,
            "decrypted fragment"
        );
        Ok(emitted)
    }

    fn finalize(&mut self, tag: &[u8], out: &mut Vec<u8>) -> Result<usize> {
        let mode = self.state.active_mode("decrypt finalize")?;
        if let Err(err) = validation::length("GCM tag", tag.len(), GCM_TAG_SIZE) {
            return Err(self.state.fail("decrypt finalize", err));
        }

        // The tail is decrypted into a transient buffer and only handed out
        // once the tag has been checked.
        let mut tail = self.state.take_pending();
        self.state.absorb(&tail);
        if mode != Mode::VerifyOnly {
            if let Err(err) = self.state.apply_keystream(&mut tail) {
                return Err(self.state.fail("decrypt finalize", err));
            }
        }

        let expected = self.state.compute_tag();
        let valid: bool = expected[..].ct_eq(tag).into();
        self.state.finish();

        if let Err(err) = validation::authentication(valid, "GCM tag") {
            tracing::debug!(?mode, "streaming GCM tag mismatch");
            return Err(err);
        }

        if mode == Mode::VerifyOnly {
            return Ok(0);
        }
        out.extend_from_slice(&tail);
        Ok(tail.len())
    }
}
