//! Streaming GCM encryption

use sgcm_algorithms::{BlockCipher, Gcm};
use sgcm_api::{AeadEncryptor, Result};
use sgcm_params::utils::symmetric::GCM_TAG_SIZE;

use crate::state::{Mode, Phase, StreamState};

/// Encrypts a message fragment by fragment
///
/// Ciphertext is released in whole 16-byte blocks as soon as enough
/// plaintext has been supplied; the final partial block and the tag are
/// produced by [`finalize`](AeadEncryptor::finalize). For any split of the
/// plaintext the concatenated output equals one-shot GCM
/// `ciphertext || tag`.
#[derive(Debug)]
pub struct GcmEncryptor<B: BlockCipher> {
    state: StreamState<B>,
}

impl<B: BlockCipher> GcmEncryptor<B> {
    pub(crate) fn from_engine(gcm: Gcm<B>) -> Self {
        Self {
            state: StreamState::new(gcm),
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Nonce length accepted by [`initialize`](AeadEncryptor::initialize)
    pub fn nonce_size(&self) -> usize {
        self.state.nonce_size()
    }

    /// Plaintext bytes accepted so far for the current message
    pub fn bytes_processed(&self) -> u64 {
        self.state.ciphertext_len()
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut StreamState<B> {
        &mut self.state
    }
}

impl<B: BlockCipher> AeadEncryptor for GcmEncryptor<B> {
    fn tag_size(&self) -> usize {
        GCM_TAG_SIZE
    }

    fn initialize(&mut self, nonce: &[u8], aad: &[u8]) -> Result<()> {
        self.state.begin(nonce, aad, Mode::Encrypt)
    }

    fn next(&mut self, fragment: &[u8], out: &mut Vec<u8>) -> Result<usize> {
        self.state.active_mode("encrypt next")?;
        self.state.reserve("encrypt next", fragment.len())?;

        let mut blocks = self.state.take_blocks(fragment);
        if let Err(err) = self.state.apply_keystream(&mut blocks) {
            return Err(self.state.fail("encrypt next", err));
        }
        self.state.absorb(&blocks);
        out.extend_from_slice(&blocks);

        tracing::trace!(
            fragment_len = fragment.len(),
            emitted = blocks.len(),
            "encrypted fragment"
        );
        Ok(blocks.len())
    }

    fn finalize(&mut self, out: &mut Vec<u8>) -> Result<usize> {
        self.state.active_mode("encrypt finalize")?;

        let mut tail = self.state.take_pending();
        if let Err(err) = self.state.apply_keystream(&mut tail) {
            return Err(self.state.fail("encrypt finalize", err));
        }
        self.state.absorb(&tail);
        let tag = self.state.compute_tag();
        self.state.finish();

        out.extend_from_slice(&tail);
        out.extend_from_slice(&tag[..]);
        Ok(tail.len() + GCM_TAG_SIZE)
    }
}
