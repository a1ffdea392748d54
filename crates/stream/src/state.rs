//! Per-message state shared by the streaming encryptor and decryptor
//!
//! A [`StreamState`] owns one keyed GCM engine and everything a message in
//! flight needs: the GHASH accumulator, the running lengths, the CTR
//! counter, the tag mask `E_K(J0)` and the pending bytes that do not yet
//! form a complete block. The lifecycle is tracked by [`Phase`].

use core::fmt;

use sgcm_algorithms::{BlockCipher, FieldElement, Gcm};
use sgcm_api::error::validation;
use sgcm_api::{Error, Result};
use sgcm_params::utils::symmetric::{GCM_BLOCK_SIZE, GCM_MAX_MESSAGE_SIZE, GCM_TAG_SIZE};
use zeroize::{Zeroize, Zeroizing};

/// What the current message produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Plaintext in, ciphertext and tag out
    Encrypt,
    /// Ciphertext in, plaintext out, tag checked at the end
    Decrypt,
    /// Ciphertext in, nothing out, tag checked at the end
    VerifyOnly,
}

/// Lifecycle of a streaming instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, no message started yet
    Uninitialized,
    /// A message is in progress
    Active(Mode),
    /// The last message was finalized
    Finalized,
    /// The last message hit a fatal error and was abandoned
    Failed,
}

impl Phase {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Phase::Uninitialized => "uninitialized",
            Phase::Active(_) => "active",
            Phase::Finalized => "finalized",
            Phase::Failed => "failed",
        }
    }
}

pub(crate) struct StreamState<B: BlockCipher> {
    gcm: Gcm<B>,
    y: FieldElement,
    aad_len: u64,
    ct_len: u64,
    counter: [u8; GCM_BLOCK_SIZE],
    tag_mask: [u8; GCM_TAG_SIZE],
    pending: Zeroizing<Vec<u8>>,
    phase: Phase,
}

impl<B: BlockCipher> StreamState<B> {
    pub(crate) fn new(gcm: Gcm<B>) -> Self {
        Self {
            gcm,
            y: FieldElement::ZERO,
            aad_len: 0,
            ct_len: 0,
            counter: [0u8; GCM_BLOCK_SIZE],
            tag_mask: [0u8; GCM_TAG_SIZE],
            pending: Zeroizing::new(Vec::with_capacity(GCM_BLOCK_SIZE)),
            phase: Phase::Uninitialized,
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn nonce_size(&self) -> usize {
        self.gcm.nonce_size()
    }

    /// Total ciphertext bytes accepted for the current message
    pub(crate) fn ciphertext_len(&self) -> u64 {
        self.ct_len
    }

    /// Start a new message
    ///
    /// The nonce is checked and the tag mask derived before anything is
    /// overwritten, so a rejected nonce leaves the previous state intact.
    pub(crate) fn begin(&mut self, nonce: &[u8], aad: &[u8], mode: Mode) -> Result<()> {
        let j0 = self.gcm.derive_counter(nonce)?;
        let mut tag_mask = j0;
        self.gcm.encrypt_block(&mut tag_mask)?;

        self.wipe();
        self.tag_mask = tag_mask;
        self.counter = j0;
        sgcm_algorithms::block::ctr::inc32(&mut self.counter);
        self.aad_len = aad.len() as u64;
        self.gcm.ghash_update(&mut self.y, aad);
        self.phase = Phase::Active(mode);

        tag_mask.zeroize();
        tracing::debug!(
            ?mode,
            nonce_len = nonce.len(),
            aad_len = aad.len(),
            "streaming GCM message started"
        );
        Ok(())
    }

    /// Mode of the message in progress, or `InvalidState`
    pub(crate) fn active_mode(&self, operation: &'static str) -> Result<Mode> {
        match self.phase {
            Phase::Active(mode) => Ok(mode),
            other => Err(Error::InvalidState {
                operation,
                phase: other.name(),
            }),
        }
    }

    /// Account for `len` more ciphertext bytes, failing the message if the
    /// counter space would be exhausted
    pub(crate) fn reserve(&mut self, operation: &'static str, len: usize) -> Result<()> {
        let total = self.ct_len.saturating_add(len as u64);
        if let Err(err) = validation::within_limit("GCM message", total, GCM_MAX_MESSAGE_SIZE) {
            return Err(self.fail(operation, err));
        }
        self.ct_len = total;
        Ok(())
    }

    /// Every complete block formed by the pending bytes followed by
    /// `fragment`
    ///
    /// Only the remainder (fewer than 16 bytes) is kept in the pending
    /// buffer, so its capacity never grows past one block.
    pub(crate) fn take_blocks(&mut self, fragment: &[u8]) -> Zeroizing<Vec<u8>> {
        let available = self.pending.len() + fragment.len();
        let n = available - available % GCM_BLOCK_SIZE;
        if n == 0 {
            self.pending.extend_from_slice(fragment);
            return Zeroizing::new(Vec::new());
        }

        let head = n - self.pending.len();
        let mut blocks = Zeroizing::new(Vec::with_capacity(n));
        blocks.extend_from_slice(&self.pending);
        blocks.extend_from_slice(&fragment[..head]);
        self.pending.zeroize();
        self.pending.extend_from_slice(&fragment[head..]);
        blocks
    }

    /// Remove whatever is left in the buffer (fewer than 16 bytes)
    pub(crate) fn take_pending(&mut self) -> Zeroizing<Vec<u8>> {
        let rest = Zeroizing::new(self.pending.to_vec());
        self.pending.zeroize();
        rest
    }

    /// XOR the keystream into `data`, advancing the counter per block
    pub(crate) fn apply_keystream(&mut self, data: &mut [u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        self.gcm.counter_crypt(&mut self.counter, data)?;
        Ok(())
    }

    /// Fold ciphertext into the GHASH accumulator
    pub(crate) fn absorb(&mut self, ciphertext: &[u8]) {
        self.gcm.ghash_update(&mut self.y, ciphertext);
    }

    /// Tag over everything absorbed so far
    pub(crate) fn compute_tag(&mut self) -> Zeroizing<[u8; GCM_TAG_SIZE]> {
        let hash = self.gcm.ghash_finalize(&mut self.y, self.aad_len, self.ct_len);
        let mut tag = Zeroizing::new(hash);
        for (t, m) in tag.iter_mut().zip(self.tag_mask.iter()) {
            *t ^= m;
        }
        tag
    }

    /// Close the message after a tag has been produced or checked
    pub(crate) fn finish(&mut self) {
        tracing::debug!(
            ciphertext_len = self.ct_len,
            "streaming GCM message finalized"
        );
        self.wipe();
        self.phase = Phase::Finalized;
    }

    /// Abandon the message after a fatal error and hand the error back
    pub(crate) fn fail(&mut self, operation: &'static str, err: Error) -> Error {
        tracing::warn!(operation, error = %err, "streaming GCM message abandoned");
        self.wipe();
        self.phase = Phase::Failed;
        err
    }

    fn wipe(&mut self) {
        self.y.zeroize();
        self.counter.zeroize();
        self.tag_mask.zeroize();
        self.pending.zeroize();
        self.aad_len = 0;
        self.ct_len = 0;
    }

    #[cfg(test)]
    pub(crate) fn set_ciphertext_len(&mut self, len: u64) {
        self.ct_len = len;
    }

    #[cfg(test)]
    pub(crate) fn pending_capacity(&self) -> usize {
        self.pending.capacity()
    }
}

impl<B: BlockCipher> Drop for StreamState<B> {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl<B: BlockCipher> fmt::Debug for StreamState<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamState")
            .field("cipher", &B::name())
            .field("phase", &self.phase)
            .field("ciphertext_len", &self.ct_len)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}
