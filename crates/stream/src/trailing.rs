//! Decryption of `ciphertext || tag` streams
//!
//! When the tag travels at the end of the ciphertext the decryptor cannot
//! know which bytes are the tag until the stream ends. [`TrailingTagDecryptor`]
//! keeps the most recent 16 bytes back and treats them as the tag at
//! finalization.

use sgcm_algorithms::BlockCipher;
use sgcm_api::error::validation;
use sgcm_api::{AeadDecryptor, Result};
use sgcm_params::utils::symmetric::GCM_TAG_SIZE;
use zeroize::{Zeroize, Zeroizing};

use crate::decryptor::GcmDecryptor;
use crate::state::Phase;

/// Streaming decryptor for input with the tag appended
#[derive(Debug)]
pub struct TrailingTagDecryptor<B: BlockCipher> {
    inner: GcmDecryptor<B>,
    held: Zeroizing<Vec<u8>>,
}

impl<B: BlockCipher> From<GcmDecryptor<B>> for TrailingTagDecryptor<B> {
    fn from(inner: GcmDecryptor<B>) -> Self {
        Self {
            inner,
            held: Zeroizing::new(Vec::with_capacity(2 * GCM_TAG_SIZE)),
        }
    }
}

impl<B: BlockCipher> TrailingTagDecryptor<B> {
    /// Wrap a decryptor
    pub fn new(inner: GcmDecryptor<B>) -> Self {
        Self::from(inner)
    }

    /// Tag length held back from the end of the input
    pub fn tag_size(&self) -> usize {
        GCM_TAG_SIZE
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.inner.phase()
    }

    /// Start decrypting a new message
    pub fn initialize(&mut self, nonce: &[u8], aad: &[u8]) -> Result<()> {
        self.inner.initialize(nonce, aad)?;
        self.held.zeroize();
        Ok(())
    }

    /// Start authenticating a new message without producing plaintext
    pub fn initialize_verify_only(&mut self, nonce: &[u8], aad: &[u8]) -> Result<()> {
        self.inner.initialize_verify_only(nonce, aad)?;
        self.held.zeroize();
        Ok(())
    }

    /// Consume the next fragment of `ciphertext || tag`
    ///
    /// The last 16 bytes seen so far are withheld from decryption.
    pub fn next(&mut self, fragment: &[u8], out: &mut Vec<u8>) -> Result<usize> {
        self.inner.state.active_mode("decrypt next")?;

        let available = self.held.len() + fragment.len();
        if available <= GCM_TAG_SIZE {
            self.held.extend_from_slice(fragment);
            return Ok(0);
        }

        // Released bytes come from the held bytes first, then the fragment
        let release = available - GCM_TAG_SIZE;
        let from_held = release.min(self.held.len());
        let from_fragment = release - from_held;

        let mut ciphertext = Zeroizing::new(Vec::with_capacity(release));
        ciphertext.extend_from_slice(&self.held[..from_held]);
        ciphertext.extend_from_slice(&fragment[..from_fragment]);
        let result = self.inner.next(&ciphertext, out);

        self.held.drain(..from_held);
        self.held.extend_from_slice(&fragment[from_fragment..]);
        if result.is_err() {
            self.held.zeroize();
        }
        result
    }

    /// Close the message, checking the withheld bytes as the tag
    pub fn finalize(&mut self, out: &mut Vec<u8>) -> Result<usize> {
        self.inner.state.active_mode("decrypt finalize")?;

        if let Err(err) =
            validation::min_length("GCM ciphertext with tag", self.held.len(), GCM_TAG_SIZE)
        {
            self.held.zeroize();
            return Err(self.inner.state.fail("decrypt finalize", err));
        }

        let tag = Zeroizing::new(self.held.to_vec());
        self.held.zeroize();
        self.inner.finalize(&tag, out)
    }

    /// Unwrap the inner decryptor
    pub fn into_inner(self) -> GcmDecryptor<B> {
        self.inner
    }
}
