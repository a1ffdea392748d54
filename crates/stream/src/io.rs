//! `std::io` adapters over the streaming engine
//!
//! The writers accept data in arbitrary pieces and forward output to the
//! wrapped writer as soon as the engine releases it. The wire format is
//! `ciphertext || tag`.

use std::fmt;
use std::io::{ErrorKind, Read, Write};

use sgcm_algorithms::BlockCipher;
use sgcm_api::{AeadEncryptor, Result};
use zeroize::Zeroizing;

use crate::decryptor::GcmDecryptor;
use crate::encryptor::GcmEncryptor;
use crate::trailing::TrailingTagDecryptor;

/// Read buffer size used by [`encrypt_stream`] and [`decrypt_stream`]
pub const STREAM_CHUNK_SIZE: usize = 16384;

/// Trait for streaming encryption
pub trait StreamingEncrypt<W: Write> {
    /// Writes plaintext data to the stream
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Finalizes the stream, writing the remaining ciphertext and the tag
    fn finalize(self) -> Result<W>;
}

/// Trait for streaming decryption
pub trait StreamingDecrypt<W: Write> {
    /// Writes `ciphertext || tag` data to the stream
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Finalizes the stream, verifying the tag
    fn finalize(self) -> Result<W>;
}

/// Encrypting writer: plaintext in, `ciphertext || tag` out
#[derive(Debug)]
pub struct GcmEncryptWriter<W: Write, B: BlockCipher> {
    writer: W,
    encryptor: GcmEncryptor<B>,
    buffer: Vec<u8>,
}

impl<W: Write, B: BlockCipher> GcmEncryptWriter<W, B> {
    /// Start a message on `encryptor` and write its output to `writer`
    pub fn new(
        writer: W,
        mut encryptor: GcmEncryptor<B>,
        nonce: &[u8],
        aad: &[u8],
    ) -> Result<Self> {
        encryptor.initialize(nonce, aad)?;
        Ok(Self {
            writer,
            encryptor,
            buffer: Vec::with_capacity(STREAM_CHUNK_SIZE),
        })
    }
}

impl<W: Write, B: BlockCipher> StreamingEncrypt<W> for GcmEncryptWriter<W, B> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.clear();
        self.encryptor.next(data, &mut self.buffer)?;
        self.writer.write_all(&self.buffer)?;
        Ok(())
    }

    fn finalize(mut self) -> Result<W> {
        self.buffer.clear();
        self.encryptor.finalize(&mut self.buffer)?;
        self.writer.write_all(&self.buffer)?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Decrypting writer: `ciphertext || tag` in, plaintext out
///
/// Plaintext is written before the tag has been checked. If
/// [`finalize`](StreamingDecrypt::finalize) fails, everything written to the
/// inner writer must be discarded.
pub struct GcmDecryptWriter<W: Write, B: BlockCipher> {
    writer: W,
    decryptor: TrailingTagDecryptor<B>,
    buffer: Zeroizing<Vec<u8>>,
}

impl<W: Write, B: BlockCipher> GcmDecryptWriter<W, B> {
    /// Start a message on `decryptor` and write plaintext to `writer`
    pub fn new(writer: W, decryptor: GcmDecryptor<B>, nonce: &[u8], aad: &[u8]) -> Result<Self> {
        let mut decryptor = TrailingTagDecryptor::from(decryptor);
        decryptor.initialize(nonce, aad)?;
        Ok(Self {
            writer,
            decryptor,
            buffer: Zeroizing::new(Vec::with_capacity(STREAM_CHUNK_SIZE)),
        })
    }
}

impl<W: Write + fmt::Debug, B: BlockCipher + fmt::Debug> fmt::Debug for GcmDecryptWriter<W, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GcmDecryptWriter")
            .field("writer", &self.writer)
            .field("decryptor", &self.decryptor)
            .finish_non_exhaustive()
    }
}

impl<W: Write, B: BlockCipher> StreamingDecrypt<W> for GcmDecryptWriter<W, B> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.clear();
        self.decryptor.next(data, &mut self.buffer)?;
        self.writer.write_all(&self.buffer)?;
        Ok(())
    }

    fn finalize(mut self) -> Result<W> {
        self.buffer.clear();
        self.decryptor.finalize(&mut self.buffer)?;
        self.writer.write_all(&self.buffer)?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Read into `buf`, retrying on interruption
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Encrypt everything from `reader` as one message and write
/// `ciphertext || tag` to `writer`
///
/// Returns the number of bytes written.
pub fn encrypt_stream<B, R, W>(
    encryptor: &mut GcmEncryptor<B>,
    nonce: &[u8],
    aad: &[u8],
    mut reader: R,
    mut writer: W,
) -> Result<u64>
where
    B: BlockCipher,
    R: Read,
    W: Write,
{
    encryptor.initialize(nonce, aad)?;

    let mut input = Zeroizing::new(vec![0u8; STREAM_CHUNK_SIZE]);
    let mut output = Vec::with_capacity(STREAM_CHUNK_SIZE + encryptor.tag_size());
    let mut written = 0u64;
    loop {
        let n = read_chunk(&mut reader, &mut input)?;
        if n == 0 {
            break;
        }
        output.clear();
        encryptor.next(&input[..n], &mut output)?;
        writer.write_all(&output)?;
        written += output.len() as u64;
    }

    output.clear();
    encryptor.finalize(&mut output)?;
    writer.write_all(&output)?;
    writer.flush()?;
    written += output.len() as u64;

    tracing::debug!(written, "stream encrypted");
    Ok(written)
}

/// Decrypt `ciphertext || tag` from `reader` and write the plaintext to
/// `writer`
///
/// Returns the number of plaintext bytes written. On an authentication
/// failure the plaintext already written must be discarded.
pub fn decrypt_stream<B, R, W>(
    decryptor: &mut TrailingTagDecryptor<B>,
    nonce: &[u8],
    aad: &[u8],
    mut reader: R,
    mut writer: W,
) -> Result<u64>
where
    B: BlockCipher,
    R: Read,
    W: Write,
{
    decryptor.initialize(nonce, aad)?;

    let mut input = vec![0u8; STREAM_CHUNK_SIZE];
    let mut output = Zeroizing::new(Vec::with_capacity(STREAM_CHUNK_SIZE));
    let mut written = 0u64;
    loop {
        let n = read_chunk(&mut reader, &mut input)?;
        if n == 0 {
            break;
        }
        output.clear();
        decryptor.next(&input[..n], &mut output)?;
        writer.write_all(&output)?;
        written += output.len() as u64;
    }

    output.clear();
    decryptor.finalize(&mut output)?;
    writer.write_all(&output)?;
    writer.flush()?;
    written += output.len() as u64;

    tracing::debug!(written, "stream decrypted");
    Ok(written)
}
