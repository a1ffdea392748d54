//! 32-bit counter mode as used by GCM
//!
//! GCM treats the last four bytes of the 16-byte counter block as a
//! big-endian integer that wraps modulo 2^32 (`inc32` in NIST SP 800-38D);
//! the first twelve bytes are never touched by the increment.

use byteorder::{BigEndian, ByteOrder};
use zeroize::Zeroizing;

use crate::block::BlockCipher;
use crate::error::{validate, Result};

/// Size of a counter block in bytes
pub const COUNTER_BLOCK_SIZE: usize = 16;

/// Increment the low 32 bits of `counter`, wrapping around
#[inline]
pub fn inc32(counter: &mut [u8; COUNTER_BLOCK_SIZE]) {
    let value = BigEndian::read_u32(&counter[12..]).wrapping_add(1);
    BigEndian::write_u32(&mut counter[12..], value);
}

/// XOR `data` with the keystream `E_K(counter), E_K(inc32(counter)), ...`
///
/// The counter is advanced once for every block of `data`, including a
/// trailing partial block, so consecutive calls on block-aligned input
/// continue the same keystream.
pub fn apply_keystream<B: BlockCipher>(
    cipher: &B,
    counter: &mut [u8; COUNTER_BLOCK_SIZE],
    data: &mut [u8],
) -> Result<()> {
    validate::length("CTR block cipher", B::BLOCK_SIZE, COUNTER_BLOCK_SIZE)?;

    let mut keystream = Zeroizing::new([0u8; COUNTER_BLOCK_SIZE]);
    for chunk in data.chunks_mut(COUNTER_BLOCK_SIZE) {
        keystream.copy_from_slice(&counter[..]);
        cipher.encrypt_block(&mut keystream[..])?;
        for (byte, key) in chunk.iter_mut().zip(keystream.iter()) {
            *byte ^= key;
        }
        inc32(counter);
    }
    Ok(())
}
