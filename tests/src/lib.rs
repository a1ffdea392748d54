//! Testing utilities for the sgcm library


use std::sync::Once;

use sgcm_api::{AeadDecryptor, AeadEncryptor, Result};

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary
///
/// `RUST_LOG` is not consulted; everything down to `TRACE` is captured and
/// only shown for failing tests.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .compact()
            .with_ansi(false)
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
    });
}

/// Split `data` at the given cut points (sorted, deduplicated, clamped)
pub fn split_at_cuts<'a>(data: &'a [u8], cuts: &[usize]) -> Vec<&'a [u8]> {
    let mut points: Vec<usize> = cuts.iter().map(|&c| c.min(data.len())).collect();
    points.sort_unstable();
    points.dedup();

    let mut pieces = Vec::with_capacity(points.len() + 1);
    let mut start = 0;
    for point in points {
        pieces.push(&data[start..point]);
        start = point;
    }
    pieces.push(&data[start..]);
    pieces
}

/// Encrypt `fragments` as one message, returning `ciphertext || tag`
pub fn seal_fragments<E: AeadEncryptor>(
    enc: &mut E,
    nonce: &[u8],
    aad: &[u8],
    fragments: &[&[u8]],
) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    enc.initialize(nonce, aad)?;
    for fragment in fragments {
        enc.next(fragment, &mut out)?;
    }
    enc.finalize(&mut out)?;
    Ok(out)
}

/// Decrypt `ciphertext` fragments and check `tag`
///
/// Returns everything appended to the output buffer together with the
/// verdict, so callers can inspect plaintext released before a failure.
pub fn open_fragments<D: AeadDecryptor>(
    dec: &mut D,
    nonce: &[u8],
    aad: &[u8],
    fragments: &[&[u8]],
    tag: &[u8],
) -> (Vec<u8>, Result<usize>) {
    let mut out = Vec::new();
    if let Err(err) = dec.initialize(nonce, aad) {
        return (out, Err(err));
    }
    for fragment in fragments {
        if let Err(err) = dec.next(fragment, &mut out) {
            return (out, Err(err));
        }
    }
    let verdict = dec.finalize(tag, &mut out);
    (out, verdict)
}
