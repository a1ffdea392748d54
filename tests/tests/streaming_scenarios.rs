//! End-to-end scenarios through the `sgcm` workspace crates

use sgcm_algorithms::{Aes128, BlockCipher, Gcm};
use sgcm_api::{AeadDecryptor, AeadEncryptor, Error, ErrorClass};
use sgcm_stream::{aes128_streaming_gcm, Mode, Phase};
use sgcm_tests::{init_tracing, open_fragments, seal_fragments};

#[test]
fn three_zero_blocks_equal_one_fragment_and_one_shot() {
    init_tracing();
    let key = [0u8; 16];
    let nonce = [0u8; 12];
    let zeros = [0u8; 48];
    let (mut enc, _) = aes128_streaming_gcm(&key).unwrap();

    let blocks = [&zeros[..16], &zeros[16..32], &zeros[32..]];
    let split = seal_fragments(&mut enc, &nonce, &[], &blocks).unwrap();
    let whole = seal_fragments(&mut enc, &nonce, &[], &[&zeros[..]]).unwrap();
    let gcm = Gcm::new(Aes128::new(&key).unwrap()).unwrap();
    let one_shot = gcm.seal(&nonce, &zeros, &[]).unwrap();

    assert_eq!(split, whole);
    assert_eq!(split, one_shot);
    assert_eq!(split.len(), 64);
}

#[test]
fn corrupted_tag_changes_only_the_verdict() {
    init_tracing();
    let key = [0u8; 16];
    let nonce = [0u8; 12];
    let zeros = [0u8; 48];
    let (mut enc, mut dec) = aes128_streaming_gcm(&key).unwrap();

    let sealed = seal_fragments(&mut enc, &nonce, &[], &[&zeros[..]]).unwrap();
    let (ciphertext, tag) = sealed.split_at(48);
    let fragments = [&ciphertext[..16], &ciphertext[16..32], &ciphertext[32..]];

    let (good_out, good) = open_fragments(&mut dec, &nonce, &[], &fragments, tag);
    assert_eq!(good.unwrap(), 0);

    let mut bad_tag = tag.to_vec();
    bad_tag[15] ^= 0xff;
    let (bad_out, bad) = open_fragments(&mut dec, &nonce, &[], &fragments, &bad_tag);

    let err = bad.unwrap_err();
    assert_eq!(err.class(), ErrorClass::Authentication);
    assert_eq!(bad_out, good_out);
    assert_eq!(good_out, zeros.to_vec());
}

#[test]
fn precondition_and_authentication_errors_are_distinct() {
    let (mut enc, mut dec) = aes128_streaming_gcm(&[9u8; 16]).unwrap();
    let mut out = Vec::new();

    let wrong_nonce = enc.initialize(&[0u8; 11], &[]).unwrap_err();
    assert_eq!(wrong_nonce.class(), ErrorClass::Precondition);

    let wrong_phase = dec.next(b"ciphertext", &mut out).unwrap_err();
    assert_eq!(wrong_phase.class(), ErrorClass::Precondition);

    dec.initialize(&[0u8; 12], &[]).unwrap();
    let wrong_tag = dec.finalize(&[0u8; 16], &mut out).unwrap_err();
    let expected = Error::AuthenticationFailed { context: "GCM tag" };
    assert_eq!(wrong_tag, expected);
    assert!(!wrong_tag.is_precondition_violation());
}

#[test]
fn lifecycle_phases() {
    let (mut enc, mut dec) = aes128_streaming_gcm(&[3u8; 16]).unwrap();
    let mut out = Vec::new();
    assert_eq!(enc.phase(), Phase::Uninitialized);

    enc.initialize(&[1u8; 12], b"aad").unwrap();
    assert_eq!(enc.phase(), Phase::Active(Mode::Encrypt));
    enc.next(b"payload", &mut out).unwrap();
    enc.finalize(&mut out).unwrap();
    assert_eq!(enc.phase(), Phase::Finalized);

    dec.initialize(&[1u8; 12], b"aad").unwrap();
    assert_eq!(dec.phase(), Phase::Active(Mode::Decrypt));
    assert!(dec.finalize(&[0u8; 4], &mut Vec::new()).is_err());
    assert_eq!(dec.phase(), Phase::Failed);

    // A fresh initialize recovers from a failed message
    let (body, tag) = out.split_at(out.len() - 16);
    let (plaintext, verdict) = open_fragments(&mut dec, &[1u8; 12], b"aad", &[body], tag);
    assert!(verdict.is_ok());
    assert_eq!(plaintext, b"payload");
}

#[test]
fn facade_prelude_round_trip() {
    use sgcm::prelude::*;

    let (mut enc, dec) = aes256_streaming_gcm(&[0x77u8; 32]).unwrap();
    let nonce = [5u8; 12];
    let mut wire = Vec::new();
    let reader = &b"streamed through io"[..];
    encrypt_stream(&mut enc, &nonce, b"meta", reader, &mut wire).unwrap();

    let mut writer = GcmDecryptWriter::new(Vec::new(), dec, &nonce, b"meta").unwrap();
    for chunk in wire.chunks(3) {
        writer.write(chunk).unwrap();
    }
    assert_eq!(writer.finalize().unwrap(), b"streamed through io");
}
