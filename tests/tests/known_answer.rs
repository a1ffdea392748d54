//! Known-answer tests for one-shot and streaming GCM

use sgcm_algorithms::{Aes128, Aes256, BlockCipher, Gcm};
use sgcm_api::AeadEncryptor;
use sgcm_stream::{new_streaming_gcm_with_config, StreamConfig, TrailingTagDecryptor};
use sgcm_tests::vectors::{GcmVector, AES128_GCM, AES256_GCM};
use sgcm_tests::{init_tracing, open_fragments, seal_fragments};

fn check_vector<B: BlockCipher + std::fmt::Debug>(v: &GcmVector) {
    let key = v.key();
    let nonce = v.nonce();
    let aad = v.aad();
    let plaintext = v.plaintext();
    let config = StreamConfig::default().with_nonce_size(nonce.len());

    // One-shot engine
    let gcm = Gcm::with_nonce_size(B::new(&key).unwrap(), nonce.len()).unwrap();
    let sealed = gcm.seal(&nonce, &plaintext, &aad).unwrap();
    assert_eq!(sealed, v.sealed(), "{} seal", v.name);
    let opened = gcm.open(&nonce, &sealed, &aad).unwrap();
    assert_eq!(opened, plaintext, "{} open", v.name);

    // Streaming engine with several fragment sizes
    let (mut enc, mut dec) = new_streaming_gcm_with_config(B::new(&key).unwrap(), config).unwrap();
    for piece in [1usize, 5, 16, 64] {
        let fragments: Vec<&[u8]> = if plaintext.is_empty() {
            Vec::new()
        } else {
            plaintext.chunks(piece).collect()
        };
        let sealed = seal_fragments(&mut enc, &nonce, &aad, &fragments).unwrap();
        assert_eq!(sealed, v.sealed(), "{} in {piece}-byte fragments", v.name);

        let ciphertext = v.ciphertext();
        let ct_fragments: Vec<&[u8]> = ciphertext.chunks(piece).collect();
        let (opened, verdict) = open_fragments(&mut dec, &nonce, &aad, &ct_fragments, &v.tag());
        assert!(verdict.is_ok(), "{} streaming open", v.name);
        assert_eq!(opened, plaintext);
    }

    // Trailing-tag decryption of the wire format
    let mut trailing = TrailingTagDecryptor::from(dec);
    trailing.initialize(&nonce, &aad).unwrap();
    let mut opened = Vec::new();
    for chunk in v.sealed().chunks(7) {
        trailing.next(chunk, &mut opened).unwrap();
    }
    trailing.finalize(&mut opened).unwrap();
    assert_eq!(opened, plaintext, "{} trailing-tag open", v.name);

    assert_eq!(enc.tag_size(), v.tag().len());
}

#[test]
fn aes128_vectors() {
    init_tracing();
    for v in AES128_GCM {
        check_vector::<Aes128>(v);
    }
}

#[test]
fn aes256_vectors() {
    init_tracing();
    for v in AES256_GCM {
        check_vector::<Aes256>(v);
    }
}
