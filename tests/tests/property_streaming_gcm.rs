//! Property-based tests for streaming GCM

use proptest::prelude::*;
use sgcm_algorithms::{Aes128, BlockCipher, Gcm};
use sgcm_api::{AeadDecryptor, AeadEncryptor};
use sgcm_stream::{
    aes128_streaming_gcm, aes256_streaming_gcm, new_streaming_gcm_with_config, StreamConfig,
};
use sgcm_tests::{open_fragments, seal_fragments, split_at_cuts};

/// Message bodies up to a few blocks, including empty ones
fn message() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=200)
}

/// Arbitrary cut points into a message
fn cut_points() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..=200, 0..8)
}

proptest! {
    #[test]
    fn aes128_fragmentation_matches_one_shot(
        key in any::<[u8; 16]>(),
        nonce in any::<[u8; 12]>(),
        aad in message(),
        plaintext in message(),
        cuts in cut_points()
    ) {
        let (mut enc, _) = aes128_streaming_gcm(&key).unwrap();
        let fragments = split_at_cuts(&plaintext, &cuts);
        let streamed = seal_fragments(&mut enc, &nonce, &aad, &fragments).unwrap();

        let gcm = Gcm::new(Aes128::new(&key).unwrap()).unwrap();
        prop_assert_eq!(streamed, gcm.seal(&nonce, &plaintext, &aad).unwrap());
    }

    #[test]
    fn aes256_roundtrip_any_fragmentation(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 12]>(),
        aad in message(),
        plaintext in message(),
        enc_cuts in cut_points(),
        dec_cuts in cut_points()
    ) {
        let (mut enc, mut dec) = aes256_streaming_gcm(&key).unwrap();
        let fragments = split_at_cuts(&plaintext, &enc_cuts);
        let sealed = seal_fragments(&mut enc, &nonce, &aad, &fragments).unwrap();
        let (ciphertext, tag) = sealed.split_at(plaintext.len());

        let fragments = split_at_cuts(ciphertext, &dec_cuts);
        let (opened, verdict) = open_fragments(&mut dec, &nonce, &aad, &fragments, tag);
        prop_assert!(verdict.is_ok());
        prop_assert_eq!(opened, plaintext);
    }

    #[test]
    fn extended_nonce_roundtrip(
        key in any::<[u8; 16]>(),
        nonce in prop::collection::vec(any::<u8>(), 1..=64),
        plaintext in message(),
        cuts in cut_points()
    ) {
        let config = StreamConfig::default().with_nonce_size(nonce.len());
        let cipher = Aes128::new(&key).unwrap();
        let (mut enc, mut dec) = new_streaming_gcm_with_config(cipher.clone(), config).unwrap();

        let fragments = split_at_cuts(&plaintext, &cuts);
        let sealed = seal_fragments(&mut enc, &nonce, &[], &fragments).unwrap();
        let gcm = Gcm::with_nonce_size(cipher, nonce.len()).unwrap();
        prop_assert_eq!(&sealed, &gcm.seal(&nonce, &plaintext, &[]).unwrap());

        let (ciphertext, tag) = sealed.split_at(plaintext.len());
        let (opened, verdict) = open_fragments(&mut dec, &nonce, &[], &[ciphertext], tag);
        prop_assert!(verdict.is_ok());
        prop_assert_eq!(opened, plaintext);
    }

    #[test]
    fn any_bit_flip_is_rejected(
        key in any::<[u8; 16]>(),
        nonce in any::<[u8; 12]>(),
        aad in prop::collection::vec(any::<u8>(), 1..=64),
        plaintext in prop::collection::vec(any::<u8>(), 1..=100),
        target in 0usize..3,
        position in any::<prop::sample::Index>(),
        bit in 0u8..8
    ) {
        let (mut enc, mut dec) = aes128_streaming_gcm(&key).unwrap();
        let sealed = seal_fragments(&mut enc, &nonce, &aad, &[&plaintext[..]]).unwrap();
        let (ciphertext, tag) = sealed.split_at(plaintext.len());
        let mut ciphertext = ciphertext.to_vec();
        let mut tag = tag.to_vec();
        let mut aad = aad;

        let flipped = match target {
            0 => &mut ciphertext,
            1 => &mut tag,
            _ => &mut aad,
        };
        let i = position.index(flipped.len());
        flipped[i] ^= 1 << bit;

        let (_, verdict) = open_fragments(&mut dec, &nonce, &aad, &[&ciphertext[..]], &tag);
        prop_assert!(verdict.unwrap_err().is_authentication_failure());
    }

    #[test]
    fn verify_only_agrees_with_decryption(
        key in any::<[u8; 16]>(),
        nonce in any::<[u8; 12]>(),
        plaintext in message(),
        corrupt in any::<bool>(),
        cuts in cut_points()
    ) {
        let (mut enc, mut dec) = aes128_streaming_gcm(&key).unwrap();
        let sealed = seal_fragments(&mut enc, &nonce, b"header", &[&plaintext[..]]).unwrap();
        let (ciphertext, tag) = sealed.split_at(plaintext.len());
        let mut tag = tag.to_vec();
        if corrupt {
            tag[0] ^= 0x80;
        }
        let fragments = split_at_cuts(ciphertext, &cuts);

        let (_, full) = open_fragments(&mut dec, &nonce, b"header", &fragments, &tag);

        let mut out = Vec::new();
        dec.initialize_verify_only(&nonce, b"header").unwrap();
        for fragment in &fragments {
            prop_assert_eq!(dec.next(fragment, &mut out).unwrap(), 0);
        }
        let verify = dec.finalize(&tag, &mut out);

        prop_assert!(out.is_empty());
        prop_assert_eq!(full.is_ok(), verify.is_ok());
        prop_assert_eq!(full.is_ok(), !corrupt);
    }

    #[test]
    fn output_never_exceeds_complete_blocks(
        key in any::<[u8; 16]>(),
        fragments in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 0..10)
    ) {
        let (mut enc, _) = aes128_streaming_gcm(&key).unwrap();
        enc.initialize(&[0u8; 12], &[]).unwrap();

        let mut out = Vec::new();
        let mut fed = 0usize;
        for fragment in &fragments {
            let emitted = enc.next(fragment, &mut out).unwrap();
            fed += fragment.len();
            prop_assert_eq!(emitted % 16, 0);
            prop_assert_eq!(out.len(), fed - fed % 16);
        }
        let emitted = enc.finalize(&mut out).unwrap();
        prop_assert_eq!(emitted, fed % 16 + 16);
        prop_assert_eq!(out.len(), fed + 16);
    }
}
