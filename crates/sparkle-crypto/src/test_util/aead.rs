//! [`Aead`] tests.

extern crate alloc;

use alloc::{vec, vec::Vec};

use more_asserts::{assert_ge, assert_lt};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use super::{assert_all_zero, assert_ct_eq, assert_ct_ne};
use crate::aead::{Aead, BufferTooSmallError, InvalidNonceSize, OpenError, SealError};

/// Invokes `callback` for each AEAD test.
///
/// # Example
///
/// ```
/// use sparkle_crypto::Schwaemm128_128;
///
/// macro_rules! run_test {
///     ($test:ident) => {
///         sparkle_crypto::test_util::aead::$test::<Schwaemm128_128, _>(&mut rand::thread_rng());
///     };
/// }
/// sparkle_crypto::for_each_aead_test!(run_test);
/// ```
#[macro_export]
macro_rules! for_each_aead_test {
    ($callback:ident) => {
        $crate::__apply! {
            $callback,
            test_basic,
            test_new_key,
            test_nonce,
            test_round_trip,
            test_in_place_round_trip,
            test_empty,
            test_lengths,
            test_bad_key,
            test_bad_nonce,
            test_bad_ciphertext,
            test_bad_ad,
            test_bad_tag,
            test_truncated_ciphertext,
            test_open_zeroes_output,
            test_invalid_params,
        }
    };
}
pub use for_each_aead_test;

/// Performs all of the tests in this module.
///
/// This macro expands into a bunch of individual `#[test]`
/// functions. The calling crate must depend on `rand`.
///
/// # Example
///
/// ```
/// use sparkle_crypto::{test_aead, Schwaemm256_128};
///
/// test_aead!(schwaemm256_128, Schwaemm256_128);
/// ```
#[macro_export]
macro_rules! test_aead {
    ($name:ident, $aead:ty) => {
        mod $name {
            #[allow(unused_imports)]
            use super::*;

            $crate::test_aead!($aead);
        }
    };
    ($aead:ty) => {
        macro_rules! __aead_test {
            ($test:ident) => {
                #[test]
                fn $test() {
                    $crate::test_util::aead::$test::<$aead, _>(&mut ::rand::thread_rng())
                }
            };
        }
        $crate::for_each_aead_test!(__aead_test);
    };
}
pub use test_aead;

const GOLDEN: &[u8] = b"hello, world!";
const AD: &[u8] = b"some additional data";

/// Creates a random key.
fn random_key<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) -> A::Key {
    let mut buf = vec![0u8; A::KEY_SIZE];
    rng.fill_bytes(&mut buf);
    let key = A::Key::try_from(&buf[..]).expect("`KEY_SIZE` should be a valid key size");
    buf.zeroize();
    key
}

/// Creates a random nonce.
fn random_nonce<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) -> Vec<u8> {
    let mut nonce = vec![0u8; A::NONCE_SIZE];
    rng.fill_bytes(&mut nonce);
    nonce
}

fn seal<A: Aead>(key: &A::Key, nonce: &[u8], plaintext: &[u8], ad: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; plaintext.len() + A::OVERHEAD];
    A::new(key)
        .seal(&mut dst[..], nonce, plaintext, ad)
        .expect("unable to encrypt data");
    dst
}

fn open<A: Aead>(
    key: &A::Key,
    nonce: &[u8],
    ciphertext: &[u8],
    ad: &[u8],
) -> Result<Vec<u8>, OpenError> {
    let mut dst = vec![0u8; ciphertext.len().saturating_sub(A::OVERHEAD)];
    A::new(key).open(&mut dst[..], nonce, ciphertext, ad)?;
    Ok(dst)
}

/// Tests the [`Aead`]'s size requirements.
pub fn test_basic<A: Aead, R: RngCore + CryptoRng>(_rng: &mut R) {
    // The minimum key size is 128 bits.
    assert_ge!(A::KEY_SIZE, 16);
    // So is the minimum tag size.
    assert_ge!(A::OVERHEAD, 16);
    // Must be at least 2^32-1.
    assert_ge!(A::MAX_PLAINTEXT_SIZE, u64::from(u32::MAX));
    // Must be `OVERHEAD` bytes larger than the plaintext.
    assert_eq!(
        A::MAX_CIPHERTEXT_SIZE,
        A::MAX_PLAINTEXT_SIZE + A::OVERHEAD as u64
    );
    // Must be at least 2^32-1.
    assert_ge!(A::MAX_ADDITIONAL_DATA_SIZE, u64::from(u32::MAX));
    assert_lt!(A::NONCE_SIZE, 1 << 16);
}

/// Tests that random keys are unique and compare in constant
/// time.
pub fn test_new_key<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let k1 = random_key::<A, R>(rng);
    let k2 = random_key::<A, R>(rng);
    assert_ct_ne!(k1, k2);
    assert_ct_eq!(k1, k1.clone());
}

/// Tests converting slices to [`Aead::Nonce`].
pub fn test_nonce<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let nonce = random_nonce::<A, R>(rng);
    let got = A::Nonce::try_from(&nonce[..]).expect("`NONCE_SIZE` should be valid");
    assert_eq!(core::borrow::Borrow::<[u8]>::borrow(&got), &nonce[..]);

    let mut long = nonce.clone();
    long.push(0);
    assert_eq!(
        A::Nonce::try_from(&long[..]).map(|_| ()),
        Err(InvalidNonceSize)
    );
    assert_eq!(
        A::Nonce::try_from(&nonce[1..]).map(|_| ()),
        Err(InvalidNonceSize)
    );

    let zero = A::Nonce::default();
    assert_all_zero!(core::borrow::Borrow::<[u8]>::borrow(&zero));
}

/// A round-trip positive test.
pub fn test_round_trip<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let key = random_key::<A, R>(rng);
    let nonce = random_nonce::<A, R>(rng);

    let ciphertext = seal::<A>(&key, &nonce, GOLDEN, AD);
    assert_eq!(ciphertext.len(), GOLDEN.len() + A::OVERHEAD);
    assert_ne!(&ciphertext[..GOLDEN.len()], GOLDEN);

    let plaintext = open::<A>(&key, &nonce, &ciphertext, AD).expect("unable to decrypt data");
    assert_eq!(&plaintext, GOLDEN, "round trip test failed");
}

/// An in-place round-trip positive test.
pub fn test_in_place_round_trip<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let key = random_key::<A, R>(rng);
    let nonce = random_nonce::<A, R>(rng);

    let ciphertext = {
        let mut data = vec![0u8; GOLDEN.len() + A::OVERHEAD];
        let (out, tag) = data.split_at_mut(GOLDEN.len());
        out.clone_from_slice(GOLDEN);
        A::new(&key)
            .seal_in_place(&nonce, out, tag, AD)
            .expect("unable to encrypt data in-place");
        data
    };
    // In-place and out-of-place encryption agree.
    assert_eq!(ciphertext, seal::<A>(&key, &nonce, GOLDEN, AD));

    let plaintext = {
        let mut data = ciphertext.to_vec();
        let (out, tag) = data.split_at_mut(GOLDEN.len());
        A::new(&key)
            .open_in_place(&nonce, out, tag, AD)
            .expect("unable to decrypt data in-place");
        out.to_vec()
    };
    assert_eq!(&plaintext, GOLDEN, "in-place round trip test failed");
}

/// Empty plaintexts and empty additional data are valid.
pub fn test_empty<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let key = random_key::<A, R>(rng);
    let nonce = random_nonce::<A, R>(rng);

    let neither = seal::<A>(&key, &nonce, &[], &[]);
    assert_eq!(neither.len(), A::OVERHEAD);
    assert_eq!(
        open::<A>(&key, &nonce, &neither, &[]).expect("unable to decrypt data"),
        Vec::<u8>::new()
    );

    let ad_only = seal::<A>(&key, &nonce, &[], AD);
    assert_ne!(ad_only, neither);
    assert!(open::<A>(&key, &nonce, &ad_only, AD).is_ok());
    assert_eq!(
        open::<A>(&key, &nonce, &ad_only, &[]),
        Err(OpenError::Authentication)
    );

    let pt_only = seal::<A>(&key, &nonce, GOLDEN, &[]);
    assert_eq!(
        open::<A>(&key, &nonce, &pt_only, &[]).expect("unable to decrypt data"),
        GOLDEN
    );
}

/// Round trips every plaintext and additional data length up to
/// a few blocks, which covers every padding case.
pub fn test_lengths<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let key = random_key::<A, R>(rng);
    let nonce = random_nonce::<A, R>(rng);

    let max = 3 * A::NONCE_SIZE.max(16) + 1;
    let mut data = vec![0u8; max];
    rng.fill_bytes(&mut data);

    for n in 0..=max {
        let plaintext = &data[..n];
        let ciphertext = seal::<A>(&key, &nonce, plaintext, AD);
        assert_eq!(ciphertext.len(), n + A::OVERHEAD, "len={n}");
        let got = open::<A>(&key, &nonce, &ciphertext, AD).expect("unable to decrypt data");
        assert_eq!(got, plaintext, "len={n}");

        let ad = &data[..n];
        let ciphertext = seal::<A>(&key, &nonce, GOLDEN, ad);
        let got = open::<A>(&key, &nonce, &ciphertext, ad).expect("unable to decrypt data");
        assert_eq!(got, GOLDEN, "ad len={n}");
    }
}

/// Decryption should fail with an incorrect key.
pub fn test_bad_key<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let nonce = random_nonce::<A, R>(rng);
    let ciphertext = seal::<A>(&random_key::<A, R>(rng), &nonce, GOLDEN, AD);

    let err = open::<A>(&random_key::<A, R>(rng), &nonce, &ciphertext, AD)
        .expect_err("decryption should have failed due to a different key");
    assert_eq!(err, OpenError::Authentication);
}

/// Decryption should fail with an incorrect nonce.
pub fn test_bad_nonce<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let key = random_key::<A, R>(rng);

    let mut nonce = vec![b'A'; A::NONCE_SIZE];
    let ciphertext = seal::<A>(&key, &nonce, GOLDEN, AD);

    nonce.fill(b'B');
    let err = open::<A>(&key, &nonce, &ciphertext, AD)
        .expect_err("decryption should have failed due to a modified nonce");
    assert_eq!(err, OpenError::Authentication);
}

/// Decryption should fail with a modified AD.
pub fn test_bad_ad<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let key = random_key::<A, R>(rng);
    let nonce = random_nonce::<A, R>(rng);
    let ciphertext = seal::<A>(&key, &nonce, GOLDEN, AD);

    let err = open::<A>(&key, &nonce, &ciphertext, b"some bad AD")
        .expect_err("decryption should have failed due to a modified AD");
    assert_eq!(err, OpenError::Authentication);

    // Every single-bit flip of the AD is detected.
    let mut ad = AD.to_vec();
    for i in 0..ad.len() * 8 {
        ad[i / 8] ^= 1 << (i % 8);
        assert_eq!(
            open::<A>(&key, &nonce, &ciphertext, &ad),
            Err(OpenError::Authentication),
            "bit {i}"
        );
        ad[i / 8] ^= 1 << (i % 8);
    }
}

/// Decryption should fail with a modified ciphertext.
pub fn test_bad_ciphertext<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let key = random_key::<A, R>(rng);
    let nonce = random_nonce::<A, R>(rng);
    let mut ciphertext = seal::<A>(&key, &nonce, GOLDEN, AD);

    for i in 0..GOLDEN.len() * 8 {
        ciphertext[i / 8] ^= 1 << (i % 8);
        let err = open::<A>(&key, &nonce, &ciphertext, AD)
            .expect_err("decryption should have failed due to a modified ciphertext");
        assert_eq!(err, OpenError::Authentication, "bit {i}");
        ciphertext[i / 8] ^= 1 << (i % 8);
    }
}

/// Decryption should fail with a modified authentication
/// tag.
pub fn test_bad_tag<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let key = random_key::<A, R>(rng);
    let nonce = random_nonce::<A, R>(rng);
    let mut ciphertext = seal::<A>(&key, &nonce, GOLDEN, AD);

    for i in GOLDEN.len() * 8..ciphertext.len() * 8 {
        ciphertext[i / 8] ^= 1 << (i % 8);
        let err = open::<A>(&key, &nonce, &ciphertext, AD)
            .expect_err("decryption should have failed due to a modified auth tag");
        assert_eq!(err, OpenError::Authentication, "bit {i}");
        ciphertext[i / 8] ^= 1 << (i % 8);
    }
}

/// Decryption should fail when the ciphertext is truncated or
/// extended.
pub fn test_truncated_ciphertext<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let key = random_key::<A, R>(rng);
    let nonce = random_nonce::<A, R>(rng);
    let ciphertext = seal::<A>(&key, &nonce, GOLDEN, AD);

    for n in 0..ciphertext.len() {
        assert_eq!(
            open::<A>(&key, &nonce, &ciphertext[..n], AD),
            Err(OpenError::Authentication),
            "len={n}"
        );
    }

    let mut long = ciphertext.clone();
    long.push(0);
    assert_eq!(
        open::<A>(&key, &nonce, &long, AD),
        Err(OpenError::Authentication)
    );
}

/// A failed decryption must not release unauthenticated
/// plaintext.
pub fn test_open_zeroes_output<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let key = random_key::<A, R>(rng);
    let nonce = random_nonce::<A, R>(rng);
    let mut ciphertext = seal::<A>(&key, &nonce, GOLDEN, AD);
    let n = ciphertext.len() - 1;
    ciphertext[n] ^= 1;

    let mut dst = vec![0xffu8; GOLDEN.len()];
    let err = A::new(&key)
        .open(&mut dst, &nonce, &ciphertext, AD)
        .expect_err("decryption should have failed due to a modified auth tag");
    assert_eq!(err, OpenError::Authentication);
    assert_all_zero!(dst, "`open` released unauthenticated plaintext");

    let (data, tag) = ciphertext.split_at_mut(GOLDEN.len());
    let err = A::new(&key)
        .open_in_place(&nonce, data, tag, AD)
        .expect_err("decryption should have failed due to a modified auth tag");
    assert_eq!(err, OpenError::Authentication);
    assert_all_zero!(data, "`open_in_place` released unauthenticated plaintext");
}

/// Malformed parameters are rejected with the right error.
pub fn test_invalid_params<A: Aead, R: RngCore + CryptoRng>(rng: &mut R) {
    let key = random_key::<A, R>(rng);
    let nonce = random_nonce::<A, R>(rng);
    let aead = A::new(&key);

    // Output buffer too small.
    let mut dst = vec![0u8; GOLDEN.len() + A::OVERHEAD - 1];
    assert_eq!(
        aead.seal(&mut dst, &nonce, GOLDEN, AD),
        Err(SealError::BufferTooSmall(BufferTooSmallError(Some(
            GOLDEN.len() + A::OVERHEAD
        ))))
    );

    // Wrong nonce size.
    let mut dst = vec![0u8; GOLDEN.len() + A::OVERHEAD];
    assert_eq!(
        aead.seal(&mut dst, &nonce[1..], GOLDEN, AD),
        Err(SealError::InvalidNonceSize(InvalidNonceSize))
    );
    aead.seal(&mut dst, &nonce, GOLDEN, AD)
        .expect("unable to encrypt data");
    let ciphertext = dst;

    let mut out = vec![0u8; GOLDEN.len()];
    assert_eq!(
        aead.open(&mut out, &nonce[1..], &ciphertext, AD),
        Err(OpenError::InvalidNonceSize(InvalidNonceSize))
    );

    let mut out = vec![0u8; GOLDEN.len() - 1];
    assert_eq!(
        aead.open(&mut out, &nonce, &ciphertext, AD),
        Err(OpenError::BufferTooSmall(BufferTooSmallError(Some(
            GOLDEN.len()
        ))))
    );

    // Wrong tag sizes for the in-place variants.
    let mut data = GOLDEN.to_vec();
    let mut tag = vec![0u8; A::OVERHEAD + 1];
    assert_eq!(
        aead.seal_in_place(&nonce, &mut data, &mut tag, AD),
        Err(SealError::InvalidOverheadSize)
    );
    assert_eq!(
        aead.open_in_place(&nonce, &mut data, &tag[..A::OVERHEAD - 1], AD),
        Err(OpenError::InvalidOverheadSize)
    );
}
