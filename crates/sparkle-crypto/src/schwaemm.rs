//! The Schwaemm family of AEADs.
//!
//! Schwaemm is a Beetle-style duplex over Sparkle. The nonce is
//! loaded into the rate and the key into the capacity, then
//! associated data and text are absorbed one rate at a time.
//! Each block is combined with the rate through `ρ`: the output
//! block is `rate ⊕ input` and the *plaintext* block is mixed
//! back into the state as `FeistelSwap(rate) ⊕ P`, so encryption
//! and decryption walk through identical states. Before every
//! permutation call the rate is whitened with the capacity.
//!
//! There are two levels of API:
//!
//! * The `schwaemm*_encrypt` and `schwaemm*_decrypt` functions,
//!   which take exactly sized keys, nonces and tags and report
//!   authentication as a flag.
//! * [`Schwaemm256_128`], [`Schwaemm192_192`],
//!   [`Schwaemm128_128`] and [`Schwaemm256_256`], which
//!   implement [`Aead`][crate::aead::Aead].
//!
//! # Warning
//!
//! The `schwaemm*_decrypt` functions write the decrypted text
//! to their output buffer *even if authentication fails*. Those
//! bytes are unauthenticated and must be discarded when the
//! returned flag is `false`. Use the [`Aead`][crate::aead::Aead]
//! implementations if you want the output zeroed for you.

#![forbid(unsafe_code)]
#![allow(clippy::arithmetic_side_effects)]

use subtle::Choice;
use typenum::{U16, U24, U32};
use zeroize::Zeroize;

use crate::{
    aead::{
        Aead, AeadId, IndCca2, Nonce, OpenError, SealError, check_open_in_place_params,
        check_seal_in_place_params,
    },
    ct::{Tag, ct_eq},
    keys::AeadKey,
    params::{
        AeadProfile, SCHWAEMM128_128, SCHWAEMM192_192, SCHWAEMM256_128, SCHWAEMM256_256,
    },
    sparkle::State,
    util::{MAX_RATE, MAX_RATE_WORDS, const_assert, load_words, pad_block, store_words},
};

/// The largest capacity (and thus key and tag), in octets.
const MAX_CAPACITY: usize = 32;

const_assert!(SCHWAEMM256_256.capacity <= MAX_CAPACITY);

/// Whether a block is being encrypted or decrypted.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Direction {
    /// The input is plaintext.
    Encrypt,
    /// The input is ciphertext.
    Decrypt,
}

/// The Schwaemm duplex over a `W`-word Sparkle state.
struct Duplex<const W: usize> {
    state: State<W>,
    profile: AeadProfile,
}

impl<const W: usize> Duplex<W> {
    /// Loads the nonce into the rate and the key into the
    /// capacity, then applies the big permutation.
    fn new(profile: AeadProfile, key: &[u8], nonce: &[u8]) -> Self {
        debug_assert_eq!(profile.width.words(), W);
        debug_assert_eq!(key.len(), profile.key_size());
        debug_assert_eq!(nonce.len(), profile.nonce_size());

        let mut state = State::<W>::default();
        let (rate, capacity) = state.words_mut().split_at_mut(profile.rate_words());
        load_words(rate, nonce);
        load_words(capacity, key);
        state.permute_big();

        Self { state, profile }
    }

    /// `ρ1`: `FeistelSwap(rate) ⊕ block`.
    fn rho(&mut self, block: &[u32]) {
        let rate = &mut self.state.words_mut()[..self.profile.rate_words()];
        let half = rate.len() / 2;

        let (left, right) = rate.split_at_mut(half);
        left.swap_with_slice(right);
        for (r, l) in right.iter_mut().zip(left.iter()) {
            *r ^= l;
        }

        for (s, b) in rate.iter_mut().zip(block) {
            *s ^= b;
        }
    }

    /// XORs the capacity into the rate. When the rate is twice
    /// the capacity the capacity is used twice.
    fn whiten(&mut self) {
        let rate_words = self.profile.rate_words();
        let capacity_words = self.profile.capacity_words();
        let (rate, capacity) = self.state.words_mut().split_at_mut(rate_words);
        for (i, s) in rate.iter_mut().enumerate() {
            *s ^= capacity[i % capacity_words];
        }
    }

    /// Finishes a block: injects the last-block constant (if
    /// any), whitens the rate and permutes.
    fn permute(&mut self, last: Option<u32>) {
        match last {
            Some(c) => {
                let domain = self.profile.domain_word();
                self.state.words_mut()[domain] ^= c;
                self.whiten();
                self.state.permute_big();
            }
            None => {
                self.whiten();
                self.state.permute_slim();
            }
        }
    }

    /// Absorbs associated data.
    ///
    /// Empty associated data is skipped entirely.
    fn absorb_ad(&mut self, ad: &[u8]) {
        if ad.is_empty() {
            return;
        }
        let rate = self.profile.rate;

        let (head, last) = ad.split_at((ad.len() - 1) / rate * rate);
        for chunk in head.chunks_exact(rate) {
            let mut block = [0u32; MAX_RATE_WORDS];
            load_words(&mut block[..rate / 4], chunk);
            self.rho(&block[..rate / 4]);
            self.permute(None);
        }

        let mut buf = [0u8; MAX_RATE];
        let padded = pad_block(&mut buf[..rate], last);
        let mut block = [0u32; MAX_RATE_WORDS];
        load_words(&mut block[..rate / 4], &buf[..rate]);
        self.rho(&block[..rate / 4]);
        self.permute(Some(if padded {
            self.profile.const_a0()
        } else {
            self.profile.const_a1()
        }));
    }

    /// Encrypts or decrypts `data` in place.
    ///
    /// Empty text is skipped entirely.
    fn process(&mut self, dir: Direction, data: &mut [u8]) {
        if data.is_empty() {
            return;
        }
        let rate = self.profile.rate;

        let (head, last) = data.split_at_mut((data.len() - 1) / rate * rate);
        for chunk in head.chunks_exact_mut(rate) {
            self.duplex_block(dir, chunk);
            self.permute(None);
        }

        let padded = self.duplex_block(dir, last);
        self.permute(Some(if padded {
            self.profile.const_m0()
        } else {
            self.profile.const_m1()
        }));
    }

    /// Replaces `chunk` with `rate ⊕ chunk` and feeds the
    /// (padded) plaintext block back through `ρ1`.
    ///
    /// Returns whether the plaintext block was padded.
    fn duplex_block(&mut self, dir: Direction, chunk: &mut [u8]) -> bool {
        let rate = self.profile.rate;
        debug_assert!(!chunk.is_empty() && chunk.len() <= rate);

        let mut stream = [0u8; MAX_RATE];
        store_words(&mut stream[..rate], &self.state.words()[..rate / 4]);

        // The plaintext block, padded to the rate.
        let mut plain = [0u8; MAX_RATE];
        let padded = match dir {
            Direction::Encrypt => {
                let padded = pad_block(&mut plain[..rate], chunk);
                for (c, k) in chunk.iter_mut().zip(&stream) {
                    *c ^= k;
                }
                padded
            }
            Direction::Decrypt => {
                for (c, k) in chunk.iter_mut().zip(&stream) {
                    *c ^= k;
                }
                pad_block(&mut plain[..rate], chunk)
            }
        };

        let mut block = [0u32; MAX_RATE_WORDS];
        load_words(&mut block[..rate / 4], &plain[..rate]);
        self.rho(&block[..rate / 4]);

        stream.zeroize();
        plain.zeroize();
        block.zeroize();

        padded
    }

    /// Writes `capacity ⊕ key` to `tag`.
    fn finalize(mut self, key: &[u8], tag: &mut [u8]) {
        debug_assert_eq!(tag.len(), self.profile.tag_size());

        let rate_words = self.profile.rate_words();
        store_words(tag, &self.state.words()[rate_words..]);
        for (t, k) in tag.iter_mut().zip(key) {
            *t ^= k;
        }
        self.state.zeroize();
    }
}

impl<const W: usize> Drop for Duplex<W> {
    fn drop(&mut self) {
        self.state.zeroize();
    }
}

/// Encrypts `data` in place and writes the tag to `tag`.
fn encrypt_in_place<const W: usize>(
    profile: AeadProfile,
    key: &[u8],
    nonce: &[u8],
    ad: &[u8],
    data: &mut [u8],
    tag: &mut [u8],
) {
    let mut duplex = Duplex::<W>::new(profile, key, nonce);
    duplex.absorb_ad(ad);
    duplex.process(Direction::Encrypt, data);
    duplex.finalize(key, tag);
}

/// Decrypts `data` in place and compares the computed tag with
/// `tag` in constant time.
///
/// `data` holds the decrypted text regardless of the result.
fn decrypt_in_place<const W: usize>(
    profile: AeadProfile,
    key: &[u8],
    nonce: &[u8],
    ad: &[u8],
    data: &mut [u8],
    tag: &[u8],
) -> Choice {
    let mut duplex = Duplex::<W>::new(profile, key, nonce);
    duplex.absorb_ad(ad);
    duplex.process(Direction::Decrypt, data);

    let mut want = [0u8; MAX_CAPACITY];
    let want = &mut want[..profile.tag_size()];
    duplex.finalize(key, want);
    let ok = ct_eq(want, tag);
    want.zeroize();
    ok
}

macro_rules! schwaemm_impl {
    (
        $name:ident,
        $doc:expr,
        profile: $profile:expr,
        words: $words:literal,
        key: ($key:literal, $key_ty:ty),
        nonce: ($nonce:literal, $nonce_ty:ty),
        encrypt: $encrypt:ident,
        decrypt: $decrypt:ident $(,)?
    ) => {
        const_assert!($profile.width.words() == $words);
        const_assert!($profile.key_size() == $key);
        const_assert!($profile.nonce_size() == $nonce);
        const_assert!($profile.tag_size() == $key);

        #[doc = concat!("Encrypts `pt` with ", $doc, ", writing the ciphertext to `ct`.")]
        ///
        /// Returns the authentication tag. The ciphertext is
        /// always exactly as long as the plaintext.
        ///
        /// # Panics
        ///
        /// Panics if `ct` and `pt` have different lengths.
        pub fn $encrypt(
            key: &[u8; $key],
            nonce: &[u8; $nonce],
            ad: &[u8],
            pt: &[u8],
            ct: &mut [u8],
        ) -> Tag<$key> {
            ct.copy_from_slice(pt);
            let mut tag = [0u8; $key];
            encrypt_in_place::<$words>($profile, key, nonce, ad, ct, &mut tag);
            Tag::from_bytes(tag)
        }

        #[doc = concat!("Decrypts `ct` with ", $doc, ", writing the plaintext to `pt`.")]
        ///
        /// Returns `true` if `tag` authenticates `ad` and `ct`.
        /// The tag is compared in constant time.
        ///
        /// # Warning
        ///
        /// `pt` is written even if authentication fails. Its
        /// contents are unauthenticated and must be discarded
        /// when this function returns `false`.
        ///
        /// # Panics
        ///
        /// Panics if `pt` and `ct` have different lengths.
        #[must_use = "the plaintext is unauthenticated until the flag is checked"]
        pub fn $decrypt(
            key: &[u8; $key],
            nonce: &[u8; $nonce],
            tag: &[u8; $key],
            ad: &[u8],
            ct: &[u8],
            pt: &mut [u8],
        ) -> bool {
            pt.copy_from_slice(ct);
            decrypt_in_place::<$words>($profile, key, nonce, ad, pt, tag).into()
        }

        #[doc = concat!($doc, ".")]
        pub struct $name {
            key: AeadKey<$key>,
        }

        impl $name {
            /// The parameters of this AEAD.
            pub const PROFILE: AeadProfile = $profile;
        }

        impl Aead for $name {
            const ID: AeadId = AeadId::$name;

            type KeySize = $key_ty;
            type NonceSize = $nonce_ty;
            type Overhead = $key_ty;

            const MAX_PLAINTEXT_SIZE: u64 = u64::MAX - $key;
            const MAX_ADDITIONAL_DATA_SIZE: u64 = u64::MAX;

            type Key = AeadKey<$key>;
            type Nonce = Nonce<$nonce>;

            #[inline]
            fn new(key: &Self::Key) -> Self {
                Self { key: key.clone() }
            }

            fn seal_in_place(
                &self,
                nonce: &[u8],
                data: &mut [u8],
                overhead: &mut [u8],
                additional_data: &[u8],
            ) -> Result<(), SealError> {
                check_seal_in_place_params::<Self>(nonce, data, overhead, additional_data)
                    .inspect_err(|err| {
                        tracing::debug!(alg = %Self::ID, %err, "rejected seal_in_place")
                    })?;

                encrypt_in_place::<$words>(
                    $profile,
                    self.key.as_array(),
                    nonce,
                    additional_data,
                    data,
                    overhead,
                );
                Ok(())
            }

            fn open_in_place(
                &self,
                nonce: &[u8],
                data: &mut [u8],
                overhead: &[u8],
                additional_data: &[u8],
            ) -> Result<(), OpenError> {
                check_open_in_place_params::<Self>(nonce, data, overhead, additional_data)
                    .inspect_err(|err| {
                        tracing::debug!(alg = %Self::ID, %err, "rejected open_in_place")
                    })?;

                let ok = decrypt_in_place::<$words>(
                    $profile,
                    self.key.as_array(),
                    nonce,
                    additional_data,
                    data,
                    overhead,
                );
                if bool::from(ok) {
                    Ok(())
                } else {
                    data.zeroize();
                    tracing::debug!(
                        alg = %Self::ID,
                        ad_len = additional_data.len(),
                        data_len = data.len(),
                        "authentication failed"
                    );
                    Err(OpenError::Authentication)
                }
            }
        }

        impl IndCca2 for $name {}
    };
}

schwaemm_impl!(
    Schwaemm256_128,
    "Schwaemm256-128",
    profile: SCHWAEMM256_128,
    words: 12,
    key: (16, U16),
    nonce: (32, U32),
    encrypt: schwaemm256_128_encrypt,
    decrypt: schwaemm256_128_decrypt,
);
schwaemm_impl!(
    Schwaemm192_192,
    "Schwaemm192-192",
    profile: SCHWAEMM192_192,
    words: 12,
    key: (24, U24),
    nonce: (24, U24),
    encrypt: schwaemm192_192_encrypt,
    decrypt: schwaemm192_192_decrypt,
);
schwaemm_impl!(
    Schwaemm128_128,
    "Schwaemm128-128",
    profile: SCHWAEMM128_128,
    words: 8,
    key: (16, U16),
    nonce: (16, U16),
    encrypt: schwaemm128_128_encrypt,
    decrypt: schwaemm128_128_decrypt,
);
schwaemm_impl!(
    Schwaemm256_256,
    "Schwaemm256-256",
    profile: SCHWAEMM256_256,
    words: 16,
    key: (32, U32),
    nonce: (32, U32),
    encrypt: schwaemm256_256_encrypt,
    decrypt: schwaemm256_256_decrypt,
);
