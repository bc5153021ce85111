//! The Esch256 and Esch384 hash functions.
//!
//! Esch is a sponge over Sparkle with a 128-bit rate. Each
//! message block is injected through a Feistel-type map (`ℳ3`
//! for Esch256, `ℳ4` for Esch384) rather than being XORed into
//! the rate directly. See section 2.2.2 of the Sparkle NIST
//! LWC submission.
//!
//! The last block, padded or not, is always processed with the
//! big step count after a last-block constant has been XORed
//! into the state, so [`Esch`] keeps up to one block of input
//! buffered until [`Esch::finalize`].

#![forbid(unsafe_code)]
#![allow(clippy::arithmetic_side_effects)]

use core::cmp;

use typenum::{U32, U48};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    hash::{Block, Digest, Hash, HashId},
    params::{ESCH256, ESCH384, HASH_CONST_M0, HASH_CONST_M1, HASH_RATE, HashProfile},
    sparkle::{State, ell},
    util::{MAX_RATE_WORDS, const_assert, load_words, pad_block, store_words},
};

/// The Esch sponge over a `W`-word Sparkle state.
#[derive(Clone)]
pub struct Esch<const W: usize> {
    state: State<W>,
    /// Pending input. Holds between 0 and [`HASH_RATE`] octets;
    /// a full buffer is only absorbed once more input arrives.
    buf: [u8; HASH_RATE],
    len: usize,
}

// The message injection touches the whole left half of the
// state, which is at most `MAX_RATE_WORDS` words.
const_assert!(ESCH384.width.words() / 2 <= MAX_RATE_WORDS);

impl<const W: usize> Esch<W> {
    /// Creates a sponge with an all-zero state.
    pub fn new() -> Self {
        Self {
            state: State::default(),
            buf: [0u8; HASH_RATE],
            len: 0,
        }
    }

    /// Absorbs `data`.
    pub fn update(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            if self.len == HASH_RATE {
                let block = self.buf;
                self.inject(&block);
                self.state.permute_slim();
                self.len = 0;
            }
            let n = cmp::min(HASH_RATE - self.len, data.len());
            let (head, rest) = data.split_at(n);
            self.buf[self.len..self.len + n].copy_from_slice(head);
            self.len += n;
            data = rest;
        }
    }

    /// Absorbs the last block and squeezes `out.len()` octets
    /// of output into `out`.
    ///
    /// `out` should be a multiple of [`HASH_RATE`] octets; a
    /// trailing partial block receives a prefix of the next
    /// squeezed block.
    pub fn finalize(mut self, out: &mut [u8]) {
        let mut block = [0u8; HASH_RATE];
        let padded = pad_block(&mut block, &self.buf[..self.len]);

        let domain = State::<W>::WIDTH.branches() - 1;
        self.state.words_mut()[domain] ^= if padded {
            HASH_CONST_M0
        } else {
            HASH_CONST_M1
        };
        self.inject(&block);
        self.state.permute_big();

        let mut tmp = [0u8; HASH_RATE];
        for (i, chunk) in out.chunks_mut(HASH_RATE).enumerate() {
            if i > 0 {
                self.state.permute_slim();
            }
            store_words(&mut tmp, &self.state.words()[..HASH_RATE / 4]);
            chunk.copy_from_slice(&tmp[..chunk.len()]);
        }
        tmp.zeroize();
    }

    /// Injects one message block through `ℳ_{nb/2}`.
    fn inject(&mut self, block: &[u8; HASH_RATE]) {
        // Message words beyond the block are zero.
        let mut m = [0u32; MAX_RATE_WORDS];
        load_words(&mut m[..HASH_RATE / 4], block);

        let tx = ell(m[0] ^ m[2]);
        let ty = ell(m[1] ^ m[3]);

        let half = W / 2;
        let state = self.state.words_mut();
        for (s, m) in state[..half]
            .chunks_exact_mut(2)
            .zip(m[..half].chunks_exact(2))
        {
            s[0] ^= m[0] ^ ty;
            s[1] ^= m[1] ^ tx;
        }
        m.zeroize();
    }
}

impl<const W: usize> Default for Esch<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize> Drop for Esch<W> {
    fn drop(&mut self) {
        self.state.zeroize();
        self.buf.zeroize();
    }
}

impl<const W: usize> ZeroizeOnDrop for Esch<W> {}

macro_rules! esch_impl {
    (
        $name:ident,
        $doc:expr,
        $profile:expr,
        $words:literal,
        $digest:ty,
        $id:expr
    ) => {
        #[doc = concat!($doc, ".")]
        #[derive(Clone, Default)]
        pub struct $name(Esch<$words>);

        impl $name {
            /// The parameters of this hash function.
            pub const PROFILE: HashProfile = $profile;
        }

        const_assert!($profile.width.words() == $words);

        impl Hash for $name {
            const ID: HashId = $id;

            type DigestSize = $digest;

            const BLOCK_SIZE: usize = HASH_RATE;
            type Block = Block<HASH_RATE>;

            #[inline]
            fn new() -> Self {
                Self(Esch::new())
            }

            #[inline]
            fn update(&mut self, data: &[u8]) {
                self.0.update(data)
            }

            #[inline]
            fn digest(self) -> Digest<Self::DigestSize> {
                let mut out = Digest::default();
                self.0.finalize(&mut out);
                out
            }
        }
    };
}
esch_impl!(Esch256, "Esch256", ESCH256, 12, U32, HashId::Esch256);
esch_impl!(Esch384, "Esch384", ESCH384, 16, U48, HashId::Esch384);

/// Computes the Esch256 digest of `msg`.
///
/// ```rust
/// use sparkle_crypto::esch256_hash;
///
/// let digest = esch256_hash(b"hello, world!");
/// assert_eq!(digest.len(), 32);
/// assert_eq!(digest, esch256_hash(b"hello, world!"));
/// ```
pub fn esch256_hash(msg: &[u8]) -> [u8; 32] {
    let mut h = Esch::<12>::new();
    h.update(msg);
    let mut out = [0u8; 32];
    h.finalize(&mut out);
    out
}

/// Computes the Esch384 digest of `msg`.
pub fn esch384_hash(msg: &[u8]) -> [u8; 48] {
    let mut h = Esch::<16>::new();
    h.update(msg);
    let mut out = [0u8; 48];
    h.finalize(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(n: usize) -> Vec<u8> {
        (0..n).map(|i| i as u8).collect()
    }

    #[test]
    fn test_empty_message() {
        let d256 = esch256_hash(&[]);
        let d384 = esch384_hash(&[]);
        assert!(d256.iter().any(|&b| b != 0));
        assert!(d384.iter().any(|&b| b != 0));
        assert_eq!(d256, esch256_hash(&[]));
        assert_ne!(d256[..], d384[..32]);
    }

    /// Digests of the empty message and of `00 01 .. 0f`, which is
    /// exactly one rate block.
    #[test]
    fn test_known_digests() {
        #[rustfmt::skip]
        let empty256 = [
            0xc0, 0xe8, 0x15, 0xd7, 0x8b, 0x87, 0x5d, 0xc7,
            0x68, 0xc6, 0xc8, 0xb3, 0xaf, 0xa5, 0x19, 0x87,
            0xcd, 0x69, 0xe5, 0xc0, 0x87, 0xd3, 0x87, 0x36,
            0x86, 0x28, 0xa5, 0x11, 0xcf, 0xad, 0x57, 0x30,
        ];
        assert_eq!(esch256_hash(&[]), empty256);

        #[rustfmt::skip]
        let block256 = [
            0xac, 0xff, 0x84, 0x1e, 0x2a, 0x52, 0x6d, 0x83,
            0xd6, 0xe9, 0x4a, 0xb5, 0x56, 0x4d, 0x6d, 0x64,
            0xc9, 0x8f, 0x5e, 0x80, 0x16, 0xbb, 0x1c, 0x29,
            0x50, 0x38, 0x6e, 0xd1, 0x56, 0xc6, 0xc1, 0x74,
        ];
        assert_eq!(esch256_hash(&message(16)), block256);

        #[rustfmt::skip]
        let empty384 = [
            0x29, 0x81, 0x71, 0x5e, 0x22, 0x63, 0xeb, 0xd0,
            0xcb, 0x6e, 0x5c, 0x2c, 0x99, 0xd0, 0x77, 0x6d,
            0x5e, 0x69, 0x1e, 0xe7, 0x37, 0xfd, 0xe0, 0x52,
            0x47, 0x89, 0x5e, 0x75, 0xd0, 0x2e, 0x74, 0x47,
            0xfd, 0x6a, 0xb7, 0x07, 0xe2, 0xec, 0x83, 0x85,
            0xa5, 0x39, 0x77, 0x79, 0x65, 0xe4, 0x72, 0xee,
        ];
        assert_eq!(esch384_hash(&[]), empty384);

        #[rustfmt::skip]
        let block384 = [
            0x00, 0x08, 0xf9, 0x7d, 0x6b, 0xbb, 0x70, 0x1d,
            0x5e, 0x33, 0xfc, 0xc1, 0x78, 0xef, 0xe3, 0xe3,
            0xd5, 0xe7, 0x79, 0x15, 0xd4, 0xa4, 0xda, 0xf6,
            0xe1, 0xae, 0x34, 0xcd, 0x28, 0xed, 0xb8, 0x95,
            0xa0, 0x53, 0xe1, 0x9d, 0x93, 0x0b, 0x50, 0xf7,
            0x28, 0x37, 0xe1, 0xa8, 0xf5, 0xb1, 0xf4, 0x50,
        ];
        assert_eq!(esch384_hash(&message(16)), block384);
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        for n in [0, 1, 15, 16, 17, 31, 32, 33, 100] {
            let msg = message(n);
            let want = esch256_hash(&msg);
            for split in 0..=n {
                let mut h = Esch256::new();
                h.update(&msg[..split]);
                h.update(&msg[split..]);
                assert_eq!(h.digest().as_bytes(), &want[..], "n={n} split={split}");
            }

            let want = esch384_hash(&msg);
            let mut h = Esch384::new();
            for b in &msg {
                h.update(core::slice::from_ref(b));
            }
            assert_eq!(h.digest().as_bytes(), &want[..], "n={n}");
        }
    }

    #[test]
    fn test_block_boundaries_are_distinct() {
        // A full last block and a padded last block whose padding
        // looks like data must not collide.
        let full = esch256_hash(&[0u8; 16]);
        let mut padded_like = [0u8; 16];
        padded_like[15] = 0x80;
        assert_ne!(full, esch256_hash(&padded_like));
        assert_ne!(full, esch256_hash(&[0u8; 15]));
        assert_ne!(full, esch256_hash(&[0u8; 17]));
        assert_ne!(esch256_hash(&[0u8; 15]), esch256_hash(&[0u8; 17]));

        let mut with_pad = [0u8; 16];
        with_pad[15] = 0x80;
        assert_ne!(esch384_hash(&with_pad), esch384_hash(&[0u8; 15]));
        assert_ne!(esch384_hash(&[0u8; 16]), esch384_hash(&[0u8; 32]));
    }

    #[test]
    fn test_empty_updates_are_ignored() {
        let mut h = Esch256::new();
        h.update(&[]);
        h.update(b"abc");
        h.update(&[]);
        assert_eq!(h.digest().as_bytes(), &esch256_hash(b"abc")[..]);
    }

    #[test]
    fn test_trait_hash() {
        let msg = message(40);
        assert_eq!(Esch256::hash(&msg).as_bytes(), &esch256_hash(&msg)[..]);
        assert_eq!(Esch384::hash(&msg).as_bytes(), &esch384_hash(&msg)[..]);
        assert_eq!(Esch256::DIGEST_SIZE, 32);
        assert_eq!(Esch384::DIGEST_SIZE, 48);
        assert_eq!(Esch256::PROFILE.squeeze_blocks(), 2);
    }
}
