//! The Sparkle suite: the Sparkle permutation family, the Esch
//! hash functions and the Schwaemm AEADs.
//!
//! # Overview
//!
//! Every construction in this crate is built on one ARX
//! permutation, [`sparkle`][sparkle::sparkle], which comes in
//! three widths (256, 384 and 512 bits). Two constructions are
//! layered on top of it:
//!
//! * [Esch256][esch::Esch256] and [Esch384][esch::Esch384], sponge
//!   based hash functions with 32 and 48 octet digests.
//! * [Schwaemm][schwaemm], a duplex based AEAD family with four
//!   key/nonce/tag profiles: 256-128, 192-192, 128-128 and
//!   256-256.
//!
//! All operations are single-shot and stateless from the
//! caller's point of view. Nothing in the core allocates and
//! nothing is shared between calls apart from the immutable
//! constant tables in [`params`].
//!
//! # Two levels of API
//!
//! The free functions in [`schwaemm`] (for example
//! [`schwaemm256_128_encrypt`]) mirror the raw primitive: they
//! take exactly sized buffers and return a verification *flag*
//! rather than an error. Unverified plaintext is returned as-is
//! and **must not** be used when the flag is `false`.
//!
//! The [`Aead`][aead::Aead] implementations
//! ([`Schwaemm256_128`], etc.) validate their arguments, return
//! [`OpenError::Authentication`][aead::OpenError::Authentication]
//! on a bad tag and zero the output buffer so that unverified
//! plaintext is never released.
//!
//! # Warning
//!
//! Nonces must never repeat under the same key. This crate does
//! not generate, store or rotate keys and nonces.

#![allow(unstable_name_collisions)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(any(test, doctest, feature = "std")), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod aead;
pub mod ct;
mod error;
pub mod esch;
pub mod hash;
pub mod keys;
pub mod params;
pub mod schwaemm;
pub mod sparkle;
pub mod test_util;
mod util;

pub use aead::{Aead, AeadId, OpenError, SealError};
pub use error::*;
pub use esch::{Esch256, Esch384, esch256_hash, esch384_hash};
pub use hash::{Digest, Hash, HashId};
pub use schwaemm::{
    Schwaemm128_128, Schwaemm192_192, Schwaemm256_128, Schwaemm256_256, schwaemm128_128_decrypt,
    schwaemm128_128_encrypt, schwaemm192_192_decrypt, schwaemm192_192_encrypt,
    schwaemm256_128_decrypt, schwaemm256_128_encrypt, schwaemm256_256_decrypt,
    schwaemm256_256_encrypt,
};
pub use {generic_array, subtle, typenum, zeroize};
