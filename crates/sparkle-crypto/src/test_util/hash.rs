//! [`Hash`] tests.

extern crate alloc;

use alloc::vec::Vec;
use core::borrow::Borrow;

use more_asserts::assert_ge;

use crate::hash::Hash;

/// Invokes `callback` for each hash test.
///
/// # Example
///
/// ```
/// use sparkle_crypto::Esch256;
///
/// macro_rules! run_test {
///     ($test:ident) => {
///         sparkle_crypto::test_util::hash::$test::<Esch256>();
///     };
/// }
/// sparkle_crypto::for_each_hash_test!(run_test);
/// ```
#[macro_export]
macro_rules! for_each_hash_test {
    ($callback:ident) => {
        $crate::__apply! {
            $callback,
            test_basic,
            test_sizes,
            test_empty,
            test_split_points,
            test_length_extension,
        }
    };
}
pub use for_each_hash_test;

/// Performs all of the tests in this module.
///
/// This macro expands into a bunch of individual `#[test]`
/// functions.
///
/// # Example
///
/// ```
/// use sparkle_crypto::{test_hash, Esch384};
///
/// test_hash!(esch384, Esch384);
/// ```
#[macro_export]
macro_rules! test_hash {
    ($name:ident, $hash:ty) => {
        mod $name {
            #[allow(unused_imports)]
            use super::*;

            $crate::test_hash!($hash);
        }
    };
    ($hash:ty) => {
        macro_rules! __hash_test {
            ($test:ident) => {
                #[test]
                fn $test() {
                    $crate::test_util::hash::$test::<$hash>()
                }
            };
        }
        $crate::for_each_hash_test!(__hash_test);
    };
}
pub use test_hash;

const INPUT: &[u8] = r#"
Sir, in my heart there was a kind of fighting
That would not let me sleep. Methought I lay
Worse than the mutines in the bilboes. Rashly,
And prais'd be rashness for it, let us know
Our indiscretion sometimes serves us well ...
"#
.as_bytes();

/// A basic test for a `Hash`.
pub fn test_basic<T: Hash>() {
    let want = T::hash(INPUT);

    let got = {
        // Repeated calls to `update` should be the same as
        // calling `hash` directly.
        let mut h = T::new();
        for c in INPUT {
            h.update(&[*c]);
        }
        h.digest()
    };
    assert_eq!(want, got);

    // Hashing the same input should result in the same
    // output.
    assert_eq!(want, T::hash(INPUT));

    // A modified input should have a different hash, though.
    let mut modified = Vec::from(INPUT);
    modified[0] ^= 1;
    assert_ne!(want, T::hash(&modified[..]));
}

/// Checks the advertised sizes.
pub fn test_sizes<T: Hash>() {
    assert_ge!(T::DIGEST_SIZE, 32);
    assert_eq!(T::hash(INPUT).len(), T::DIGEST_SIZE);
    let block = T::Block::default();
    assert_eq!(Borrow::<[u8]>::borrow(&block).len(), T::BLOCK_SIZE);
}

/// The empty message has a well defined digest that differs
/// from a single zero octet.
pub fn test_empty<T: Hash>() {
    let empty = T::hash(&[]);
    assert_eq!(empty, T::new().digest());

    let mut h = T::new();
    h.update(&[]);
    h.update(&[]);
    assert_eq!(empty, h.digest());

    assert_ne!(empty, T::hash(&[0]));
}

/// Splitting the message at any point produces the same digest.
pub fn test_split_points<T: Hash>() {
    let msg = &INPUT[..3 * T::BLOCK_SIZE + 1];
    let want = T::hash(msg);
    for i in 0..=msg.len() {
        let (a, b) = msg.split_at(i);
        let mut h = T::new();
        h.update(a);
        h.update(b);
        assert_eq!(want, h.digest(), "split at {i}");

        // A cloned state continues independently.
        let mut h = T::new();
        h.update(a);
        let mut g = h.clone();
        h.update(b);
        g.update(b);
        assert_eq!(h.digest(), g.digest(), "clone at {i}");
    }
}

/// Messages that differ only by trailing padding-like octets
/// or by whole zero blocks have different digests.
pub fn test_length_extension<T: Hash>() {
    let n = T::BLOCK_SIZE;
    let short = &INPUT[..n - 1];

    let mut padded = Vec::from(short);
    padded.push(0x80);
    assert_ne!(T::hash(short), T::hash(&padded));

    let mut zeros = Vec::from(&INPUT[..n]);
    let one = T::hash(&zeros);
    zeros.resize(2 * n, 0);
    assert_ne!(one, T::hash(&zeros));
}
