//! Constant-time comparison.

#![forbid(unsafe_code)]

use core::{fmt, ops::Deref};

use subtle::{Choice, ConstantTimeEq};

/// Compares `a` and `b` in constant time.
///
/// Slices of differing lengths compare unequal. Only the
/// lengths are inspected in that case, which are public.
///
/// The running time depends on the length of the inputs, but
/// not on their contents or on the position of the first
/// differing byte.
#[inline]
pub fn ct_eq(a: &[u8], b: &[u8]) -> Choice {
    // `subtle` already returns 0 for mismatched lengths.
    a.ct_eq(b)
}

/// An authentication tag.
#[derive(Copy, Clone)]
pub struct Tag<const N: usize>([u8; N]);

impl<const N: usize> Tag<N> {
    /// The size in octets of the tag.
    pub const SIZE: usize = N;

    /// Creates a tag from its bytes.
    #[inline]
    pub const fn from_bytes(tag: [u8; N]) -> Self {
        Self(tag)
    }

    /// Returns the tag's bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Converts the tag into its bytes.
    #[inline]
    pub const fn into_bytes(self) -> [u8; N] {
        self.0
    }

    /// Reports whether `other` equals this tag, in constant
    /// time.
    #[inline]
    pub fn verify(&self, other: &[u8]) -> Choice {
        ct_eq(&self.0, other)
    }
}

impl<const N: usize> ConstantTimeEq for Tag<N> {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

// Gated for the same reason as `Digest`: tags must only ever
// be compared in constant time outside of tests.
#[cfg(any(test, feature = "test_util"))]
impl<const N: usize> Eq for Tag<N> {}

#[cfg(any(test, feature = "test_util"))]
impl<const N: usize> PartialEq for Tag<N> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(ConstantTimeEq::ct_eq(self, other))
    }
}

impl<const N: usize> Deref for Tag<N> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> AsRef<[u8]> for Tag<N> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for Tag<N> {
    #[inline]
    fn from(tag: [u8; N]) -> Self {
        Self(tag)
    }
}

impl<const N: usize> From<Tag<N>> for [u8; N] {
    #[inline]
    fn from(tag: Tag<N>) -> Self {
        tag.0
    }
}

impl<const N: usize> fmt::Debug for Tag<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tag").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ct_eq() {
        assert!(bool::from(ct_eq(b"abcd", b"abcd")));
        assert!(bool::from(ct_eq(b"", b"")));
        assert!(!bool::from(ct_eq(b"abcd", b"abce")));
        assert!(!bool::from(ct_eq(b"abcd", b"bbcd")));
    }

    #[test]
    fn test_ct_eq_length_mismatch() {
        assert!(!bool::from(ct_eq(b"abcd", b"abc")));
        assert!(!bool::from(ct_eq(b"", b"a")));
    }

    #[test]
    fn test_tag_verify() {
        let tag = Tag::from_bytes([7u8; 16]);
        assert!(bool::from(tag.verify(&[7u8; 16])));
        for i in 0..16 {
            let mut bad = [7u8; 16];
            bad[i] ^= 0x01;
            assert!(!bool::from(tag.verify(&bad)), "byte {i}");
        }
        assert!(!bool::from(tag.verify(&[7u8; 15])));
        assert_eq!(tag, Tag::from([7u8; 16]));
    }
}
