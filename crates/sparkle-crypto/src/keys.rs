//! Secret keys.
//!
//! This crate does not generate or store keys. [`AeadKey`] only
//! wraps caller-supplied key material so that it is compared in
//! constant time and zeroed when dropped.

#![forbid(unsafe_code)]

use core::result::Result;

use generic_array::ArrayLength;
use subtle::ConstantTimeEq;
use typenum::Unsigned;

use crate::zeroize::ZeroizeOnDrop;

/// The key has the wrong length.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid key size: got {got} octets, expected {expected}")]
pub struct InvalidKeySize {
    /// The length of the rejected key.
    pub got: usize,
    /// The expected length.
    pub expected: usize,
}

/// A fixed-length secret key.
pub trait SecretKey:
    Clone + ConstantTimeEq + for<'a> TryFrom<&'a [u8], Error = InvalidKeySize> + ZeroizeOnDrop
{
    /// The size of the key.
    type Size: ArrayLength + 'static;
    /// Shorthand for [`Size`][Self::Size];
    const SIZE: usize = Self::Size::USIZE;

    /// Returns the key's secret data.
    fn as_bytes(&self) -> &[u8];
}

/// Copies `data` into an array, or reports its length.
#[inline]
pub(crate) fn try_from_slice<const N: usize>(data: &[u8]) -> Result<[u8; N], InvalidKeySize> {
    <[u8; N]>::try_from(data).map_err(|_| InvalidKeySize {
        got: data.len(),
        expected: N,
    })
}

/// Creates a "raw" (i.e., a byte array) key.
macro_rules! raw_key {
    () => {};
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident,
        $($tail:tt)*
    ) => {
        $(#[$meta])*
        #[derive(Clone, $crate::zeroize::Zeroize, $crate::zeroize::ZeroizeOnDrop)]
        #[repr(transparent)]
        $vis struct $name<const N: usize>([u8; N]);

        impl<const N: usize> $name<N> {
            /// Creates a key from its bytes.
            #[inline]
            pub const fn new(key: [u8; N]) -> Self {
                Self(key)
            }

            /// Returns itself as a byte array.
            #[inline]
            pub const fn as_array(&self) -> &[u8; N] {
                &self.0
            }

            /// Returns the length of the key.
            ///
            /// Will always be exactly `N`.
            #[allow(clippy::len_without_is_empty)]
            #[inline]
            pub const fn len(&self) -> usize {
                N
            }
        }

        impl<const N: usize> $crate::keys::SecretKey for $name<N>
        where
            ::generic_array::typenum::Const<N>: ::generic_array::IntoArrayLength,
        {
            type Size = ::generic_array::ConstArrayLength<N>;

            #[inline]
            fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl<const N: usize> ::core::convert::AsRef<[u8; N]> for $name<N> {
            #[inline]
            fn as_ref(&self) -> &[u8; N] {
                &self.0
            }
        }

        impl<const N: usize> ::subtle::ConstantTimeEq for $name<N> {
            #[inline]
            fn ct_eq(&self, other: &Self) -> ::subtle::Choice {
                self.0.ct_eq(&other.0)
            }
        }

        impl<const N: usize> ::core::convert::From<&[u8; N]> for $name<N> {
            #[inline]
            fn from(key: &[u8; N]) -> Self {
                Self(*key)
            }
        }

        impl<const N: usize> ::core::convert::From<[u8; N]> for $name<N> {
            #[inline]
            fn from(key: [u8; N]) -> Self {
                Self(key)
            }
        }

        impl<const N: usize> ::core::convert::TryFrom<&[u8]> for $name<N> {
            type Error = $crate::keys::InvalidKeySize;

            #[inline]
            fn try_from(data: &[u8]) -> ::core::result::Result<Self, Self::Error> {
                Ok(Self($crate::keys::try_from_slice(data)?))
            }
        }

        impl<const N: usize> ::core::fmt::Debug for $name<N> {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }

        raw_key!{ $($tail)* }
    };
}

raw_key! {
    /// A Schwaemm key.
    pub AeadKey,
}

#[cfg(test)]
mod tests {
    use subtle::ConstantTimeEq;

    use super::*;

    #[test]
    fn test_try_from_slice() {
        let key = AeadKey::<16>::try_from(&[1u8; 16][..]).expect("16 octets is valid");
        assert_eq!(key.as_array(), &[1u8; 16]);
        assert_eq!(<AeadKey<16> as SecretKey>::SIZE, 16);

        let err = AeadKey::<24>::try_from(&[1u8; 16][..]).expect_err("16 octets is invalid");
        assert_eq!(
            err,
            InvalidKeySize {
                got: 16,
                expected: 24
            }
        );
    }

    #[test]
    fn test_ct_eq() {
        let a = AeadKey::new([3u8; 32]);
        let b = a.clone();
        assert!(bool::from(a.ct_eq(&b)));
        assert!(!bool::from(a.ct_eq(&AeadKey::new([4u8; 32]))));
    }

    #[test]
    fn test_debug_hides_key() {
        let key = AeadKey::new([0xabu8; 16]);
        let s = format!("{key:?}");
        assert!(!s.contains("171"), "{s}");
        assert!(!s.to_lowercase().contains("ab"), "{s}");
    }
}
