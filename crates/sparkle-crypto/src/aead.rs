//! Authenticated Encryption with Additional Associated Data per
//! [RFC 5116].
//!
//! The [`Aead`] trait is the high-level interface to the
//! Schwaemm family. Unlike the low-level `schwaemm*_decrypt`
//! functions, [`Aead::open`] and [`Aead::open_in_place`] never
//! release unverified plaintext: the output is zeroed when
//! authentication fails.
//!
//! [RFC 5116]: https://www.rfc-editor.org/rfc/rfc5116

#![forbid(unsafe_code)]

use core::{
    borrow::{Borrow, BorrowMut},
    error,
    fmt::{self, Debug},
    result::Result,
};

use generic_array::ArrayLength;
use typenum::{
    U16, U65536, Unsigned,
    type_operators::{IsGreaterOrEqual, IsLess},
};

use crate::{
    keys::{InvalidKeySize, SecretKey},
    util::const_assert,
    zeroize::Zeroize,
};

// Some of the bounds for `Aead` are at least 32 bits, prevent
// the crate from being built for, e.g., a 16-bit CPU.
const_assert!(size_of::<usize>() >= 4);

/// AEAD algorithm identifiers.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum AeadId {
    /// Schwaemm256-128.
    Schwaemm256_128,
    /// Schwaemm192-192.
    Schwaemm192_192,
    /// Schwaemm128-128.
    Schwaemm128_128,
    /// Schwaemm256-256.
    Schwaemm256_256,
}

impl AeadId {
    /// Returns the algorithm's numeric identifier.
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::Schwaemm256_128 => 0x0001,
            Self::Schwaemm192_192 => 0x0002,
            Self::Schwaemm128_128 => 0x0003,
            Self::Schwaemm256_256 => 0x0004,
        }
    }

    /// Returns the algorithm with the numeric identifier `id`.
    pub const fn try_from_u16(id: u16) -> Option<Self> {
        match id {
            0x0001 => Some(Self::Schwaemm256_128),
            0x0002 => Some(Self::Schwaemm192_192),
            0x0003 => Some(Self::Schwaemm128_128),
            0x0004 => Some(Self::Schwaemm256_256),
            _ => None,
        }
    }

    /// Returns the algorithm's name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Schwaemm256_128 => "Schwaemm256-128",
            Self::Schwaemm192_192 => "Schwaemm192-192",
            Self::Schwaemm128_128 => "Schwaemm128-128",
            Self::Schwaemm256_256 => "Schwaemm256-256",
        }
    }
}

impl fmt::Display for AeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The output buffer is too small.
///
/// It contains the size that the buffer needs to be for the
/// call to succeed, if known.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BufferTooSmallError(pub Option<usize>);

impl BufferTooSmallError {
    /// Returns a human-readable string describing the error.
    pub const fn as_str(&self) -> &'static str {
        "dest buffer too small"
    }
}

impl fmt::Display for BufferTooSmallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.0 {
            write!(f, "{} (need {})", self.as_str(), n)
        } else {
            write!(f, "{}", self.as_str())
        }
    }
}

impl error::Error for BufferTooSmallError {}

/// An error from a [`Nonce`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("nonce size is invalid")]
pub struct InvalidNonceSize;

/// An error from an [`Aead`] seal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SealError {
    /// The size of the key is incorrect.
    #[error(transparent)]
    InvalidKeySize(#[from] InvalidKeySize),
    /// The size of the nonce is incorrect.
    #[error(transparent)]
    InvalidNonceSize(#[from] InvalidNonceSize),
    /// The size of the overhead is incorrect.
    #[error("invalid overhead size")]
    InvalidOverheadSize,
    /// The plaintext is too long.
    #[error("plaintext too long")]
    PlaintextTooLong,
    /// The additional data is too long.
    #[error("additional data too long")]
    AdditionalDataTooLong,
    /// The output buffer is too small.
    #[error(transparent)]
    BufferTooSmall(#[from] BufferTooSmallError),
}

/// An error from an [`Aead`] open.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum OpenError {
    /// The size of the key is incorrect.
    #[error(transparent)]
    InvalidKeySize(#[from] InvalidKeySize),
    /// The size of the nonce is incorrect.
    #[error(transparent)]
    InvalidNonceSize(#[from] InvalidNonceSize),
    /// The size of the overhead is incorrect.
    #[error("invalid overhead size")]
    InvalidOverheadSize,
    /// The plaintext is too long.
    #[error("plaintext too long")]
    PlaintextTooLong,
    /// The ciphertext is too long.
    #[error("ciphertext too long")]
    CiphertextTooLong,
    /// The additional data is too long.
    #[error("additional data too long")]
    AdditionalDataTooLong,
    /// The output buffer is too small.
    #[error(transparent)]
    BufferTooSmall(#[from] BufferTooSmallError),
    /// The ciphertext could not be authenticated.
    #[error("authentication error")]
    Authentication,
}

/// A symmetric cipher implementing a particular Authenticated
/// Encryption with Associated Data (AEAD) algorithm per
/// [RFC 5116].
///
/// Briefly, AEAD encryption is a construction with four inputs:
///
///  1. uniformly random key `K`
///  2. nonce `N` that is unique for each unique `(K, P)` tuple
///  3. plaintext `P` which will be encrypted
///  4. associated data `A` that will be authenticated, but *not*
///     encrypted
///
/// It outputs a ciphertext `C` which is exactly as long as `P`
/// plus a tag, which [`seal`][Self::seal] appends to `C`.
///
/// # Requirements
///
/// The cipher must:
///
/// * Have at least a 128-bit security level for authenticity.
/// * Have a minimum key size of 16 octets (128 bits).
/// * Accept plaintexts at least 2³² - 1 octets long.
/// * Accept associated data at least 2³² - 1 octets long.
///
/// [RFC 5116]: https://www.rfc-editor.org/rfc/rfc5116.html
pub trait Aead {
    /// Uniquely identifies the AEAD algorithm.
    const ID: AeadId;

    /// The size in octets of a key used by this [`Aead`].
    ///
    /// Must be at least 16 octets and less than 2¹⁶ octets.
    type KeySize: ArrayLength + IsGreaterOrEqual<U16> + IsLess<U65536> + 'static;
    /// Shorthand for [`KeySize`][Self::KeySize].
    const KEY_SIZE: usize = Self::KeySize::USIZE;

    /// The size in octets of a nonce used by this [`Aead`].
    ///
    /// Must be less than 2¹⁶ octets.
    type NonceSize: ArrayLength + IsLess<U65536> + 'static;
    /// Shorthand for [`NonceSize`][Self::NonceSize].
    const NONCE_SIZE: usize = Self::NonceSize::USIZE;

    /// The size in octets of the authentication tag added to
    /// encrypted plaintexts.
    ///
    /// Must be at least 16 octets (128 bits).
    type Overhead: ArrayLength + 'static;
    /// Shorthand for [`Overhead`][Self::Overhead].
    const OVERHEAD: usize = Self::Overhead::USIZE;

    /// The maximum size in octets of a plaintext allowed by this
    /// [`Aead`] (i.e., `P_MAX`).
    ///
    /// Must be at least 2³² - 1 octets.
    const MAX_PLAINTEXT_SIZE: u64;
    /// The maximum size in octets of additional data allowed by
    /// this [`Aead`] (i.e., `A_MAX`).
    ///
    /// Must be at least 2³² - 1 octets.
    const MAX_ADDITIONAL_DATA_SIZE: u64;
    /// The maximum size in octets of a ciphertext allowed by
    /// this [`Aead`] (i.e., `C_MAX`).
    ///
    /// Must be [`OVERHEAD`][Self::OVERHEAD] octets larger than
    /// [`MAX_PLAINTEXT_SIZE`][Self::MAX_PLAINTEXT_SIZE].
    const MAX_CIPHERTEXT_SIZE: u64 =
        match Self::MAX_PLAINTEXT_SIZE.checked_add(Self::OVERHEAD as u64) {
            Some(n) => n,
            None => panic!("overflow"),
        };

    /// The key used by the [`Aead`].
    type Key: SecretKey;

    /// The nonce used by the [`Aead`].
    type Nonce: Borrow<[u8]>
        + BorrowMut<[u8]>
        + Clone
        + Default
        + Debug
        + Sized
        + for<'a> TryFrom<&'a [u8], Error = InvalidNonceSize>;

    /// Creates a new [`Aead`].
    fn new(key: &Self::Key) -> Self;

    /// Encrypts and authenticates `plaintext`, writing the
    /// resulting ciphertext and tag to `dst`.
    ///
    /// Only `plaintext.len()` + [`Self::OVERHEAD`] bytes of
    /// `dst` will be written to.
    ///
    /// # Requirements
    ///
    /// * `dst` must be at least [`Self::OVERHEAD`] bytes longer
    ///   than `plaintext`.
    /// * `nonce` must be exactly [`Self::NONCE_SIZE`] bytes
    ///   long.
    /// * `plaintext` must be at most [`Self::MAX_PLAINTEXT_SIZE`]
    ///   bytes long.
    /// * `additional_data` must be at most
    ///   [`Self::MAX_ADDITIONAL_DATA_SIZE`] bytes long.
    fn seal(
        &self,
        dst: &mut [u8],
        nonce: &[u8],
        plaintext: &[u8],
        additional_data: &[u8],
    ) -> Result<(), SealError> {
        check_seal_params::<Self>(dst, nonce, plaintext, additional_data)
            .inspect_err(|err| tracing::debug!(alg = %Self::ID, %err, "rejected seal"))?;

        let out = &mut dst[..plaintext.len() + Self::OVERHEAD];
        out[..plaintext.len()].copy_from_slice(plaintext);
        let (out, overhead) = out.split_at_mut(out.len() - Self::OVERHEAD);
        self.seal_in_place(nonce, out, overhead, additional_data)
            // Encryption failed, make sure that we do not
            // release any plaintext to the caller.
            .inspect_err(|_| out.zeroize())
    }

    /// Encrypts and authenticates `data` in-place.
    ///
    /// The authentication tag is written to `overhead`.
    ///
    /// # Requirements
    ///
    /// * `nonce` must be exactly [`Self::NONCE_SIZE`] bytes
    ///   long.
    /// * `data` must be at most [`Self::MAX_PLAINTEXT_SIZE`]
    ///   bytes long.
    /// * `overhead` must be exactly [`Self::OVERHEAD`] bytes
    ///   long.
    /// * `additional_data` must be at most
    ///   [`Self::MAX_ADDITIONAL_DATA_SIZE`] bytes long.
    fn seal_in_place(
        &self,
        nonce: &[u8],
        data: &mut [u8],
        overhead: &mut [u8],
        additional_data: &[u8],
    ) -> Result<(), SealError>;

    /// Decrypts and authenticates `ciphertext`, writing the
    /// resulting plaintext to `dst`.
    ///
    /// Only `ciphertext.len()` - [`Self::OVERHEAD`] bytes of
    /// `dst` will be written to. They are zeroed if `ciphertext`
    /// cannot be authenticated.
    ///
    /// # Requirements
    ///
    /// * `dst` must be at least `ciphertext.len()` -
    ///   [`Self::OVERHEAD`] bytes long.
    /// * `nonce` must be exactly [`Self::NONCE_SIZE`] bytes
    ///   long.
    /// * `ciphertext` must be at most
    ///   [`Self::MAX_CIPHERTEXT_SIZE`] bytes long.
    /// * `additional_data` must be at most
    ///   [`Self::MAX_ADDITIONAL_DATA_SIZE`] bytes long.
    fn open(
        &self,
        dst: &mut [u8],
        nonce: &[u8],
        ciphertext: &[u8],
        additional_data: &[u8],
    ) -> Result<(), OpenError> {
        check_open_params::<Self>(dst, nonce, ciphertext, additional_data)
            .inspect_err(|err| tracing::debug!(alg = %Self::ID, %err, "rejected open"))?;

        let max = ciphertext.len() - Self::OVERHEAD;
        let (ciphertext, overhead) = ciphertext.split_at(max);
        let out = &mut dst[..max];
        out.copy_from_slice(ciphertext);
        self.open_in_place(nonce, out, overhead, additional_data)
            // Decryption failed, ensure that we do not release
            // any unverified plaintext to the caller.
            .inspect_err(|_| out.zeroize())
    }

    /// Decrypts and authenticates `data` in-place.
    ///
    /// `data` is zeroed if it cannot be authenticated.
    ///
    /// # Requirements
    ///
    /// * `nonce` must be exactly [`Self::NONCE_SIZE`] bytes
    ///   long.
    /// * `data` must be at most [`Self::MAX_CIPHERTEXT_SIZE`] -
    ///   [`Self::OVERHEAD`] bytes long.
    /// * `overhead` must be exactly [`Self::OVERHEAD`] bytes
    ///   long.
    /// * `additional_data` must be at most
    ///   [`Self::MAX_ADDITIONAL_DATA_SIZE`] bytes long.
    fn open_in_place(
        &self,
        nonce: &[u8],
        data: &mut [u8],
        overhead: &[u8],
        additional_data: &[u8],
    ) -> Result<(), OpenError>;
}

const fn check_aead_params<A: Aead + ?Sized>() {
    debug_assert!(A::KEY_SIZE >= 16);
    debug_assert!(A::OVERHEAD >= 16);
    debug_assert!(A::MAX_PLAINTEXT_SIZE >= u32::MAX as u64);
    debug_assert!(A::MAX_CIPHERTEXT_SIZE == A::MAX_PLAINTEXT_SIZE + A::OVERHEAD as u64);
    debug_assert!(A::MAX_ADDITIONAL_DATA_SIZE >= u32::MAX as u64);
}

/// Checks that the parameters to [`Aead::seal`] have the correct
/// lengths, etc.
pub const fn check_seal_params<A: Aead + ?Sized>(
    dst: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
    additional_data: &[u8],
) -> Result<(), SealError> {
    check_aead_params::<A>();

    let need = match plaintext.len().checked_add(A::OVERHEAD) {
        // Overflow.
        None => return Err(SealError::PlaintextTooLong),
        Some(n) => n,
    };
    if need > dst.len() {
        return Err(SealError::BufferTooSmall(BufferTooSmallError(Some(need))));
    }
    if nonce.len() != A::NONCE_SIZE {
        return Err(SealError::InvalidNonceSize(InvalidNonceSize));
    }
    if plaintext.len() as u64 > A::MAX_PLAINTEXT_SIZE {
        return Err(SealError::PlaintextTooLong);
    }
    if additional_data.len() as u64 > A::MAX_ADDITIONAL_DATA_SIZE {
        return Err(SealError::AdditionalDataTooLong);
    }
    Ok(())
}

/// Checks that the parameters to [`Aead::seal_in_place`] have
/// the correct lengths, etc.
pub const fn check_seal_in_place_params<A: Aead + ?Sized>(
    nonce: &[u8],
    data: &[u8],
    overhead: &[u8],
    additional_data: &[u8],
) -> Result<(), SealError> {
    check_aead_params::<A>();

    if nonce.len() != A::NONCE_SIZE {
        return Err(SealError::InvalidNonceSize(InvalidNonceSize));
    }
    if data.len() as u64 > A::MAX_PLAINTEXT_SIZE {
        return Err(SealError::PlaintextTooLong);
    }
    if overhead.len() != A::OVERHEAD {
        return Err(SealError::InvalidOverheadSize);
    }
    if additional_data.len() as u64 > A::MAX_ADDITIONAL_DATA_SIZE {
        return Err(SealError::AdditionalDataTooLong);
    }
    Ok(())
}

/// Checks that the parameters to [`Aead::open`] have the correct
/// lengths, etc.
pub const fn check_open_params<A: Aead + ?Sized>(
    dst: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
    additional_data: &[u8],
) -> Result<(), OpenError> {
    check_aead_params::<A>();

    let need = match ciphertext.len().checked_sub(A::OVERHEAD) {
        // If the ciphertext does not have a full tag it cannot
        // be authenticated.
        None => return Err(OpenError::Authentication),
        Some(n) => n,
    };
    if need > dst.len() {
        return Err(OpenError::BufferTooSmall(BufferTooSmallError(Some(need))));
    }
    if nonce.len() != A::NONCE_SIZE {
        return Err(OpenError::InvalidNonceSize(InvalidNonceSize));
    }
    if ciphertext.len() as u64 > A::MAX_CIPHERTEXT_SIZE {
        return Err(OpenError::CiphertextTooLong);
    }
    if additional_data.len() as u64 > A::MAX_ADDITIONAL_DATA_SIZE {
        return Err(OpenError::AdditionalDataTooLong);
    }
    Ok(())
}

/// Checks that the parameters to [`Aead::open_in_place`] have
/// the correct lengths, etc.
pub const fn check_open_in_place_params<A: Aead + ?Sized>(
    nonce: &[u8],
    data: &[u8],
    overhead: &[u8],
    additional_data: &[u8],
) -> Result<(), OpenError> {
    check_aead_params::<A>();

    if nonce.len() != A::NONCE_SIZE {
        return Err(OpenError::InvalidNonceSize(InvalidNonceSize));
    }
    if data.len() as u64 > A::MAX_PLAINTEXT_SIZE {
        return Err(OpenError::PlaintextTooLong);
    }
    if overhead.len() != A::OVERHEAD {
        return Err(OpenError::InvalidOverheadSize);
    }
    if additional_data.len() as u64 > A::MAX_ADDITIONAL_DATA_SIZE {
        return Err(OpenError::AdditionalDataTooLong);
    }
    Ok(())
}

/// An [`Aead`] nonce.
#[derive(Copy, Clone, Debug)]
pub struct Nonce<const N: usize>([u8; N]);

impl<const N: usize> Nonce<N> {
    /// Returns the nonce as a byte array.
    #[inline]
    pub const fn as_array(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> Borrow<[u8]> for Nonce<N> {
    fn borrow(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<const N: usize> BorrowMut<[u8]> for Nonce<N> {
    fn borrow_mut(&mut self) -> &mut [u8] {
        self.0.as_mut()
    }
}

impl<const N: usize> Default for Nonce<N> {
    fn default() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> From<[u8; N]> for Nonce<N> {
    fn from(nonce: [u8; N]) -> Self {
        Self(nonce)
    }
}

impl<const N: usize> TryFrom<&[u8]> for Nonce<N> {
    type Error = InvalidNonceSize;

    fn try_from(data: &[u8]) -> Result<Self, InvalidNonceSize> {
        let nonce = data.try_into().map_err(|_| InvalidNonceSize)?;
        Ok(Self(nonce))
    }
}

/// A marker trait signifying that the [`Aead`] is IND-CCA2
/// secure (provided nonces are never reused).
pub trait IndCca2: Aead {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aead_id_round_trip() {
        for id in [
            AeadId::Schwaemm256_128,
            AeadId::Schwaemm192_192,
            AeadId::Schwaemm128_128,
            AeadId::Schwaemm256_256,
        ] {
            assert_eq!(AeadId::try_from_u16(id.to_u16()), Some(id));
        }
        assert_eq!(AeadId::try_from_u16(0xffff), None);
        assert_eq!(AeadId::Schwaemm192_192.to_string(), "Schwaemm192-192");
    }

    #[test]
    fn test_nonce_try_from() {
        let nonce = Nonce::<16>::try_from(&[9u8; 16][..]).expect("16 octets is valid");
        assert_eq!(nonce.as_array(), &[9u8; 16]);
        assert_eq!(
            Nonce::<16>::try_from(&[9u8; 15][..]).map(|n| n.0),
            Err(InvalidNonceSize)
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            BufferTooSmallError(Some(48)).to_string(),
            "dest buffer too small (need 48)"
        );
        assert_eq!(
            SealError::from(InvalidNonceSize).to_string(),
            "nonce size is invalid"
        );
        assert_eq!(OpenError::Authentication.to_string(), "authentication error");
    }
}
