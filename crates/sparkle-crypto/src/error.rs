#![forbid(unsafe_code)]

use crate::{
    aead::{InvalidNonceSize, OpenError, SealError},
    keys::InvalidKeySize,
};

/// Encompasses the different errors directly returned by this
/// crate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An argument was invalid.
    ///
    /// It describes why the argument is invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// An AEAD seal failure.
    #[error(transparent)]
    Seal(#[from] SealError),
    /// An AEAD open failure.
    #[error(transparent)]
    Open(#[from] OpenError),
    /// A key had the wrong size.
    #[error(transparent)]
    InvalidKeySize(#[from] InvalidKeySize),
    /// A nonce had the wrong size.
    #[error(transparent)]
    InvalidNonceSize(#[from] InvalidNonceSize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let err: Error = OpenError::Authentication.into();
        assert_eq!(err, Error::Open(OpenError::Authentication));
        assert_eq!(err.to_string(), "authentication error");

        let err: Error = InvalidKeySize {
            got: 3,
            expected: 16,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid key size: got 3 octets, expected 16"
        );

        assert_eq!(
            Error::InvalidArgument("empty message").to_string(),
            "invalid argument: empty message"
        );
    }
}
