//! Per-variant parameters.
//!
//! Each construction is fully described by one of the constant
//! profiles in this module: which [`Width`] of Sparkle it uses,
//! how the state splits into rate and capacity, and which
//! domain-separation constants it injects.

#![forbid(unsafe_code)]

use core::fmt;

use crate::util::{MAX_RATE, const_assert};

/// The width of a Sparkle instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Width {
    /// Sparkle256: four branches, eight words.
    Sparkle256,
    /// Sparkle384: six branches, twelve words.
    Sparkle384,
    /// Sparkle512: eight branches, sixteen words.
    Sparkle512,
}

impl Width {
    /// Returns the width with `n` 32-bit words, if any.
    pub const fn from_words(n: usize) -> Option<Self> {
        match n {
            8 => Some(Self::Sparkle256),
            12 => Some(Self::Sparkle384),
            16 => Some(Self::Sparkle512),
            _ => None,
        }
    }

    /// The number of 32-bit words in the state.
    pub const fn words(self) -> usize {
        match self {
            Self::Sparkle256 => 8,
            Self::Sparkle384 => 12,
            Self::Sparkle512 => 16,
        }
    }

    /// The number of (x, y) branches in the state.
    pub const fn branches(self) -> usize {
        self.words() / 2
    }

    /// The number of steps used for interior blocks.
    pub const fn slim_steps(self) -> usize {
        match self {
            Self::Sparkle256 | Self::Sparkle384 => 7,
            Self::Sparkle512 => 8,
        }
    }

    /// The number of steps used for initialization and for the
    /// last block of each phase.
    pub const fn big_steps(self) -> usize {
        match self {
            Self::Sparkle256 => 10,
            Self::Sparkle384 => 11,
            Self::Sparkle512 => 12,
        }
    }

    /// Returns the width's name, e.g., "Sparkle384".
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sparkle256 => "Sparkle256",
            Self::Sparkle384 => "Sparkle384",
            Self::Sparkle512 => "Sparkle512",
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The rate in octets of both Esch variants.
pub const HASH_RATE: usize = 16;

/// Injected when the last message block was padded.
pub const HASH_CONST_M0: u32 = 1 << 24;

/// Injected when the last message block was full.
pub const HASH_CONST_M1: u32 = 2 << 24;

/// Parameters for an Esch hash function.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HashProfile {
    /// The underlying permutation.
    pub width: Width,
    /// The size in octets of the digest.
    pub digest_size: usize,
}

impl HashProfile {
    /// The index of the word that receives the last-block
    /// domain-separation constant.
    pub const fn domain_word(&self) -> usize {
        self.width.branches() - 1
    }

    /// The number of [`HASH_RATE`]-sized blocks squeezed to
    /// produce the digest.
    pub const fn squeeze_blocks(&self) -> usize {
        self.digest_size.div_ceil(HASH_RATE)
    }
}

/// Esch256: Sparkle384, 256-bit digest.
pub const ESCH256: HashProfile = HashProfile {
    width: Width::Sparkle384,
    digest_size: 32,
};

/// Esch384: Sparkle512, 384-bit digest.
pub const ESCH384: HashProfile = HashProfile {
    width: Width::Sparkle512,
    digest_size: 48,
};

/// Parameters for a Schwaemm AEAD.
///
/// The nonce is exactly one rate and the key and tag are both
/// exactly one capacity.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AeadProfile {
    /// The underlying permutation.
    pub width: Width,
    /// The size in octets of the rate.
    pub rate: usize,
    /// The size in octets of the capacity.
    pub capacity: usize,
    /// The capacity-dependent bit that every domain-separation
    /// constant is built from.
    domain: u32,
}

impl AeadProfile {
    /// The size in octets of the key.
    pub const fn key_size(&self) -> usize {
        self.capacity
    }

    /// The size in octets of the nonce.
    pub const fn nonce_size(&self) -> usize {
        self.rate
    }

    /// The size in octets of the tag.
    pub const fn tag_size(&self) -> usize {
        self.capacity
    }

    /// The rate in 32-bit words.
    pub const fn rate_words(&self) -> usize {
        self.rate / 4
    }

    /// The capacity in 32-bit words.
    pub const fn capacity_words(&self) -> usize {
        self.capacity / 4
    }

    /// Injected after the last associated data block if it was
    /// padded.
    pub const fn const_a0(&self) -> u32 {
        self.domain << 24
    }

    /// Injected after the last associated data block if it was
    /// full.
    pub const fn const_a1(&self) -> u32 {
        (1 ^ self.domain) << 24
    }

    /// Injected after the last text block if it was padded.
    pub const fn const_m0(&self) -> u32 {
        (2 ^ self.domain) << 24
    }

    /// Injected after the last text block if it was full.
    pub const fn const_m1(&self) -> u32 {
        (3 ^ self.domain) << 24
    }

    /// The index of the word that receives the
    /// domain-separation constants.
    pub const fn domain_word(&self) -> usize {
        self.width.words() - 1
    }
}

/// Schwaemm256-128: Sparkle384, 256-bit rate, 128-bit capacity.
pub const SCHWAEMM256_128: AeadProfile = AeadProfile {
    width: Width::Sparkle384,
    rate: 32,
    capacity: 16,
    domain: 1 << 2,
};

/// Schwaemm192-192: Sparkle384, 192-bit rate, 192-bit capacity.
pub const SCHWAEMM192_192: AeadProfile = AeadProfile {
    width: Width::Sparkle384,
    rate: 24,
    capacity: 24,
    domain: 1 << 3,
};

/// Schwaemm128-128: Sparkle256, 128-bit rate, 128-bit capacity.
pub const SCHWAEMM128_128: AeadProfile = AeadProfile {
    width: Width::Sparkle256,
    rate: 16,
    capacity: 16,
    domain: 1 << 2,
};

/// Schwaemm256-256: Sparkle512, 256-bit rate, 256-bit capacity.
pub const SCHWAEMM256_256: AeadProfile = AeadProfile {
    width: Width::Sparkle512,
    rate: 32,
    capacity: 32,
    domain: 1 << 4,
};

const fn check_aead_profile(p: &AeadProfile) -> bool {
    p.rate + p.capacity == p.width.words() * 4
        && p.rate <= MAX_RATE
        && p.rate % 8 == 0
        && p.capacity % 4 == 0
        // Rate whitening either XORs the capacity into the rate
        // word for word, or twice over.
        && (p.rate == p.capacity || p.rate == 2 * p.capacity)
        && p.width.slim_steps() < p.width.big_steps()
}

const fn check_hash_profile(p: &HashProfile) -> bool {
    // The message injection only touches the left half.
    HASH_RATE <= p.width.words() * 2
        && p.digest_size % HASH_RATE == 0
        && p.width.slim_steps() < p.width.big_steps()
}

const_assert!(check_aead_profile(&SCHWAEMM256_128));
const_assert!(check_aead_profile(&SCHWAEMM192_192));
const_assert!(check_aead_profile(&SCHWAEMM128_128));
const_assert!(check_aead_profile(&SCHWAEMM256_256));
const_assert!(check_hash_profile(&ESCH256));
const_assert!(check_hash_profile(&ESCH384));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        for w in [Width::Sparkle256, Width::Sparkle384, Width::Sparkle512] {
            assert_eq!(Width::from_words(w.words()), Some(w));
            assert_eq!(w.branches() % 2, 0, "{w}");
            assert!(w.slim_steps() < w.big_steps(), "{w}");
        }
        assert_eq!(Width::from_words(10), None);
    }

    #[test]
    fn test_aead_domain_constants() {
        let p = SCHWAEMM256_128;
        assert_eq!(p.const_a0(), 0x0400_0000);
        assert_eq!(p.const_a1(), 0x0500_0000);
        assert_eq!(p.const_m0(), 0x0600_0000);
        assert_eq!(p.const_m1(), 0x0700_0000);

        let p = SCHWAEMM192_192;
        assert_eq!(p.const_a0(), 0x0800_0000);
        assert_eq!(p.const_m1(), 0x0b00_0000);

        let p = SCHWAEMM256_256;
        assert_eq!(p.const_a0(), 0x1000_0000);
        assert_eq!(p.const_m1(), 0x1300_0000);
    }

    #[test]
    fn test_aead_sizes() {
        let sizes = [
            (SCHWAEMM256_128, 16, 32, 16),
            (SCHWAEMM192_192, 24, 24, 24),
            (SCHWAEMM128_128, 16, 16, 16),
            (SCHWAEMM256_256, 32, 32, 32),
        ];
        for (p, key, nonce, tag) in sizes {
            assert_eq!(p.key_size(), key);
            assert_eq!(p.nonce_size(), nonce);
            assert_eq!(p.tag_size(), tag);
            assert_eq!(p.domain_word(), p.width.words() - 1);
        }
    }

    #[test]
    fn test_hash_profiles() {
        assert_eq!(ESCH256.domain_word(), 5);
        assert_eq!(ESCH256.squeeze_blocks(), 2);
        assert_eq!(ESCH384.domain_word(), 7);
        assert_eq!(ESCH384.squeeze_blocks(), 3);
    }
}
