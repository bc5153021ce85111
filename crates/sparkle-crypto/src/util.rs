#![forbid(unsafe_code)]

use byteorder::{ByteOrder, LittleEndian};

/// The largest rate, in octets, of any construction in this
/// crate.
pub(crate) const MAX_RATE: usize = 32;

/// The largest rate, in 32-bit words.
pub(crate) const MAX_RATE_WORDS: usize = MAX_RATE / 4;

/// Loads `src` into `dst` as little-endian words.
///
/// `src` must be exactly `4 * dst.len()` octets long.
#[inline(always)]
pub(crate) fn load_words(dst: &mut [u32], src: &[u8]) {
    LittleEndian::read_u32_into(src, dst);
}

/// Stores `src` into `dst` as little-endian words.
///
/// `dst` must be exactly `4 * src.len()` octets long.
#[inline(always)]
pub(crate) fn store_words(dst: &mut [u8], src: &[u32]) {
    LittleEndian::write_u32_into(src, dst);
}

/// Writes `data || 0x80 || 0*` into `block` if `data` is shorter
/// than `block`, otherwise copies `data` verbatim.
///
/// Returns whether padding was applied.
///
/// `data` must not be longer than `block`.
#[inline(always)]
pub(crate) fn pad_block(block: &mut [u8], data: &[u8]) -> bool {
    debug_assert!(data.len() <= block.len());

    let (head, tail) = block.split_at_mut(data.len());
    head.copy_from_slice(data);
    match tail.split_first_mut() {
        Some((first, rest)) => {
            *first = 0x80;
            rest.fill(0);
            true
        }
        None => false,
    }
}

/// Like [`assert!`], but forces a compile-time error.
macro_rules! const_assert {
    ($($tt:tt)*) => {
        const _: () = assert!($($tt)*);
    }
}
pub(crate) use const_assert;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_block_short() {
        let mut block = [0xffu8; 16];
        assert!(pad_block(&mut block, b"abc"));
        assert_eq!(&block[..3], b"abc");
        assert_eq!(block[3], 0x80);
        assert!(block[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pad_block_empty() {
        let mut block = [0xffu8; 16];
        assert!(pad_block(&mut block, &[]));
        assert_eq!(block[0], 0x80);
        assert!(block[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pad_block_full() {
        let mut block = [0u8; 16];
        let data = [0x42u8; 16];
        assert!(!pad_block(&mut block, &data));
        assert_eq!(block, data);
    }

    #[test]
    fn test_words_are_little_endian() {
        let mut words = [0u32; 2];
        load_words(&mut words, &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(words, [0x0403_0201, 0x0807_0605]);

        let mut bytes = [0u8; 8];
        store_words(&mut bytes, &words);
        assert_eq!(bytes, [1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
