#![cfg(feature = "test_util")]

use sparkle_crypto::{
    Esch256, Esch384, Schwaemm128_128, Schwaemm192_192, Schwaemm256_128, Schwaemm256_256,
    test_aead, test_hash,
};

test_hash!(esch256, Esch256);
test_hash!(esch384, Esch384);

test_aead!(schwaemm256_128, Schwaemm256_128);
test_aead!(schwaemm192_192, Schwaemm192_192);
test_aead!(schwaemm128_128, Schwaemm128_128);
test_aead!(schwaemm256_256, Schwaemm256_256);

/// Known-answer tests against NIST LWC vector files.
///
/// The files in `testdata/` keep the NIST `Count` numbering.
/// Hash files cover messages of 0 to 64 octets plus a few longer
/// lengths. AEAD files cover plaintext and associated data lengths
/// on either side of each rate boundary.
mod kat {
    use sparkle_crypto::{
        Aead, Hash,
        test_util::kat::{parse, run_aead_kat, run_hash_kat},
    };
    use test_log::test;

    use super::*;

    const HASH_RECORDS: usize = 72;
    const AEAD_RECORDS: usize = 121;

    fn hash<H: Hash>(text: &str) {
        let n = run_hash_kat::<H>(text).expect("malformed KAT file");
        assert_eq!(n, HASH_RECORDS, "{}", H::ID);
    }

    fn aead<A: Aead>(text: &str) {
        let n = run_aead_kat::<A>(text).expect("malformed KAT file");
        assert_eq!(n, AEAD_RECORDS, "{}", A::ID);
    }

    #[test]
    fn test_esch256() {
        hash::<Esch256>(include_str!("testdata/LWC_HASH_KAT_256.txt"));
    }

    #[test]
    fn test_esch384() {
        hash::<Esch384>(include_str!("testdata/LWC_HASH_KAT_384.txt"));
    }

    #[test]
    fn test_schwaemm256_128() {
        aead::<Schwaemm256_128>(include_str!("testdata/LWC_AEAD_KAT_128_256.txt"));
    }

    #[test]
    fn test_schwaemm192_192() {
        aead::<Schwaemm192_192>(include_str!("testdata/LWC_AEAD_KAT_192_192.txt"));
    }

    #[test]
    fn test_schwaemm128_128() {
        aead::<Schwaemm128_128>(include_str!("testdata/LWC_AEAD_KAT_128_128.txt"));
    }

    #[test]
    fn test_schwaemm256_256() {
        aead::<Schwaemm256_256>(include_str!("testdata/LWC_AEAD_KAT_256_256.txt"));
    }

    /// Every file starts at `Count = 1` with empty inputs.
    #[test]
    fn test_first_record() {
        for text in [
            include_str!("testdata/LWC_HASH_KAT_256.txt"),
            include_str!("testdata/LWC_HASH_KAT_384.txt"),
            include_str!("testdata/LWC_AEAD_KAT_128_256.txt"),
            include_str!("testdata/LWC_AEAD_KAT_192_192.txt"),
            include_str!("testdata/LWC_AEAD_KAT_128_128.txt"),
            include_str!("testdata/LWC_AEAD_KAT_256_256.txt"),
        ] {
            let records = parse(text).expect("malformed KAT file");
            let first = records.first().expect("KAT file has no records");
            assert_eq!(first.count, 1);
            for name in ["Msg", "PT", "AD"] {
                if let Some(v) = first.get(name) {
                    assert!(v.is_empty(), "`{name}` should be empty");
                }
            }
        }
    }
}
