//! Property tests for Esch and Schwaemm.

use proptest::prelude::*;
use sparkle_crypto::{
    Aead, Hash, Schwaemm128_128, Schwaemm192_192, Schwaemm256_128, Schwaemm256_256, esch::Esch,
    esch256_hash, esch384_hash, keys::AeadKey, schwaemm128_128_decrypt, schwaemm128_128_encrypt,
    schwaemm192_192_decrypt, schwaemm192_192_encrypt, schwaemm256_128_decrypt,
    schwaemm256_128_encrypt, schwaemm256_256_decrypt, schwaemm256_256_encrypt,
};

fn bytes(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..max)
}

macro_rules! schwaemm_props {
    ($mod:ident, $aead:ty, $encrypt:ident, $decrypt:ident, $key:literal, $nonce:literal) => {
        mod $mod {
            use super::*;

            proptest! {
                #![proptest_config(ProptestConfig::with_cases(64))]

                #[test]
                fn round_trip(
                    key in any::<[u8; $key]>(),
                    nonce in any::<[u8; $nonce]>(),
                    ad in bytes(100),
                    pt in bytes(200),
                ) {
                    let mut ct = vec![0u8; pt.len()];
                    let tag = $encrypt(&key, &nonce, &ad, &pt, &mut ct);
                    prop_assert_eq!(ct.len(), pt.len());

                    let mut got = vec![0u8; ct.len()];
                    prop_assert!($decrypt(&key, &nonce, tag.as_bytes(), &ad, &ct, &mut got));
                    prop_assert_eq!(got, pt);
                }

                #[test]
                fn deterministic(
                    key in any::<[u8; $key]>(),
                    nonce in any::<[u8; $nonce]>(),
                    ad in bytes(64),
                    pt in bytes(64),
                ) {
                    let mut a = vec![0u8; pt.len()];
                    let mut b = vec![0u8; pt.len()];
                    let ta = $encrypt(&key, &nonce, &ad, &pt, &mut a);
                    let tb = $encrypt(&key, &nonce, &ad, &pt, &mut b);
                    prop_assert_eq!(a, b);
                    prop_assert_eq!(ta, tb);
                }

                #[test]
                fn tamper(
                    key in any::<[u8; $key]>(),
                    nonce in any::<[u8; $nonce]>(),
                    ad in bytes(64),
                    pt in bytes(64),
                    which in 0usize..3,
                    pos in any::<prop::sample::Index>(),
                    bit in 0u8..8,
                ) {
                    let mut ct = vec![0u8; pt.len()];
                    let tag = $encrypt(&key, &nonce, &ad, &pt, &mut ct);
                    let mut tag = tag.into_bytes();
                    let mut ad = ad;

                    let target: &mut [u8] = match which {
                        0 => ct.as_mut_slice(),
                        1 => ad.as_mut_slice(),
                        _ => &mut tag[..],
                    };
                    prop_assume!(!target.is_empty());
                    let i = pos.index(target.len());
                    target[i] ^= 1 << bit;

                    let mut got = vec![0u8; ct.len()];
                    prop_assert!(!$decrypt(&key, &nonce, &tag, &ad, &ct, &mut got));
                }

                #[test]
                fn seal_open(
                    key in any::<[u8; $key]>(),
                    nonce in any::<[u8; $nonce]>(),
                    ad in bytes(64),
                    pt in bytes(64),
                ) {
                    let aead = <$aead>::new(&AeadKey::new(key));
                    let mut ct = vec![0u8; pt.len() + <$aead>::OVERHEAD];
                    aead.seal(&mut ct, &nonce, &pt, &ad).expect("seal should succeed");

                    let mut want = vec![0u8; pt.len()];
                    let tag = $encrypt(&key, &nonce, &ad, &pt, &mut want);
                    prop_assert_eq!(&ct[..pt.len()], &want[..]);
                    prop_assert_eq!(&ct[pt.len()..], tag.as_bytes());

                    let mut got = vec![0u8; pt.len()];
                    aead.open(&mut got, &nonce, &ct, &ad).expect("open should succeed");
                    prop_assert_eq!(got, pt);
                }
            }
        }
    };
}

schwaemm_props!(
    schwaemm256_128,
    Schwaemm256_128,
    schwaemm256_128_encrypt,
    schwaemm256_128_decrypt,
    16,
    32
);
schwaemm_props!(
    schwaemm192_192,
    Schwaemm192_192,
    schwaemm192_192_encrypt,
    schwaemm192_192_decrypt,
    24,
    24
);
schwaemm_props!(
    schwaemm128_128,
    Schwaemm128_128,
    schwaemm128_128_encrypt,
    schwaemm128_128_decrypt,
    16,
    16
);
schwaemm_props!(
    schwaemm256_256,
    Schwaemm256_256,
    schwaemm256_256_encrypt,
    schwaemm256_256_decrypt,
    32,
    32
);

proptest! {
    #[test]
    fn esch_incremental_matches_one_shot(
        msg in bytes(200),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..4),
    ) {
        let mut cuts: Vec<usize> = cuts.iter().map(|c| c.index(msg.len() + 1)).collect();
        cuts.sort_unstable();

        let mut h256 = Esch::<12>::new();
        let mut h384 = Esch::<16>::new();
        let mut start = 0;
        for cut in cuts.into_iter().chain([msg.len()]) {
            h256.update(&msg[start..cut]);
            h384.update(&msg[start..cut]);
            start = cut;
        }

        let mut got = [0u8; 32];
        h256.finalize(&mut got);
        prop_assert_eq!(got, esch256_hash(&msg));

        let mut got = [0u8; 48];
        h384.finalize(&mut got);
        let want = esch384_hash(&msg);
        prop_assert_eq!(&got[..], &want[..]);
    }

    #[test]
    fn esch_lengths(msg in bytes(100)) {
        prop_assert_eq!(esch256_hash(&msg).len(), 32);
        prop_assert_eq!(esch384_hash(&msg).len(), 48);
        let digest = sparkle_crypto::Esch256::hash(&msg);
        let want = esch256_hash(&msg);
        prop_assert_eq!(digest.as_bytes(), &want[..]);
    }

    #[test]
    fn esch_distinct(a in bytes(64), b in bytes(64)) {
        prop_assume!(a != b);
        prop_assert_ne!(esch256_hash(&a), esch256_hash(&b));
    }
}
