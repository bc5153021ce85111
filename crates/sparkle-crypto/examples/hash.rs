//! Hashes each command line argument with Esch256 and Esch384.

use sparkle_crypto::{Esch384, Hash, esch256_hash};

fn main() {
    for arg in std::env::args().skip(1) {
        let d256 = esch256_hash(arg.as_bytes());

        // The same thing, incrementally.
        let mut h = Esch384::new();
        for chunk in arg.as_bytes().chunks(5) {
            h.update(chunk);
        }
        let d384 = h.digest();

        println!("{arg:?}");
        println!("  Esch256: {}", hex::encode(d256));
        println!("  Esch384: {}", hex::encode(d384.as_bytes()));
    }
}
