//! Encrypts and decrypts a message with Schwaemm256-128.

use rand::RngCore;
use sparkle_crypto::{
    Aead, Error, Schwaemm256_128, keys::AeadKey, schwaemm256_128_decrypt,
    schwaemm256_128_encrypt,
};

fn main() -> Result<(), Error> {
    let mut rng = rand::thread_rng();

    let mut key = [0u8; 16];
    rng.fill_bytes(&mut key);
    let mut nonce = [0u8; 32];
    rng.fill_bytes(&mut nonce);

    let ad = b"header";
    let msg = b"attack at dawn";

    // Low-level API: detached tag and a verification flag.
    let mut ct = [0u8; 14];
    let tag = schwaemm256_128_encrypt(&key, &nonce, ad, msg, &mut ct);
    println!("ciphertext: {}", hex::encode(ct));
    println!("tag:        {}", hex::encode(tag.as_bytes()));

    let mut pt = [0u8; 14];
    if !schwaemm256_128_decrypt(&key, &nonce, tag.as_bytes(), ad, &ct, &mut pt) {
        return Err(Error::InvalidArgument("tag did not verify"));
    }
    assert_eq!(&pt, msg);

    // High-level API: the tag is appended and a failed open
    // zeroes the output.
    let aead = Schwaemm256_128::new(&AeadKey::new(key));
    let mut sealed = vec![0u8; msg.len() + Schwaemm256_128::OVERHEAD];
    aead.seal(&mut sealed, &nonce, msg, ad)?;

    let mut opened = vec![0u8; msg.len()];
    aead.open(&mut opened, &nonce, &sealed, ad)?;
    println!("opened:     {}", String::from_utf8_lossy(&opened));

    sealed[0] ^= 1;
    let err = aead
        .open(&mut opened, &nonce, &sealed, ad)
        .expect_err("tampered ciphertext should not open");
    println!("tampered:   {err}");

    Ok(())
}
