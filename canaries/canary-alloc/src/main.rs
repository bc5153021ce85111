#![cfg(not(any(test, doctest)))]
#![no_std]
#![no_main]

use core::alloc::{GlobalAlloc, Layout};

use sparkle_crypto::{esch256_hash, schwaemm128_128_decrypt, schwaemm128_128_encrypt};

/// Fails any attempt to allocate.
struct NoAlloc;

#[allow(clippy::panic)]
unsafe impl GlobalAlloc for NoAlloc {
    unsafe fn alloc(&self, _layout: Layout) -> *mut u8 {
        panic!("sparkle-crypto allocated")
    }

    unsafe fn dealloc(&self, _ptr: *mut u8, _layout: Layout) {
        panic!("sparkle-crypto deallocated")
    }
}

#[global_allocator]
static ALLOCATOR: NoAlloc = NoAlloc;

#[cfg(target_os = "none")] // hack to please rust-analyzer
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

/// Keeps the hash and AEAD paths linked in.
#[unsafe(no_mangle)]
extern "C" fn canary(buf: &mut [u8; 64]) -> bool {
    let key = [0u8; 16];
    let nonce = [0u8; 16];
    let digest = esch256_hash(&buf[..]);

    let (pt, ct) = buf.split_at_mut(32);
    let tag = schwaemm128_128_encrypt(&key, &nonce, &digest, pt, ct);
    schwaemm128_128_decrypt(&key, &nonce, tag.as_bytes(), &digest, ct, pt)
}

#[allow(unused)]
fn main() {}
