//! The Sparkle permutation family.
//!
//! Sparkle operates on `nb` branches of two 32-bit words each.
//! Every step
//!
//! 1. XORs a round constant into word 1 and the step counter
//!    into word 3,
//! 2. applies the Alzette ARX-box to each branch, and
//! 3. applies the linear layer `ℒ_nb`, a Feistel round over the
//!    branches followed by a rotation of the branch order.
//!
//! See section 2.1 of the [Sparkle NIST LWC submission][sparkle].
//!
//! # Warning
//!
//! This is a low-level module. You should not be using it
//! directly unless you are building a new construction on top
//! of the permutation.
//!
//! [sparkle]: https://csrc.nist.gov/CSRC/media/Projects/lightweight-cryptography/documents/finalist-round/updated-spec-doc/sparkle-spec-final.pdf

#![forbid(unsafe_code)]
// Index arithmetic is bounded by the (checked) state width.
#![allow(clippy::arithmetic_side_effects)]

use crate::params::Width;

/// The round constants.
///
/// Constant `i` is used by Alzette for branch `i` and XORed
/// into the state at step `i mod 8`.
pub const ROUND_CONSTANTS: [u32; 8] = [
    0xB7E15162, 0xBF715880, 0x38B4DA56, 0x324E7738, 0xBB1185EB, 0x4F7C7B57, 0xCFBFA1C8, 0xC2B3293D,
];

/// The Alzette ARX-box: a 64-bit keyed permutation of the
/// branch `(x, y)` under the round constant `c`.
#[inline(always)]
pub const fn alzette(mut x: u32, mut y: u32, c: u32) -> (u32, u32) {
    x = x.wrapping_add(y.rotate_right(31));
    y ^= x.rotate_right(24);
    x ^= c;

    x = x.wrapping_add(y.rotate_right(17));
    y ^= x.rotate_right(17);
    x ^= c;

    x = x.wrapping_add(y);
    y ^= x.rotate_right(31);
    x ^= c;

    x = x.wrapping_add(y.rotate_right(24));
    y ^= x.rotate_right(16);
    x ^= c;

    (x, y)
}

/// The `ℓ` map used by the linear layer and by Esch's message
/// injection.
#[inline(always)]
pub(crate) const fn ell(x: u32) -> u32 {
    (x ^ (x << 16)).rotate_left(16)
}

/// Applies `steps` steps of Sparkle to `state`.
///
/// `W` must be 8, 12 or 16 (Sparkle256, Sparkle384 and
/// Sparkle512, respectively); any other width fails to compile.
///
/// Any number of steps is accepted. The constructions in this
/// crate only use [`Width::slim_steps`] and
/// [`Width::big_steps`].
///
/// # Example
///
/// ```rust
/// use sparkle_crypto::{params::Width, sparkle::sparkle};
///
/// let mut state = [0u32; 12];
/// sparkle(&mut state, Width::Sparkle384.big_steps());
/// assert_ne!(state, [0u32; 12]);
/// ```
#[inline]
pub fn sparkle<const W: usize>(state: &mut [u32; W], steps: usize) {
    const {
        assert!(
            Width::from_words(W).is_some(),
            "Sparkle is only defined for 8, 12 or 16 words"
        )
    };

    for i in 0..steps {
        state[1] ^= ROUND_CONSTANTS[i % ROUND_CONSTANTS.len()];
        // The step counter is always tiny.
        #[allow(clippy::cast_possible_truncation)]
        let step = i as u32;
        state[3] ^= step;

        for (j, branch) in state.chunks_exact_mut(2).enumerate() {
            let (x, y) = alzette(branch[0], branch[1], ROUND_CONSTANTS[j]);
            branch[0] = x;
            branch[1] = y;
        }

        linear_layer(state);
    }
}

/// The linear layer `ℒ_nb`.
///
/// With `h = nb / 2`, the left half of the branches is folded
/// into two accumulators which are mixed with `ℓ`, then XORed
/// (Feistel style) into the right half along with the left
/// branches themselves. Finally the right half is rotated left
/// by one branch and the two halves are swapped.
#[inline(always)]
fn linear_layer<const W: usize>(state: &mut [u32; W]) {
    // Number of words in each half.
    let half = W / 2;

    let (mut tx, mut ty) = (0u32, 0u32);
    for branch in state[..half].chunks_exact(2) {
        tx ^= branch[0];
        ty ^= branch[1];
    }
    let tx = ell(tx);
    let ty = ell(ty);

    let (left, right) = state.split_at_mut(half);
    for (l, r) in left.chunks_exact(2).zip(right.chunks_exact_mut(2)) {
        r[0] ^= l[0] ^ ty;
        r[1] ^= l[1] ^ tx;
    }

    // Swap the halves, then rotate the new left half by one
    // branch.
    left.swap_with_slice(right);
    left.rotate_left(2);
}

/// A Sparkle state of a fixed width.
///
/// This is a thin wrapper that pairs the state with its step
/// counts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct State<const W: usize>([u32; W]);

impl<const W: usize> State<W> {
    /// The width of this state.
    pub const WIDTH: Width = match Width::from_words(W) {
        Some(w) => w,
        None => panic!("Sparkle is only defined for 8, 12 or 16 words"),
    };

    /// Creates a state from its words.
    #[inline]
    pub const fn new(words: [u32; W]) -> Self {
        Self(words)
    }

    /// Returns the state's words.
    #[inline]
    pub const fn words(&self) -> &[u32; W] {
        &self.0
    }

    /// Returns the state's words.
    #[inline]
    pub fn words_mut(&mut self) -> &mut [u32; W] {
        &mut self.0
    }

    /// Applies the slim (reduced) number of steps.
    #[inline]
    pub fn permute_slim(&mut self) {
        sparkle(&mut self.0, Self::WIDTH.slim_steps());
    }

    /// Applies the big (full) number of steps.
    #[inline]
    pub fn permute_big(&mut self) {
        sparkle(&mut self.0, Self::WIDTH.big_steps());
    }
}

impl<const W: usize> Default for State<W> {
    #[inline]
    fn default() -> Self {
        Self([0u32; W])
    }
}

impl<const W: usize> zeroize::Zeroize for State<W> {
    #[inline]
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Sparkle256.
pub type Sparkle256 = State<8>;
/// Sparkle384.
pub type Sparkle384 = State<12>;
/// Sparkle512.
pub type Sparkle512 = State<16>;
