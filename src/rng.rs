use std::array::IntoIter;
use std::num::Wrapping;

type State = [Wrapping<u64>; 2];
type Iter = IntoIter<u64, 64>;

const ZERO_SEED_FALLBACK: (u64, u64) = (0x9e37_79b9_7f4a_7c15, 0xbf58_476d_1ce4_e5b9);

/// XorShift128+, producing values in the same buffered order as V8's `Math.random`.
///
/// Everything random in a formation session (shuffles, synthesized ratings) draws from an
/// explicit `Rng`, so seeding one with [`Rng::seeded`] makes a session reproducible.
#[derive(Debug, Clone)]
pub struct Rng {
    state: State,
    iter: Iter,
}

impl Rng {
    pub fn new() -> Rng {
        let mut state = rand_state();
        let iter = next_buf(&mut state);
        Rng { state, iter }
    }

    /// An all-zero state never leaves zero, so `seeded(0, 0)` is replaced by a fixed non-zero
    /// seed.
    pub fn seeded(s0: u64, s1: u64) -> Rng {
        let (s0, s1) = if s0 == 0 && s1 == 0 {
            ZERO_SEED_FALLBACK
        } else {
            (s0, s1)
        };
        let mut state = [Wrapping(s0), Wrapping(s1)];
        let iter = next_buf(&mut state);
        Rng { state, iter }
    }

    /// Returns a value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let s0_shifted = if let Some(n) = self.iter.next_back() {
            n
        } else {
            self.iter = next_buf(&mut self.state);
            self.iter
                .next_back()
                .expect("next_buf always produces a 64-element iterator")
        };
        f64::from_bits(s0_shifted | 0x3ff0_0000_0000_0000) - 1.0
    }

    /// Returns a value in `[min, min + span)`.
    pub fn uniform(&mut self, min: f64, span: f64) -> f64 {
        min + self.next_f64() * span
    }

    /// Returns an index in `0..len`, or 0 when `len` is 0.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        #[allow(clippy::cast_precision_loss)]
        let scaled = self.next_f64() * len as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = scaled.floor() as usize;
        // guards against rounding up to `len` for very large slices
        n.min(len - 1)
    }

    /// Fisher-Yates shuffle; every permutation is equally likely.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

fn rand_state() -> State {
    let mut buf = [0; 16];
    getrandom::getrandom(&mut buf).expect("failed to get random seed");
    let (lo, hi) = buf.split_at(8);
    let mut s0 = [0; 8];
    let mut s1 = [0; 8];
    s0.copy_from_slice(lo);
    s1.copy_from_slice(hi);
    [
        Wrapping(u64::from_le_bytes(s0)),
        Wrapping(u64::from_le_bytes(s1)),
    ]
}

fn next_buf(state: &mut State) -> Iter {
    fn next(state: &mut State) -> u64 {
        let [mut s1, s0] = *state;
        state[0] = s0;
        s1 ^= s1 << 23;
        s1 ^= s1 >> 17;
        s1 ^= s0;
        s1 ^= s0 >> 26;
        *state = [state[1], s1];
        (s0 >> 12).0
    }

    let iter = std::array::from_fn(|_| next(state)).into_iter();
    debug_assert!(iter.size_hint().0 == 64);
    iter
}

impl Default for Rng {
    fn default() -> Rng {
        Rng::new()
    }
}

impl Iterator for Rng {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}
