//! 32-bit Mersenne Twister PRNG (MT19937) with array seeding.
//!
//! This is the permutation source of the rotor engine. Seeding goes through
//! `init_by_array` with the seed's key words, and bounded draws use
//! bit-length rejection sampling. The combination reproduces the wheel
//! bodies of the reference rotor machine for the same start position.

use super::seed::Seed;

/// Degree of recurrence (state size in words).
const N: usize = 624;

/// Middle word offset.
const M: usize = 397;

/// Twist matrix coefficient.
const MATRIX_A: u32 = 0x9908_B0DF;

/// Most significant bit.
const UPPER_MASK: u32 = 0x8000_0000;

/// Least significant 31 bits.
const LOWER_MASK: u32 = 0x7FFF_FFFF;

/// Fixed seed used before mixing in the key array.
const ARRAY_SEED: u32 = 19_650_218;

/// 32-bit Mersenne Twister with period 2^19937-1.
///
/// The same key always yields the same output sequence. Every engine owns
/// its own instance, so engines never interfere with each other.
#[derive(Clone)]
pub struct MersenneTwister {
    mt: [u32; N],
    mti: usize,
}

impl std::fmt::Debug for MersenneTwister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MersenneTwister")
            .field("mti", &self.mti)
            .finish_non_exhaustive()
    }
}

impl MersenneTwister {
    /// Creates a generator seeded from a start position.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::random::mersenne_twister::MersenneTwister;
    /// use rotorcrypt::Seed;
    ///
    /// let mut a = MersenneTwister::from_seed(&Seed::Integer(42));
    /// let mut b = MersenneTwister::from_seed(&Seed::Integer(42));
    /// assert_eq!(a.next_u32(), b.next_u32());
    /// ```
    pub fn from_seed(seed: &Seed) -> Self {
        Self::from_key(&seed.key_words())
    }

    /// Creates a generator from a key array of 32-bit words.
    ///
    /// An empty key is treated as `[0]`.
    pub fn from_key(key: &[u32]) -> Self {
        let mut mt = MersenneTwister {
            mt: [0u32; N],
            mti: N + 1,
        };
        if key.is_empty() {
            mt.init_by_array(&[0]);
        } else {
            mt.init_by_array(key);
        }
        mt
    }

    /// Initializes the state vector from a single word.
    fn init_genrand(&mut self, seed: u32) {
        self.mt[0] = seed;
        for i in 1..N {
            let prev = self.mt[i - 1];
            self.mt[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.mti = N;
    }

    /// Mixes a key array into the state vector.
    fn init_by_array(&mut self, key: &[u32]) {
        self.init_genrand(ARRAY_SEED);
        let mut i = 1usize;
        let mut j = 0usize;

        for _ in 0..N.max(key.len()) {
            let prev = self.mt[i - 1];
            self.mt[i] = (self.mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_664_525))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= N {
                self.mt[0] = self.mt[N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }

        for _ in 0..(N - 1) {
            let prev = self.mt[i - 1];
            self.mt[i] = (self.mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_566_083_941))
                .wrapping_sub(i as u32);
            i += 1;
            if i >= N {
                self.mt[0] = self.mt[N - 1];
                i = 1;
            }
        }

        // MSB is 1, assuring a non-zero initial array
        self.mt[0] = UPPER_MASK;
    }

    /// Regenerates the whole state vector.
    fn twist(&mut self) {
        for k in 0..N {
            let y = (self.mt[k] & UPPER_MASK) | (self.mt[(k + 1) % N] & LOWER_MASK);
            let mag = if y & 1 == 0 { 0 } else { MATRIX_A };
            self.mt[k] = self.mt[(k + M) % N] ^ (y >> 1) ^ mag;
        }
        self.mti = 0;
    }

    /// Generates the next 32-bit pseudorandom value.
    pub fn next_u32(&mut self) -> u32 {
        if self.mti >= N {
            self.twist();
        }

        let mut y = self.mt[self.mti];
        self.mti += 1;

        // Tempering
        y ^= y >> 11;
        y ^= (y << 7) & 0x9D2C_5680;
        y ^= (y << 15) & 0xEFC6_0000;
        y ^= y >> 18;
        y
    }

    /// Returns the top `k` bits of the next output (`1 <= k <= 32`).
    ///
    /// `k == 0` yields 0 without consuming a draw. Values above 32 are
    /// clamped to 32.
    pub fn next_bits(&mut self, k: u32) -> u32 {
        if k == 0 {
            return 0;
        }
        let k = k.min(32);
        self.next_u32() >> (32 - k)
    }

    /// Generates a uniform value in `[0, n)` by rejection sampling on
    /// `bit_length(n)` bits.
    ///
    /// `n == 0` yields 0 without consuming a draw.
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        let k = u32::BITS - n.leading_zeros();
        let mut r = self.next_bits(k);
        while r >= n {
            r = self.next_bits(k);
        }
        r
    }

    /// Shuffles `items` in place (Fisher-Yates, walking from the back).
    ///
    /// Slices longer than `u32::MAX` elements are not supported.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        debug_assert!(items.len() <= u32::MAX as usize);
        for i in (1..items.len()).rev() {
            let j = self.below((i + 1) as u32) as usize;
            items.swap(i, j);
        }
    }
}
