//! Wheel: one substitution stage of the rotor cascade.
//!
//! A wheel pairs the alphabet (entry side) with a permuted copy of it (exit
//! side). Scrambler wheels rotate their exit side on a countdown; the
//! reflector is a wheel that never moves.
//!
//! The exit side is stored as a fixed body plus a rotation offset, so a
//! step is O(1) and the reverse lookup uses a precomputed inverse table.

use crate::alphabet::{Alphabet, ALPHABET_LEN};

/// Stepping behavior of a wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Rotates the exit side when `counter` reaches zero, then reloads it
    /// from `interval`.
    Stepping {
        /// Configured step period.
        interval: u32,
        /// Characters left before the next rotation.
        counter: u32,
    },
    /// Never rotates (the reflector).
    Fixed,
}

/// One stage of the cascade: a bijection over the alphabet with its own
/// stepping state.
///
/// Engines expose wheels read-only; mutation only happens through stepping
/// inside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wheel {
    body: [u8; ALPHABET_LEN],
    inverse: [u8; ALPHABET_LEN],
    offset: usize,
    motion: Motion,
}

impl Wheel {
    /// Creates a scrambler wheel with its counter loaded from `interval`.
    pub(crate) fn scrambler(body: [u8; ALPHABET_LEN], interval: u32) -> Self {
        Self::build(
            body,
            Motion::Stepping {
                interval,
                counter: interval,
            },
        )
    }

    /// Creates a wheel that never steps.
    pub(crate) fn fixed(body: [u8; ALPHABET_LEN]) -> Self {
        Self::build(body, Motion::Fixed)
    }

    fn build(body: [u8; ALPHABET_LEN], motion: Motion) -> Self {
        let mut inverse = [0u8; ALPHABET_LEN];
        for (position, &value) in body.iter().enumerate() {
            inverse[value as usize] = position as u8;
        }
        debug_assert!(is_permutation(&body), "wheel body is not a permutation");
        Wheel {
            body,
            inverse,
            offset: 0,
            motion,
        }
    }

    /// Advances the countdown by one character.
    ///
    /// # Returns
    /// `true` if the exit side rotated.
    pub(crate) fn step(&mut self) -> bool {
        match &mut self.motion {
            Motion::Fixed => false,
            Motion::Stepping { interval, counter } => {
                if *counter == 0 {
                    self.offset = (self.offset + 1) % ALPHABET_LEN;
                    *counter = *interval;
                    true
                } else {
                    *counter -= 1;
                    false
                }
            }
        }
    }

    /// Entry index to exit index (outward direction).
    pub(crate) fn forward_index(&self, index: usize) -> usize {
        self.body[(index + self.offset) % ALPHABET_LEN] as usize
    }

    /// Exit index to entry index (inward direction).
    pub(crate) fn backward_index(&self, index: usize) -> usize {
        (self.inverse[index] as usize + ALPHABET_LEN - self.offset) % ALPHABET_LEN
    }

    /// Current exit side, aligned with [`Alphabet::CHARS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::CipherEngine;
    ///
    /// let engine = CipherEngine::new(7).unwrap();
    /// let exit = engine.wheels()[0].exit();
    /// assert_eq!(exit.chars().count(), 95);
    /// ```
    pub fn exit(&self) -> String {
        (0..ALPHABET_LEN)
            .map(|i| Alphabet::CHARS[self.forward_index(i)])
            .collect()
    }

    /// Stepping behavior and current countdown.
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Configured step period, or `None` for a fixed wheel.
    pub fn interval(&self) -> Option<u32> {
        match self.motion {
            Motion::Stepping { interval, .. } => Some(interval),
            Motion::Fixed => None,
        }
    }

    /// Characters left before the next rotation, or `None` for a fixed wheel.
    pub fn counter(&self) -> Option<u32> {
        match self.motion {
            Motion::Stepping { counter, .. } => Some(counter),
            Motion::Fixed => None,
        }
    }

    /// Returns `true` if this wheel never steps.
    pub fn is_fixed(&self) -> bool {
        matches!(self.motion, Motion::Fixed)
    }

    /// Number of rotations applied so far, modulo the alphabet length.
    pub fn rotation(&self) -> usize {
        self.offset
    }

    /// Maps `c` from the entry side to the exit side. Characters outside
    /// the alphabet are returned unchanged.
    pub fn forward(&self, c: char) -> char {
        match Alphabet::index_of(c) {
            Some(index) => Alphabet::CHARS[self.forward_index(index)],
            None => c,
        }
    }

    /// Maps `c` from the exit side back to the entry side. Characters
    /// outside the alphabet are returned unchanged.
    pub fn backward(&self, c: char) -> char {
        match Alphabet::index_of(c) {
            Some(index) => Alphabet::CHARS[self.backward_index(index)],
            None => c,
        }
    }

    /// Characters the wheel currently maps to themselves.
    pub fn fixed_points(&self) -> Vec<char> {
        (0..ALPHABET_LEN)
            .filter(|&i| self.forward_index(i) == i)
            .map(|i| Alphabet::CHARS[i])
            .collect()
    }
}

fn is_permutation(body: &[u8; ALPHABET_LEN]) -> bool {
    let mut seen = [false; ALPHABET_LEN];
    for &value in body {
        let slot = match seen.get_mut(value as usize) {
            Some(slot) => slot,
            None => return false,
        };
        if *slot {
            return false;
        }
        *slot = true;
    }
    true
}
