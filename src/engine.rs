//! CipherEngine: the ten-wheel rotor machine.
//!
//! Every character first steps all scrambler wheels. Characters inside the
//! printable alphabet then take the outward pass (wheels 1..9 and the
//! reflector) and the inward pass (wheels 9..1), 19 substitutions in total.
//! Characters outside the alphabet are emitted unchanged.

use std::str::FromStr;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::error::RotorCryptError;
use crate::random::mersenne_twister::MersenneTwister;
use crate::random::seed::Seed;
use crate::wheel::Wheel;
use crate::wheel_bank::WheelBank;

/// Seed-keyed rotor cipher whose transformation is its own inverse.
///
/// # Architecture
///
/// Construction derives, from the start position and in a fixed draw order,
/// nine scrambler wheel bodies, one reflector and the assignment of nine
/// distinct step intervals. After that the only mutation is stepping.
///
/// Two engines built from the same start position, both fresh, undo each
/// other: feeding the output of one into the other restores the input.
///
/// # Examples
///
/// ```
/// use rotorcrypt::CipherEngine;
///
/// let mut encoder = CipherEngine::new(42).unwrap();
/// let ciphertext = encoder.cipher("Hello, World!");
///
/// let mut decoder = CipherEngine::new(encoder.start_position()).unwrap();
/// assert_eq!(decoder.cipher(&ciphertext), "Hello, World!");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CipherEngine {
    start_position: Seed,
    bank: WheelBank,
    processed: u64,
}

impl CipherEngine {
    /// Builds an engine from a numeric start position.
    ///
    /// # Parameters
    /// - `seed`: Any integer or float (see [`Seed`]).
    ///
    /// # Errors
    /// Returns [`RotorCryptError::InvalidSeed`] if the seed is NaN or
    /// infinite. No wheel state is built in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::CipherEngine;
    ///
    /// assert!(CipherEngine::new(1234).is_ok());
    /// assert!(CipherEngine::new(2.5).is_ok());
    /// assert!(CipherEngine::new(f64::NAN).is_err());
    /// ```
    pub fn new(seed: impl Into<Seed>) -> Result<Self, RotorCryptError> {
        let seed = seed.into();
        seed.validate()?;
        Ok(Self::build(seed))
    }

    /// Builds an engine from a textual start position, as read from a
    /// command line or an environment variable.
    ///
    /// # Errors
    /// Returns [`RotorCryptError::InvalidSeed`] if `text` is not a number.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::CipherEngine;
    ///
    /// assert!(CipherEngine::from_seed_str("42").is_ok());
    /// assert!(CipherEngine::from_seed_str("forty-two").is_err());
    /// ```
    pub fn from_seed_str(text: &str) -> Result<Self, RotorCryptError> {
        let seed: Seed = text.parse()?;
        Self::new(seed)
    }

    fn build(start_position: Seed) -> Self {
        let mut rng = MersenneTwister::from_seed(&start_position);
        let bank = WheelBank::generate(&mut rng);

        debug!(
            intervals = ?bank.scramblers().iter().filter_map(Wheel::interval).collect::<Vec<_>>(),
            fixed_point = ?bank.reflector().fixed_points(),
            "rotor engine built"
        );

        CipherEngine {
            start_position,
            bank,
            processed: 0,
        }
    }

    /// The start position this engine was built from, unchanged.
    pub fn start_position(&self) -> Seed {
        self.start_position
    }

    /// A fresh engine built from the same start position.
    ///
    /// The twin starts from the initial wheel state regardless of how many
    /// characters this engine has already processed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::CipherEngine;
    ///
    /// let mut encoder = CipherEngine::new(-9).unwrap();
    /// let mut decoder = encoder.twin();
    /// let ciphertext = encoder.cipher("attack at dawn");
    /// assert_eq!(decoder.cipher(&ciphertext), "attack at dawn");
    /// ```
    pub fn twin(&self) -> Self {
        Self::build(self.start_position)
    }

    /// Ciphers a single character.
    ///
    /// Steps every scrambler wheel first, whether or not `c` is in the
    /// alphabet. Characters outside the alphabet are returned unchanged.
    pub fn process_char(&mut self, c: char) -> char {
        self.bank.step();
        self.processed += 1;
        match Alphabet::index_of(c) {
            Some(index) => {
                let reflected = self.bank.outward_pass(index);
                Alphabet::CHARS[self.bank.inward_pass(reflected)]
            }
            None => c,
        }
    }

    /// Ciphers `text` character by character, in order.
    ///
    /// Enciphering and deciphering are the same operation; use a fresh
    /// engine with the same start position to reverse the output.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::CipherEngine;
    ///
    /// let mut engine = CipherEngine::new(42).unwrap();
    /// assert_eq!(engine.cipher(""), "");
    /// let out = engine.cipher("line one\nline two");
    /// assert_eq!(out.find('\n'), Some(8));
    /// ```
    pub fn cipher(&mut self, text: &str) -> String {
        let before = self.processed;
        let mut output = String::with_capacity(text.len());
        for c in text.chars() {
            output.push(self.process_char(c));
        }
        trace!(
            characters = self.processed - before,
            total = self.processed,
            "ciphered text"
        );
        output
    }

    /// Number of characters consumed since construction.
    pub fn characters_processed(&self) -> u64 {
        self.processed
    }

    /// The nine scrambler wheels in wheel order (wheel 1 first).
    pub fn wheels(&self) -> &[Wheel] {
        self.bank.scramblers()
    }

    /// The reflector wheel.
    pub fn reflector(&self) -> &Wheel {
        self.bank.reflector()
    }
}

impl FromStr for CipherEngine {
    type Err = RotorCryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_seed_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ALPHABET_LEN;
    use crate::wheel_bank::STEP_INTERVALS;

    #[test]
    fn test_construction() {
        let engine = CipherEngine::new(42).unwrap();
        assert_eq!(engine.wheels().len(), 9);
        assert!(engine.reflector().is_fixed());
        assert_eq!(engine.characters_processed(), 0);
        assert_eq!(engine.start_position(), Seed::Integer(42));
    }

    #[test]
    fn test_invalid_seed() {
        assert_eq!(
            CipherEngine::new(f64::NAN),
            Err(RotorCryptError::invalid_seed("NaN"))
        );
        assert!(matches!(
            CipherEngine::new(f64::NEG_INFINITY),
            Err(RotorCryptError::InvalidSeed { .. })
        ));
        assert!(matches!(
            CipherEngine::from_seed_str("seed"),
            Err(RotorCryptError::InvalidSeed { .. })
        ));
    }

    #[test]
    fn test_from_str() {
        let engine: CipherEngine = "42".parse().unwrap();
        assert_eq!(engine, CipherEngine::new(42).unwrap());
    }

    #[test]
    fn test_roundtrip() {
        let mut encoder = CipherEngine::new(42).unwrap();
        let mut decoder = CipherEngine::new(42).unwrap();
        let ciphertext = encoder.cipher("Hello, World!");
        assert_ne!(ciphertext, "Hello, World!");
        assert_eq!(decoder.cipher(&ciphertext), "Hello, World!");
    }

    #[test]
    fn test_multi_call_roundtrip() {
        let mut encoder = CipherEngine::new(2024).unwrap();
        let mut decoder = encoder.twin();
        let chunks = ["The quick ", "brown fox\n", "", "jumps over ~ the lazy dog."];
        for chunk in chunks {
            let ciphertext = encoder.cipher(chunk);
            assert_eq!(decoder.cipher(&ciphertext), chunk);
        }
    }

    #[test]
    fn test_same_engine_twice_is_not_identity() {
        let mut engine = CipherEngine::new(42).unwrap();
        let first = engine.cipher("AAAAAAAAAAAAAAAAAAAA");
        let second = engine.cipher(&first);
        assert_ne!(second, "AAAAAAAAAAAAAAAAAAAA");
    }

    #[test]
    fn test_repeated_plaintext_varies() {
        let mut engine = CipherEngine::new(7).unwrap();
        let out = engine.cipher("aaaaaaaaaa");
        let distinct: std::collections::HashSet<char> = out.chars().collect();
        assert!(distinct.len() > 1, "stepping should vary the substitution");
    }

    #[test]
    fn test_pass_through() {
        let mut engine = CipherEngine::new(5).unwrap();
        let out: Vec<char> = engine.cipher("a\tb\nc\u{7f}dé").chars().collect();
        assert_eq!(out.len(), 8);
        assert_eq!(out[1], '\t');
        assert_eq!(out[3], '\n');
        assert_eq!(out[5], '\u{7f}');
        assert_eq!(out[7], 'é');
        for i in [0, 2, 4, 6] {
            assert!(Alphabet::contains(out[i]));
        }
    }

    #[test]
    fn test_non_alphabet_still_steps() {
        let mut engine = CipherEngine::new(11).unwrap();
        let fresh = engine.clone();
        engine.process_char('\n');
        assert_eq!(engine.characters_processed(), 1);
        assert_ne!(engine.wheels(), fresh.wheels());
        // The interval-0 wheel rotates on every character
        let fastest = engine
            .wheels()
            .iter()
            .find(|w| w.interval() == Some(0))
            .unwrap();
        assert_eq!(fastest.rotation(), 1);
    }

    #[test]
    fn test_twin_is_fresh() {
        let mut engine = CipherEngine::new(3).unwrap();
        engine.cipher("advance the wheels");
        let twin = engine.twin();
        assert_eq!(twin, CipherEngine::new(3).unwrap());
        assert_eq!(twin.characters_processed(), 0);
    }

    #[test]
    fn test_deterministic_construction() {
        let a = CipherEngine::new(123456789).unwrap();
        let b = CipherEngine::new(123456789).unwrap();
        assert_eq!(a, b);
        for (wa, wb) in a.wheels().iter().zip(b.wheels()) {
            assert_eq!(wa.exit(), wb.exit());
            assert_eq!(wa.interval(), wb.interval());
        }
        assert_eq!(a.reflector().exit(), b.reflector().exit());
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = CipherEngine::new(1).unwrap();
        let mut b = CipherEngine::new(2).unwrap();
        assert_ne!(a.cipher("same plaintext"), b.cipher("same plaintext"));
    }

    #[test]
    fn test_wheels_stay_bijective() {
        let mut engine = CipherEngine::new(77).unwrap();
        for _ in 0..250 {
            engine.process_char('x');
        }
        for wheel in engine.wheels() {
            let mut chars: Vec<char> = wheel.exit().chars().collect();
            chars.sort_unstable();
            assert_eq!(chars, Alphabet::CHARS.to_vec());
        }
    }

    #[test]
    fn test_counters_within_interval() {
        let mut engine = CipherEngine::new(31).unwrap();
        for _ in 0..100 {
            engine.process_char('q');
            for wheel in engine.wheels() {
                assert!(wheel.counter() <= wheel.interval());
            }
        }
        let mut intervals: Vec<u32> = engine.wheels().iter().filter_map(Wheel::interval).collect();
        intervals.sort_unstable();
        assert_eq!(intervals, STEP_INTERVALS.to_vec());
    }

    #[test]
    fn test_reflector_fixed_point() {
        let engine = CipherEngine::new(42).unwrap();
        assert_eq!(engine.reflector().fixed_points().len(), 1);
        assert_eq!(engine.reflector().exit().len(), ALPHABET_LEN);
    }
}
