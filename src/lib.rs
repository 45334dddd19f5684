//! RotorCrypt: a seed-keyed ten-wheel rotor cipher.
//!
//! RotorCrypt is a polyalphabetic substitution cipher modeled on a rotor
//! machine with nine scrambler wheels and one reflector. Each wheel is a
//! permutation of the 95 printable ASCII characters, derived
//! deterministically from a numeric start position. The transformation is
//! its own inverse: a second engine built from the same start position turns
//! ciphertext back into plaintext.
//!
//! This is not a cryptographically secure cipher.
//!
//! # Architecture
//!
//! ```text
//! Seed ──► MersenneTwister ──► 9 wheel bodies, reflector base, interval shuffle
//!                                   │
//!                                   ▼
//! WheelBank   (9 stepping Wheels + 1 fixed reflector, outward/inward orders)
//!     │ step all scramblers once per character
//!     ▼
//! CipherEngine (step ─► outward pass 1..9,R ─► inward pass 9..1)
//! ```
//!
//! # Examples
//!
//! Encipher and decipher a message:
//!
//! ```
//! use rotorcrypt::CipherEngine;
//!
//! let mut encoder = CipherEngine::new(42).unwrap();
//! let ciphertext = encoder.cipher("Hello, World!");
//!
//! let mut decoder = CipherEngine::new(42).unwrap();
//! assert_eq!(decoder.cipher(&ciphertext), "Hello, World!");
//! ```
//!
//! Start positions can come from text or configuration:
//!
//! ```
//! use rotorcrypt::{CipherEngine, RotorCryptError};
//!
//! let engine = CipherEngine::from_seed_str("3.5").unwrap();
//! assert_eq!(engine.start_position().to_string(), "3.5");
//!
//! let err = CipherEngine::from_seed_str("not a number").unwrap_err();
//! assert!(matches!(err, RotorCryptError::InvalidSeed { .. }));
//! ```

#![deny(clippy::all)]

pub mod error;
pub mod random;

mod alphabet;
mod engine;
pub(crate) mod reflector;
mod wheel;
pub(crate) mod wheel_bank;

pub use alphabet::{Alphabet, ALPHABET_LEN};
pub use engine::CipherEngine;
pub use error::RotorCryptError;
pub use random::seed::Seed;
pub use wheel::{Motion, Wheel};
