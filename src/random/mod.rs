//! Random number generation subsystem for RotorCrypt.
//!
//! Provides the seeded Mersenne Twister that derives every wheel body,
//! the reflector base and the step-interval assignment from a start
//! position.

pub mod mersenne_twister;
pub mod seed;
