//! Reflector construction.
//!
//! The reflector base permutation is split at `len / 2`. Entry `i` of the
//! top half is paired with entry `i` of the bottom half in both directions.
//! With 95 characters that forms 47 reciprocal pairs and leaves the last
//! element of the bottom half unpaired, so it keeps its identity mapping.
//! The result is an involution with exactly one fixed point.

use crate::alphabet::{Alphabet, ALPHABET_LEN};
use crate::wheel::Wheel;

/// Builds the non-stepping reflector wheel from a shuffled base permutation
/// of alphabet indices.
pub(crate) fn build_reflector(base: &[u8; ALPHABET_LEN]) -> Wheel {
    let half = base.len() / 2;
    let (top, bottom) = base.split_at(half);

    let mut exit = Alphabet::identity();
    for (&t, &b) in top.iter().zip(bottom) {
        exit[t as usize] = b;
        exit[b as usize] = t;
    }

    Wheel::fixed(exit)
}
