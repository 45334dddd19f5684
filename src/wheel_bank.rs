//! WheelBank: the nine scrambler wheels plus the reflector.
//!
//! All ten wheels live in one owned `Vec` (scramblers first, reflector
//! last). The outward and inward traversal orders are index lists over that
//! collection, fixed at construction.

use tracing::trace;

use crate::alphabet::{Alphabet, ALPHABET_LEN};
use crate::random::mersenne_twister::MersenneTwister;
use crate::reflector::build_reflector;
use crate::wheel::Wheel;

/// Number of scrambler wheels.
pub(crate) const SCRAMBLER_COUNT: usize = 9;

/// Index of the reflector inside the bank.
const REFLECTOR: usize = SCRAMBLER_COUNT;

/// Pool of step intervals. Each scrambler wheel gets exactly one value.
pub(crate) const STEP_INTERVALS: [u32; SCRAMBLER_COUNT] = [0, 1, 2, 4, 6, 10, 12, 16, 18];

/// Ordered stack of scrambler wheels and the reflector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WheelBank {
    wheels: Vec<Wheel>,
    outward: [usize; SCRAMBLER_COUNT + 1],
    inward: [usize; SCRAMBLER_COUNT],
}

impl WheelBank {
    /// Derives the full bank from the generator.
    ///
    /// Draw order is fixed: nine scrambler bodies (wheels 1..9), then the
    /// reflector base, then the interval shuffle. Changing it changes the
    /// cipher produced by every seed.
    ///
    /// The shuffled interval pool is dealt in inward order, so wheel 9
    /// receives the first value and wheel 1 the last.
    pub(crate) fn generate(rng: &mut MersenneTwister) -> Self {
        let bodies: [[u8; ALPHABET_LEN]; SCRAMBLER_COUNT] =
            std::array::from_fn(|_| permutation(rng));
        let reflector_base = permutation(rng);

        let mut intervals = STEP_INTERVALS;
        rng.shuffle(&mut intervals);
        intervals.reverse();

        let mut wheels = Vec::with_capacity(SCRAMBLER_COUNT + 1);
        for (body, interval) in bodies.into_iter().zip(intervals) {
            wheels.push(Wheel::scrambler(body, interval));
        }
        wheels.push(build_reflector(&reflector_base));

        WheelBank {
            wheels,
            outward: std::array::from_fn(|i| i),
            inward: std::array::from_fn(|i| SCRAMBLER_COUNT - 1 - i),
        }
    }

    /// Steps every scrambler wheel once. The reflector does not take part.
    pub(crate) fn step(&mut self) {
        for (number, wheel) in self.wheels[..SCRAMBLER_COUNT].iter_mut().enumerate() {
            if wheel.step() {
                trace!(wheel = number + 1, rotation = wheel.rotation(), "wheel stepped");
            }
        }
    }

    /// Wheels 1..9 then the reflector, entry side to exit side.
    pub(crate) fn outward_pass(&self, index: usize) -> usize {
        self.outward
            .iter()
            .fold(index, |index, &stage| self.wheels[stage].forward_index(index))
    }

    /// Wheels 9..1, exit side to entry side. The reflector is not revisited.
    pub(crate) fn inward_pass(&self, index: usize) -> usize {
        self.inward
            .iter()
            .fold(index, |index, &stage| self.wheels[stage].backward_index(index))
    }

    /// The nine scrambler wheels, in wheel order.
    pub(crate) fn scramblers(&self) -> &[Wheel] {
        &self.wheels[..SCRAMBLER_COUNT]
    }

    /// The reflector.
    pub(crate) fn reflector(&self) -> &Wheel {
        &self.wheels[REFLECTOR]
    }
}

/// A freshly shuffled permutation of alphabet indices.
fn permutation(rng: &mut MersenneTwister) -> [u8; ALPHABET_LEN] {
    let mut body = Alphabet::identity();
    rng.shuffle(&mut body);
    body
}
