//! Start positions for the rotor engine.
//!
//! A [`Seed`] is the numeric value the whole engine is derived from. It
//! can be supplied as a typed number, parsed from text, or deserialized
//! from a configuration document. Anything that is not a usable number is
//! rejected with [`RotorCryptError::InvalidSeed`].
//!
//! The generator key is the little-endian list of 32-bit words of the
//! seed's magnitude. Integers contribute `|n|`. Floats contribute their
//! numeric hash (reduction modulo 2^61-1, so integral floats hash to the
//! integer they equal), reinterpreted as an unsigned 64-bit value.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use serde::de::{Error as _, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::error::RotorCryptError;

/// Width of the float hash modulus in bits.
const HASH_BITS: u32 = 61;

/// Float hash modulus (the Mersenne prime 2^61-1).
const HASH_MODULUS: u64 = (1 << HASH_BITS) - 1;

/// Hash of positive infinity.
const HASH_INF: i64 = 314_159;

/// 2^28, the chunk size used while folding the mantissa.
const MANTISSA_CHUNK: f64 = 268_435_456.0;

/// Numeric start position of a cipher engine.
///
/// # Examples
///
/// ```
/// use rotorcrypt::Seed;
///
/// let seed: Seed = "42".parse().unwrap();
/// assert_eq!(seed, Seed::Integer(42));
///
/// assert!("forty-two".parse::<Seed>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Seed {
    /// Integer start position.
    Integer(i128),
    /// Floating-point start position. Must be finite to build an engine.
    Float(f64),
}

impl Seed {
    /// Checks that the seed can drive an engine.
    ///
    /// # Errors
    /// Returns [`RotorCryptError::InvalidSeed`] for NaN or infinite floats.
    pub fn validate(&self) -> Result<(), RotorCryptError> {
        match *self {
            Seed::Float(f) if !f.is_finite() => Err(RotorCryptError::invalid_seed(f.to_string())),
            _ => Ok(()),
        }
    }

    /// Key words fed to the generator's array seeding.
    pub(crate) fn key_words(&self) -> Vec<u32> {
        let magnitude: u128 = match *self {
            Seed::Integer(n) => n.unsigned_abs(),
            Seed::Float(f) => u128::from(float_hash(f) as u64),
        };
        if magnitude == 0 {
            return vec![0];
        }
        let mut words = Vec::with_capacity(4);
        let mut rest = magnitude;
        while rest != 0 {
            words.push(rest as u32);
            rest >>= 32;
        }
        words
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Integer(n) => write!(f, "{}", n),
            // Debug keeps the fractional marker so the text parses back as a float
            Seed::Float(v) => write!(f, "{:?}", v),
        }
    }
}

impl FromStr for Seed {
    type Err = RotorCryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<i128>() {
            Ok(n) => return Ok(Seed::Integer(n)),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                warn!(length = s.len(), "rejected out-of-range integer start position");
                return Err(RotorCryptError::invalid_seed(s));
            }
            Err(_) => {}
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Seed::Float(f)),
            _ => {
                warn!(length = s.len(), "rejected non-numeric start position");
                Err(RotorCryptError::invalid_seed(s))
            }
        }
    }
}

macro_rules! seed_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Seed {
                fn from(value: $t) -> Self {
                    Seed::Integer(value as i128)
                }
            }
        )*
    };
}

seed_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<i128> for Seed {
    fn from(value: i128) -> Self {
        Seed::Integer(value)
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        Seed::Float(value)
    }
}

impl From<f32> for Seed {
    fn from(value: f32) -> Self {
        Seed::Float(f64::from(value))
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Seed::Integer(n) => match i64::try_from(n) {
                Ok(small) => serializer.serialize_i64(small),
                Err(_) => serializer.collect_str(&n),
            },
            Seed::Float(f) => serializer.serialize_f64(f),
        }
    }
}

/// Accepted shapes of a start position in a configuration document.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedRepr {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let seed = match SeedRepr::deserialize(deserializer)? {
            SeedRepr::Signed(n) => Seed::Integer(i128::from(n)),
            SeedRepr::Unsigned(n) => Seed::Integer(i128::from(n)),
            SeedRepr::Float(f) => Seed::Float(f),
            SeedRepr::Text(text) => text.parse::<Seed>().map_err(D::Error::custom)?,
            SeedRepr::Other(_) => {
                return Err(D::Error::custom(RotorCryptError::invalid_seed(
                    "non-numeric value",
                )))
            }
        };
        seed.validate().map_err(D::Error::custom)?;
        Ok(seed)
    }
}

/// Splits a finite, non-zero `value` into a mantissa in `[0.5, 1)` and a
/// power-of-two exponent.
fn frexp(value: f64) -> (f64, i32) {
    if value == 0.0 || !value.is_finite() {
        return (value, 0);
    }
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7FF) as i32;
    if exponent == 0 {
        // Subnormal: scale by 2^54 into the normal range first
        let (m, e) = frexp(value * f64::from_bits(0x4350_0000_0000_0000));
        return (m, e - 54);
    }
    let mantissa = (bits & !(0x7FF_u64 << 52)) | (1022_u64 << 52);
    (f64::from_bits(mantissa), exponent - 1022)
}

/// Numeric hash of a float: the value reduced modulo 2^61-1, with the sign
/// applied afterwards. Integral values hash to themselves (modulo the prime).
fn float_hash(value: f64) -> i64 {
    if value.is_infinite() {
        return if value > 0.0 { HASH_INF } else { -HASH_INF };
    }
    if value.is_nan() {
        return 0;
    }

    let (mut m, mut e) = frexp(value);
    let mut sign = 1i64;
    if m < 0.0 {
        sign = -1;
        m = -m;
    }

    let mut x: u64 = 0;
    while m != 0.0 {
        x = ((x << 28) & HASH_MODULUS) | (x >> (HASH_BITS - 28));
        m *= MANTISSA_CHUNK;
        e -= 28;
        let y = m as u64;
        m -= y as f64;
        x += y;
        if x >= HASH_MODULUS {
            x -= HASH_MODULUS;
        }
    }

    let bits = HASH_BITS as i32;
    let e = (if e >= 0 {
        e % bits
    } else {
        bits - 1 - ((-1 - e) % bits)
    }) as u32;
    x = ((x << e) & HASH_MODULUS) | (x >> (HASH_BITS - e));

    let hash = (x as i64) * sign;
    if hash == -1 {
        -2
    } else {
        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!("42".parse::<Seed>().unwrap(), Seed::Integer(42));
        assert_eq!(" -7 ".parse::<Seed>().unwrap(), Seed::Integer(-7));
        assert_eq!("+5".parse::<Seed>().unwrap(), Seed::Integer(5));
    }

    #[test]
    fn test_parse_float() {
        assert_eq!("3.5".parse::<Seed>().unwrap(), Seed::Float(3.5));
        assert_eq!("1e3".parse::<Seed>().unwrap(), Seed::Float(1000.0));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for input in ["", "abc", "4 2", "0x10", "NaN", "inf", "-infinity"] {
            assert_eq!(
                input.parse::<Seed>(),
                Err(RotorCryptError::invalid_seed(input)),
                "input {:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_oversized_integer() {
        let huge = "1".repeat(60);
        assert_eq!(huge.parse::<Seed>(), Err(RotorCryptError::invalid_seed(huge.clone())));
        let negative = format!("-{}", huge);
        assert!(negative.parse::<Seed>().is_err());
        // Still within range
        assert!(i128::MAX.to_string().parse::<Seed>().is_ok());
    }

    #[test]
    fn test_display_roundtrip() {
        for seed in [Seed::Integer(-99), Seed::Float(42.0), Seed::Float(0.1)] {
            assert_eq!(seed.to_string().parse::<Seed>().unwrap(), seed);
        }
    }

    #[test]
    fn test_validate() {
        assert!(Seed::Integer(0).validate().is_ok());
        assert!(Seed::Float(-1.5).validate().is_ok());
        assert!(Seed::Float(f64::NAN).validate().is_err());
        assert!(Seed::Float(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_key_words_integer() {
        assert_eq!(Seed::Integer(0).key_words(), vec![0]);
        assert_eq!(Seed::Integer(42).key_words(), vec![42]);
        assert_eq!(Seed::Integer(-42).key_words(), vec![42]);
        assert_eq!(Seed::Integer((1 << 40) + 7).key_words(), vec![7, 256]);
        assert_eq!(Seed::Integer(i128::MIN).key_words(), vec![0, 0, 0, 0x8000_0000]);
    }

    #[test]
    fn test_key_words_float() {
        assert_eq!(Seed::Float(42.0).key_words(), Seed::Integer(42).key_words());
        assert_eq!(Seed::Float(3.5).key_words(), vec![3, 268435456]);
        assert_eq!(Seed::Float(-2.25).key_words(), vec![4294967294, 4160749567]);
    }

    #[test]
    fn test_float_hash_values() {
        assert_eq!(float_hash(0.0), 0);
        assert_eq!(float_hash(1.0), 1);
        assert_eq!(float_hash(-1.0), -2);
        assert_eq!(float_hash(42.0), 42);
        assert_eq!(float_hash(3.5), 1152921504606846979);
        assert_eq!(float_hash(-2.25), -576460752303423490);
        assert_eq!(float_hash(f64::INFINITY), 314159);
    }

    #[test]
    fn test_frexp() {
        assert_eq!(frexp(1.0), (0.5, 1));
        assert_eq!(frexp(42.0), (0.65625, 6));
        assert_eq!(frexp(-3.0), (-0.75, 2));
        let (m, e) = frexp(f64::MIN_POSITIVE / 4.0);
        assert_eq!(m, 0.5);
        assert_eq!(e, -1023);
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Seed::from(7u8), Seed::Integer(7));
        assert_eq!(Seed::from(-7i64), Seed::Integer(-7));
        assert_eq!(Seed::from(u64::MAX), Seed::Integer(u64::MAX as i128));
        assert_eq!(Seed::from(0.5f32), Seed::Float(0.5));
    }
}
