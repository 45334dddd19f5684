//! The printable-ASCII alphabet shared by every wheel.
//!
//! Every wheel uses the same entry side: the 95 characters from `' '`
//! (0x20) to `'~'` (0x7E) in ascending order. Internally the engine works
//! on alphabet indices (`0..95`), so the entry side of a wheel is always the
//! identity.

/// Number of characters in the alphabet.
pub const ALPHABET_LEN: usize = 95;

/// Code point of the first alphabet character (space).
const FIRST: u8 = 0x20;

/// The fixed, ordered set of printable characters used by every wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alphabet;

impl Alphabet {
    /// Number of characters in the alphabet.
    pub const LEN: usize = ALPHABET_LEN;

    /// The alphabet characters in ascending code-point order.
    pub const CHARS: [char; ALPHABET_LEN] = build_chars();

    /// Returns `true` if `c` is one of the 95 printable characters.
    pub fn contains(c: char) -> bool {
        (' '..='~').contains(&c)
    }

    /// Returns the position of `c` in the alphabet, or `None` when `c` is
    /// outside it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotorcrypt::Alphabet;
    ///
    /// assert_eq!(Alphabet::index_of(' '), Some(0));
    /// assert_eq!(Alphabet::index_of('~'), Some(94));
    /// assert_eq!(Alphabet::index_of('\n'), None);
    /// ```
    pub fn index_of(c: char) -> Option<usize> {
        if Self::contains(c) {
            Some(c as usize - FIRST as usize)
        } else {
            None
        }
    }

    /// Returns the character at `index`, or `None` if `index >= 95`.
    pub fn char_at(index: usize) -> Option<char> {
        Self::CHARS.get(index).copied()
    }

    /// Identity permutation of alphabet indices.
    pub(crate) fn identity() -> [u8; ALPHABET_LEN] {
        let mut out = [0u8; ALPHABET_LEN];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = i as u8;
        }
        out
    }
}

const fn build_chars() -> [char; ALPHABET_LEN] {
    let mut out = [' '; ALPHABET_LEN];
    let mut i = 0;
    while i < ALPHABET_LEN {
        out[i] = (FIRST + i as u8) as char;
        i += 1;
    }
    out
}
