use std::{fmt, str::FromStr};

use serde::{Serialize, Deserialize};

use crate::error::{HuffmanError, Result};

/// A single edge label of the prefix tree.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize, Debug)]
pub enum Bit {
    #[default]
    Zero,
    One,
}

impl Bit {
    #[inline(always)]
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl TryFrom<char> for Bit {
    type Error = HuffmanError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            _ => Err(HuffmanError::TypeMismatch(format!("{:?} is not a bit, expected '0' or '1'", c))),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A logical sequence of bits, kept as the characters `'0'` and `'1'`.
///
/// Nothing is packed into bytes: one character per bit. Every constructor
/// (deserialization included) checks that only `'0'` and `'1'` get in.
#[derive(Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize, Debug)]
#[serde(try_from = "String", into = "String")]
pub struct BitString {
    bits: String,
}

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { bits: String::with_capacity(capacity) }
    }

    #[inline(always)]
    pub fn push(&mut self, bit: Bit) {
        self.bits.push(bit.as_char());
    }

    /// Appends a whole code. `code` must itself be a bit string.
    #[inline(always)]
    pub fn push_code(&mut self, code: &BitString) {
        self.bits.push_str(&code.bits);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the bit at `index`, if in bounds.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<Bit> {
        match self.bits.as_bytes().get(index) {
            Some(b'0') => Some(Bit::Zero),
            Some(_) => Some(Bit::One),
            None => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.bits.bytes().map(|b| if b == b'0' { Bit::Zero } else { Bit::One })
    }

    pub fn as_str(&self) -> &str {
        &self.bits
    }

    pub fn starts_with(&self, other: &BitString) -> bool {
        self.bits.starts_with(&other.bits)
    }

    /// Reverses the bits in place. The code generator collects labels
    /// leaf-first and flips them once at the top.
    pub(crate) fn reverse(&mut self) {
        self.bits = self.bits.chars().rev().collect();
    }
}

impl FromStr for BitString {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some((i, c)) = s.char_indices().find(|&(_, c)| c != '0' && c != '1') {
            return Err(HuffmanError::TypeMismatch(
                format!("bit strings may only contain '0' and '1', found {:?} at byte {}", c, i)
            ));
        }

        Ok(Self { bits: s.to_owned() })
    }
}

impl TryFrom<String> for BitString {
    type Error = HuffmanError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<BitString> for String {
    fn from(bits: BitString) -> Self {
        bits.bits
    }
}

impl FromIterator<Bit> for BitString {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        let mut bits = BitString::new();
        for bit in iter {
            bits.push(bit);
        }
        bits
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bits)
    }
}
