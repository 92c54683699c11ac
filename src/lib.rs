//! Huffman coding over logical bit strings.
//!
//! `encode` counts the symbols of its input, builds a minimum-redundancy
//! prefix-code tree, and returns the concatenated codes as a string of
//! `'0'`/`'1'` together with the tree. `decode` walks that tree to get the
//! input back.
//!
//! ```
//! let (bits, tree) = huffman_rust::encode("The bird is the word").unwrap();
//! assert_eq!(huffman_rust::decode(&bits, &tree).unwrap(), "The bird is the word");
//! ```

use std::{fmt::Debug, hash::Hash};

pub mod bitstrings;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod huffman_tree;
pub mod properties;
pub mod utils;

pub use bitstrings::{Bit, BitString};
pub use codec::{CodecConfig, DecodeMode, Encoded, encode_with, decode_with};
pub use error::{HuffmanError, Result};
pub use huffman_tree::HuffmanTree;

/// Anything that can be counted and compared for identity can be coded.
pub trait Symbol: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> Symbol for T {}

/// Encodes the characters of `input`.
///
/// Fails with `InvalidInput` if `input` is empty.
pub fn encode(input: &str) -> Result<(BitString, HuffmanTree<char>)> {
    let symbols: Vec<char> = input.chars().collect();
    Ok(encode_symbols(&symbols)?.into_parts())
}

/// Decodes `bits` back into a string, permissively.
///
/// Fails with `TypeMismatch` if `tree` is not a valid Huffman tree.
pub fn decode(bits: &BitString, tree: &HuffmanTree<char>) -> Result<String> {
    Ok(decode_symbols(bits, tree)?.into_iter().collect())
}

pub fn encode_symbols<S: Symbol>(input: &[S]) -> Result<Encoded<S>> {
    encode_with(input, &CodecConfig::default())
}

pub fn decode_symbols<S: Symbol>(bits: &BitString, tree: &HuffmanTree<S>) -> Result<Vec<S>> {
    decode_with(bits, tree, &CodecConfig::default())
}
