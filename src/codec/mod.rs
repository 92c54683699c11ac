use log::debug;

use crate::{Symbol, bitstrings::{Bit, BitString}, frequency::FrequencyTable, huffman_tree::HuffmanTree, error::Result};

pub mod huffman_encoder;
pub mod huffman_decoder;

use huffman_encoder::HuffmanEncoder;
use huffman_decoder::HuffmanDecoder;

/// How the decoder treats a bit string that does not split exactly into
/// codes of the tree.
#[derive(Clone, Copy, Eq, PartialEq, Default, Debug)]
pub enum DecodeMode {
    /// Stop when the bits run out. An incomplete trailing code is dropped,
    /// and a single-leaf tree emits its symbol for every bit whatever its value.
    #[default]
    Permissive,
    /// Fail with `MalformedInput` on an incomplete trailing code, or on a bit
    /// that differs from the fixed code of a single-leaf tree.
    Strict,
}

#[derive(Clone, Copy, Eq, PartialEq, Default, Debug)]
pub struct CodecConfig {
    pub decode_mode: DecodeMode,
    /// Code given to every occurrence when the input has a single distinct symbol.
    pub single_symbol_bit: Bit,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_decode_mode(mut self, decode_mode: DecodeMode) -> Self {
        self.decode_mode = decode_mode;
        self
    }

    pub fn set_single_symbol_bit(mut self, single_symbol_bit: Bit) -> Self {
        self.single_symbol_bit = single_symbol_bit;
        self
    }
}

/// Output of an encode call. `tree` has to travel with `bits`: decoding
/// needs both.
#[derive(Clone, Debug)]
pub struct Encoded<S: Symbol> {
    pub bits: BitString,
    pub tree: HuffmanTree<S>,
    /// Per-symbol counts, each entry carrying its code.
    pub frequencies: FrequencyTable<S>,
}

impl<S: Symbol> Encoded<S> {
    pub fn into_parts(self) -> (BitString, HuffmanTree<S>) {
        (self.bits, self.tree)
    }
}

pub fn encode_with<S: Symbol>(input: &[S], config: &CodecConfig) -> Result<Encoded<S>> {
    let encoder = HuffmanEncoder::build(input, config)?;
    let bits = encoder.write_body(input)?;

    debug!("encoded {} symbols into {} bits", input.len(), bits.len());

    let (tree, frequencies) = encoder.into_parts();
    Ok(Encoded { bits, tree, frequencies })
}

pub fn decode_with<S: Symbol>(bits: &BitString, tree: &HuffmanTree<S>, config: &CodecConfig) -> Result<Vec<S>> {
    let decoded = HuffmanDecoder::new(tree, bits, config.decode_mode)?
        .map(|r| r.cloned())
        .collect::<Result<Vec<S>>>()?;

    debug!("decoded {} bits into {} symbols", bits.len(), decoded.len());

    Ok(decoded)
}

#[cfg(test)]
mod tests;
