use crate::{Symbol, bitstrings::BitString, frequency::FrequencyTable, huffman_tree::HuffmanTree, error::{HuffmanError, Result}};

use super::CodecConfig;

/// Holds the tree built for an input and the code of each of its symbols.
pub struct HuffmanEncoder<S: Symbol> {
    tree: HuffmanTree<S>,
    frequencies: FrequencyTable<S>,
}

impl<S: Symbol> HuffmanEncoder<S> {
    /// Counts `input`, builds its tree and caches one code per distinct symbol.
    pub fn build(input: &[S], config: &CodecConfig) -> Result<Self> {
        let mut frequencies = FrequencyTable::count(input)?;
        let tree = HuffmanTree::build(&frequencies, config.single_symbol_bit)?;
        tree.assign_codes(&mut frequencies)?;

        Ok(Self { tree, frequencies })
    }

    /// Appends the code of `symbol` to `out`.
    #[inline(always)]
    pub fn write(&self, symbol: &S, out: &mut BitString) -> Result<()> {
        let code = self.frequencies.code(symbol).ok_or_else(|| {
            HuffmanError::InternalInvariantViolation(format!("no code generated for symbol {:?}", symbol))
        })?;
        out.push_code(code);
        Ok(())
    }

    /// Concatenates the codes of `input`, in order and without separators.
    pub fn write_body(&self, input: &[S]) -> Result<BitString> {
        let capacity = input.iter()
            .map(|s| self.frequencies.code(s).map_or(0, BitString::len))
            .sum();
        let mut out = BitString::with_capacity(capacity);

        for symbol in input {
            self.write(symbol, &mut out)?;
        }

        Ok(out)
    }

    pub fn tree(&self) -> &HuffmanTree<S> {
        &self.tree
    }

    pub fn frequencies(&self) -> &FrequencyTable<S> {
        &self.frequencies
    }

    pub fn into_parts(self) -> (HuffmanTree<S>, FrequencyTable<S>) {
        (self.tree, self.frequencies)
    }
}
