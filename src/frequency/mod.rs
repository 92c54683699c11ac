use std::collections::HashMap;

use log::debug;

use crate::{Symbol, bitstrings::BitString, error::{HuffmanError, Result}};

/// Occurrence count of one distinct symbol, plus its code once the code
/// generator has run.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FrequencyEntry {
    pub count: usize,
    pub code: Option<BitString>,
}

impl FrequencyEntry {
    fn new() -> Self {
        Self { count: 0, code: None }
    }
}

/// Maps every distinct symbol of an input to its `FrequencyEntry`.
///
/// Entries are kept in order of first occurrence, which the tree builder
/// relies on to break weight ties the same way on every run.
#[derive(Clone, Debug)]
pub struct FrequencyTable<S: Symbol> {
    index: HashMap<S, usize>,
    entries: Vec<(S, FrequencyEntry)>,
    total: usize,
}

impl<S: Symbol> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self { index: HashMap::new(), entries: Vec::new(), total: 0 }
    }
}

impl<S: Symbol> FrequencyTable<S> {
    /// Counts the occurrences of each symbol of `input`.
    ///
    /// Fails with `InvalidInput` on an empty sequence: it has no valid code.
    pub fn count(input: &[S]) -> Result<Self> {
        if input.is_empty() {
            return Err(HuffmanError::InvalidInput("cannot encode an empty sequence".to_owned()));
        }

        let mut table = Self::default();
        for symbol in input {
            table.add(symbol);
        }

        debug!("counted {} symbols, {} distinct", table.total, table.entries.len());

        Ok(table)
    }

    fn add(&mut self, symbol: &S) {
        let entries = &mut self.entries;
        let idx = *self.index.entry(symbol.clone()).or_insert_with(|| {
            entries.push((symbol.clone(), FrequencyEntry::new()));
            entries.len() - 1
        });
        self.entries[idx].1.count += 1;
        self.total += 1;
    }

    #[inline(always)]
    pub fn get(&self, symbol: &S) -> Option<&FrequencyEntry> {
        self.index.get(symbol).map(|&i| &self.entries[i].1)
    }

    #[inline(always)]
    pub fn code(&self, symbol: &S) -> Option<&BitString> {
        self.get(symbol).and_then(|e| e.code.as_ref())
    }

    /// Caches `code` for `symbol`. Returns `false` if the symbol is unknown.
    pub fn set_code(&mut self, symbol: &S, code: BitString) -> bool {
        match self.index.get(symbol) {
            Some(&i) => {
                self.entries[i].1.code = Some(code);
                true
            },
            None => false,
        }
    }

    /// Number of distinct symbols.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    #[inline(always)]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Iterates the entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &FrequencyEntry)> {
        self.entries.iter().map(|(s, e)| (s, e))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &S> {
        self.entries.iter().map(|(s, _)| s)
    }
}

#[cfg(test)]
mod tests;
