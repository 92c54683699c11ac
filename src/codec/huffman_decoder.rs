use std::fmt;

use log::trace;

use crate::{Symbol, bitstrings::{Bit, BitString}, huffman_tree::{HuffmanTree, Node}, error::{HuffmanError, Result}};

use super::DecodeMode;

/// Position of the decoder in the tree.
pub enum DecodeState<'a, S> {
    /// At the root, about to start a new code.
    AtRoot,
    /// Somewhere below the root, in the middle of a code or on its leaf.
    Descending(&'a Node<S>),
}

impl<'a, S> Clone for DecodeState<'a, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S> Copy for DecodeState<'a, S> {}

impl<'a, S> PartialEq for DecodeState<'a, S> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DecodeState::AtRoot, DecodeState::AtRoot) => true,
            (DecodeState::Descending(a), DecodeState::Descending(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl<'a, S: fmt::Debug> fmt::Debug for DecodeState<'a, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeState::AtRoot => f.write_str("AtRoot"),
            DecodeState::Descending(node) => match node.symbol() {
                Some(s) => write!(f, "Descending(leaf {:?})", s),
                None => write!(f, "Descending(internal, weight {})", node.weight()),
            },
        }
    }
}

/// One transition of the decoder.
#[derive(Eq, PartialEq, Debug)]
pub enum Step<'a, S> {
    /// Consumed a bit and moved one level down.
    Moved(Bit),
    /// Reached a leaf and went back to the root. No bit consumed.
    Emitted(&'a S),
    /// No bits left.
    Finished,
}

/// Walks a tree bit by bit, restarting at the root after every symbol.
///
/// Iterating yields the decoded symbols. The first error ends the iteration.
pub struct HuffmanDecoder<'a, S> {
    tree: &'a HuffmanTree<S>,
    bits: &'a BitString,
    mode: DecodeMode,
    state: DecodeState<'a, S>,
    index: usize,
    code_start: usize,
    finished: bool,
}

impl<'a, S: Symbol> HuffmanDecoder<'a, S> {
    /// Fails with `TypeMismatch` if `tree` does not pass validation.
    pub fn new(tree: &'a HuffmanTree<S>, bits: &'a BitString, mode: DecodeMode) -> Result<Self> {
        tree.validate()?;

        Ok(Self {
            tree,
            bits,
            mode,
            state: DecodeState::AtRoot,
            index: 0,
            code_start: 0,
            finished: false,
        })
    }

    #[inline(always)]
    pub fn state(&self) -> DecodeState<'a, S> {
        self.state
    }

    /// Index of the next bit to consume.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.index
    }

    /// Performs one transition.
    pub fn step(&mut self) -> Result<Step<'a, S>> {
        if self.finished {
            return Ok(Step::Finished);
        }

        let root = self.tree.root();

        // A lone leaf root: every bit is one occurrence of its symbol.
        if let Some(symbol) = root.symbol() {
            return match self.bits.get(self.index) {
                None => self.finish(),
                Some(bit) if self.mode == DecodeMode::Strict && Some(bit) != root.label => {
                    self.finished = true;
                    Err(HuffmanError::MalformedInput {
                        position: self.index,
                        reason: format!("bit {} is not the single-symbol code", bit),
                    })
                },
                Some(_) => {
                    self.index += 1;
                    Ok(Step::Emitted(symbol))
                },
            };
        }

        let current = match self.state {
            DecodeState::Descending(node) => {
                if let Some(symbol) = node.symbol() {
                    self.state = DecodeState::AtRoot;
                    return Ok(Step::Emitted(symbol));
                }
                node
            },
            DecodeState::AtRoot => {
                self.code_start = self.index;
                root
            },
        };

        let bit = match self.bits.get(self.index) {
            Some(bit) => bit,
            None => return self.finish(),
        };

        let next = current.child(bit).ok_or_else(|| {
            HuffmanError::InternalInvariantViolation("descended into a leaf".to_owned())
        })?;

        trace!("bit {} at {}", bit, self.index);

        self.state = DecodeState::Descending(next);
        self.index += 1;

        Ok(Step::Moved(bit))
    }

    fn finish(&mut self) -> Result<Step<'a, S>> {
        self.finished = true;

        if let DecodeState::Descending(_) = self.state {
            self.state = DecodeState::AtRoot;
            let dangling = self.index - self.code_start;

            if self.mode == DecodeMode::Strict {
                return Err(HuffmanError::MalformedInput {
                    position: self.code_start,
                    reason: format!("bit string ends {} bits into a code", dangling),
                });
            }

            trace!("dropping {} trailing bits of an incomplete code", dangling);
        }

        Ok(Step::Finished)
    }
}

impl<'a, S: Symbol> Iterator for HuffmanDecoder<'a, S> {
    type Item = Result<&'a S>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.step() {
                Ok(Step::Moved(_)) => continue,
                Ok(Step::Emitted(symbol)) => return Some(Ok(symbol)),
                Ok(Step::Finished) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
