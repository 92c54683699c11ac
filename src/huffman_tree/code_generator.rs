use log::debug;

use crate::{Symbol, bitstrings::BitString, frequency::FrequencyTable, error::{HuffmanError, Result}};

use super::{HuffmanTree, Node, NodeKind};

impl<S: Symbol> HuffmanTree<S> {
    /// Returns the code of `symbol`: the edge labels from the root down to
    /// its leaf. `None` if the symbol is not a leaf of this tree.
    ///
    /// Depth-first, low child before high child. The labels are collected
    /// leaf-first along the matched path and reversed once at the end.
    pub fn code_for(&self, symbol: &S) -> Option<BitString> {
        // `path[d]` is the node on the current path at depth `d`.
        let mut path: Vec<&Node<S>> = Vec::new();
        let mut stack = vec![(&self.root, 0)];

        while let Some((node, depth)) = stack.pop() {
            path.truncate(depth);
            path.push(node);

            match &node.kind {
                NodeKind::Leaf { symbol: s, .. } if s == symbol => {
                    let mut code: BitString = path.iter().rev().filter_map(|n| n.label).collect();
                    code.reverse();
                    return Some(code);
                },
                NodeKind::Leaf { .. } => {},
                NodeKind::Internal { low, high, .. } => {
                    stack.push((&**high, depth + 1));
                    stack.push((&**low, depth + 1));
                },
            }
        }

        None
    }

    /// Every symbol with its code, in a single walk, low side first.
    pub fn code_table(&self) -> Vec<(S, BitString)> {
        let mut table = Vec::new();
        let mut stack = vec![(&self.root, BitString::new())];

        while let Some((node, mut prefix)) = stack.pop() {
            if let Some(bit) = node.label {
                prefix.push(bit);
            }
            match &node.kind {
                NodeKind::Leaf { symbol, .. } => table.push((symbol.clone(), prefix)),
                NodeKind::Internal { low, high, .. } => {
                    stack.push((&**high, prefix.clone()));
                    stack.push((&**low, prefix));
                },
            }
        }

        table
    }

    /// Looks up the code of every distinct symbol of `frequencies` and caches
    /// it in the symbol's entry.
    ///
    /// A symbol missing from the tree means the tree was not built from this
    /// table, which is reported as an `InternalInvariantViolation`.
    pub fn assign_codes(&self, frequencies: &mut FrequencyTable<S>) -> Result<()> {
        let symbols: Vec<S> = frequencies.symbols().cloned().collect();

        for symbol in symbols.iter() {
            let code = self.code_for(symbol).ok_or_else(|| {
                HuffmanError::InternalInvariantViolation(format!("symbol {:?} has no leaf in the tree", symbol))
            })?;
            frequencies.set_code(symbol, code);
        }

        debug!("assigned codes to {} symbols", symbols.len());

        Ok(())
    }
}
