use std::{cmp::{Ordering, Reverse}, collections::{BinaryHeap, HashSet}, fmt::{self, Write}};

use log::{debug, trace};
use serde::{Serialize, Deserialize};

use crate::{Symbol, bitstrings::Bit, frequency::FrequencyTable, error::{HuffmanError, Result}};

pub mod code_generator;

#[derive(Clone, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub enum NodeKind<S> {
    Leaf {
        symbol: S,
        weight: usize,
    },
    Internal {
        weight: usize,
        low: Box<Node<S>>,
        high: Box<Node<S>>,
    },
}

/// A node of the prefix tree together with the label of the edge that
/// attaches it to its parent.
///
/// `label` is `None` on the root, except for a root that is a lone leaf,
/// which carries the fixed single-symbol bit.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub struct Node<S> {
    pub label: Option<Bit>,
    pub kind: NodeKind<S>,
}

impl<S> Node<S> {
    pub fn leaf(symbol: S, weight: usize) -> Self {
        Self { label: None, kind: NodeKind::Leaf { symbol, weight } }
    }

    /// Joins two subtrees, labelling `low` with `0` and `high` with `1`.
    pub fn merge(mut low: Self, mut high: Self) -> Self {
        low.label = Some(Bit::Zero);
        high.label = Some(Bit::One);
        let weight = low.weight() + high.weight();

        Self {
            label: None,
            kind: NodeKind::Internal { weight, low: Box::new(low), high: Box::new(high) },
        }
    }

    #[inline(always)]
    pub fn weight(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { weight, .. } => *weight,
            NodeKind::Internal { weight, .. } => *weight,
        }
    }

    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// The symbol of a leaf, `None` for internal nodes.
    #[inline(always)]
    pub fn symbol(&self) -> Option<&S> {
        match &self.kind {
            NodeKind::Leaf { symbol, .. } => Some(symbol),
            NodeKind::Internal { .. } => None,
        }
    }

    /// The child reached by following `bit`, `None` for leaves.
    #[inline(always)]
    pub fn child(&self, bit: Bit) -> Option<&Node<S>> {
        match (&self.kind, bit) {
            (NodeKind::Internal { low, .. }, Bit::Zero) => Some(&**low),
            (NodeKind::Internal { high, .. }, Bit::One) => Some(&**high),
            (NodeKind::Leaf { .. }, _) => None,
        }
    }
}

/// Entry of the build heap. Ordered by weight first, then by insertion
/// sequence so that equal weights pop in the order they were pushed.
struct HeapNode<S> {
    weight: usize,
    seq: usize,
    node: Node<S>,
}

impl<S> Ord for HeapNode<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight.cmp(&other.weight).then(self.seq.cmp(&other.seq))
    }
}

impl<S> PartialOrd for HeapNode<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Eq for HeapNode<S> {}

impl<S> PartialEq for HeapNode<S> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

struct BuildHeap<S> {
    heap: BinaryHeap<Reverse<HeapNode<S>>>,
    next_seq: usize,
}

impl<S> BuildHeap<S> {
    fn push(&mut self, node: Node<S>) {
        let weight = node.weight();
        self.heap.push(Reverse(HeapNode { weight, seq: self.next_seq, node }));
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<Node<S>> {
        self.heap.pop().map(|Reverse(h)| h.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// A minimum-redundancy prefix-code tree. Built once, then only read.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub struct HuffmanTree<S> {
    root: Node<S>,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// A table with a single symbol yields a lone leaf root labelled with
    /// `single_symbol_bit`, so every occurrence still gets a one-bit code.
    pub fn build(frequencies: &FrequencyTable<S>, single_symbol_bit: Bit) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::InvalidInput("cannot build a tree without symbols".to_owned()));
        }

        let mut heap = BuildHeap { heap: BinaryHeap::with_capacity(frequencies.len()), next_seq: 0 };
        for (symbol, entry) in frequencies.iter() {
            heap.push(Node::leaf(symbol.clone(), entry.count));
        }

        if heap.len() == 1 {
            let mut root = heap.pop().ok_or_else(underflow)?;
            root.label = Some(single_symbol_bit);
            debug!("built single-leaf tree, fixed code {}", single_symbol_bit);
            return Ok(Self { root });
        }

        while heap.len() > 1 {
            let low = heap.pop().ok_or_else(underflow)?;
            let high = heap.pop().ok_or_else(underflow)?;

            trace!("merging weights {} + {}", low.weight(), high.weight());

            heap.push(Node::merge(low, high));
        }

        let root = heap.pop().ok_or_else(underflow)?;
        let tree = Self { root };

        debug!("built tree: {} leaves, weight {}, height {}", tree.leaf_count(), tree.weight(), tree.height());

        Ok(tree)
    }

    /// Counts `input` and builds its tree with the default single-symbol bit.
    pub fn from_symbols(input: &[S]) -> Result<Self> {
        Self::build(&FrequencyTable::count(input)?, Bit::default())
    }

    /// Checks the structural invariants of the tree.
    ///
    /// Trees coming out of `build` always pass. Deserialized trees may not:
    /// labels on the wrong side, a labelled internal root, weights that do
    /// not add up, zero-weight or duplicated leaves all fail with
    /// `TypeMismatch`.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(HuffmanError::TypeMismatch(format!("not a valid Huffman tree: {}", msg)));

        match (&self.root.kind, self.root.label) {
            (NodeKind::Leaf { .. }, None) => return invalid("a single-leaf root needs a fixed label".to_owned()),
            (NodeKind::Internal { .. }, Some(b)) => return invalid(format!("the root carries label {}", b)),
            _ => {},
        }

        let mut seen = HashSet::new();
        let mut stack = vec![&self.root];

        while let Some(node) = stack.pop() {
            match &node.kind {
                NodeKind::Leaf { symbol, weight } => {
                    if *weight == 0 {
                        return invalid(format!("leaf {:?} has zero weight", symbol));
                    }
                    if !seen.insert(symbol) {
                        return invalid(format!("symbol {:?} appears in more than one leaf", symbol));
                    }
                },
                NodeKind::Internal { weight, low, high } => {
                    if low.label != Some(Bit::Zero) {
                        return invalid("low child not labelled 0".to_owned());
                    }
                    if high.label != Some(Bit::One) {
                        return invalid("high child not labelled 1".to_owned());
                    }
                    if low.weight().checked_add(high.weight()) != Some(*weight) {
                        return invalid(format!("internal weight {} is not the sum of its children", weight));
                    }
                    stack.push(&**high);
                    stack.push(&**low);
                },
            }
        }

        Ok(())
    }

    #[inline(always)]
    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// Total weight, equal to the length of the input the tree was built from.
    #[inline(always)]
    pub fn weight(&self) -> usize {
        self.root.weight()
    }

    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    /// Length of the longest root-to-leaf path. Zero for a single-leaf tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(&self.root, 0)];
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            if let NodeKind::Internal { low, high, .. } = &node.kind {
                stack.push((&**high, depth + 1));
                stack.push((&**low, depth + 1));
            }
        }
        height
    }

    pub fn leaf_count(&self) -> usize {
        self.symbols().len()
    }

    /// The leaf symbols, low side first.
    pub fn symbols(&self) -> Vec<&S> {
        let mut symbols = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match &node.kind {
                NodeKind::Leaf { symbol, .. } => symbols.push(symbol),
                NodeKind::Internal { low, high, .. } => {
                    stack.push(&**high);
                    stack.push(&**low);
                },
            }
        }
        symbols
    }

    /// Indented dump of the tree, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(&self.root, 0)];

        while let Some((node, depth)) = stack.pop() {
            let indent = "  ".repeat(depth);
            let label = node.label.map_or_else(|| "root".to_owned(), |b| b.to_string());
            // Writing into a String cannot fail.
            let _ = match &node.kind {
                NodeKind::Leaf { symbol, weight } =>
                    writeln!(out, "{}{}-> Leaf: {:?} [weight: {}]", indent, label, symbol, weight),
                NodeKind::Internal { weight, low, high } => {
                    stack.push((&**high, depth + 1));
                    stack.push((&**low, depth + 1));
                    writeln!(out, "{}{}-> Internal [weight: {}]", indent, label, weight)
                },
            };
        }

        out
    }
}

impl<S: Symbol> fmt::Display for HuffmanTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn underflow() -> HuffmanError {
    HuffmanError::InternalInvariantViolation("build heap ran out of nodes".to_owned())
}
