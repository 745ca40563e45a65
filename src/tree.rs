use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::bitvec::BitVec;
use crate::frequency::FrequencyTable;
use crate::symbol::{Symbol, SYMBOL_COUNT};


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {

    Parent { weight: u64, left: Box<Node>, right: Box<Node> },
    Leaf { weight: u64, symbol: Symbol },

}

impl Node {

    pub const fn weight(&self) -> u64 {
        match self {
            Node::Parent { weight, .. } |
            Node::Leaf { weight, .. }
                => *weight
        }
    }


    /// Joins two nodes under a new parent, `left` taking the 0 branch.
    pub fn merge(left: Node, right: Node) -> Self {
        Node::Parent {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right)
        }
    }


    /// The child reached by following `bit`, if this is a parent.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Parent { left, right, .. } => Some(if bit { right } else { left }),
            Node::Leaf { .. } => None,
        }
    }


    pub const fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }


    /// Visits every leaf below this node, left before right, with its path.
    fn walk_leaves<F>(&self, path: BitVec, visit: &mut F)
    where
        F: FnMut(Symbol, u64, &BitVec)
    {
        match self {

            Node::Parent { left, right, .. } => {
                left.walk_leaves(path.step_left(), visit);
                right.walk_leaves(path.step_right(), visit);
            },

            Node::Leaf { weight, symbol } => {
                visit(*symbol, *weight, &path);
            },
        }
    }

}


/// A node waiting in the build queue.
///
/// Orders so that `BinaryHeap` pops the lightest node first and, between
/// equal weights, the one queued earliest.
#[derive(Debug)]
struct Queued {

    weight: u64,
    order: usize,
    node: Node

}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.order == other.order
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        other.weight.cmp(&self.weight)
            .then_with(|| other.order.cmp(&self.order))
    }
}


/// Binary prefix-code tree. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTree {

    root: Node

}

impl PrefixTree {

    /// Builds a minimum-redundancy tree for the given counts.
    ///
    /// Leaves are queued in ascending symbol order with the end-of-stream
    /// symbol last; the two lightest nodes are merged repeatedly, the first
    /// one taken becoming the left child. Equal weights leave the queue in
    /// the order they entered it, merged parents included.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {

        let mut queue = BinaryHeap::with_capacity(SYMBOL_COUNT);
        let mut order = 0;

        let mut push = |queue: &mut BinaryHeap<Queued>, node: Node| {
            queue.push(Queued { weight: node.weight(), order, node });
            order += 1;
        };

        for (symbol, count) in frequencies.iter_nonzero() {
            push(&mut queue, Node::Leaf { weight: count, symbol });
        }

        loop {
            match (queue.pop(), queue.pop()) {

                (Some(first), Some(second)) => {
                    push(&mut queue, Node::merge(first.node, second.node));
                },

                (Some(last), None) => {
                    return Self { root: last.node };
                },

                // The end-of-stream leaf is always queued
                (None, _) => {
                    return Self::sentinel_only();
                },
            }
        }
    }


    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }


    pub(crate) const fn from_root(root: Node) -> Self {
        Self { root }
    }


    /// The tree of an empty source: a lone end-of-stream leaf.
    pub const fn sentinel_only() -> Self {
        Self {
            root: Node::Leaf { weight: 1, symbol: Symbol::EndOfStream }
        }
    }


    pub const fn root(&self) -> &Node {
        &self.root
    }


    /// Every leaf with its path, in left-then-right order.
    ///
    /// A tree made of a single leaf gives that leaf an empty path.
    pub fn leaf_paths(&self) -> Vec<(Symbol, BitVec)> {
        let mut paths = Vec::new();
        self.root.walk_leaves(BitVec::new(), &mut |symbol, _, path| {
            paths.push((symbol, path.clone()));
        });
        paths
    }


    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.root.walk_leaves(BitVec::new(), &mut |_, _, _| count += 1);
        count
    }


    /// Length of the longest path.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        self.root.walk_leaves(BitVec::new(), &mut |_, _, path| {
            depth = depth.max(path.len_bits());
        });
        depth
    }


    /// Sum over the leaves of weight times path length: the coded size in bits.
    pub fn weighted_path_length(&self) -> u64 {
        let mut total = 0;
        self.root.walk_leaves(BitVec::new(), &mut |_, weight, path| {
            total += weight * path.len_bits() as u64;
        });
        total
    }


    pub fn code_table(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }

}


/// Symbol to bit path lookup, used by the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {

    codes: Vec<Option<BitVec>>

}

impl CodeTable {

    /// Reads every leaf path off the tree.
    /// A lone root leaf, whose path is empty, is coded with a single 0 bit.
    pub fn from_tree(tree: &PrefixTree) -> Self {

        let mut codes = vec![None; SYMBOL_COUNT];

        for (symbol, path) in tree.leaf_paths() {
            let code = if path.is_empty() { path.step_left() } else { path };
            codes[symbol.index()] = Some(code);
        }

        Self { codes }
    }


    pub fn get(&self, symbol: Symbol) -> Option<&BitVec> {
        self.codes[symbol.index()].as_ref()
    }


    /// Coded symbols with their codes, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitVec)> + '_ {
        Symbol::all()
            .filter_map(|symbol| self.get(symbol).map(|code| (symbol, code)))
    }


    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }


    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

}


#[cfg(test)]
mod tests {

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;


    fn code_string(tree: &PrefixTree, symbol: Symbol) -> String {
        tree.code_table().get(symbol).unwrap().to_string()
    }


    /// Cost of an optimal code for `weights`, by plain repeated merging.
    fn reference_cost(mut weights: Vec<u64>) -> u64 {
        let mut cost = 0;
        while weights.len() > 1 {
            weights.sort_unstable_by(|a, b| b.cmp(a));
            let a = weights.pop().unwrap();
            let b = weights.pop().unwrap();
            cost += a + b;
            weights.push(a + b);
        }
        cost
    }


    fn random_frequencies(rng: &mut StdRng) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for _ in 0..rng.gen_range(1..40) {
            let byte: u8 = rng.gen();
            for _ in 0..rng.gen_range(1..200) {
                table.record(Symbol::Byte(byte));
            }
        }
        table
    }


    #[test]
    fn frequent_symbol_gets_shorter_code() {

        let tree = PrefixTree::from_bytes(b"AAAB");

        assert_eq!(code_string(&tree, Symbol::Byte(b'A')), "1");
        assert_eq!(code_string(&tree, Symbol::Byte(b'B')), "00");
        assert_eq!(code_string(&tree, Symbol::EndOfStream), "01");
        assert_eq!(tree.root().weight(), 5);
    }


    #[test]
    fn empty_source_builds_single_leaf() {

        let tree = PrefixTree::from_frequencies(&FrequencyTable::new());

        assert_eq!(tree, PrefixTree::sentinel_only());
        assert!(tree.root().is_leaf());
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.leaf_paths(), [(Symbol::EndOfStream, BitVec::new())]);

        assert_eq!(code_string(&tree, Symbol::EndOfStream), "0");
    }


    #[test]
    fn single_repeated_byte_gets_one_bit() {

        let tree = PrefixTree::from_bytes(b"ZZZZZZZZZZ");

        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(code_string(&tree, Symbol::EndOfStream), "0");
        assert_eq!(code_string(&tree, Symbol::Byte(b'Z')), "1");
    }


    #[test]
    fn ties_break_in_queue_order() {

        // Every weight is 1: a, b, c, d, then the sentinel
        let tree = PrefixTree::from_bytes(b"abcd");

        let paths: Vec<(Symbol, String)> = tree.leaf_paths()
            .into_iter()
            .map(|(symbol, path)| (symbol, path.to_string()))
            .collect();

        // (a b) and (c d) merge first, then the sentinel with (a b), then the rest
        assert_eq!(paths, [
            (Symbol::Byte(b'c'), "00".to_string()),
            (Symbol::Byte(b'd'), "01".to_string()),
            (Symbol::EndOfStream, "10".to_string()),
            (Symbol::Byte(b'a'), "110".to_string()),
            (Symbol::Byte(b'b'), "111".to_string()),
        ]);
    }


    #[test]
    fn build_is_reproducible() {

        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..20 {
            let frequencies = random_frequencies(&mut rng);
            assert_eq!(
                PrefixTree::from_frequencies(&frequencies).leaf_paths(),
                PrefixTree::from_frequencies(&frequencies).leaf_paths()
            );
        }
    }


    #[test]
    fn leaves_match_nonzero_symbols() {

        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..20 {

            let frequencies = random_frequencies(&mut rng);
            let tree = PrefixTree::from_frequencies(&frequencies);

            let mut leaves: Vec<Symbol> = tree.leaf_paths().into_iter().map(|(s, _)| s).collect();
            leaves.sort();

            let expected: Vec<Symbol> = frequencies.iter_nonzero().map(|(s, _)| s).collect();

            assert_eq!(leaves, expected);
            assert_eq!(tree.root().weight(), frequencies.total());
        }
    }


    #[test]
    fn codes_are_prefix_free() {

        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..20 {

            let tree = PrefixTree::from_frequencies(&random_frequencies(&mut rng));
            let codes = tree.code_table();

            for (a, code_a) in codes.iter() {
                for (b, code_b) in codes.iter() {
                    if a != b {
                        assert!(!code_a.is_prefix_of(code_b), "{} is a prefix of {}", a, b);
                    }
                }
            }
        }
    }


    #[test]
    fn kraft_sum_is_one() {

        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..20 {

            let tree = PrefixTree::from_frequencies(&random_frequencies(&mut rng));

            let kraft: f64 = tree.leaf_paths()
                .iter()
                .map(|(_, path)| 0.5_f64.powi(path.len_bits() as i32))
                .sum();

            assert!((kraft - 1.0).abs() < 1e-9);
        }
    }


    #[test]
    fn weighted_path_length_is_optimal() {

        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..50 {

            let frequencies = random_frequencies(&mut rng);
            let tree = PrefixTree::from_frequencies(&frequencies);

            let weights = frequencies.iter_nonzero().map(|(_, c)| c).collect();

            assert_eq!(tree.weighted_path_length(), reference_cost(weights));
        }
    }


    #[test]
    fn code_table_lists_every_leaf() {

        let tree = PrefixTree::from_bytes(b"hello world\n");
        let codes = tree.code_table();

        assert_eq!(codes.len(), tree.leaf_count());
        assert!(codes.get(Symbol::Byte(b'x')).is_none());
        assert!(codes.get(Symbol::EndOfStream).is_some());
    }

}
