//! Text form of a prefix tree.
//!
//! Each leaf is written as two lines: its symbol value in decimal, then its
//! path as `0` (left) and `1` (right) characters. Leaves appear in
//! left-then-right order, so writing the same tree always gives the same
//! bytes. A tree made of one leaf writes an empty path.

use std::io::{self, BufRead, Write};

use crate::bitvec::{BitVec, InvalidBitChar};
use crate::error::TableError;
use crate::symbol::{Symbol, SYMBOL_COUNT};
use crate::tree::{Node, PrefixTree};


pub fn write_table<W: Write>(tree: &PrefixTree, mut out: W) -> io::Result<()> {

    for (symbol, path) in tree.leaf_paths() {
        writeln!(out, "{}", symbol.value())?;
        writeln!(out, "{}", path)?;
    }

    out.flush()
}


pub fn table_string(tree: &PrefixTree) -> String {
    tree.leaf_paths()
        .iter()
        .map(|(symbol, path)| format!("{}\n{}\n", symbol.value(), path))
        .collect()
}


/// Rebuilds a tree from its text form.
///
/// Records may come in any order. The table is rejected if it would leave a
/// leaf with children, two symbols on one leaf, a branch with a missing child,
/// or no end-of-stream leaf.
pub fn read_table<R: BufRead>(input: R) -> Result<PrefixTree, TableError> {

    let mut root = Slot::Vacant;
    let mut seen = [false; SYMBOL_COUNT];

    let mut lines = input.lines().enumerate().map(|(i, line)| (i + 1, line));

    while let Some((symbol_line, text)) = lines.next() {

        let symbol = parse_symbol(symbol_line, &text?)?;

        let (path_line, path_text) = lines.next()
            .ok_or(TableError::MissingPath { symbol })?;
        let path_text = path_text?;
        let path = parse_path(path_line, &path_text)?;

        if seen[symbol.index()] {
            return Err(TableError::DuplicateSymbol { line: symbol_line, symbol });
        }
        seen[symbol.index()] = true;

        root.place(&path, symbol)
            .map_err(|()| TableError::PathCollision {
                line: path_line,
                symbol,
                path: path.to_string()
            })?;
    }

    if let Slot::Vacant = root {
        return Err(TableError::Empty);
    }

    if !seen[Symbol::EndOfStream.index()] {
        return Err(TableError::MissingSentinel);
    }

    Ok(PrefixTree::from_root(root.into_node(BitVec::new())?))
}


fn parse_symbol(line: usize, text: &str) -> Result<Symbol, TableError> {

    let value: u64 = text.trim().parse()
        .map_err(|_| TableError::InvalidSymbol { line, text: text.to_string() })?;

    u16::try_from(value).ok()
        .and_then(Symbol::from_value)
        .ok_or(TableError::SymbolOutOfRange { line, value })
}


fn parse_path(line: usize, text: &str) -> Result<BitVec, TableError> {
    text.trim_end_matches('\r')
        .parse()
        .map_err(|e: InvalidBitChar| TableError::InvalidPath { line, found: e.0 })
}


/// A tree position while a table is being applied.
enum Slot {

    Vacant,
    Leaf (Symbol),
    Branch (Box<Slot>, Box<Slot>),

}

impl Slot {

    /// Puts a leaf at the end of `path`, opening branches on the way.
    fn place(&mut self, path: &BitVec, symbol: Symbol) -> Result<(), ()> {

        let mut slot = self;

        for bit in path.iter_bits() {

            if matches!(*slot, Slot::Vacant) {
                *slot = Slot::Branch(Box::new(Slot::Vacant), Box::new(Slot::Vacant));
            }

            slot = match slot {
                Slot::Branch(left, right) => if bit { right.as_mut() } else { left.as_mut() },
                // Passing through a leaf
                Slot::Leaf(_) | Slot::Vacant => return Err(()),
            };
        }

        if matches!(*slot, Slot::Vacant) {
            *slot = Slot::Leaf(symbol);
            Ok(())
        } else {
            Err(())
        }
    }


    fn into_node(self, path: BitVec) -> Result<Node, TableError> {
        match self {

            Slot::Leaf(symbol) => Ok(Node::Leaf { weight: 0, symbol }),

            Slot::Branch(left, right) => {
                let left = left.into_node(path.step_left())?;
                let right = right.into_node(path.step_right())?;
                Ok(Node::merge(left, right))
            },

            Slot::Vacant => Err(TableError::DanglingBranch { path: parent_path(&path) }),
        }
    }

}


fn parent_path(path: &BitVec) -> String {
    let mut text = path.to_string();
    text.pop();
    text
}
