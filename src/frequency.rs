use std::io::{self, BufRead};

use crate::lines::LineReader;
use crate::symbol::{Symbol, SYMBOL_COUNT};


/// Occurrence counts for every symbol of one source.
///
/// The end-of-stream symbol always counts 1: it is coded exactly once, at the
/// end of every bitstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {

    counts: [u64; SYMBOL_COUNT]

}

impl FrequencyTable {

    pub fn new() -> Self {
        let mut counts = [0; SYMBOL_COUNT];
        counts[Symbol::EndOfStream.index()] = 1;
        Self { counts }
    }


    /// Counts one occurrence of `symbol`. Occurrences of the sentinel are ignored.
    pub fn record(&mut self, symbol: Symbol) {
        if !symbol.is_sentinel() {
            self.counts[symbol.index()] += 1;
        }
    }


    /// Counts every symbol of a source in one pass, line terminators included.
    pub fn from_reader<R: BufRead>(source: R) -> io::Result<Self> {

        let mut table = Self::new();

        LineReader::new(source).for_each_symbol(|symbol| {
            table.record(symbol);
            Ok(())
        })?;

        Ok(table)
    }


    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::new();
        for &b in bytes {
            table.record(Symbol::Byte(b));
        }
        table
    }


    pub fn count(&self, symbol: Symbol) -> u64 {
        self.counts[symbol.index()]
    }


    /// Symbols with a non-zero count and their counts, in ascending symbol order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        Symbol::all()
            .map(|symbol| (symbol, self.count(symbol)))
            .filter(|&(_, count)| count > 0)
    }


    /// Number of coded symbols, the sentinel included.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {

    use super::*;


    #[test]
    fn empty_source_has_only_sentinel() {

        let table = FrequencyTable::from_reader(&b""[..]).unwrap();

        assert_eq!(table.iter_nonzero().collect::<Vec<_>>(), [(Symbol::EndOfStream, 1)]);
        assert_eq!(table.total(), 1);
    }


    #[test]
    fn counts_line_terminators_once_per_line() {

        let table = FrequencyTable::from_reader(&b"ab\n\nb\nc"[..]).unwrap();

        assert_eq!(table.count(Symbol::Byte(b'\n')), 3);
        assert_eq!(table.count(Symbol::Byte(b'b')), 2);
        assert_eq!(table.count(Symbol::Byte(b'c')), 1);
        assert_eq!(table.total(), 8);
    }


    #[test]
    fn matches_byte_counting() {

        let text = b"the quick brown fox\njumps over\r\nthe lazy dog\n";

        let from_lines = FrequencyTable::from_reader(&text[..]).unwrap();

        assert_eq!(from_lines, FrequencyTable::from_bytes(text));
    }


    #[test]
    fn sentinel_count_is_fixed() {

        let mut table = FrequencyTable::from_bytes(b"AAAB");
        table.record(Symbol::EndOfStream);

        assert_eq!(
            table.iter_nonzero().collect::<Vec<_>>(),
            [(Symbol::Byte(b'A'), 3), (Symbol::Byte(b'B'), 1), (Symbol::EndOfStream, 1)]
        );
    }

}
