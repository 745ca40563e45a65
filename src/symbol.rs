use std::fmt;


/// Number of distinct symbols: every byte value plus the end-of-stream marker.
pub const SYMBOL_COUNT: usize = 257;


/// A unit of the coded alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {

    Byte (u8),
    /// Marks the end of the meaningful data in a bitstream. Never occurs in a source.
    EndOfStream

}

impl Symbol {

    pub const SENTINEL_VALUE: u16 = 256;


    /// Numeric form used in code tables, in `0..=256`.
    pub const fn value(self) -> u16 {
        match self {
            Symbol::Byte(b) => b as u16,
            Symbol::EndOfStream => Self::SENTINEL_VALUE,
        }
    }


    pub const fn from_value(value: u16) -> Option<Self> {
        if value < Self::SENTINEL_VALUE {
            Some(Symbol::Byte(value as u8))
        } else if value == Self::SENTINEL_VALUE {
            Some(Symbol::EndOfStream)
        } else {
            None
        }
    }


    /// Dense index into per-symbol arrays.
    pub const fn index(self) -> usize {
        self.value() as usize
    }


    pub const fn is_sentinel(self) -> bool {
        matches!(self, Symbol::EndOfStream)
    }


    /// Every symbol in ascending value order, the sentinel last.
    pub fn all() -> impl Iterator<Item = Symbol> {
        (0..=Self::SENTINEL_VALUE).filter_map(Self::from_value)
    }

}

impl From<u8> for Symbol {
    fn from(b: u8) -> Self {
        Symbol::Byte(b)
    }
}

impl fmt::Display for Symbol {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Byte(b) if b.is_ascii_graphic() => write!(f, "'{}' ({})", *b as char, b),
            Symbol::Byte(b) => write!(f, "{}", b),
            Symbol::EndOfStream => f.write_str("end-of-stream"),
        }
    }
}
