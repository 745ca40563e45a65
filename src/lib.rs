//! Lossless compression with a minimum-redundancy prefix code.
//!
//! Compression counts the symbols of a source, builds a prefix tree from the
//! counts, writes the tree out as a code table and packs the source into a
//! bitstream. The bitstream carries no length: it ends with the code of a
//! reserved end-of-stream symbol, after which at most seven zero bits pad the
//! last byte.
//!
//! ```no_run
//! use prefix_tree_compression::{compress, expand};
//!
//! let compression = compress("assets/story.txt")?;
//! let artifacts = &compression.artifacts;
//! expand(&artifacts.bitstream, &artifacts.table, &artifacts.expanded)?;
//! # Ok::<(), prefix_tree_compression::Error>(())
//! ```

mod bitstream;
mod bitvec;
mod decoder;
mod encoder;
mod error;
mod files;
mod frequency;
mod lines;
mod symbol;
mod table;
mod tree;

use std::io::{self, BufRead, Cursor, Seek, Write};

pub use bitstream::{BitReader, BitWriter};
pub use bitvec::{BitVec, InvalidBitChar};
pub use decoder::{decode, DecodeSummary};
pub use encoder::{encode, EncodeSummary};
pub use error::{DecodeError, Error, Result, TableError};
pub use files::{
    compress, expand, expand_with_tree, Artifacts, Compression,
    BITSTREAM_EXTENSION, EXPANDED_EXTENSION, TABLE_EXTENSION
};
pub use frequency::FrequencyTable;
pub use lines::{Line, LineReader, LINE_TERMINATOR};
pub use symbol::{Symbol, SYMBOL_COUNT};
pub use table::{read_table, table_string, write_table};
pub use tree::{CodeTable, Node, PrefixTree};


/// Two-pass compression of a seekable source into a code table and a bitstream.
///
/// The source is rewound between counting and encoding.
pub fn compress_with<R, T, W>(source: &mut R, table_out: T, bits_out: W) -> io::Result<(PrefixTree, EncodeSummary)>
where
    R: BufRead + Seek,
    T: Write,
    W: Write
{
    let frequencies = FrequencyTable::from_reader(&mut *source)?;
    let tree = PrefixTree::from_frequencies(&frequencies);

    write_table(&tree, table_out)?;

    source.rewind()?;

    let mut writer = BitWriter::new(bits_out);
    let summary = encode(&mut *source, &tree.code_table(), &mut writer)?;
    writer.finish()?;

    Ok((tree, summary))
}


/// Compresses `data` in memory, returning the tree and the bitstream.
pub fn compress_bytes(data: &[u8]) -> io::Result<(PrefixTree, Vec<u8>)> {

    let mut bits = Vec::new();
    let (tree, _) = compress_with(&mut Cursor::new(data), io::sink(), &mut bits)?;

    Ok((tree, bits))
}


pub fn expand_bytes(tree: &PrefixTree, bits: &[u8]) -> Result<Vec<u8>, DecodeError> {

    let mut out = Vec::new();
    decode(tree, &mut BitReader::new(bits), &mut out)?;

    Ok(out)
}
