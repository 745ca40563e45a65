use std::io::{self, BufRead, ErrorKind, Write};

use crate::bitstream::BitWriter;
use crate::bitvec::BitVec;
use crate::lines::LineReader;
use crate::symbol::Symbol;
use crate::tree::CodeTable;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeSummary {

    /// Source symbols coded, line terminators included
    pub symbols: u64,
    /// Bits written, the end-of-stream code included
    pub bits: u64

}


/// Writes the code of every symbol of `source`, then the end-of-stream code.
///
/// The writer is left open; finishing it pads and flushes the last byte.
pub fn encode<R, W>(source: R, codes: &CodeTable, out: &mut BitWriter<W>) -> io::Result<EncodeSummary>
where
    R: BufRead,
    W: Write
{
    let start = out.bits_written();
    let mut symbols = 0;

    LineReader::new(source).for_each_symbol(|symbol| {
        out.write_path(code_for(codes, symbol)?)?;
        symbols += 1;
        Ok(())
    })?;

    out.write_path(code_for(codes, Symbol::EndOfStream)?)?;

    Ok(EncodeSummary {
        symbols,
        bits: out.bits_written() - start
    })
}


fn code_for(codes: &CodeTable, symbol: Symbol) -> io::Result<&BitVec> {
    codes.get(symbol).ok_or_else(|| io::Error::new(
        ErrorKind::InvalidInput,
        format!("symbol {} is not in the code table", symbol)
    ))
}
