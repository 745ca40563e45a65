//! Line segmentation of a byte source.

use std::io::{self, BufRead};

use crate::symbol::Symbol;


pub const LINE_TERMINATOR: u8 = b'\n';


/// One line of the source, with its terminator stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {

    pub bytes: &'a [u8],
    /// Whether the source had a terminator after this line.
    /// Only the very last line of a source can lack one.
    pub terminated: bool

}

impl Line<'_> {

    /// The symbols making up this line, terminator included.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.bytes.iter()
            .map(|&b| Symbol::Byte(b))
            .chain(self.terminated.then_some(Symbol::Byte(LINE_TERMINATOR)))
    }

}


/// Reads a source line by line, reusing one buffer.
pub struct LineReader<R> {

    inner: R,
    buf: Vec<u8>

}

impl<R: BufRead> LineReader<R> {

    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new()
        }
    }


    pub fn next_line(&mut self) -> io::Result<Option<Line<'_>>> {

        self.buf.clear();

        if self.inner.read_until(LINE_TERMINATOR, &mut self.buf)? == 0 {
            return Ok(None);
        }

        let terminated = self.buf.last() == Some(&LINE_TERMINATOR);
        let len = self.buf.len() - terminated as usize;

        Ok(Some(Line {
            bytes: &self.buf[..len],
            terminated
        }))
    }


    /// Calls `f` with every symbol of the source, in order.
    pub fn for_each_symbol<F>(&mut self, mut f: F) -> io::Result<()>
    where
        F: FnMut(Symbol) -> io::Result<()>
    {
        while let Some(line) = self.next_line()? {
            for symbol in line.symbols() {
                f(symbol)?;
            }
        }
        Ok(())
    }

}
