//! Bit-granular I/O over byte streams.
//!
//! Bits are packed most-significant-bit first. The writer pads the last byte
//! with zero bits; nothing in the stream records how many of those bits are
//! padding, the decoder stops on the end-of-stream code instead.

use std::io::{self, ErrorKind, Read, Write};

use crate::bitvec::BitVec;


/// Packs single bits into bytes and writes them to `W`.
///
/// The partially filled last byte is flushed by [`BitWriter::finish`], or on
/// drop if the writer goes out of scope first.
pub struct BitWriter<W: Write> {

    inner: Option<W>,
    /// Byte being filled
    current: u8,
    /// How many bits of `current` are in use
    filled: u8,
    bits_written: u64

}

impl<W: Write> BitWriter<W> {

    pub fn new(inner: W) -> Self {
        Self {
            inner: Some(inner),
            current: 0,
            filled: 0,
            bits_written: 0
        }
    }


    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {

        self.current |= (bit as u8) << (7 - self.filled);
        self.filled += 1;
        self.bits_written += 1;

        if self.filled == 8 {
            self.flush_current()?;
        }

        Ok(())
    }


    pub fn write_path(&mut self, path: &BitVec) -> io::Result<()> {
        for bit in path.iter_bits() {
            self.write_bit(bit)?;
        }
        Ok(())
    }


    pub const fn bits_written(&self) -> u64 {
        self.bits_written
    }


    /// Flushes the padded last byte and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {

        if self.filled > 0 {
            self.flush_current()?;
        }

        // Only `finish` takes `inner`, and it consumes the writer
        let mut inner = self.inner.take()
            .expect("bit writer finished twice");

        inner.flush()?;

        Ok(inner)
    }


    fn flush_current(&mut self) -> io::Result<()> {

        if let Some(inner) = self.inner.as_mut() {
            inner.write_all(&[self.current])?;
        }

        self.current = 0;
        self.filled = 0;

        Ok(())
    }

}

impl<W: Write> Drop for BitWriter<W> {

    fn drop(&mut self) {
        if self.inner.is_some() {
            if self.filled > 0 {
                let _ = self.flush_current();
            }
            if let Some(inner) = self.inner.as_mut() {
                let _ = inner.flush();
            }
        }
    }
}


/// Reads a byte stream back one bit at a time.
pub struct BitReader<R: Read> {

    inner: R,
    current: u8,
    /// Bits of `current` not yet returned
    remaining: u8,
    bits_read: u64

}

impl<R: Read> BitReader<R> {

    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            current: 0,
            remaining: 0,
            bits_read: 0
        }
    }


    /// Returns the next bit, or `None` once the underlying source is exhausted.
    pub fn read_bit(&mut self) -> io::Result<Option<bool>> {

        if self.remaining == 0 {
            match self.next_byte()? {
                Some(byte) => {
                    self.current = byte;
                    self.remaining = 8;
                },
                None => return Ok(None),
            }
        }

        self.remaining -= 1;
        self.bits_read += 1;

        Ok(Some(
            (self.current >> self.remaining) & 1 == 1
        ))
    }


    pub const fn bits_read(&self) -> u64 {
        self.bits_read
    }


    /// Bits left in the byte currently being read.
    pub const fn pending_bits(&self) -> u8 {
        self.remaining
    }


    /// Consumes the rest of the source and returns how many whole bytes it held.
    pub fn remaining_bytes(&mut self) -> io::Result<u64> {
        io::copy(&mut self.inner, &mut io::sink())
    }


    fn next_byte(&mut self) -> io::Result<Option<u8>> {

        let mut buf = [0_u8; 1];

        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

}
