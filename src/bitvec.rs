use std::fmt;
use std::str::FromStr;


/// A growable sequence of bits, packed MSB-first.
/// Used to hold the path from the root of a prefix tree to one of its leaves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitVec {

    /// The actual raw bits
    raw_data: Vec<u8>,
    /// How many bits of padding the last byte contains.
    /// Padding bits have no meaning
    last_byte_padding: u8

}

impl BitVec {

    pub const fn new() -> Self {
        Self {
            raw_data: Vec::new(),
            last_byte_padding: 0
        }
    }


    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw_data: Vec::with_capacity(least_bytes_repr_for_bits(capacity)),
            last_byte_padding: 0
        }
    }


    pub fn len_bits(&self) -> usize {
        self.raw_data.len() * 8 - self.last_byte_padding as usize
    }


    pub fn is_empty(&self) -> bool {
        self.raw_data.is_empty()
    }


    pub fn append_bit(&mut self, bit: bool) {

        if self.last_byte_padding == 0 {

            self.raw_data.push((bit as u8) << 7);
            self.last_byte_padding = 7;

        } else if let Some(last_byte) = self.raw_data.last_mut() {

            *last_byte |= (bit as u8) << (self.last_byte_padding - 1);

            self.last_byte_padding -= 1;
        }
    }


    /// Returns a copy of this path extended by one step.
    /// `false` is a step to the left child, `true` a step to the right one.
    pub fn step(&self, bit: bool) -> Self {
        let mut next = self.clone();
        next.append_bit(bit);
        next
    }


    pub fn step_left(&self) -> Self {
        self.step(false)
    }


    pub fn step_right(&self) -> Self {
        self.step(true)
    }


    pub fn get(&self, i: usize) -> Option<bool> {
        if i >= self.len_bits() {
            return None;
        }
        Some(
            (self.raw_data[i / 8] & (1_u8 << (7 - i % 8))) != 0
        )
    }


    pub fn iter_bits(&self) -> BitIterator<'_> {
        BitIterator {
            bits: self,
            i: 0,
        }
    }


    /// Whether `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &BitVec) -> bool {
        self.len_bits() <= other.len_bits()
            && self.iter_bits().zip(other.iter_bits()).all(|(a, b)| a == b)
    }


    pub fn from_bool_slice(bools: &[bool]) -> Self {

        let mut res = Self::with_capacity(bools.len());

        for &b in bools {
            res.append_bit(b)
        }

        res
    }


    pub fn to_bool_slice(&self) -> Box<[bool]> {
        self.iter_bits()
            .collect()
    }

}


pub const fn least_bytes_repr_for_bits(bit_count: usize) -> usize {
    bit_count / 8 + (bit_count % 8 != 0) as usize
}


impl FromIterator<bool> for BitVec {

    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut res = Self::new();
        for bit in iter {
            res.append_bit(bit);
        }
        res
    }
}


/// Renders the bits as a string of `'0'` and `'1'` characters.
impl fmt::Display for BitVec {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter_bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidBitChar (pub char);

impl FromStr for BitVec {
    type Err = InvalidBitChar;

    fn from_str(s: &str) -> Result<Self, Self::Err> {

        let mut res = Self::with_capacity(s.len());

        for ch in s.chars() {
            match ch {
                '0' => res.append_bit(false),
                '1' => res.append_bit(true),
                other => return Err(InvalidBitChar(other)),
            }
        }

        Ok(res)
    }
}


pub struct BitIterator<'a> {

    bits: &'a BitVec,
    i: usize

}

impl<'a> Iterator for BitIterator<'a> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {

        let bit = self.bits.get(self.i)?;

        self.i += 1;

        Some(bit)
    }


    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.bits.len_bits() - self.i;
        (left, Some(left))
    }
}

impl ExactSizeIterator for BitIterator<'_> {}
