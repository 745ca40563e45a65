use std::io::{Read, Write};

use crate::bitstream::BitReader;
use crate::error::DecodeError;
use crate::symbol::Symbol;
use crate::tree::{Node, PrefixTree};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeSummary {

    /// Bytes written to the output
    pub bytes: u64,
    /// Bits consumed, the end-of-stream code included
    pub bits: u64

}


/// Walks `tree` bit by bit, writing the byte of every leaf reached, until the
/// end-of-stream leaf.
///
/// Nothing after the end-of-stream code is read as data. Only the padding of
/// the byte holding that code may follow it; whole bytes after it are
/// reported as [`DecodeError::TrailingData`]. Running out of bits first is
/// [`DecodeError::Truncated`].
pub fn decode<R, W>(tree: &PrefixTree, input: &mut BitReader<R>, mut out: W) -> Result<DecodeSummary, DecodeError>
where
    R: Read,
    W: Write
{
    let root = tree.root();
    let start = input.bits_read();
    let mut written = 0;

    let mut node = root;

    loop {

        let bit = input.read_bit()?
            .ok_or(DecodeError::Truncated { decoded: written })?;

        // A lone root leaf is coded with one bit
        let next = node.child(bit).unwrap_or(node);

        match next {

            Node::Parent { .. } => {
                node = next;
            },

            Node::Leaf { symbol: Symbol::EndOfStream, .. } => {
                break;
            },

            Node::Leaf { symbol: Symbol::Byte(b), .. } => {
                out.write_all(&[*b])?;
                written += 1;
                node = root;
            },
        }
    }

    let trailing = input.remaining_bytes()?;
    if trailing > 0 {
        return Err(DecodeError::TrailingData { bytes: trailing });
    }

    out.flush()?;

    Ok(DecodeSummary {
        bytes: written,
        bits: input.bits_read() - start
    })
}


#[cfg(test)]
mod tests {

    use std::io::Cursor;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::bitstream::BitWriter;
    use crate::encoder::encode;

    use super::*;


    fn encode_bytes(source: &[u8], tree: &PrefixTree) -> Vec<u8> {
        let mut writer = BitWriter::new(Vec::new());
        encode(source, &tree.code_table(), &mut writer).unwrap();
        writer.finish().unwrap()
    }


    fn decode_bytes(bits: &[u8], tree: &PrefixTree) -> Result<Vec<u8>, DecodeError> {
        let mut out = Vec::new();
        decode(tree, &mut BitReader::new(Cursor::new(bits)), &mut out)?;
        Ok(out)
    }


    #[test]
    fn small_coherency() {

        let text = b"AAAB";
        let tree = PrefixTree::from_bytes(text);

        assert_eq!(decode_bytes(&encode_bytes(text, &tree), &tree).unwrap(), text);
    }


    #[test]
    fn random_coherency() {

        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..100 {

            let len = rng.gen_range(0..3000);
            let alphabet = rng.gen_range(1..=255_u8);
            let data: Vec<u8> = (0..len).map(|_| rng.gen_range(0..=alphabet)).collect();

            let tree = PrefixTree::from_bytes(&data);

            assert_eq!(decode_bytes(&encode_bytes(&data, &tree), &tree).unwrap(), data);
        }
    }


    #[test]
    fn empty_stream_decodes_to_nothing() {

        let tree = PrefixTree::sentinel_only();
        let bits = encode_bytes(b"", &tree);

        let mut out = Vec::new();
        let summary = decode(&tree, &mut BitReader::new(Cursor::new(bits)), &mut out).unwrap();

        assert!(out.is_empty());
        assert_eq!(summary, DecodeSummary { bytes: 0, bits: 1 });
    }


    #[test]
    fn ignores_padding() {

        let tree = PrefixTree::from_bytes(b"AAAB");

        // "AAAB" then the sentinel, with the pad bit set: still one stray bit only
        assert_eq!(decode_bytes(&[0b1110_0011], &tree).unwrap(), b"AAAB");
    }


    #[test]
    fn stops_at_sentinel() {

        let tree = PrefixTree::from_bytes(b"AAAB");

        // A, sentinel, then bits that would decode as more As
        let mut out = Vec::new();
        let summary = decode(&tree, &mut BitReader::new(Cursor::new([0b1011_1111])), &mut out).unwrap();

        assert_eq!(out, b"A");
        assert_eq!(summary.bits, 3);
    }


    #[test]
    fn reports_truncation() {

        let text = b"the quick brown fox jumps over the lazy dog\n";
        let tree = PrefixTree::from_bytes(text);

        let mut bits = encode_bytes(text, &tree);
        bits.truncate(bits.len() / 2);

        assert!(matches!(decode_bytes(&bits, &tree), Err(DecodeError::Truncated { .. })));
        assert!(matches!(decode_bytes(&[], &tree), Err(DecodeError::Truncated { decoded: 0 })));
    }


    #[test]
    fn reports_trailing_bytes() {

        let tree = PrefixTree::from_bytes(b"AAAB");

        assert!(matches!(
            decode_bytes(&[0b1110_0010, 0, 0], &tree),
            Err(DecodeError::TrailingData { bytes: 2 })
        ));
    }

}
