//! Compression and expansion of files on disk.
//!
//! Compressing `dir/name.txt` writes the code table to `dir/name.code` and
//! the bitstream to `dir/name.short`; the default expansion target is
//! `dir/name.new`. When an operation fails, the files it was writing are
//! removed.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Seek};
use std::path::{Path, PathBuf};

use crate::bitstream::{BitReader, BitWriter};
use crate::decoder::{decode, DecodeSummary};
use crate::encoder::{encode, EncodeSummary};
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::table::{read_table, write_table};
use crate::tree::PrefixTree;


pub const TABLE_EXTENSION: &str = "code";
pub const BITSTREAM_EXTENSION: &str = "short";
pub const EXPANDED_EXTENSION: &str = "new";


/// Paths of the files derived from one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {

    pub table: PathBuf,
    pub bitstream: PathBuf,
    pub expanded: PathBuf

}

impl Artifacts {

    /// Siblings of `input` sharing its base name, the file name up to its first dot.
    pub fn for_input(input: &Path) -> Result<Self> {

        let base = input.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.split('.').next())
            .filter(|base| !base.is_empty())
            .ok_or_else(|| Error::InvalidInputName(input.to_path_buf()))?;

        let stem = input.with_file_name(base);

        let artifacts = Self {
            table: stem.with_extension(TABLE_EXTENSION),
            bitstream: stem.with_extension(BITSTREAM_EXTENSION),
            expanded: stem.with_extension(EXPANDED_EXTENSION)
        };

        // `name.code`, `name.short` and `name.new` would be their own output
        if let Some(clash) = artifacts.paths().find(|path| *path == input) {
            return Err(Error::OverwritesInput(clash.to_path_buf()));
        }

        Ok(artifacts)
    }


    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        [&self.table, &self.bitstream, &self.expanded]
            .into_iter()
            .map(PathBuf::as_path)
    }

}


#[derive(Debug, Clone)]
pub struct Compression {

    pub artifacts: Artifacts,
    pub tree: PrefixTree,
    pub summary: EncodeSummary

}


/// Compresses `input` into its code table and bitstream files.
///
/// The input is read twice: once to count symbols, once to encode them.
pub fn compress<P: AsRef<Path>>(input: P) -> Result<Compression> {

    let input = input.as_ref();
    let artifacts = Artifacts::for_input(input)?;

    let mut created = Vec::new();

    match compress_into(input, &artifacts, &mut created) {

        Ok((tree, summary)) => Ok(Compression { artifacts, tree, summary }),

        Err(e) => {
            // Files left by an earlier run are not ours to remove
            for path in created {
                discard(path);
            }
            Err(e)
        },
    }
}


/// Records in `created` every output it opens, so a failure can remove exactly those.
fn compress_into<'a>(
    input: &Path,
    artifacts: &'a Artifacts,
    created: &mut Vec<&'a Path>
) -> Result<(PrefixTree, EncodeSummary)> {

    let mut source = BufReader::new(
        File::open(input).map_err(Error::io(input))?
    );

    let frequencies = FrequencyTable::from_reader(&mut source).map_err(Error::io(input))?;
    let tree = PrefixTree::from_frequencies(&frequencies);

    let table = File::create(&artifacts.table).map_err(Error::io(&artifacts.table))?;
    created.push(&artifacts.table);
    write_table(&tree, BufWriter::new(table)).map_err(Error::io(&artifacts.table))?;

    source.rewind().map_err(Error::io(input))?;

    let bitstream = File::create(&artifacts.bitstream).map_err(Error::io(&artifacts.bitstream))?;
    created.push(&artifacts.bitstream);
    let mut writer = BitWriter::new(BufWriter::new(bitstream));

    let summary = encode(&mut source, &tree.code_table(), &mut writer)
        .map_err(Error::io(&artifacts.bitstream))?;

    writer.finish().map_err(Error::io(&artifacts.bitstream))?;

    Ok((tree, summary))
}


/// Expands `bitstream` into `output`, rebuilding the tree from the `table` file.
pub fn expand<P, Q, S>(bitstream: P, table: Q, output: S) -> Result<DecodeSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    S: AsRef<Path>
{
    let table = table.as_ref();

    if table == output.as_ref() {
        return Err(Error::OverwritesInput(table.to_path_buf()));
    }

    let file = File::open(table).map_err(Error::io(table))?;
    let tree = read_table(BufReader::new(file))
        .map_err(|source| Error::Table { path: table.to_path_buf(), source })?;

    expand_with_tree(&tree, bitstream, output)
}


/// Expands `bitstream` into `output` with a tree already in memory.
pub fn expand_with_tree<P, Q>(tree: &PrefixTree, bitstream: P, output: Q) -> Result<DecodeSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>
{
    let bitstream = bitstream.as_ref();
    let output = output.as_ref();

    if bitstream == output {
        return Err(Error::OverwritesInput(output.to_path_buf()));
    }

    let input = File::open(bitstream).map_err(Error::io(bitstream))?;
    let out = File::create(output).map_err(Error::io(output))?;

    let result = decode(
        tree,
        &mut BitReader::new(BufReader::new(input)),
        BufWriter::new(out)
    );

    result.map_err(|e| {
        discard(output);
        Error::from(e)
    })
}


fn discard(path: &Path) {
    // Best effort
    let _ = fs::remove_file(path);
}


#[cfg(test)]
mod tests {

    use super::*;


    #[test]
    fn derives_sibling_names() {

        let artifacts = Artifacts::for_input(Path::new("assets/story.txt")).unwrap();

        assert_eq!(artifacts.table, Path::new("assets/story.code"));
        assert_eq!(artifacts.bitstream, Path::new("assets/story.short"));
        assert_eq!(artifacts.expanded, Path::new("assets/story.new"));
    }


    #[test]
    fn base_name_stops_at_first_dot() {

        let artifacts = Artifacts::for_input(Path::new("archive.tar.txt")).unwrap();
        assert_eq!(artifacts.table, Path::new("archive.code"));

        let artifacts = Artifacts::for_input(Path::new("README")).unwrap();
        assert_eq!(artifacts.bitstream, Path::new("README.short"));
    }


    #[test]
    fn rejects_inputs_named_like_outputs() {

        for name in ["data.code", "data.short", "data.new", "dir/data.short"] {
            assert!(matches!(
                Artifacts::for_input(Path::new(name)),
                Err(Error::OverwritesInput(path)) if path == Path::new(name)
            ));
        }

        // Only the base name is shared: a different extension is fine
        assert!(Artifacts::for_input(Path::new("data.short.txt")).is_ok());
    }


    #[test]
    fn rejects_nameless_inputs() {
        assert!(matches!(Artifacts::for_input(Path::new(".hidden")), Err(Error::InvalidInputName(_))));
        assert!(matches!(Artifacts::for_input(Path::new("/")), Err(Error::InvalidInputName(_))));
    }

}
