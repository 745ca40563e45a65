use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::symbol::Symbol;


/// A code table that cannot describe a valid prefix tree.
#[derive(Error, Debug)]
pub enum TableError {

    #[error("could not read code table: {0}")]
    Io (#[from] io::Error),

    #[error("line {line}: expected a symbol value, found {text:?}")]
    InvalidSymbol { line: usize, text: String },

    #[error("line {line}: symbol value {value} is out of range 0..=256")]
    SymbolOutOfRange { line: usize, value: u64 },

    #[error("symbol {symbol} has no path line")]
    MissingPath { symbol: Symbol },

    #[error("line {line}: invalid character {found:?} in path")]
    InvalidPath { line: usize, found: char },

    #[error("line {line}: symbol {symbol} appears twice")]
    DuplicateSymbol { line: usize, symbol: Symbol },

    #[error("line {line}: path {path:?} of symbol {symbol} collides with another leaf")]
    PathCollision { line: usize, symbol: Symbol, path: String },

    #[error("branch {path:?} is missing a child")]
    DanglingBranch { path: String },

    #[error("code table is empty")]
    Empty,

    #[error("code table has no end-of-stream symbol")]
    MissingSentinel,

}


/// A bitstream that does not decode cleanly with the given tree.
#[derive(Error, Debug)]
pub enum DecodeError {

    #[error("could not read bitstream: {0}")]
    Io (#[from] io::Error),

    #[error("bitstream ended after {decoded} bytes without an end-of-stream code")]
    Truncated { decoded: u64 },

    #[error("{bytes} bytes follow the end-of-stream code")]
    TrailingData { bytes: u64 },

}


#[derive(Error, Debug)]
pub enum Error {

    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{}: {source}", .path.display())]
    Table { path: PathBuf, source: TableError },

    #[error(transparent)]
    Decode (#[from] DecodeError),

    #[error("cannot derive output names from {}", .0.display())]
    InvalidInputName (PathBuf),

    #[error("output {} is also an input", .0.display())]
    OverwritesInput (PathBuf),

}

impl Error {

    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }

}


pub type Result<T, E = Error> = std::result::Result<T, E>;
