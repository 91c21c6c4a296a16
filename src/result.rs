//! Error types and the related `Result<T>`

use std::io;
use std::num::ParseIntError;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

pub type ScanResult<T> = Result<T, ScanError>;

/// The single failure that stopped a scan.
///
/// Each variant renders as `cannot <action> "<path>": <cause>`.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The puzzle file couldn't be opened
    #[error("cannot open \"{path}\": {source}")]
    Open {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    /// The puzzle file was opened, but we couldn't find its size
    #[error("cannot examine \"{path}\": {source}")]
    Examine {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    /// The gzip stream was invalid or corrupt
    #[error("cannot decompress \"{path}\": {source}")]
    Decompress {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    /// The decompressed tarball had broken framing
    #[error("cannot read decompressed archive \"{path}\": {source}")]
    ReadArchive {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    /// A member looked like `<N>.png`, but N wasn't a usable index.
    #[error("cannot parse member name \"{name}\" in \"{path}\": {source}")]
    BadMemberName {
        path: Utf8PathBuf,
        name: String,
        #[source]
        source: ParseIntError,
    },

    /// Reading the `pala.desktop` member failed partway through.
    #[error("cannot read \"pala.desktop\" member in \"{path}\": {source}")]
    ReadDescriptor {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Describes what we were trying to do when things went wrong,
    /// as it appears in the rendered message.
    pub fn action(&self) -> String {
        match self {
            ScanError::Open { .. } => String::from("open"),
            ScanError::Examine { .. } => String::from("examine"),
            ScanError::Decompress { .. } => String::from("decompress"),
            ScanError::ReadArchive { .. } => String::from("read decompressed archive"),
            ScanError::BadMemberName { name, .. } => format!("parse member name \"{name}\" in"),
            ScanError::ReadDescriptor { .. } => String::from("read \"pala.desktop\" member in"),
        }
    }

    /// The puzzle file being scanned
    pub fn path(&self) -> &Utf8Path {
        match self {
            ScanError::Open { path, .. }
            | ScanError::Examine { path, .. }
            | ScanError::Decompress { path, .. }
            | ScanError::ReadArchive { path, .. }
            | ScanError::BadMemberName { path, .. }
            | ScanError::ReadDescriptor { path, .. } => path,
        }
    }
}
