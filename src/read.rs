//! Tools for reading a `.puzzle` file.
//!
//! A puzzle is a gzipped tarball. We walk its members once, in order,
//! never seeking, and pick out what we need along the way:
//!
//! - `<N>.png`: piece images, counted to spot gaps and duplicates.
//! - `image.jpg`: the source image, whose size we record.
//! - `pala.desktop`: the descriptor with the title, author, etc.
//!
//! Everything else is ignored.

use std::fs::File;
use std::io;
use std::sync::OnceLock;

use camino::{Utf8Path, Utf8PathBuf};
use log::*;
use regex::Regex;

use crate::decompress::GzipReader;
use crate::desktop;
use crate::pieces::PieceTally;
use crate::result::*;

/// The member holding the puzzle's source image
pub const IMAGE_MEMBER: &str = "image.jpg";

/// The member holding the puzzle's `key=value` descriptor
pub const DESKTOP_MEMBER: &str = "pala.desktop";

fn piece_name() -> &'static Regex {
    static PIECE_NAME: OnceLock<Regex> = OnceLock::new();
    PIECE_NAME.get_or_init(|| Regex::new(r"^([0-9]+)\.png$").expect("bad piece name regex"))
}

/// The number of pieces `pala.desktop` says the puzzle has
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum DeclaredPieces {
    /// No `PieceCount` key was found.
    #[default]
    Absent,
    /// The last `PieceCount` key held this number.
    Count(i64),
    /// The last `PieceCount` key wasn't a number.
    /// (A warning was recorded with its value.)
    Malformed,
}

impl DeclaredPieces {
    /// The count as a plain integer: 0 if absent, -1 if malformed.
    pub fn value(self) -> i64 {
        match self {
            DeclaredPieces::Absent => 0,
            DeclaredPieces::Count(n) => n,
            DeclaredPieces::Malformed => -1,
        }
    }
}

/// The interesting details from a `.puzzle` file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PuzzleInfo {
    /// The directory the puzzle file was found in
    pub dir: Utf8PathBuf,

    /// The name of the puzzle file itself
    pub file_name: String,

    /// The title given when the puzzle was created
    pub title: String,

    /// The painter or photographer, as given when the puzzle was created.
    /// Palapeli itself writes "?" when it doesn't know; we pass along whatever's there.
    pub author: String,

    /// The comment given when the puzzle was created, usually empty
    pub comment: String,

    /// Non-fatal problems: missing or duplicated pieces, bad piece counts.
    ///
    /// Descriptor problems come first, in line order,
    /// followed by piece problems in ascending piece order.
    pub warnings: Vec<String>,

    /// The number of `<N>.png` files, going by the highest N
    pub piece_files: u64,

    /// The number of pieces claimed by `pala.desktop`
    pub declared_pieces: DeclaredPieces,

    /// The size of `image.jpg` in bytes, as recorded in the tarball
    pub image_size: u64,

    /// The size of the `.puzzle` file in bytes
    pub puzzle_size: u64,
}

/// Reads a `.puzzle` file, returning its details or the first error found.
///
/// ```no_run
/// # use palapuzzle::*;
/// let info = scan_puzzle("/usr/share/palapeli/collection/castle-maintenon.puzzle")?;
/// println!("{} ({} pieces)", info.title, info.piece_files);
/// for w in &info.warnings {
///     eprintln!("warning: {w}");
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn scan_puzzle<P: AsRef<Utf8Path>>(path: P) -> ScanResult<PuzzleInfo> {
    let path = path.as_ref();
    info!("Scanning {path}");

    let file = File::open(path).map_err(|source| ScanError::Open {
        path: path.to_owned(),
        source,
    })?;
    let puzzle_size = file
        .metadata()
        .map_err(|source| ScanError::Examine {
            path: path.to_owned(),
            source,
        })?
        .len();

    let mut info = scan_archive(file, path, puzzle_size)?;
    info.dir = path.parent().map(Utf8Path::to_owned).unwrap_or_default();
    info.file_name = path.file_name().unwrap_or_default().to_owned();
    Ok(info)
}

/// Like [`scan_puzzle()`], but reads the puzzle from any byte stream.
///
/// `path` is only used to label errors, and `puzzle_size` is passed through to the result.
/// [`PuzzleInfo::dir`] and [`PuzzleInfo::file_name`] are left empty.
pub fn scan_archive<R: io::Read>(
    reader: R,
    path: &Utf8Path,
    puzzle_size: u64,
) -> ScanResult<PuzzleInfo> {
    let mut info = PuzzleInfo {
        puzzle_size,
        ..Default::default()
    };
    let mut tally = PieceTally::new();

    let mut archive = tar::Archive::new(GzipReader::new(reader));
    let framing_error = walk_members(&mut archive, path, &mut tally, &mut info)?;
    let mut stream = archive.into_inner();

    if let Some(source) = framing_error {
        return Err(if stream.failed() {
            ScanError::Decompress {
                path: path.to_owned(),
                source,
            }
        } else {
            ScanError::ReadArchive {
                path: path.to_owned(),
                source,
            }
        });
    }

    // tar stops at the first zero block, which leaves the gzip trailer unchecked.
    let trailing = io::copy(&mut stream, &mut io::sink()).map_err(|source| {
        ScanError::Decompress {
            path: path.to_owned(),
            source,
        }
    })?;
    trace!(
        "{trailing} bytes after the end of the tarball, {} decompressed in all",
        stream.decompressed()
    );

    tally.reconcile(&mut info.warnings);
    info.piece_files = tally.piece_files();
    debug!("{info:?}");
    Ok(info)
}

/// Visits each member of the tarball in order.
///
/// Errors from the tar reader are handed back (instead of being converted)
/// so that the caller can ask the decompressor whether it was to blame.
fn walk_members<R: io::Read>(
    archive: &mut tar::Archive<GzipReader<R>>,
    path: &Utf8Path,
    tally: &mut PieceTally,
    info: &mut PuzzleInfo,
) -> ScanResult<Option<io::Error>> {
    let members = match archive.entries() {
        Ok(m) => m,
        Err(e) => return Ok(Some(e)),
    };

    for member in members {
        let member = match member {
            Ok(m) => m,
            Err(e) => return Ok(Some(e)),
        };
        let name = String::from_utf8_lossy(&member.path_bytes()).into_owned();
        trace!("Member {name:?}, {} bytes", member.size());

        if let Some(caps) = piece_name().captures(&name) {
            // Palapeli numbers pieces from zero; anything past u32 is nonsense.
            let index: u32 = caps[1].parse().map_err(|source| ScanError::BadMemberName {
                path: path.to_owned(),
                name: name.clone(),
                source,
            })?;
            tally.record(index);
        } else if name == IMAGE_MEMBER {
            debug!("{IMAGE_MEMBER} is {} bytes", member.size());
            info.image_size = member.size();
        } else if name == DESKTOP_MEMBER {
            debug!("Parsing {DESKTOP_MEMBER}");
            desktop::parse_desktop_entry(member, info).map_err(|source| {
                ScanError::ReadDescriptor {
                    path: path.to_owned(),
                    source,
                }
            })?;
        }
    }
    Ok(None)
}
