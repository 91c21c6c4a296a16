//! palapuzzle reads the interesting details out of [Palapeli] `.puzzle` files:
//!
//! ```no_run
//! # use palapuzzle::*;
//! let info = scan_puzzle("castle.puzzle")?;
//! println!("{} by {}", info.title, info.author);
//! println!(
//!     "{} piece files, {} declared",
//!     info.piece_files,
//!     info.declared_pieces.value()
//! );
//! for warning in &info.warnings {
//!     println!("warning: {warning}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! A `.puzzle` file is a gzipped tarball holding the source image (`image.jpg`),
//! one `<N>.png` per piece, and a `pala.desktop` descriptor of `key=value` lines.
//! Unlike a Zip archive, there's no central directory to consult,
//! so we read the whole thing front to back exactly once.
//!
//! Problems with the puzzle's *contents* (missing pieces, duplicate pieces,
//! a nonsense piece count) don't stop the scan; they become
//! [`PuzzleInfo::warnings`]. Problems reading the file itself
//! stop the scan with a [`ScanError`](result::ScanError).
//!
//! [Palapeli]: https://apps.kde.org/palapeli/

pub mod read;
pub mod result;

pub use read::{scan_archive, scan_puzzle, DeclaredPieces, PuzzleInfo};
pub use result::{ScanError, ScanResult};

mod decompress;
mod desktop;
mod pieces;
