//! Parsing for the `pala.desktop` member, a freedesktop-style `key=value` file.
//!
//! We only care about a handful of keys. Everything else, including
//! `[Group]` headers and lines we can't make sense of, is skipped.

use std::io::{self, BufRead, BufReader, Read};
use std::sync::OnceLock;

use log::*;
use regex::Regex;

use crate::read::{DeclaredPieces, PuzzleInfo};

/// A key can't contain `[` (so group headers never match) or `=`.
fn key_value() -> &'static Regex {
    static KEY_VALUE: OnceLock<Regex> = OnceLock::new();
    KEY_VALUE.get_or_init(|| Regex::new(r"^([^\[=]+)=(.*)$").expect("bad key=value regex"))
}

/// Reads `pala.desktop` line by line, filling in `out`.
///
/// Bad values are recorded in `out.warnings`;
/// only a failure of the underlying reader is an error.
pub fn parse_desktop_entry<R: Read>(reader: R, out: &mut PuzzleInfo) -> io::Result<()> {
    let reader = BufReader::new(reader);
    for line in reader.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        let line = String::from_utf8_lossy(&line);
        if let Some(caps) = key_value().captures(&line) {
            apply(&caps[1], caps[2].trim(), out);
        }
    }
    Ok(())
}

fn apply(key: &str, value: &str, out: &mut PuzzleInfo) {
    match key {
        "Name" => out.title = value.to_owned(),
        "X-KDE-PluginInfo-Author" => out.author = value.to_owned(),
        "Comment" => out.comment = value.to_owned(),
        "PieceCount" | "020_PieceCount" => {
            out.declared_pieces = match value.parse() {
                Ok(n) => DeclaredPieces::Count(n),
                Err(_) => {
                    let warning = format!("bad PieceCount {value:?}");
                    warn!("{warning}");
                    out.warnings.push(warning);
                    DeclaredPieces::Malformed
                }
            };
        }
        _ => trace!("Ignoring key {key:?}"),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(text: &str) -> PuzzleInfo {
        let mut info = PuzzleInfo::default();
        parse_desktop_entry(text.as_bytes(), &mut info).unwrap();
        info
    }

    #[test]
    fn known_keys() {
        let info = parse(
            "[Desktop Entry]\n\
             Name=Sunset over the bay\n\
             Comment=  taken in 2009  \n\
             X-KDE-PluginInfo-Author=Jane Doe\n\
             \n\
             [Collection]\n\
             020_PieceCount=120\n",
        );
        assert_eq!(info.title, "Sunset over the bay");
        assert_eq!(info.comment, "taken in 2009");
        assert_eq!(info.author, "Jane Doe");
        assert_eq!(info.declared_pieces, DeclaredPieces::Count(120));
        assert!(info.warnings.is_empty());
    }

    #[test]
    fn crlf_and_later_keys_win() {
        let info = parse("Name=First\r\nName=Second\r\nPieceCount=4\r\n");
        assert_eq!(info.title, "Second");
        assert_eq!(info.declared_pieces, DeclaredPieces::Count(4));
    }

    #[test]
    fn bad_piece_count() {
        let info = parse("PieceCount=abc\n");
        assert_eq!(info.declared_pieces, DeclaredPieces::Malformed);
        assert_eq!(info.declared_pieces.value(), -1);
        assert_eq!(info.warnings, vec!["bad PieceCount \"abc\""]);
    }

    #[test]
    fn bad_piece_count_then_good() {
        let info = parse("PieceCount=lots\nPieceCount=12\n");
        assert_eq!(info.declared_pieces, DeclaredPieces::Count(12));
        assert_eq!(info.warnings.len(), 1);
    }

    #[test]
    fn unknown_and_malformed_lines_are_ignored() {
        let info = parse(
            "[Desktop Entry\n\
             [Weird]=value\n\
             no equals sign here\n\
             =no key\n\
             name=lowercase key\n\
             Name =space before equals\n\
             X-Something=else\n",
        );
        assert_eq!(info, PuzzleInfo::default());
    }

    #[test]
    fn values_may_contain_equals() {
        let info = parse("Comment=a=b\n");
        assert_eq!(info.comment, "a=b");
    }

    #[test]
    fn missing_final_newline() {
        let info = parse("Name=Foo");
        assert_eq!(info.title, "Foo");
        assert_eq!(info.declared_pieces, DeclaredPieces::Absent);
        assert_eq!(info.declared_pieces.value(), 0);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn reader_errors_propagate() {
        let mut info = PuzzleInfo::default();
        let e = parse_desktop_entry(Broken, &mut info).unwrap_err();
        assert_eq!(e.to_string(), "disk on fire");
    }
}
