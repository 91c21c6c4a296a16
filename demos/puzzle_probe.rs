use std::path::PathBuf;

use anyhow::*;
use camino::Utf8PathBuf;
use log::*;
use structopt::*;

use palapuzzle::*;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "puzzle_probe",
    about = "Prints what's inside a Palapeli .puzzle file"
)]
struct Opt {
    /// Pass multiple times for additional verbosity (info, debug, trace)
    #[structopt(short, long, parse(from_occurrences))]
    verbosity: usize,

    /// Change to the given directory before performing any operations.
    #[structopt(short = "C", long)]
    directory: Option<PathBuf>,

    #[structopt(name("puzzle file"))]
    puzzle_path: PathBuf,
}

fn main() -> Result<()> {
    let args = Opt::from_args();

    let mut errlog = stderrlog::new();
    errlog.verbosity(args.verbosity + 1);
    errlog.init()?;

    if let Some(chto) = args.directory {
        std::env::set_current_dir(&chto)
            .with_context(|| format!("Couldn't set working directory to {}", chto.display()))?;
    }

    let puzzle_path = Utf8PathBuf::from_path_buf(args.puzzle_path)
        .map_err(|p| anyhow!("{} isn't a UTF-8 path", p.display()))?;
    info!("Probing {}", puzzle_path);
    let info = scan_puzzle(&puzzle_path)?;
    print_info(&info);
    Ok(())
}

fn print_info(info: &PuzzleInfo) {
    println!("dir: {}", info.dir);
    println!("file: {}", info.file_name);
    println!("title: {}", info.title);
    println!("author: {}", info.author);
    println!("comment: {}", info.comment);
    match info.declared_pieces {
        DeclaredPieces::Absent => println!("declared pieces: (none)"),
        DeclaredPieces::Count(n) => println!("declared pieces: {}", n),
        DeclaredPieces::Malformed => println!("declared pieces: (malformed)"),
    }
    println!("piece files: {}", info.piece_files);
    println!("image size: {}", info.image_size);
    println!("puzzle size: {}", info.puzzle_size);
    for w in &info.warnings {
        println!("warning: {}", w);
    }
}
