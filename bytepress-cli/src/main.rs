//! BytePress CLI - file compression with RLE, Huffman, and a hybrid selector.

mod commands;
mod report;
mod utils;

use bytepress_core::{Algorithm, Level};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use commands::{cmd_benchmark, cmd_compress, cmd_decompress};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bytepress")]
#[command(author, version, about = "Pure Rust file compression utility")]
#[command(long_about = "
BytePress compresses byte streams with a bounded run-length codec, a
two-pass static Huffman codec, or a hybrid selector that keeps the
smaller of the two. Directories and file sets go into a multi-member
archive; any output can be wrapped in an AES-256-CBC envelope.

Examples:
  bytepress compress -a huffman input.log output.bph
  bytepress compress -a hybrid -l max --dir photos/ photos.bpa
  bytepress compress --files a.txt b.txt -a rle bundle.bpa
  bytepress compress --encrypt input.db output.enc
  bytepress decompress -a huffman output.bph restored.log
  bytepress decompress --archive photos.bpa extracted/
  bytepress benchmark -a hybrid -l balanced input.log
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file, a directory, or a set of files
    #[command(alias = "c")]
    Compress {
        /// INPUT OUTPUT, or just OUTPUT with --dir/--files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Compression algorithm
        #[arg(short, long, value_enum, default_value = "rle")]
        algorithm: AlgorithmArg,

        /// Compression level
        #[arg(short, long, value_enum, default_value = "balanced")]
        level: LevelArg,

        /// Archive a whole directory tree
        #[arg(long, conflicts_with = "files")]
        dir: Option<PathBuf>,

        /// Archive an explicit set of files
        #[arg(long, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Encrypt the output (prompts for a password if --password is absent)
        #[arg(long)]
        encrypt: bool,

        /// Password for --encrypt
        #[arg(long, requires = "encrypt")]
        password: Option<String>,

        /// Where to write the compression report
        #[arg(long, default_value = "compression_report.txt")]
        report: PathBuf,

        /// Show a progress bar
        #[arg(short = 'P', long, default_value = "true")]
        progress: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decompress a file or extract an archive
    #[command(alias = "d")]
    Decompress {
        /// INPUT OUTPUT (OUTPUT is a directory with --archive)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Algorithm the stream was compressed with (hybrid is rejected;
        /// archives carry per-entry tags and ignore this)
        #[arg(short, long, value_enum, default_value = "rle")]
        algorithm: AlgorithmArg,

        /// Treat the input as a multi-member archive
        #[arg(long)]
        archive: bool,

        /// Decrypt the input (prompts for a password if --password is absent)
        #[arg(long)]
        decrypt: bool,

        /// Password for --decrypt
        #[arg(long, requires = "decrypt")]
        password: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Time a compress/decompress cycle without keeping the output
    #[command(alias = "b")]
    Benchmark {
        /// Input file to benchmark against
        input: PathBuf,

        /// Compression algorithm
        #[arg(short, long, value_enum, default_value = "hybrid")]
        algorithm: AlgorithmArg,

        /// Compression level
        #[arg(short, long, value_enum, default_value = "balanced")]
        level: LevelArg,

        /// Emit the results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(hide = true)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Compression algorithm (for clap ValueEnum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    /// Bounded run-length coding
    Rle,
    /// Two-pass static Huffman coding
    Huffman,
    /// Trial both, keep the smaller (compression only)
    Hybrid,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Rle => Algorithm::Rle,
            AlgorithmArg::Huffman => Algorithm::Huffman,
            AlgorithmArg::Hybrid => Algorithm::Hybrid,
        }
    }
}

/// Compression level (for clap ValueEnum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum LevelArg {
    /// Fastest compression
    Fast,
    /// Balanced compression (default)
    #[default]
    Balanced,
    /// Best compression
    Max,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Fast => Level::Fast,
            LevelArg::Balanced => Level::Balanced,
            LevelArg::Max => Level::Max,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            paths,
            algorithm,
            level,
            dir,
            files,
            encrypt,
            password,
            report,
            progress,
            verbose,
        } => cmd_compress(
            &paths,
            algorithm.into(),
            level.into(),
            dir.as_deref(),
            &files,
            encrypt,
            password,
            &report,
            progress,
            verbose,
        ),
        Commands::Decompress {
            paths,
            algorithm,
            archive,
            decrypt,
            password,
            verbose,
        } => cmd_decompress(&paths, algorithm.into(), archive, decrypt, password, verbose),
        Commands::Benchmark {
            input,
            algorithm,
            level,
            json,
        } => cmd_benchmark(&input, algorithm.into(), level.into(), json),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "bytepress", &mut io::stdout());
            return;
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
