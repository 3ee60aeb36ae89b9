//! Compress command implementation.

use super::{input_output, resolve_password, single_output};
use crate::report::write_report;
use crate::utils::{create_progress_bar, format_size};
use bytepress_archive::{ArchiveWriter, crypto, dispatch};
use bytepress_core::{Algorithm, CompressionReport, Level};
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[allow(clippy::too_many_arguments)]
pub fn cmd_compress(
    paths: &[PathBuf],
    algorithm: Algorithm,
    level: Level,
    dir: Option<&Path>,
    files: &[PathBuf],
    encrypt: bool,
    password: Option<String>,
    report_path: &Path,
    progress: bool,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let password = resolve_password(encrypt, password, true)?;
    let archive_mode = dir.is_some() || !files.is_empty();

    let (output, result) = if archive_mode {
        let output = single_output(paths)?;
        let result = compress_archive(output, algorithm, level, dir, files, password.as_deref(), verbose);
        (output, result)
    } else {
        let (input, output) = input_output(paths)?;
        let result = compress_single(
            input,
            output,
            algorithm,
            level,
            password.as_deref(),
            progress,
            verbose,
        );
        (output, result)
    };

    // A failed compression leaves an unusable output behind.
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            let _ = std::fs::remove_file(output);
            return Err(e);
        }
    };

    println!(
        "{} -> {} ({:.1}% of original, {})",
        format_size(report.original_size),
        format_size(report.compressed_size),
        report.ratio * 100.0,
        report.algorithm
    );

    write_report(report_path, &report)?;
    if verbose {
        eprintln!("Report written to {}", report_path.display());
    }
    Ok(())
}

fn compress_single(
    input: &Path,
    output: &Path,
    algorithm: Algorithm,
    level: Level,
    password: Option<&str>,
    progress: bool,
    verbose: bool,
) -> Result<CompressionReport, Box<dyn Error>> {
    let mut source = File::open(input)?;
    let total = source.metadata()?.len();

    let pb = create_progress_bar(total, progress);
    let mut sink = BufWriter::new(File::create(output)?);
    let mut on_progress = |done: u64, _total: u64| pb.set_position(done);

    let report = dispatch::compress(
        &mut source,
        &mut sink,
        algorithm,
        level,
        password,
        Some(&mut on_progress),
    )?;
    sink.flush()?;
    pb.finish_and_clear();

    if verbose {
        eprintln!("Compressed {} -> {}", input.display(), output.display());
    }
    Ok(report)
}

fn compress_archive(
    output: &Path,
    algorithm: Algorithm,
    level: Level,
    dir: Option<&Path>,
    files: &[PathBuf],
    password: Option<&str>,
    verbose: bool,
) -> Result<CompressionReport, Box<dyn Error>> {
    let started = Instant::now();

    let (headers, compressed_size) = match password {
        None => {
            let sink = BufWriter::new(File::create(output)?);
            let mut writer = ArchiveWriter::new(sink, algorithm, level);
            let headers = add_members(&mut writer, dir, files)?;
            writer.finish()?.flush()?;
            (headers, std::fs::metadata(output)?.len())
        }
        Some(password) => {
            // The container is staged so the envelope sees one stream.
            let mut staging = tempfile::tempfile()?;
            let mut writer = ArchiveWriter::new(&mut staging, algorithm, level);
            let headers = add_members(&mut writer, dir, files)?;
            writer.finish()?;
            staging.seek(SeekFrom::Start(0))?;
            let mut sink = BufWriter::new(File::create(output)?);
            let written = crypto::encrypt_stream(&mut staging, &mut sink, password)?;
            sink.flush()?;
            (headers, written)
        }
    };

    let original_size: u64 = headers.iter().map(|h| h.original_size).sum();
    if verbose {
        for header in &headers {
            eprintln!(
                "  {} ({}, {})",
                header.path,
                format_size(header.original_size),
                header.algorithm
            );
        }
    }
    println!("Archived {} entries into {}", headers.len(), output.display());

    Ok(CompressionReport::new(
        algorithm,
        level,
        original_size,
        compressed_size,
        started.elapsed(),
    ))
}

fn add_members<W: Write>(
    writer: &mut ArchiveWriter<W>,
    dir: Option<&Path>,
    files: &[PathBuf],
) -> Result<Vec<bytepress_archive::EntryHeader>, Box<dyn Error>> {
    let headers = match dir {
        Some(dir) => writer.add_dir(dir)?,
        None => writer.add_files(files)?,
    };
    Ok(headers)
}
