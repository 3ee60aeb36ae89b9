//! Decompress command implementation.

use super::{input_output, resolve_password};
use crate::utils::format_size;
use bytepress_archive::{ArchiveReader, crypto, dispatch};
use bytepress_core::Algorithm;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub fn cmd_decompress(
    paths: &[PathBuf],
    algorithm: Algorithm,
    archive: bool,
    decrypt: bool,
    password: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let password = resolve_password(decrypt, password, false)?;
    let (input, output) = input_output(paths)?;

    if archive {
        return extract_archive(input, output, password.as_deref(), verbose);
    }

    if algorithm == Algorithm::Hybrid {
        return Err(
            "hybrid is valid only for compression; pass the codec the stream was written with"
                .into(),
        );
    }

    let result = decompress_single(input, output, algorithm, password.as_deref());
    match result {
        Ok(written) => {
            println!(
                "Decompressed {} into {}",
                format_size(written),
                output.display()
            );
            Ok(())
        }
        Err(e) => {
            let _ = std::fs::remove_file(output);
            Err(e)
        }
    }
}

fn decompress_single(
    input: &Path,
    output: &Path,
    algorithm: Algorithm,
    password: Option<&str>,
) -> Result<u64, Box<dyn Error>> {
    let mut source = BufReader::new(File::open(input)?);
    let mut sink = BufWriter::new(File::create(output)?);
    let written = dispatch::decompress(&mut source, &mut sink, algorithm, password)?;
    sink.flush()?;
    Ok(written)
}

fn extract_archive(
    input: &Path,
    dest: &Path,
    password: Option<&str>,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let extracted = match password {
        None => {
            let mut reader = ArchiveReader::new(File::open(input)?);
            reader.extract_all(dest)?
        }
        Some(password) => {
            let mut source = File::open(input)?;
            let mut staging = tempfile::tempfile()?;
            crypto::decrypt_stream(&mut source, &mut staging, password)?;
            staging.seek(SeekFrom::Start(0))?;
            let mut reader = ArchiveReader::new(staging);
            reader.extract_all(dest)?
        }
    };

    if verbose {
        for header in &extracted {
            eprintln!(
                "  {} ({}, {})",
                header.path,
                format_size(header.original_size),
                header.algorithm
            );
        }
    }
    println!("Extracted {} entries into {}", extracted.len(), dest.display());
    Ok(())
}
