//! Multi-member archive container.
//!
//! An archive is a sequence of entries concatenated back-to-back with no
//! terminator: a fixed-size metadata header followed by the compressed
//! payload. The header records the exact payload length, which is what
//! lets a reader locate the next entry without parsing the payload.
//!
//! ```text
//! [ path           : 4096 octets, NUL-padded UTF-8 ]
//! [ original_size  : u64 LE                        ]
//! [ mode_bits      : u32 LE                        ]
//! [ mtime_seconds  : u64 LE                        ]
//! [ algorithm_tag  : u8  (0=RLE, 1=HUFFMAN)        ]
//! [ level_tag      : u8                            ]
//! [ payload_length : u64 LE                        ]
//! [ payload        : payload_length octets         ]
//! ```
//!
//! Because a partial archive cannot be resumed or safely parsed, any
//! per-entry I/O error aborts the whole archive operation.

use crate::hybrid;
use bytepress_core::error::{BytePressError, Result};
use bytepress_core::{Algorithm, Level};
use filetime::FileTime;
use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Component, Path, PathBuf};

/// Fixed size of the path field in an entry header.
pub const PATH_CAP: usize = 4096;

/// Total fixed header size preceding each payload.
pub const ENTRY_HEADER_LEN: u64 = PATH_CAP as u64 + 8 + 4 + 8 + 1 + 1 + 8;

/// Per-entry metadata, as stored in the archive.
#[derive(Debug, Clone)]
pub struct EntryHeader {
    /// Path of the member, relative to the archive root.
    pub path: String,
    /// Uncompressed size in bytes.
    pub original_size: u64,
    /// Unix permission bits at archive time.
    pub mode_bits: u32,
    /// Modification time, seconds since the Unix epoch.
    pub mtime_seconds: u64,
    /// Codec the payload was produced with (never hybrid).
    pub algorithm: Algorithm,
    /// Level the archive was created with.
    pub level: Level,
    /// Exact on-disk length of the compressed payload.
    pub payload_length: u64,
}

impl EntryHeader {
    fn write_to<W: Write>(&self, output: &mut W) -> Result<()> {
        let bytes = self.path.as_bytes();
        if bytes.len() >= PATH_CAP {
            return Err(BytePressError::invalid_argument(format!(
                "entry path exceeds {} bytes: {}",
                PATH_CAP - 1,
                self.path
            )));
        }
        let mut padded = vec![0u8; PATH_CAP];
        padded[..bytes.len()].copy_from_slice(bytes);
        output.write_all(&padded)?;
        output.write_all(&self.original_size.to_le_bytes())?;
        output.write_all(&self.mode_bits.to_le_bytes())?;
        output.write_all(&self.mtime_seconds.to_le_bytes())?;
        output.write_all(&[self.algorithm.tag(), self.level.tag()])?;
        output.write_all(&self.payload_length.to_le_bytes())?;
        Ok(())
    }

    /// Read a header, returning `None` on a clean end of archive.
    ///
    /// End of input at the first header byte is the normal termination of
    /// the entry sequence; anywhere later it is a truncation.
    fn read_from<R: Read>(input: &mut R) -> Result<Option<Self>> {
        let mut padded = vec![0u8; PATH_CAP];
        let first = loop {
            let mut byte = [0u8; 1];
            match input.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => break byte[0],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        padded[0] = first;
        read_exact_field(input, &mut padded[1..])?;

        let end = padded.iter().position(|&b| b == 0).unwrap_or(PATH_CAP);
        let path = std::str::from_utf8(&padded[..end])
            .map_err(|_| BytePressError::malformed("entry path is not valid UTF-8"))?
            .to_string();

        let mut u64_buf = [0u8; 8];
        let mut u32_buf = [0u8; 4];
        read_exact_field(input, &mut u64_buf)?;
        let original_size = u64::from_le_bytes(u64_buf);
        read_exact_field(input, &mut u32_buf)?;
        let mode_bits = u32::from_le_bytes(u32_buf);
        read_exact_field(input, &mut u64_buf)?;
        let mtime_seconds = u64::from_le_bytes(u64_buf);

        let mut tags = [0u8; 2];
        read_exact_field(input, &mut tags)?;
        let algorithm = Algorithm::from_tag(tags[0])?;
        let level = Level::from_tag(tags[1])?;

        read_exact_field(input, &mut u64_buf)?;
        let payload_length = u64::from_le_bytes(u64_buf);

        Ok(Some(Self {
            path,
            original_size,
            mode_bits,
            mtime_seconds,
            algorithm,
            level,
            payload_length,
        }))
    }
}

fn read_exact_field<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<()> {
    input.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            BytePressError::truncated(buf.len() as u64)
        } else {
            e.into()
        }
    })
}

/// Reject entry paths that would escape the extraction root.
fn checked_relative_path(path: &str) -> Result<PathBuf> {
    let p = Path::new(path);
    if p.is_absolute() {
        return Err(BytePressError::malformed(format!(
            "absolute entry path: {path}"
        )));
    }
    for component in p.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => {
                return Err(BytePressError::malformed(format!(
                    "unsafe entry path: {path}"
                )));
            }
        }
    }
    Ok(p.to_path_buf())
}

/// Stored name for an explicit file argument: normal path components
/// only, joined with `/`, so the entry always extracts under the
/// destination root regardless of how the input path was spelled.
fn stored_name(path: &Path) -> String {
    let mut name = String::new();
    for component in path.components() {
        if let Component::Normal(part) = component {
            if !name.is_empty() {
                name.push('/');
            }
            name.push_str(&part.to_string_lossy());
        }
    }
    name
}

#[cfg(unix)]
fn file_mode(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    metadata.mode()
}

#[cfg(not(unix))]
fn file_mode(_metadata: &std::fs::Metadata) -> u32 {
    0o644
}

fn file_mtime(metadata: &std::fs::Metadata) -> u64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Writes a multi-member archive.
///
/// One writer holds the output open across the whole operation; a failed
/// entry poisons the archive and must abort it, so every method
/// propagates the first error.
pub struct ArchiveWriter<W: Write> {
    output: W,
    algorithm: Algorithm,
    level: Level,
}

impl<W: Write> ArchiveWriter<W> {
    /// Create a writer that compresses members with the given settings.
    pub fn new(output: W, algorithm: Algorithm, level: Level) -> Self {
        Self {
            output,
            algorithm,
            level,
        }
    }

    /// Compress one file into the archive under `stored_name`.
    pub fn add_file(&mut self, path: &Path, stored_name: &str) -> Result<EntryHeader> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(BytePressError::invalid_argument(format!(
                "not a regular file: {}",
                path.display()
            )));
        }

        let mut source = File::open(path)?;

        // Stage the payload so its exact length is known before the
        // header goes out.
        let (algorithm, mut payload) = match self.algorithm {
            Algorithm::Rle => {
                let mut staging = tempfile::tempfile()?;
                bytepress_rle::compress(&mut source, &mut staging, self.level, None)?;
                (Algorithm::Rle, staging)
            }
            Algorithm::Huffman => {
                let mut staging = tempfile::tempfile()?;
                bytepress_huffman::compress(&mut source, &mut staging, None)?;
                (Algorithm::Huffman, staging)
            }
            Algorithm::Hybrid => hybrid::select(&mut source, self.level)?,
        };

        let payload_length = payload.seek(SeekFrom::End(0))?;
        payload.seek(SeekFrom::Start(0))?;

        let header = EntryHeader {
            path: stored_name.to_string(),
            original_size: metadata.len(),
            mode_bits: file_mode(&metadata),
            mtime_seconds: file_mtime(&metadata),
            algorithm,
            level: self.level,
            payload_length,
        };
        header.write_to(&mut self.output)?;
        io::copy(&mut payload, &mut self.output)?;
        Ok(header)
    }

    /// Archive a directory tree depth-first.
    ///
    /// Member names are stored relative to the directory's parent, so the
    /// tree extracts under the directory's own name. Only regular files
    /// become entries; other inode types are skipped with a warning.
    /// Returns the headers written, in archive order.
    pub fn add_dir(&mut self, dir: &Path) -> Result<Vec<EntryHeader>> {
        let prefix = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut headers = Vec::new();
        self.walk_dir(dir, &prefix, &mut headers)?;
        Ok(headers)
    }

    fn walk_dir(&mut self, dir: &Path, prefix: &str, headers: &mut Vec<EntryHeader>) -> Result<()> {
        let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
        // Sorted walk keeps the archive layout stable across runs.
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let stored = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };

            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                self.walk_dir(&path, &stored, headers)?;
            } else if file_type.is_file() {
                headers.push(self.add_file(&path, &stored)?);
            } else {
                eprintln!("warning: skipping non-regular file {}", path.display());
            }
        }
        Ok(())
    }

    /// Archive an explicit list of files.
    ///
    /// Names are stored with normal path components only, so absolute or
    /// `..`-carrying inputs still produce entries the reader will accept.
    pub fn add_files(&mut self, files: &[PathBuf]) -> Result<Vec<EntryHeader>> {
        if files.is_empty() {
            return Err(BytePressError::invalid_argument("no input files"));
        }
        let mut headers = Vec::with_capacity(files.len());
        for path in files {
            let stored = stored_name(path);
            if stored.is_empty() {
                return Err(BytePressError::invalid_argument(format!(
                    "cannot derive an archive name for {}",
                    path.display()
                )));
            }
            headers.push(self.add_file(path, &stored)?);
        }
        Ok(headers)
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.output.flush()?;
        Ok(self.output)
    }
}

/// Reads a multi-member archive.
pub struct ArchiveReader<R: Read + Seek> {
    input: R,
}

impl<R: Read + Seek> ArchiveReader<R> {
    /// Create a reader over an archive positioned at its first entry.
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// List every entry header, seeking over the payloads.
    pub fn entries(&mut self) -> Result<Vec<EntryHeader>> {
        let mut headers = Vec::new();
        while let Some(header) = EntryHeader::read_from(&mut self.input)? {
            let skip = i64::try_from(header.payload_length).map_err(|_| {
                BytePressError::malformed("payload length exceeds the seekable range")
            })?;
            self.input.seek(SeekFrom::Current(skip))?;
            headers.push(header);
        }
        Ok(headers)
    }

    /// Extract every member under `dest`, restoring permissions and
    /// modification times. Returns the extracted headers in order.
    pub fn extract_all(&mut self, dest: &Path) -> Result<Vec<EntryHeader>> {
        let mut extracted = Vec::new();

        while let Some(header) = EntryHeader::read_from(&mut self.input)? {
            let relative = checked_relative_path(&header.path)?;
            let target = dest.join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let mut payload = io::BufReader::new((&mut self.input).take(header.payload_length));
            let mut output = BufWriter::new(File::create(&target)?);
            let written = match header.algorithm {
                Algorithm::Rle => bytepress_rle::decompress(&mut payload, &mut output)?,
                Algorithm::Huffman => bytepress_huffman::decompress(&mut payload, &mut output)?,
                Algorithm::Hybrid => unreachable!("hybrid never carries a wire tag"),
            };
            output.flush()?;
            drop(output);

            if written != header.original_size {
                return Err(BytePressError::malformed(format!(
                    "entry {} decoded {} bytes, expected {}",
                    header.path, written, header.original_size
                )));
            }
            // Skip whatever the decoder left of the declared payload.
            io::copy(&mut payload, &mut io::sink())?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(
                    &target,
                    std::fs::Permissions::from_mode(header.mode_bits),
                )?;
            }
            filetime::set_file_mtime(
                &target,
                FileTime::from_unix_time(header.mtime_seconds as i64, 0),
            )?;

            extracted.push(header);
        }

        Ok(extracted)
    }
}
