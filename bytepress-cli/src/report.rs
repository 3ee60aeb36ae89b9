//! Compression report rendering.
//!
//! The report file is a free-form human-readable summary; nothing parses
//! it back. It is written only after a fully successful operation.

use bytepress_core::CompressionReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Render `report` to `path`, overwriting any previous report.
pub fn write_report(path: &Path, report: &CompressionReport) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "Compression Report")?;
    writeln!(file, "------------------")?;
    writeln!(file, "Algorithm: {}", report.algorithm)?;
    writeln!(file, "Compression Level: {}", report.level)?;
    writeln!(file, "Original Size: {} bytes", report.original_size)?;
    writeln!(file, "Compressed Size: {} bytes", report.compressed_size)?;
    writeln!(file, "Compression Ratio: {:.2}", report.ratio)?;
    writeln!(
        file,
        "Compression Time: {:.4} seconds",
        report.wall_time.as_secs_f64()
    )?;
    Ok(())
}
