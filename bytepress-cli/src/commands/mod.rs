//! Subcommand implementations.

mod benchmark;
mod compress;
mod decompress;

pub use benchmark::cmd_benchmark;
pub use compress::cmd_compress;
pub use decompress::cmd_decompress;

use std::error::Error;
use std::path::{Path, PathBuf};

/// Resolve the operation password: the flag value when given, an
/// interactive prompt otherwise. Confirmation is only asked when a new
/// password is being set (encryption).
pub(crate) fn resolve_password(
    enabled: bool,
    given: Option<String>,
    confirm: bool,
) -> Result<Option<String>, Box<dyn Error>> {
    if !enabled {
        return Ok(None);
    }
    if let Some(password) = given {
        return Ok(Some(password));
    }
    let mut prompt = dialoguer::Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(Some(prompt.interact()?))
}

/// The two positional paths of a single-stream operation.
pub(crate) fn input_output(paths: &[PathBuf]) -> Result<(&Path, &Path), Box<dyn Error>> {
    match paths {
        [input, output] => Ok((input.as_path(), output.as_path())),
        _ => Err("expected exactly two paths: INPUT OUTPUT".into()),
    }
}

/// The single positional output path of an archive-creating operation.
pub(crate) fn single_output(paths: &[PathBuf]) -> Result<&Path, Box<dyn Error>> {
    match paths {
        [output] => Ok(output.as_path()),
        _ => Err("expected exactly one OUTPUT path with --dir/--files".into()),
    }
}
