use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gg_core::charset::SheetFormat;

use crate::pipeline::Target;

/// File name used when the output path is a directory.
#[must_use]
pub fn default_file_name(target: Target, format: SheetFormat) -> String {
    match target {
        Target::Ascii => "ascii-art.txt".to_string(),
        Target::Sheet => format!("pixel-art-{format}.csv"),
        Target::Asm => "ascii-art.asm".to_string(),
    }
}

/// Resolve `path`: an existing directory receives `file_name`.
#[must_use]
pub fn resolve_output(path: &Path, file_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(file_name)
    } else {
        path.to_path_buf()
    }
}

/// Write `text` to `dest`, or to stdout when `dest` is `None`.
///
/// Returns the path written, or `-` for stdout.
///
/// # Errors
/// Returns an error if the file or stdout cannot be written.
pub fn write_output(dest: Option<&Path>, text: &str) -> Result<PathBuf> {
    match dest {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
            Ok(path.to_path_buf())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Impossible d'écrire sur stdout")?;
            Ok(PathBuf::from("-"))
        }
    }
}
