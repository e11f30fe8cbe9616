//! Loading and saving markup documents.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Built-in document shown by `quizlet demo`.
pub const DEMO_DOCUMENT: &str = include_str!("../assets/demo.txt");

/// Starting point written by `quizlet new`.
pub const NEW_DOCUMENT: &str = include_str!("../assets/new.txt");

#[derive(Debug, Error)]
pub enum TextError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("file already exists: {} (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("could not save {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Read a document as UTF-8 text with `\r\n` line endings normalised.
pub fn load_text(path: &Path) -> Result<String, TextError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text.replace("\r\n", "\n")),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(TextError::NotFound(path.to_path_buf())),
        Err(source) => Err(TextError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write text to `path`, replacing any existing content.
pub fn save_text(path: &Path, text: &str) -> Result<(), TextError> {
    fs::write(path, text).map_err(|source| TextError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Append `.txt` unless the path already ends with it.
pub fn with_txt_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "txt") {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".txt");
    PathBuf::from(name)
}

/// Write a fresh document, refusing to clobber an existing file unless `force`.
/// Returns the path actually written.
pub fn create_document(path: &Path, text: &str, force: bool) -> Result<PathBuf, TextError> {
    let path = with_txt_extension(path);
    if path.exists() && !force {
        return Err(TextError::AlreadyExists(path));
    }
    save_text(&path, text)?;
    Ok(path)
}
