//! # css-audit io
//!
//! Loading of stylesheet and script sources from explicit paths, and writing
//! of merged or split stylesheets back to disk.
//!
//! Loading never fails: a missing or unreadable file degrades to empty text
//! and the outcome is reported through [`LoadStatus`] so a run over many
//! inputs can continue past a bad one.
//!
//! ```no_run
//! use css_audit_io::{load_source, LoadStatus};
//!
//! let source = load_source("theme.css");
//! if source.status != LoadStatus::Loaded {
//!     eprintln!("{}: {}", source.path.display(), source.status);
//! }
//! ```

#![deny(unsafe_code)]

use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use css_audit_core::{parser::to_css, Rule};
use thiserror::Error;

/// UTF-8 byte-order mark.
const BOM: &str = "\u{feff}";

/// Errors raised while writing output.
#[derive(Debug, Error)]
pub enum IoError {
    /// Output file could not be created or written
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = core::result::Result<T, IoError>;

/// Outcome of reading one source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Read and decoded as UTF-8
    Loaded,
    /// Decoded with invalid sequences replaced by U+FFFD
    LossyUtf8,
    /// No file at the path; text is empty
    Missing,
    /// File exists but could not be read; text is empty
    Unreadable,
}

impl LoadStatus {
    /// Whether the returned text reflects the file contents.
    pub const fn has_content(self) -> bool {
        matches!(self, Self::Loaded | Self::LossyUtf8)
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Loaded => "loaded",
            Self::LossyUtf8 => "loaded with invalid UTF-8 replaced",
            Self::Missing => "missing",
            Self::Unreadable => "unreadable",
        })
    }
}

/// Kind of source, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `.css`
    Stylesheet,
    /// Script or markup that may reference stylesheet identifiers
    Script,
    /// Anything else
    Unknown,
}

impl SourceKind {
    /// Detect kind from file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "css" => Self::Stylesheet,
            "js" | "mjs" | "cjs" | "jsx" | "ts" | "tsx" | "html" | "htm" | "vue" | "svelte" => {
                Self::Script
            }
            _ => Self::Unknown,
        }
    }

    /// Detect kind from a path.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Unknown, Self::from_extension)
    }
}

/// Text of one source file together with how it was obtained.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    /// Path as given by the caller
    pub path: PathBuf,
    /// Decoded text with any leading byte-order mark removed
    pub text: String,
    /// How the text was obtained
    pub status: LoadStatus,
    /// Kind detected from the extension
    pub kind: SourceKind,
}

/// Read a source file, degrading failures to empty text.
///
/// Missing and unreadable files log at `warn` and return empty text.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn load_source(path: impl AsRef<Path>) -> LoadedSource {
    let path = path.as_ref();
    let kind = SourceKind::from_path(path);

    let (text, status) = match fs::read(path) {
        Ok(bytes) => decode(bytes),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::warn!("{}: file not found, treating as empty", path.display());
            (String::new(), LoadStatus::Missing)
        }
        Err(err) => {
            log::warn!("{}: {err}, treating as empty", path.display());
            (String::new(), LoadStatus::Unreadable)
        }
    };

    if status == LoadStatus::LossyUtf8 {
        log::warn!("{}: invalid UTF-8 replaced", path.display());
    }
    log::debug!("{}: {} bytes ({status})", path.display(), text.len());

    LoadedSource {
        path: path.to_path_buf(),
        text,
        status,
        kind,
    }
}

/// Read several sources, preserving input order.
pub fn load_sources<P: AsRef<Path>>(paths: &[P]) -> Vec<LoadedSource> {
    paths.iter().map(load_source).collect()
}

fn decode(bytes: Vec<u8>) -> (String, LoadStatus) {
    let (mut text, status) = match String::from_utf8(bytes) {
        Ok(text) => (text, LoadStatus::Loaded),
        Err(err) => (
            String::from_utf8_lossy(err.as_bytes()).into_owned(),
            LoadStatus::LossyUtf8,
        ),
    };
    if text.starts_with(BOM) {
        text.drain(..BOM.len());
    }
    (text, status)
}

/// Write rules as stylesheet text.
///
/// Takes the rules of a merge (`MergedStylesheet::rules`) or of one group of
/// a theme split alike.
///
/// # Errors
///
/// Returns [`IoError::Write`] when the file cannot be created or written.
pub fn write_stylesheet(path: impl AsRef<Path>, rules: &[Rule]) -> Result<()> {
    write_text(path.as_ref(), &to_css(rules))
}

/// Write arbitrary text output, replacing any existing file.
///
/// # Errors
///
/// Returns [`IoError::Write`] when the file cannot be created or written.
pub fn write_text(path: impl AsRef<Path>, text: &str) -> Result<()> {
    let path = path.as_ref();
    let wrap = |source| IoError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = fs::File::create(path).map_err(wrap)?;
    file.write_all(text.as_bytes()).map_err(wrap)?;
    file.flush().map_err(wrap)?;

    log::debug!("{}: wrote {} bytes", path.display(), text.len());
    Ok(())
}
