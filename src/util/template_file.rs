//! Reading template files for the command line
//!
//! Validates files before reading them, checking for:
//! - File existence and permissions
//! - File size limits
//! - Binary content

use std::fs;
use std::io::Read;
use std::path::Path;

/// Largest template file accepted (1 MB); message templates are small
pub const MAX_TEMPLATE_SIZE: u64 = 1024 * 1024;

/// Path meaning "read from stdin"
pub const STDIN_PATH: &str = "-";

/// Errors that can occur when reading a template
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateFileError {
    /// File does not exist
    NotFound,
    /// Permission denied to read file
    PermissionDenied,
    /// Path is a directory, not a file
    IsDirectory,
    /// Content contains null bytes
    BinaryFile,
    /// Content exceeds size limit
    TooLarge { size_kb: f64 },
    /// Content is not UTF-8
    InvalidUtf8,
    /// Other I/O error
    IoError(String),
}

impl std::fmt::Display for TemplateFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "file not found"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IsDirectory => write!(f, "is a directory"),
            Self::BinaryFile => write!(f, "binary file"),
            Self::TooLarge { size_kb } => write!(
                f,
                "template too large ({:.1} KB, max {} KB)",
                size_kb,
                MAX_TEMPLATE_SIZE / 1024
            ),
            Self::InvalidUtf8 => write!(f, "not valid UTF-8"),
            Self::IoError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TemplateFileError {}

impl From<std::io::Error> for TemplateFileError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::IoError(e.to_string()),
        }
    }
}

/// Read a template from `path`, or from stdin when `path` is `-`.
pub fn read_template(path: &Path) -> Result<String, TemplateFileError> {
    if path.as_os_str() == STDIN_PATH {
        return read_template_from(std::io::stdin().lock());
    }

    let metadata = fs::metadata(path)?;
    if metadata.is_dir() {
        return Err(TemplateFileError::IsDirectory);
    }
    if metadata.len() > MAX_TEMPLATE_SIZE {
        return Err(too_large(metadata.len()));
    }
    read_template_from(fs::File::open(path)?)
}

/// Read and validate a template from any reader
pub fn read_template_from<R: Read>(reader: R) -> Result<String, TemplateFileError> {
    let mut bytes = Vec::new();
    // One byte past the limit tells us the input is too large
    reader
        .take(MAX_TEMPLATE_SIZE + 1)
        .read_to_end(&mut bytes)?;

    if bytes.len() as u64 > MAX_TEMPLATE_SIZE {
        return Err(too_large(bytes.len() as u64));
    }
    if is_likely_binary(&bytes) {
        return Err(TemplateFileError::BinaryFile);
    }
    String::from_utf8(bytes).map_err(|_| TemplateFileError::InvalidUtf8)
}

/// Check the first 8KB for null bytes, which are rare in text
pub fn is_likely_binary(bytes: &[u8]) -> bool {
    bytes[..bytes.len().min(8192)].contains(&0)
}

fn too_large(len: u64) -> TemplateFileError {
    TemplateFileError::TooLarge {
        size_kb: len as f64 / 1024.0,
    }
}
