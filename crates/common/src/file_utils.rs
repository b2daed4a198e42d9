use std::path::{Path, PathBuf};

/// Error type for filename and path validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameValidationError {
    Empty,
    ContainsNullByte,
    ContainsPathSeparator,
    IsSpecialDirectory,
    InvalidFileName,
    ContainsInvalidCharacters,
    AbsolutePath,
    EscapesRoot,
}

impl FilenameValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            FilenameValidationError::Empty => "Filename cannot be empty",
            FilenameValidationError::ContainsNullByte => "Filename cannot contain null bytes",
            FilenameValidationError::ContainsPathSeparator => {
                "Filename cannot contain path separators (/ or \\)"
            }
            FilenameValidationError::IsSpecialDirectory => "Filename cannot be '.' or '..'",
            FilenameValidationError::InvalidFileName => {
                "Invalid filename: must be a valid file name"
            }
            FilenameValidationError::ContainsInvalidCharacters => {
                "Invalid filename: contains invalid characters"
            }
            FilenameValidationError::AbsolutePath => "Path must be relative",
            FilenameValidationError::EscapesRoot => "Path escapes the root directory",
        }
    }
}

impl std::fmt::Display for FilenameValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FilenameValidationError {}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Last path segment of a client-supplied filename.
/// Both `/` and `\` count as separators, so `C:\tmp\a.txt` yields `a.txt`.
pub fn base_name(filename: &str) -> &str {
    filename.rsplit(is_separator).next().unwrap_or(filename)
}

/// Validate filename to prevent path traversal attacks
/// Checks if:
/// - Filename contains no path separators (/, \)
/// - Path::new(filename).file_name() returns Some(_)
/// - Filename is not empty
/// - Filename is not "." or ".."
pub fn validate_filename(filename: &str) -> Result<(), FilenameValidationError> {
    if filename.is_empty() {
        return Err(FilenameValidationError::Empty);
    }

    if filename.contains('\0') {
        return Err(FilenameValidationError::ContainsNullByte);
    }

    if filename.contains(is_separator) {
        return Err(FilenameValidationError::ContainsPathSeparator);
    }

    if filename == "." || filename == ".." {
        return Err(FilenameValidationError::IsSpecialDirectory);
    }

    let path = Path::new(filename);
    if path.file_name().is_none() {
        return Err(FilenameValidationError::InvalidFileName);
    }

    // The file_name must round-trip, otherwise the OS would store something else
    if path.file_name().and_then(|n| n.to_str()) != Some(filename) {
        return Err(FilenameValidationError::ContainsInvalidCharacters);
    }

    Ok(())
}

/// Join a requested relative path onto `root`, lexically.
///
/// `.` segments are dropped and `..` pops the previous segment; popping past
/// the root is an error, as is an absolute path. The result always has `root`
/// as a prefix. This does not touch the filesystem, so symlinks inside the
/// root are not resolved here (see `storage` for the canonical check).
pub fn join_within_root(root: &Path, requested: &str) -> Result<PathBuf, FilenameValidationError> {
    if requested.is_empty() {
        return Err(FilenameValidationError::Empty);
    }

    if requested.contains('\0') {
        return Err(FilenameValidationError::ContainsNullByte);
    }

    if requested.starts_with(is_separator) || Path::new(requested).is_absolute() {
        return Err(FilenameValidationError::AbsolutePath);
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in requested.split(is_separator) {
        match segment {
            "" | "." => continue,
            ".." => {
                if segments.pop().is_none() {
                    return Err(FilenameValidationError::EscapesRoot);
                }
            }
            // Drive-relative segments such as `C:foo`
            s if s.contains(':') && cfg!(windows) => {
                return Err(FilenameValidationError::AbsolutePath);
            }
            s => segments.push(s),
        }
    }

    // Resolves to the root itself
    if segments.is_empty() {
        return Err(FilenameValidationError::IsSpecialDirectory);
    }

    let mut path = root.to_path_buf();
    path.extend(segments);
    Ok(path)
}
