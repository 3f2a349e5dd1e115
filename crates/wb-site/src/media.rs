//! Locally selected media and upload validation.
//!
//! A [`MediaHandle`] stands in for a file the user picked in the wizard. It is
//! only meaningful for the running session and is never persisted; the wizard
//! stores a derived URL next to it instead.

/// Default upload size limit in megabytes.
pub const DEFAULT_MAX_SIZE_MB: u64 = 10;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Ephemeral reference to a locally selected file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaHandle {
    /// File name including extension.
    pub name: String,
    /// MIME type reported for the file (e.g., "image/png").
    pub mime: String,
    /// Size in bytes.
    pub size: u64,
}

impl MediaHandle {
    #[must_use]
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
        }
    }

    /// Whether the MIME type denotes an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Reason an upload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("File size must be less than {max_mb}MB")]
    TooLarge { max_mb: u64 },
    #[error("Please select an image file")]
    NotAnImage,
    #[error("Please select a valid file type: {}", .allowed.join(", "))]
    TypeNotAllowed { allowed: Vec<String> },
}

/// Accept images up to [`DEFAULT_MAX_SIZE_MB`].
pub fn validate_image(file: &MediaHandle) -> Result<(), MediaError> {
    check_size(file, DEFAULT_MAX_SIZE_MB)?;
    if !file.is_image() {
        return Err(MediaError::NotAnImage);
    }
    Ok(())
}

/// Accept files up to `max_size_mb` whose type matches one of `allowed`.
///
/// Entries starting with `.` match the file extension case-insensitively;
/// other entries match as a MIME prefix (e.g., `"application/pdf"`, `"video/"`).
/// An empty `allowed` list accepts any type.
pub fn validate_file(
    file: &MediaHandle,
    allowed: &[&str],
    max_size_mb: u64,
) -> Result<(), MediaError> {
    check_size(file, max_size_mb)?;

    if allowed.is_empty() {
        return Ok(());
    }

    let name = file.name.to_lowercase();
    let matches = allowed.iter().any(|kind| {
        if kind.starts_with('.') {
            name.ends_with(&kind.to_lowercase())
        } else {
            file.mime.starts_with(kind)
        }
    });

    if matches {
        Ok(())
    } else {
        Err(MediaError::TypeNotAllowed {
            allowed: allowed.iter().map(|s| (*s).to_owned()).collect(),
        })
    }
}

/// Whether `input` parses as an absolute URL.
#[must_use]
pub fn is_valid_url(input: &str) -> bool {
    url::Url::parse(input).is_ok()
}

fn check_size(file: &MediaHandle, max_size_mb: u64) -> Result<(), MediaError> {
    if file.size > max_size_mb.saturating_mul(BYTES_PER_MB) {
        return Err(MediaError::TooLarge { max_mb: max_size_mb });
    }
    Ok(())
}
