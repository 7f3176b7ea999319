//! Storage policy for uploaded images (company logos, profile photos).
//!
//! Only jpg/jpeg/png/gif are accepted, and both the file extension and the
//! declared MIME type must agree. Files are stored under a single directory
//! with a collision-resistant generated name.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use lazy_regex::regex_is_match;
use rand::Rng;
use thiserror::Error;
use tracing::info;

/// Largest accepted upload: 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Invalid file type. Only images are allowed.")]
    InvalidType,
    #[error("File too large. Maximum size is 10MB.")]
    TooLarge { size: usize },
    #[error("Missing file name")]
    MissingName,
    #[error("Invalid form field name")]
    InvalidField,
    #[error("upload storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    pub fn code(&self) -> &'static str {
        match self {
            UploadError::InvalidType => "INVALID_FILE_TYPE",
            UploadError::TooLarge { .. } => "FILE_TOO_LARGE",
            UploadError::MissingName => "MISSING_FILE_NAME",
            UploadError::InvalidField => "INVALID_FIELD_NAME",
            UploadError::Io(_) => "UPLOAD_IO",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    dir: PathBuf,
    max_bytes: usize,
}

impl UploadPolicy {
    /// Policy rooted at `dir`, creating the directory if it does not exist yet.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Result<Self, UploadError> {
        let policy = Self {
            dir: dir.into(),
            max_bytes: MAX_UPLOAD_BYTES,
        };
        policy.ensure_dir()?;
        Ok(policy)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn ensure_dir(&self) -> Result<(), UploadError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir)?;
            info!(dir = %self.dir.display(), "created upload directory");
        }
        Ok(())
    }

    /// Accept or reject a file before anything touches the disk.
    pub fn check(&self, original_name: &str, mime: &str, size: usize) -> Result<(), UploadError> {
        if original_name.trim().is_empty() {
            return Err(UploadError::MissingName);
        }
        if size > self.max_bytes {
            return Err(UploadError::TooLarge { size });
        }

        let ext_ok = extension_of(original_name)
            .map(|ext| regex_is_match!("jpg|jpeg|png|gif", &ext.to_lowercase()))
            .unwrap_or(false);
        let mime_ok = regex_is_match!("jpg|jpeg|png|gif", mime);

        if ext_ok && mime_ok {
            Ok(())
        } else {
            Err(UploadError::InvalidType)
        }
    }

    /// The field name becomes part of the stored file name, so it is held to a
    /// strict alphabet.
    pub fn check_field(&self, field: &str) -> Result<(), UploadError> {
        if regex_is_match!("^[A-Za-z0-9_-]{1,32}$", field) {
            Ok(())
        } else {
            Err(UploadError::InvalidField)
        }
    }

    /// Full path a stored file ends up at.
    pub fn path_for(&self, stored_name: &str) -> PathBuf {
        self.dir.join(stored_name)
    }
}

/// `<field>-<unix millis>-<random below 1e9><.ext>`; the extension keeps the
/// caller's original casing.
pub fn storage_name<R: Rng>(
    field: &str,
    original_name: &str,
    now: SystemTime,
    rng: &mut R,
) -> String {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix: u32 = rng.random_range(0..1_000_000_000);
    let ext = extension_of(original_name)
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    format!("{field}-{millis}-{suffix}{ext}")
}

fn extension_of(name: &str) -> Option<&str> {
    // Only the final path component counts; "../evil" never reaches the name.
    Path::new(name).extension().and_then(|e| e.to_str())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn policy() -> (tempfile::TempDir, UploadPolicy) {
        let tmp = tempfile::tempdir().unwrap();
        let policy = UploadPolicy::from_dir(tmp.path().join("uploads")).unwrap();
        (tmp, policy)
    }

    #[test]
    fn creates_missing_directory() {
        let (_tmp, policy) = policy();
        assert!(policy.dir().is_dir());
    }

    #[test]
    fn accepts_images_case_insensitively() {
        let (_tmp, policy) = policy();

        assert!(policy.check("logo.png", "image/png", 1024).is_ok());
        assert!(policy.check("photo.PNG", "image/png", 1024).is_ok());
        assert!(policy.check("avatar.jpeg", "image/jpeg", 1024).is_ok());
        assert!(policy.check("anim.gif", "image/gif", MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn rejects_when_extension_or_mime_disagree() {
        let (_tmp, policy) = policy();

        assert!(matches!(
            policy.check("resume.pdf", "application/pdf", 10),
            Err(UploadError::InvalidType)
        ));
        assert!(matches!(
            policy.check("sneaky.png", "application/pdf", 10),
            Err(UploadError::InvalidType)
        ));
        assert!(matches!(
            policy.check("sneaky.pdf", "image/png", 10),
            Err(UploadError::InvalidType)
        ));
        assert!(matches!(
            policy.check("noext", "image/png", 10),
            Err(UploadError::InvalidType)
        ));
    }

    #[test]
    fn rejects_oversized_and_unnamed() {
        let (_tmp, policy) = policy();

        assert!(matches!(
            policy.check("big.png", "image/png", MAX_UPLOAD_BYTES + 1),
            Err(UploadError::TooLarge { .. })
        ));
        assert!(matches!(
            policy.check("  ", "image/png", 1),
            Err(UploadError::MissingName)
        ));
    }

    #[test]
    fn field_names_cannot_escape_the_directory() {
        let (_tmp, policy) = policy();

        assert!(policy.check_field("file").is_ok());
        assert!(policy.check_field("company_logo-2").is_ok());
        for bad in ["", "../etc", "a/b", "x y", "dot.dot"] {
            assert!(matches!(
                policy.check_field(bad),
                Err(UploadError::InvalidField)
            ));
        }
    }

    #[test]
    fn storage_name_has_field_time_and_extension() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);

        let name = storage_name("file", "Logo.Png", now, &mut rng);

        assert!(name.starts_with("file-1700000000123-"), "{name}");
        assert!(name.ends_with(".Png"), "{name}");
    }

    #[test]
    fn storage_names_differ_for_same_instant() {
        let mut rng = StdRng::seed_from_u64(99);
        let now = SystemTime::now();

        let a = storage_name("file", "a.png", now, &mut rng);
        let b = storage_name("file", "a.png", now, &mut rng);

        assert_ne!(a, b);
    }
}
