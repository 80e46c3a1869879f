//! Local disk storage for menu images

use std::path::{Path, PathBuf};

use shared::{AppError, ErrorCode};
use tokio::io::AsyncWriteExt;

/// Longest sanitized original name kept in a stored filename
const MAX_ORIGINAL_NAME_LEN: usize = 100;

/// Attempts before giving up on name collisions
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Image directory plus the per-file size cap
#[derive(Clone, Debug)]
pub struct UploadStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::internal(format!(
                "Failed to create upload directory {}: {e}",
                self.dir.display()
            ))
        })
    }

    /// Write `data` under `<unix-millis>-<sanitized name>` and return the
    /// stored filename.
    ///
    /// Existing files are never overwritten: on collision a counter is
    /// inserted after the timestamp.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<String, AppError> {
        if data.is_empty() {
            return Err(AppError::new(ErrorCode::EmptyFile).with_detail("field", "image"));
        }
        if data.len() > self.max_bytes {
            return Err(AppError::with_message(
                ErrorCode::FileTooLarge,
                format!(
                    "File too large. Maximum size is {} bytes ({}MB)",
                    self.max_bytes,
                    self.max_bytes / 1024 / 1024
                ),
            ));
        }

        self.ensure_dir().await?;

        let millis = shared::util::now_millis();
        let clean = sanitize_filename(original_name);

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let filename = stored_filename(millis, attempt, &clean);
            let open = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&filename))
                .await;

            let mut file = match open {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(AppError::internal(format!("Failed to store image: {e}"))),
            };

            file.write_all(data)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write image: {e}")))?;
            file.flush()
                .await
                .map_err(|e| AppError::internal(format!("Failed to write image: {e}")))?;

            tracing::info!(filename = %filename, size = data.len(), "Image stored");
            return Ok(filename);
        }

        Err(AppError::internal("Failed to pick a unique image filename"))
    }

    /// Delete a stored file whose document write did not happen.
    ///
    /// Failures are logged, never returned: the caller is already on an
    /// error path.
    pub async fn remove(&self, filename: &str) {
        if !is_safe_filename(filename) {
            return;
        }
        match tokio::fs::remove_file(self.dir.join(filename)).await {
            Ok(()) => tracing::info!(filename = %filename, "Discarded unused image"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(filename = %filename, error = %e, "Failed to discard image"),
        }
    }

    /// Read a stored file. `FileNotFound` when absent, `InvalidFilename`
    /// for anything that could escape the directory.
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, AppError> {
        if !is_safe_filename(filename) {
            return Err(AppError::new(ErrorCode::InvalidFilename));
        }
        match tokio::fs::read(self.dir.join(filename)).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::new(ErrorCode::FileNotFound))
            }
            Err(e) => Err(AppError::internal(format!("Failed to read image: {e}"))),
        }
    }
}

/// Reject empty names, parent references and path separators
pub fn is_safe_filename(filename: &str) -> bool {
    !(filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains('\0'))
}

/// Keep the final path component and replace anything outside
/// `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    let cleaned: String = cleaned.chars().take(MAX_ORIGINAL_NAME_LEN).collect();
    if cleaned.is_empty() || cleaned.contains("..") {
        "upload".to_string()
    } else {
        cleaned
    }
}

fn stored_filename(millis: i64, attempt: u32, clean: &str) -> String {
    if attempt == 0 {
        format!("{millis}-{clean}")
    } else {
        format!("{millis}-{attempt}-{clean}")
    }
}
