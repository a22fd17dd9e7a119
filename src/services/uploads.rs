use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::{error, info};

pub const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Public URL prefix the upload directory is served under.
pub const UPLOAD_URL_PREFIX: &str = "/images/uploads";

const BYTES_PER_MB: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    MissingFile,
    #[error("Invalid file type. Only JPEG, PNG, and WebP are allowed.")]
    InvalidType,
    #[error("File too large. Maximum size is {max_mb}MB.")]
    TooLarge { max_mb: usize },
    #[error("Could not create upload directory")]
    CreateDir(#[source] std::io::Error),
    #[error("Upload failed")]
    Failed(String),
}

impl UploadError {
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            UploadError::MissingFile | UploadError::InvalidType | UploadError::TooLarge { .. }
        )
    }
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUpload {
    pub message: String,
    pub filename: String,
    pub url: String,
}

/// Writes validated image uploads below the public image directory.
#[derive(Clone)]
pub struct UploadService {
    dir: Arc<PathBuf>,
    max_bytes: usize,
}

impl UploadService {
    pub fn new(dir: PathBuf, max_bytes: usize) -> Self {
        Self {
            dir: Arc::new(dir),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn validate(&self, file: &UploadedFile) -> Result<(), UploadError> {
        if !ALLOWED_CONTENT_TYPES.contains(&file.content_type.as_str()) {
            return Err(UploadError::InvalidType);
        }
        if file.bytes.len() > self.max_bytes {
            return Err(self.too_large());
        }
        Ok(())
    }

    /// The rejection for a file over the limit, with the limit rounded up to
    /// whole megabytes.
    pub fn too_large(&self) -> UploadError {
        UploadError::TooLarge {
            max_mb: self.max_bytes.div_ceil(BYTES_PER_MB),
        }
    }

    pub async fn store(&self, file: UploadedFile) -> Result<StoredUpload, UploadError> {
        self.validate(&file)?;

        let filename = format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(&file.file_name)
        );

        fs::create_dir_all(self.dir()).await.map_err(|err| {
            error!("could not create upload directory: {err}");
            UploadError::CreateDir(err)
        })?;

        let path = self.dir().join(&filename);
        fs::write(&path, &file.bytes).await.map_err(|err| {
            error!("upload write failed: {err}");
            UploadError::Failed(err.to_string())
        })?;

        info!(%filename, size = file.bytes.len(), "stored upload");
        Ok(StoredUpload {
            message: "Upload successful".into(),
            url: format!("{UPLOAD_URL_PREFIX}/{filename}"),
            filename,
        })
    }
}

/// Replaces every character outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
