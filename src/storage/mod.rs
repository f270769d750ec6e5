pub mod local;
pub mod s3;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{Settings, StorageBackend};
use crate::models::media::MediaType;

/// Extensions accepted per media class.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

/// Upload size ceilings per media class.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_VIDEO_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Where uploaded media bytes live. `store` returns the public URL the
/// database keeps; `delete` takes that URL back.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    async fn store(&self, filename: &str, data: &[u8]) -> Result<String, StorageError>;
    async fn delete(&self, url: &str) -> Result<(), StorageError>;
}

/// Build the storage backend selected by the settings.
pub async fn from_settings(settings: &Settings) -> Result<Arc<dyn MediaStorage>, StorageError> {
    match settings.storage_backend {
        StorageBackend::Local => Ok(Arc::new(local::LocalStorage::new(PathBuf::from(
            &settings.upload_dir,
        )))),
        StorageBackend::S3 => {
            let s3 = settings.s3.as_ref().ok_or_else(|| {
                StorageError::Backend("S3 backend selected without S3 settings".to_string())
            })?;
            Ok(Arc::new(s3::S3Storage::new(s3).await))
        }
    }
}

/// Lowercased extension of an uploaded filename, if it has one.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Classify an upload by extension against the allow-lists. `None`
/// means the file type is not accepted at all.
pub fn media_type_for(filename: &str) -> Option<MediaType> {
    let ext = file_extension(filename)?;
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaType::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaType::Video)
    } else {
        None
    }
}

pub fn max_bytes_for(media_type: MediaType) -> usize {
    match media_type {
        MediaType::Image => MAX_IMAGE_BYTES,
        MediaType::Video => MAX_VIDEO_BYTES,
    }
}

/// Random storage name keeping the original extension, so two uploads
/// of `logo.png` never collide.
pub fn unique_object_name(filename: &str) -> String {
    match file_extension(filename) {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    }
}
