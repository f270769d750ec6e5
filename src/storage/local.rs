use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{MediaStorage, StorageError};

/// Public route under which the upload directory is served.
pub const PUBLIC_PREFIX: &str = "/static/uploads";

/// Local-disk media storage writing into a single upload directory.
pub struct LocalStorage {
    upload_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(upload_dir: PathBuf) -> Self {
        Self { upload_dir }
    }

    /// Resolve a public URL back to a path inside the upload dir. Only
    /// the final path component is honored, so a crafted URL cannot
    /// reach outside the directory.
    fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let name = Path::new(url).file_name()?;
        Some(self.upload_dir.join(name))
    }
}

#[async_trait]
impl MediaStorage for LocalStorage {
    async fn store(&self, filename: &str, data: &[u8]) -> Result<String, StorageError> {
        fs::create_dir_all(&self.upload_dir).await?;
        let path = self.upload_dir.join(filename);

        if let Err(e) = fs::write(&path, data).await {
            // a partial file must not outlive the failed request
            let _ = fs::remove_file(&path).await;
            return Err(e.into());
        }

        Ok(format!("{PUBLIC_PREFIX}/{filename}"))
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        let Some(path) = self.path_for_url(url) else {
            return Ok(());
        };

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
