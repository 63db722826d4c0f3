//! Local filesystem storage for listing photos.
//!
//! Photos are written under `<upload_dir>/properties/` with random names and
//! served back by the router's `/uploads` static route.

use std::path::PathBuf;

use image::ImageFormat;
use stayio_core::error::CoreError;

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};

/// Sub-directory holding listing photos.
const PROPERTY_DIR: &str = "properties";

/// A photo persisted to disk.
#[derive(Debug, Clone)]
pub struct StoredPhoto {
    pub path: PathBuf,
    pub url: String,
}

/// Writes uploaded photos and maps them to public URLs.
#[derive(Debug, Clone)]
pub struct PhotoStorage {
    root: PathBuf,
    public_base_url: String,
}

impl PhotoStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: config.upload_dir.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Directory served under `/uploads`.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Identify the image format from its magic bytes.
    ///
    /// Only PNG, JPEG and WebP are accepted; the client-declared content type
    /// and file name are ignored.
    pub fn detect_extension(bytes: &[u8]) -> Result<&'static str, CoreError> {
        match image::guess_format(bytes) {
            Ok(ImageFormat::Png) => Ok("png"),
            Ok(ImageFormat::Jpeg) => Ok("jpg"),
            Ok(ImageFormat::WebP) => Ok("webp"),
            _ => Err(CoreError::Validation(
                "Photos must be PNG, JPEG or WebP images".into(),
            )),
        }
    }

    /// Persist a batch of photos. All are checked before any is written.
    pub async fn store_all(&self, photos: &[Vec<u8>]) -> AppResult<Vec<StoredPhoto>> {
        let extensions = photos
            .iter()
            .map(|bytes| Self::detect_extension(bytes))
            .collect::<Result<Vec<_>, _>>()?;

        let dir = self.root.join(PROPERTY_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::InternalError(format!("create {}: {e}", dir.display())))?;

        let mut stored = Vec::with_capacity(photos.len());
        for (bytes, ext) in photos.iter().zip(extensions) {
            let file_name = format!("{}.{ext}", uuid::Uuid::new_v4());
            let path = dir.join(&file_name);
            if let Err(e) = tokio::fs::write(&path, bytes).await {
                self.remove_all(&stored).await;
                return Err(AppError::InternalError(format!(
                    "write {}: {e}",
                    path.display()
                )));
            }
            stored.push(StoredPhoto {
                url: format!("{}/{PROPERTY_DIR}/{file_name}", self.public_base_url),
                path,
            });
        }

        tracing::debug!(count = stored.len(), "Stored listing photos");
        Ok(stored)
    }

    /// Best-effort removal of photos whose listing was never saved.
    pub async fn remove_all(&self, photos: &[StoredPhoto]) {
        for photo in photos {
            if let Err(e) = tokio::fs::remove_file(&photo.path).await {
                tracing::warn!(path = %photo.path.display(), error = %e, "Failed to remove photo");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Smallest byte prefix `image::guess_format` recognises as PNG.
    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn storage(dir: &std::path::Path) -> PhotoStorage {
        PhotoStorage::new(&StorageConfig {
            upload_dir: dir.to_path_buf(),
            public_base_url: "http://cdn.test/uploads".into(),
        })
    }

    #[test]
    fn detects_supported_formats() {
        assert_eq!(PhotoStorage::detect_extension(PNG_MAGIC).unwrap(), "png");
        assert_eq!(
            PhotoStorage::detect_extension(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap(),
            "jpg"
        );
        assert!(PhotoStorage::detect_extension(b"GIF89a").is_err());
        assert!(PhotoStorage::detect_extension(b"plain text").is_err());
    }

    #[tokio::test]
    async fn stores_photos_under_public_urls() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        let stored = storage.store_all(&[PNG_MAGIC.to_vec()]).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].url.starts_with("http://cdn.test/uploads/properties/"));
        assert!(stored[0].url.ends_with(".png"));
        assert!(stored[0].path.exists());

        storage.remove_all(&stored).await;
        assert!(!stored[0].path.exists());
    }

    #[tokio::test]
    async fn rejects_batch_before_writing_anything() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        let result = storage
            .store_all(&[PNG_MAGIC.to_vec(), b"not an image".to_vec()])
            .await;
        assert!(result.is_err());
        assert!(!dir.path().join(PROPERTY_DIR).exists());
    }
}
