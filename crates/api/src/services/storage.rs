//! Gallery file storage.
//!
//! Validates uploaded media against configured MIME/size ceilings and
//! writes accepted files under the uploads directory. Stored files are
//! addressed by the relative URL appended to the provider's gallery.

use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

use crate::config::LimitsConfig;

/// What kind of media an upload claims to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// Parses the multipart `type` field (`photos` or `videos`).
    pub fn from_field(value: &str) -> Option<Self> {
        match value {
            "photos" => Some(MediaKind::Photo),
            "videos" => Some(MediaKind::Video),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photos",
            MediaKind::Video => "videos",
        }
    }

    /// MIME prefixes accepted for this kind.
    fn accepted_mime_prefix(&self) -> &'static str {
        match self {
            MediaKind::Photo => "image/",
            MediaKind::Video => "video/",
        }
    }

    /// The configured size ceiling in bytes.
    pub fn max_bytes(&self, limits: &LimitsConfig) -> usize {
        match self {
            MediaKind::Photo => limits.gallery_photo_max_bytes,
            MediaKind::Video => limits.gallery_video_max_bytes,
        }
    }
}

/// Error type for media validation and storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unsupported media type: {0}")]
    UnsupportedType(String),

    #[error("File exceeds the {limit} byte limit ({size} bytes)")]
    TooLarge { size: usize, limit: usize },

    #[error("Failed to store file: {0}")]
    Io(#[from] std::io::Error),
}

/// Validates an upload's content type and size against the configured
/// ceilings for its media kind.
pub fn validate_media(
    kind: MediaKind,
    content_type: Option<&str>,
    size: usize,
    limits: &LimitsConfig,
) -> Result<(), StorageError> {
    let mime = content_type.unwrap_or("");
    if !mime.starts_with(kind.accepted_mime_prefix()) {
        return Err(StorageError::UnsupportedType(mime.to_string()));
    }

    let limit = kind.max_bytes(limits);
    if size > limit {
        return Err(StorageError::TooLarge { size, limit });
    }

    Ok(())
}

/// Writes an accepted upload to disk and returns its public URL path.
///
/// Files are stored as `<uploads_dir>/<provider_id>/<uuid>.<ext>` so
/// original filenames never reach the filesystem.
pub async fn save_upload(
    uploads_dir: &str,
    provider_id: Uuid,
    original_name: &str,
    data: &[u8],
) -> Result<String, StorageError> {
    let ext = extension_of(original_name);
    let file_name = match ext {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };

    let dir = PathBuf::from(uploads_dir).join(provider_id.to_string());
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(&file_name), data).await?;

    Ok(format!("/uploads/{}/{}", provider_id, file_name))
}

/// Best-effort removal of a stored file by its public URL path.
///
/// Silently ignores URLs outside the uploads namespace and files that are
/// already gone; the gallery array is the source of truth, the file is a
/// cache of bytes.
pub async fn remove_upload(uploads_dir: &str, url: &str) {
    let Some(relative) = url.strip_prefix("/uploads/") else {
        return;
    };
    // Refuse path traversal out of the uploads directory
    if relative.split('/').any(|part| part == "..") {
        return;
    }

    let path = Path::new(uploads_dir).join(relative);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::debug!("Could not remove {}: {}", path.display(), e);
    }
}

/// Lowercased file extension, restricted to short alphanumeric suffixes.
fn extension_of(name: &str) -> Option<String> {
    let ext = name.rsplit('.').next()?;
    if ext.len() > 5 || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    if ext.len() == name.len() {
        // No dot at all
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_limits() -> LimitsConfig {
        LimitsConfig {
            gallery_photo_max_bytes: 10 * 1024 * 1024,
            gallery_video_max_bytes: 250 * 1024 * 1024,
            uploads_dir: "uploads".to_string(),
        }
    }

    #[test]
    fn test_media_kind_from_field() {
        assert_eq!(MediaKind::from_field("photos"), Some(MediaKind::Photo));
        assert_eq!(MediaKind::from_field("videos"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_field("documents"), None);
    }

    #[test]
    fn test_validate_photo_within_limit() {
        let limits = test_limits();
        assert!(validate_media(MediaKind::Photo, Some("image/jpeg"), 1024, &limits).is_ok());
    }

    #[test]
    fn test_validate_photo_over_limit() {
        let limits = test_limits();
        let result = validate_media(
            MediaKind::Photo,
            Some("image/jpeg"),
            11 * 1024 * 1024,
            &limits,
        );
        assert!(matches!(result, Err(StorageError::TooLarge { .. })));
    }

    #[test]
    fn test_validate_video_limit_is_250_mib() {
        let limits = test_limits();
        // 250 MiB exactly is accepted, one byte over is not
        assert!(validate_media(
            MediaKind::Video,
            Some("video/mp4"),
            250 * 1024 * 1024,
            &limits
        )
        .is_ok());
        assert!(validate_media(
            MediaKind::Video,
            Some("video/mp4"),
            250 * 1024 * 1024 + 1,
            &limits
        )
        .is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_mime() {
        let limits = test_limits();
        let result = validate_media(MediaKind::Photo, Some("video/mp4"), 1024, &limits);
        assert!(matches!(result, Err(StorageError::UnsupportedType(_))));

        let result = validate_media(MediaKind::Video, Some("application/pdf"), 1024, &limits);
        assert!(matches!(result, Err(StorageError::UnsupportedType(_))));
    }

    #[test]
    fn test_validate_rejects_missing_mime() {
        let limits = test_limits();
        assert!(validate_media(MediaKind::Photo, None, 1024, &limits).is_err());
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("puja.JPG"), Some("jpg".to_string()));
        assert_eq!(extension_of("kirtan.recording.mp4"), Some("mp4".to_string()));
        assert_eq!(extension_of("noextension"), None);
        assert_eq!(extension_of("weird.!!"), None);
    }
}
