/// Selfie intake
///
/// Reads a user-picked image file from disk, detects its media type, and
/// validates that the bytes really are a decodable image before they are
/// embedded in a generation request. The read happens off the UI thread via
/// tokio so the window stays responsive.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::state::data::UploadedImage;

/// Failures while turning a picked file into an uploadable image
#[derive(Debug, Clone, Error)]
pub enum IntakeError {
    #[error("Could not read the selected file: {0}")]
    Unreadable(String),
    #[error("The selected file is not a supported image")]
    Undecodable,
}

/// Load a selfie from disk
///
/// Returns the encoded image plus its media type, or an `IntakeError` that
/// leaves any previously loaded selfie untouched.
pub async fn load_selfie(path: PathBuf) -> Result<UploadedImage, IntakeError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| IntakeError::Unreadable(e.to_string()))?;

    let media_type = detect_media_type(&bytes, &path)?;

    // Reject files that merely carry an image extension
    image::load_from_memory(&bytes).map_err(|_| IntakeError::Undecodable)?;

    Ok(UploadedImage::new(bytes, media_type))
}

/// Detect the media type from magic bytes, falling back to the extension
fn detect_media_type(bytes: &[u8], path: &Path) -> Result<String, IntakeError> {
    if let Ok(format) = image::guess_format(bytes) {
        return Ok(format.to_mime_type().to_string());
    }

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());
    match extension.as_deref() {
        Some("png") => Ok("image/png".to_string()),
        Some("jpg") | Some("jpeg") => Ok("image/jpeg".to_string()),
        Some("webp") => Ok("image/webp".to_string()),
        _ => Err(IntakeError::Undecodable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// A tiny valid PNG for intake tests
    fn png_bytes() -> Vec<u8> {
        let pixel = image::Rgba([120u8, 90, 60, 255]);
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(2, 2, pixel));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, image::ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_selfie(PathBuf::from("/nonexistent/selfie.png")).await;
        assert!(matches!(result, Err(IntakeError::Unreadable(_))));
    }

    #[tokio::test]
    async fn test_load_valid_png() {
        let path = temp_file("headshot-studio-intake-valid.png", &png_bytes());
        let image = load_selfie(path.clone()).await.unwrap();
        assert_eq!(image.media_type, "image/png");
        assert!(!image.encoded_data.is_empty());
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_load_garbage_bytes() {
        let path = temp_file("headshot-studio-intake-garbage.png", b"not an image");
        let result = load_selfie(path.clone()).await;
        assert!(matches!(result, Err(IntakeError::Undecodable)));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_media_type_from_magic_bytes() {
        let media_type = detect_media_type(&png_bytes(), Path::new("renamed.jpg")).unwrap();
        // Magic bytes win over a misleading extension
        assert_eq!(media_type, "image/png");
    }

    #[test]
    fn test_media_type_extension_fallback() {
        let media_type = detect_media_type(b"", Path::new("photo.JPEG")).unwrap();
        assert_eq!(media_type, "image/jpeg");
    }
}
