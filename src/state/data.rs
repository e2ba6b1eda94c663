/// Shared data structures for the application state
///
/// These structs represent the image payloads that flow between the intake
/// layer, the generation client, and the UI layer. Payloads are kept in the
/// base64 form the API expects, alongside a ready-made iced handle so the
/// view never re-decodes them.

use base64::{engine::general_purpose, Engine as _};
use iced::widget::image::Handle;

/// The user's selfie, ready to be embedded in a generation request
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Base64-encoded file contents
    pub encoded_data: String,
    /// Declared media type (e.g. "image/jpeg")
    pub media_type: String,
    /// Display handle for the preview panes
    handle: Handle,
}

impl UploadedImage {
    /// Build an uploaded image from raw file bytes and a detected media type
    pub fn new(bytes: Vec<u8>, media_type: String) -> Self {
        let encoded_data = general_purpose::STANDARD.encode(&bytes);
        let handle = Handle::from_bytes(bytes);
        UploadedImage {
            encoded_data,
            media_type,
            handle,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }
}

/// A headshot returned by the generation API
///
/// The API always returns PNG-equivalent data regardless of the input type,
/// so the media type is fixed.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Base64-encoded PNG contents
    pub encoded_data: String,
    /// Display handle for the result pane
    handle: Handle,
}

impl GeneratedImage {
    /// Media type of every generated image
    pub const MEDIA_TYPE: &'static str = "image/png";

    /// Build a generated image from decoded PNG bytes
    pub fn from_png_bytes(bytes: Vec<u8>) -> Self {
        let encoded_data = general_purpose::STANDARD.encode(&bytes);
        let handle = Handle::from_bytes(bytes);
        GeneratedImage {
            encoded_data,
            handle,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploaded_image_encodes_payload() {
        let image = UploadedImage::new(vec![0x89, 0x50, 0x4E, 0x47], "image/png".to_string());
        assert_eq!(image.encoded_data, "iVBORw==");
        assert_eq!(image.media_type, "image/png");
    }

    #[test]
    fn test_generated_image_media_type_is_png() {
        let image = GeneratedImage::from_png_bytes(vec![1, 2, 3]);
        assert_eq!(GeneratedImage::MEDIA_TYPE, "image/png");
        assert!(!image.encoded_data.is_empty());
    }
}
