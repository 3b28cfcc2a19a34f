//! Signature Image Value Object
//!
//! The drawing surface lives in the browser; what reaches the backend is
//! its export, a base64 PNG data URI. An untouched canvas exports an
//! empty string, so the empty state is representable and `is_empty` is
//! the gate callers must check before trusting the image.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DATA_URI_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

/// Exported signature raster, either empty or a validated image data URI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureImage(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature is not an image data URI")]
    NotAnImageDataUri,
    #[error("signature data URI carries no payload")]
    EmptyPayload,
}

impl SignatureImage {
    /// Accepts the untouched-canvas export (empty string) or a
    /// `data:image/<fmt>;base64,<payload>` URI; everything else is
    /// rejected at the boundary.
    pub fn parse(raw: impl Into<String>) -> Result<Self, SignatureError> {
        let raw = raw.into().trim().to_string();

        if raw.is_empty() {
            return Ok(Self(raw));
        }
        if !raw.starts_with(DATA_URI_PREFIX) {
            return Err(SignatureError::NotAnImageDataUri);
        }
        match raw.split_once(BASE64_MARKER) {
            Some((_, payload)) if !payload.is_empty() => Ok(Self(raw)),
            Some(_) => Err(SignatureError::EmptyPayload),
            None => Err(SignatureError::NotAnImageDataUri),
        }
    }

    /// True when the canvas was never drawn on.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_data_uri(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_canvas_is_empty() {
        let sig = SignatureImage::parse("").unwrap();
        assert!(sig.is_empty());
    }

    #[test]
    fn test_valid_data_uri() {
        let sig = SignatureImage::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert!(!sig.is_empty());
        assert_eq!(sig.as_data_uri(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_rejects_non_image_uri() {
        assert_eq!(
            SignatureImage::parse("data:text/html;base64,PHA+"),
            Err(SignatureError::NotAnImageDataUri)
        );
        assert_eq!(
            SignatureImage::parse("hello"),
            Err(SignatureError::NotAnImageDataUri)
        );
    }

    #[test]
    fn test_rejects_empty_payload() {
        assert_eq!(
            SignatureImage::parse("data:image/png;base64,"),
            Err(SignatureError::EmptyPayload)
        );
    }
}
