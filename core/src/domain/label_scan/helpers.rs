use sha2::{Digest, Sha256};

/// Image subtypes the text-detection backend accepts.
const RECOGNIZED_IMAGE_SUBTYPES: &[&str] = &[
    "jpeg",
    "jpg",
    "pjpeg",
    "png",
    "gif",
    "bmp",
    "webp",
    "tiff",
    "x-icon",
    "vnd.microsoft.icon",
];

/// Returns true for `image/*` MIME types the OCR backend can read.
/// Parameters such as `; charset=...` are ignored.
pub fn is_image_mime_type(mime_type: &str) -> bool {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.split_once('/') {
        Some(("image", subtype)) => RECOGNIZED_IMAGE_SUBTYPES.contains(&subtype),
        _ => false,
    }
}

/// Hex SHA-256 of the image, used to correlate logs without logging content.
pub fn image_fingerprint(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_mime_type() {
        assert!(is_image_mime_type("image/jpeg"));
        assert!(is_image_mime_type("IMAGE/PNG"));
        assert!(is_image_mime_type("image/webp; q=0.9"));
        assert!(!is_image_mime_type("image/"));
        assert!(!is_image_mime_type("image/svg+xml"));
        assert!(!is_image_mime_type("application/pdf"));
        assert!(!is_image_mime_type("text/plain"));
        assert!(!is_image_mime_type(""));
    }

    #[test]
    fn test_image_fingerprint() {
        assert_eq!(
            image_fingerprint(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
