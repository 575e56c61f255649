//! Classification of uploads by their declared content type.

use mime::Mime;

/// Media categories the extraction engine can process.
///
/// Classification trusts the declared content type, matching the upload
/// contract: mislabeled bytes surface later as decode failures.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Any `image/*` content type.
    Image,
    /// `application/pdf`.
    Pdf,
}

impl MediaKind {
    /// Classifies a declared content type.
    ///
    /// Returns `None` when the type is outside the supported set or is not
    /// a well-formed media type at all.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type.parse::<Mime>().ok()?;

        if mime.type_() == mime::IMAGE {
            Some(Self::Image)
        } else if mime.type_() == mime::APPLICATION && mime.subtype() == mime::PDF {
            Some(Self::Pdf)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_images() {
        assert_eq!(MediaKind::from_content_type("image/png"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_content_type("image/jpeg"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_content_type("image/webp"), Some(MediaKind::Image));
    }

    #[test]
    fn classifies_pdf() {
        assert_eq!(
            MediaKind::from_content_type("application/pdf"),
            Some(MediaKind::Pdf)
        );
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(
            MediaKind::from_content_type("APPLICATION/PDF"),
            Some(MediaKind::Pdf)
        );
        assert_eq!(MediaKind::from_content_type("Image/PNG"), Some(MediaKind::Image));
    }

    #[test]
    fn ignores_media_type_parameters() {
        assert_eq!(
            MediaKind::from_content_type("image/png; q=0.8"),
            Some(MediaKind::Image)
        );
    }

    #[test]
    fn rejects_unsupported_types() {
        assert_eq!(MediaKind::from_content_type("text/plain"), None);
        assert_eq!(MediaKind::from_content_type("application/json"), None);
        assert_eq!(MediaKind::from_content_type("application/zip"), None);
    }

    #[test]
    fn rejects_malformed_types() {
        assert_eq!(MediaKind::from_content_type(""), None);
        assert_eq!(MediaKind::from_content_type("not a mime type"), None);
        assert_eq!(MediaKind::from_content_type("image"), None);
    }
}
