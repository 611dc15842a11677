//! Shared key generation for storage backends.
//!
//! Key format: `gallery/photos/{filename}` for photos, `gallery/videos/{filename}` for videos.

use academy_core::models::MediaKind;

/// Generate a storage key for the given media kind and filename.
///
/// All backends must use this format for consistency.
pub fn generate_storage_key(kind: MediaKind, filename: &str) -> String {
    match kind {
        MediaKind::Photo => format!("gallery/photos/{}", filename),
        MediaKind::Video => format!("gallery/videos/{}", filename),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_kind_scoped() {
        assert_eq!(
            generate_storage_key(MediaKind::Photo, "a.jpg"),
            "gallery/photos/a.jpg"
        );
        assert_eq!(
            generate_storage_key(MediaKind::Video, "b.mp4"),
            "gallery/videos/b.mp4"
        );
    }
}
