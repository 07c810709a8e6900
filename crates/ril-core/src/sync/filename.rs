//! Mapping image URLs to the filenames stored in the target folder.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::FilenameError;

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"/([\w\-]+\.(?:jpg|png))").expect("filename pattern is a valid regex")
    })
}

/// Derive the stored filename from an image URL.
///
/// Takes the first `/`-preceded run of word characters and hyphens that is
/// followed by `.jpg` or `.png`; query strings are ignored.
pub fn filename_from_url(url: &str) -> Result<String, FilenameError> {
    filename_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| FilenameError::NoMatch {
            url: url.to_string(),
        })
}

/// Full path the image at `url` is stored under.
pub fn target_path(folder: &Path, url: &str) -> Result<PathBuf, FilenameError> {
    filename_from_url(url).map(|name| folder.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_image_url() {
        assert_eq!(
            filename_from_url("https://i.redd.it/abc123xyz.jpg").unwrap(),
            "abc123xyz.jpg"
        );
    }

    #[test]
    fn test_preview_url_with_query() {
        assert_eq!(
            filename_from_url("https://preview.redd.it/k8-Xq_1z.png?width=1920&s=deadbeef")
                .unwrap(),
            "k8-Xq_1z.png"
        );
    }

    #[test]
    fn test_external_preview_keeps_hyphenated_name() {
        assert_eq!(
            filename_from_url(
                "https://external-preview.redd.it/Ab-cD_ef-12.jpg?auto=webp&s=1"
            )
            .unwrap(),
            "Ab-cD_ef-12.jpg"
        );
    }

    #[test]
    fn test_other_extensions_do_not_match() {
        let err = filename_from_url("https://i.redd.it/photo.gif").unwrap_err();
        assert_eq!(
            err,
            FilenameError::NoMatch {
                url: "https://i.redd.it/photo.gif".to_string()
            }
        );
        assert!(filename_from_url("https://i.redd.it/photo.webp").is_err());
    }

    #[test]
    fn test_name_must_follow_a_slash() {
        assert!(filename_from_url("photo.jpg").is_err());
        assert!(filename_from_url("https://host/dir/we ird.jpg").is_err());
    }

    #[test]
    fn test_target_path_joins_folder() {
        let path = target_path(Path::new("/tmp/wall"), "https://i.redd.it/a.png").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/wall/a.png"));
    }
}
