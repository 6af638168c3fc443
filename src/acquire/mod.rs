use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

const IMAGE_MIME_PREFIX: &str = "image/";
const FALLBACK_MIME: &str = "application/octet-stream";
const FALLBACK_FILE_NAME: &str = "image";

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("failed to read image file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type AcquireResult<T> = std::result::Result<T, AcquireError>;

/// The currently selected binary payload and its declared MIME type.
///
/// Replaced wholesale on re-selection; absent while no image is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredImage {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl AcquiredImage {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Whether the declared type marks this file as an image.
    pub fn is_image_typed(&self) -> bool {
        self.mime.starts_with(IMAGE_MIME_PREFIX)
    }
}

/// Read a file from disk and infer its declared MIME type.
pub async fn load_from_path(path: &Path) -> AcquireResult<AcquiredImage> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| AcquireError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string();
    let mime = infer_mime(path, &bytes);
    tracing::debug!(file = %file_name, mime = %mime, size = bytes.len(), "acquired image file");
    Ok(AcquiredImage::new(file_name, mime, bytes))
}

/// Declared MIME type for a local file: extension first, content sniffing
/// second, generic fallback last.
fn infer_mime(path: &Path, bytes: &[u8]) -> String {
    if let Some(mime) = mime_from_extension(path) {
        return mime.to_string();
    }
    match image::guess_format(bytes) {
        Ok(format) => format.to_mime_type().to_string(),
        Err(_) => FALLBACK_MIME.to_string(),
    }
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}

/// Drop-gesture acceptance: only the first offered file is considered, and
/// only when its declared type begins with `image/`. Everything else is
/// ignored without surfacing an error.
pub fn first_dropped_image(files: Vec<AcquiredImage>) -> Option<AcquiredImage> {
    files
        .into_iter()
        .next()
        .filter(|file| file.is_image_typed())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_file(name: &str) -> AcquiredImage {
        AcquiredImage::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn is_image_typed_requires_the_image_prefix() {
        assert!(png_file("a.png").is_image_typed());
        assert!(AcquiredImage::new("b.webp", "image/webp", Vec::new()).is_image_typed());
        assert!(!AcquiredImage::new("c.txt", "text/plain", Vec::new()).is_image_typed());
        assert!(!AcquiredImage::new("d.bin", "application/octet-stream", Vec::new()).is_image_typed());
    }

    #[test]
    fn mime_from_extension_is_case_insensitive() {
        assert_eq!(mime_from_extension(Path::new("/tmp/a.PNG")), Some("image/png"));
        assert_eq!(mime_from_extension(Path::new("/tmp/a.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_from_extension(Path::new("/tmp/a.Jpg")), Some("image/jpeg"));
        assert_eq!(mime_from_extension(Path::new("/tmp/a.pdf")), None);
        assert_eq!(mime_from_extension(Path::new("/tmp/no-extension")), None);
    }

    #[test]
    fn infer_mime_sniffs_content_when_the_extension_is_unknown() {
        // Minimal PNG signature; enough for format detection.
        let bytes = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(infer_mime(Path::new("/tmp/upload.tmp"), &bytes), "image/png");
    }

    #[test]
    fn infer_mime_falls_back_to_octet_stream() {
        assert_eq!(
            infer_mime(Path::new("/tmp/upload.tmp"), b"not an image"),
            FALLBACK_MIME
        );
    }

    #[test]
    fn first_dropped_image_accepts_a_leading_image_file() {
        let accepted = first_dropped_image(vec![
            png_file("shot.png"),
            AcquiredImage::new("notes.txt", "text/plain", Vec::new()),
        ]);
        assert_eq!(accepted, Some(png_file("shot.png")));
    }

    #[test]
    fn first_dropped_image_ignores_a_leading_non_image_file() {
        // A later image file does not rescue the drop; only the first
        // offered file counts.
        let accepted = first_dropped_image(vec![
            AcquiredImage::new("notes.txt", "text/plain", Vec::new()),
            png_file("shot.png"),
        ]);
        assert_eq!(accepted, None);
    }

    #[test]
    fn first_dropped_image_ignores_an_empty_drop() {
        assert_eq!(first_dropped_image(Vec::new()), None);
    }

    #[tokio::test]
    async fn load_from_path_reads_bytes_and_extension_mime() {
        let path = std::env::temp_dir().join("textlift-acquire-test.png");
        std::fs::write(&path, b"payload").unwrap();

        let image = load_from_path(&path).await.expect("file should load");
        assert_eq!(image.file_name, "textlift-acquire-test.png");
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.bytes, b"payload");

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn load_from_path_reports_missing_files() {
        let err = load_from_path(Path::new("/tmp/textlift-definitely-missing.png"))
            .await
            .expect_err("missing file should fail");
        assert!(matches!(err, AcquireError::ReadFile { .. }));
        assert!(format!("{err}").contains("textlift-definitely-missing.png"));
    }
}
