//! Archive collaborator: zip upload to a flat list of images

use super::error::ArchiveError;
use regex::Regex;
use std::io::{Cursor, Read};
use std::sync::LazyLock;

static IMAGE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(png|jpe?g|webp)$").expect("image suffix pattern is valid")
});

/// One image pulled out of an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    /// Basename of the entry
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ExtractedImage {
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// Turns uploaded archive bytes into images
pub trait ImageExtractor {
    /// # Errors
    ///
    /// Returns `ArchiveError` when the input is not a readable archive.
    fn extract_images(&self, archive: &[u8]) -> Result<Vec<ExtractedImage>, ArchiveError>;
}

/// `ImageExtractor` backed by the `zip` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

impl ImageExtractor for ZipExtractor {
    fn extract_images(&self, archive: &[u8]) -> Result<Vec<ExtractedImage>, ArchiveError> {
        let mut zip = zip::ZipArchive::new(Cursor::new(archive))?;
        let mut images = Vec::new();

        for i in 0..zip.len() {
            let mut entry = zip.by_index(i)?;
            if entry.is_dir() || !is_image_name(entry.name()) {
                continue;
            }

            let path = entry.name().to_string();
            let filename = basename(&path).to_string();
            let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
            entry
                .read_to_end(&mut bytes)
                .map_err(|source| ArchiveError::Entry { name: path, source })?;

            let mime_type = mime_for(&filename).to_string();
            images.push(ExtractedImage {
                filename,
                bytes,
                mime_type,
            });
        }

        Ok(images)
    }
}

/// Whether an entry name carries an image suffix we import
#[must_use]
pub fn is_image_name(name: &str) -> bool {
    IMAGE_SUFFIX.is_match(name)
}

fn basename(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(path)
}

/// Mime type implied by a filename's extension
#[must_use]
pub fn mime_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}
