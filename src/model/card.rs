//! Card entity and its per-card presentation state

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

/// Encoded image payload stored as a `data:` URI
///
/// The payload is opaque to the core; it is only ever displayed or handed to
/// the analysis collaborator. Clones share the encoded bytes, so rewriting a
/// card never copies its image.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageData(Arc<str>);

impl ImageData {
    /// Encode raw image bytes into a `data:<mime>;base64,...` URI
    #[must_use]
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self(Arc::from(format!("data:{mime_type};base64,{}", BASE64.encode(bytes))))
    }

    /// Wrap an already encoded URI (or any opaque reference)
    #[must_use]
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self(Arc::from(uri.into()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether both values share the same encoded allocation
    #[must_use]
    pub fn shares_payload(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The base64 payload after the comma of a data URI, if any
    #[must_use]
    pub fn base64_payload(&self) -> Option<&str> {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .map(|(_, payload)| payload)
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Payloads are large; only show the header
        let header = self.0.split(',').next().unwrap_or_default();
        write!(f, "ImageData({header}, {} bytes)", self.0.len())
    }
}

/// Display rotation of a face-up card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Upright,
    Inverted,
}

impl Rotation {
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Upright => 0,
            Self::Inverted => 180,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Upright),
            180 => Ok(Self::Inverted),
            other => Err(format!("unsupported rotation: {other} degrees")),
        }
    }
}

/// Ordered, duplicate-free list of trimmed, non-empty tags
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Whether `tag` is present (exact match)
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Append a tag after trimming it
    ///
    /// Returns `false` when the trimmed tag is empty or already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    /// Remove every entry exactly equal to `tag`
    ///
    /// Returns `true` if anything was removed.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Self::new();
        for tag in iter {
            tags.insert(tag.as_ref());
        }
        tags
    }
}

impl<'de> Deserialize<'de> for TagList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Stored lists are re-normalized; `null` reads as empty
        let raw = Option::<Vec<String>>::deserialize(deserializer)?;
        Ok(raw.unwrap_or_default().into_iter().collect())
    }
}

/// One imported image plus its metadata and presentation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    /// Original filename
    pub name: String,

    /// User-editable display title
    pub title: String,

    #[serde(rename = "data")]
    pub image: ImageData,

    #[serde(rename = "type")]
    pub mime_type: String,

    #[serde(default)]
    pub tags: TagList,

    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,

    #[serde(default)]
    pub rotation: Rotation,

    #[serde(default)]
    pub is_flipped: bool,
}

impl CardImage {
    /// Build a fresh card from an imported image
    ///
    /// The title defaults to the filename without its final extension.
    #[must_use]
    pub fn new(name: impl Into<String>, image: ImageData, mime_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: default_title(&name).to_string(),
            name,
            image,
            mime_type: mime_type.into(),
            tags: TagList::new(),
            note: String::new(),
            rotation: Rotation::Upright,
            is_flipped: false,
        }
    }

    /// Builder-style face-down setter
    #[must_use]
    pub const fn face_down(mut self, flipped: bool) -> Self {
        self.is_flipped = flipped;
        self
    }
}

/// Strip the final extension: `front.v2.png` becomes `front.v2`
#[must_use]
pub fn default_title(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < filename.len() => &filename[..dot],
        _ => filename,
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
