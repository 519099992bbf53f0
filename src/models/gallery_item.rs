use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the stored bytes of an item are decoded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Maps a MIME type such as `image/png` to its category.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let top = mime.split('/').next()?.trim().to_ascii_lowercase();
        match top.as_str() {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

impl FromStr for MediaType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GalleryItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing)]
    pub media: Vec<u8>,
    pub media_type: MediaType,
    pub created_at: String,
    pub updated_at: String,
}

impl GalleryItem {
    pub fn size_bytes(&self) -> usize {
        self.media.len()
    }

    pub fn media_url(&self) -> String {
        format!("/media/{}", self.id)
    }
}

#[derive(Debug, Clone)]
pub struct NewGalleryItem {
    pub title: String,
    pub description: String,
    pub media: Vec<u8>,
    pub media_type: MediaType,
}

/// Replacement media for an existing item. Bytes and type always travel
/// together so a stored item never ends up with a mismatched pair.
#[derive(Debug, Clone)]
pub struct ReplacementMedia {
    pub media: Vec<u8>,
    pub media_type: MediaType,
}

#[derive(Debug, Clone)]
pub struct UpdateGalleryItem {
    pub title: String,
    pub description: String,
    pub media: Option<ReplacementMedia>,
}

/// An item paired with the outcome of decoding its media, as handed to the
/// presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct ListedItem {
    #[serde(flatten)]
    pub item: GalleryItem,
    pub media_url: String,
    pub size_bytes: usize,
    pub error: Option<String>,
}
