use crate::error::{GalleryError, Result};
use crate::models::MediaType;

pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024; // 10MB

const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/webm",
    "video/quicktime",
];

/// Validated upload, ready to be handed to the gallery.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub media_type: MediaType,
}

fn invalid(msg: impl Into<String>) -> GalleryError {
    GalleryError::InvalidUpload(msg.into())
}

/// Resolves the MIME type of an upload. The declared type wins, then the
/// file name, then the bytes themselves.
fn resolve_mime(file_name: &str, declared: Option<&str>, data: &[u8]) -> Option<String> {
    declared
        .map(|m| m.trim().to_ascii_lowercase())
        .filter(|m| !m.is_empty() && m != "application/octet-stream")
        .or_else(|| {
            mime_guess::from_path(file_name)
                .first()
                .map(|m| m.essence_str().to_string())
        })
        .or_else(|| infer::get(data).map(|t| t.mime_type().to_string()))
}

pub fn prepare_upload(
    file_name: &str,
    declared_mime: Option<&str>,
    data: Vec<u8>,
    max_size: usize,
) -> Result<MediaUpload> {
    if data.is_empty() {
        return Err(invalid("File is empty"));
    }

    if data.len() > max_size {
        return Err(invalid(format!(
            "File too large: {} bytes (max {} bytes)",
            data.len(),
            max_size
        )));
    }

    let mime_type = resolve_mime(file_name, declared_mime, &data)
        .ok_or_else(|| invalid(format!("Could not determine the type of '{}'", file_name)))?;

    if !ALLOWED_MIME_TYPES.contains(&mime_type.as_str()) {
        return Err(invalid(format!(
            "File type not allowed: {}. Allowed types: {}",
            mime_type,
            ALLOWED_MIME_TYPES.join(", ")
        )));
    }

    let media_type = MediaType::from_mime(&mime_type)
        .ok_or_else(|| GalleryError::UnknownMediaType(mime_type.clone()))?;

    if let Some(sniffed) = sniff_media_type(&data) {
        if sniffed != media_type {
            return Err(invalid(format!(
                "File declared as {} but its contents look like {}",
                media_type, sniffed
            )));
        }
    }

    check_decodable(&data, media_type)
        .map_err(|reason| invalid(format!("File is not a readable {}: {}", media_type, reason)))?;

    Ok(MediaUpload {
        data,
        mime_type,
        media_type,
    })
}

fn sniff_media_type(data: &[u8]) -> Option<MediaType> {
    if infer::is_image(data) {
        Some(MediaType::Image)
    } else if infer::is_video(data) {
        Some(MediaType::Video)
    } else {
        None
    }
}

/// Checks that stored bytes can be shown as their declared type.
pub fn check_decodable(media: &[u8], media_type: MediaType) -> std::result::Result<(), String> {
    match media_type {
        MediaType::Image => image::load_from_memory(media)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        MediaType::Video => {
            if infer::is_video(media) {
                Ok(())
            } else {
                Err("not a recognized video container".to_string())
            }
        }
    }
}

/// MIME type used when serving the raw bytes of an item.
pub fn content_type(media: &[u8], media_type: MediaType) -> String {
    match infer::get(media) {
        Some(t) if MediaType::from_mime(t.mime_type()) == Some(media_type) => {
            t.mime_type().to_string()
        }
        _ => match media_type {
            MediaType::Image => "application/octet-stream".to_string(),
            MediaType::Video => "video/mp4".to_string(),
        },
    }
}
