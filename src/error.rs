use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("Gallery item {0} not found")]
    NotFound(i64),

    #[error("Unknown media type '{0}', expected image or video")]
    UnknownMediaType(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Media of item {id} cannot be decoded: {reason}")]
    DecodeFailure { id: i64, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
