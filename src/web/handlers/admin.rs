use crate::error::GalleryError;
use crate::models::{NewGalleryItem, ReplacementMedia, UpdateGalleryItem};
use crate::services::media::{self, MediaUpload};
use crate::web::error::AppResult;
use crate::web::extractors::AdminUser;
use crate::web::state::AppState;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

/// Fields of the item form. `file` is absent when no file was chosen.
struct ItemForm {
    title: String,
    description: String,
    file: Option<MediaUpload>,
}

fn malformed(err: MultipartError) -> GalleryError {
    GalleryError::InvalidUpload(err.body_text())
}

async fn read_item_form(state: &AppState, mut multipart: Multipart) -> AppResult<ItemForm> {
    let mut form = ItemForm {
        title: String::new(),
        description: String::new(),
        file: None,
    };

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = field.text().await.map_err(malformed)?.trim().to_string(),
            "description" => {
                form.description = field.text().await.map_err(malformed)?.trim().to_string()
            }
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(malformed)?;
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                form.file = Some(media::prepare_upload(
                    &file_name,
                    content_type.as_deref(),
                    data.to_vec(),
                    state.max_upload_bytes,
                )?);
            }
            other => tracing::debug!("Ignoring unexpected form field '{}'", other),
        }
    }

    Ok(form)
}

pub async fn create_item(
    State(state): State<Arc<AppState>>,
    AdminUser(_session): AdminUser,
    multipart: Multipart,
) -> AppResult<Response> {
    let form = read_item_form(&state, multipart).await?;
    let upload = form
        .file
        .ok_or_else(|| GalleryError::InvalidUpload("Choose an image or video to upload".into()))?;

    state.gallery.create(NewGalleryItem {
        title: form.title,
        description: form.description,
        media: upload.data,
        media_type: upload.media_type,
    })?;

    Ok(Redirect::to("/?notice=added").into_response())
}

pub async fn update_item(
    State(state): State<Arc<AppState>>,
    AdminUser(_session): AdminUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Response> {
    let form = read_item_form(&state, multipart).await?;

    state.gallery.update(
        id,
        UpdateGalleryItem {
            title: form.title,
            description: form.description,
            media: form.file.map(|upload| ReplacementMedia {
                media: upload.data,
                media_type: upload.media_type,
            }),
        },
    )?;

    Ok(Redirect::to("/?notice=updated").into_response())
}

pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    AdminUser(_session): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    state.gallery.delete(id)?;
    Ok(Redirect::to("/?notice=deleted").into_response())
}
