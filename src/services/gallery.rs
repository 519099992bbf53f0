use crate::error::{GalleryError, Result};
use crate::models::{GalleryItem, ListedItem, MediaType, NewGalleryItem, UpdateGalleryItem};
use crate::services::{media, store};
use crate::Database;

/// Entry point for the presentation layer. Holds no state of its own beyond
/// the database handle; every call re-reads the store.
#[derive(Debug, Clone)]
pub struct Gallery {
    db: Database,
}

impl Gallery {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn create(&self, item: NewGalleryItem) -> Result<i64> {
        let id = store::create_item(&self.db, &item)?;
        tracing::info!(
            id,
            media_type = %item.media_type,
            size = item.media.len(),
            "Gallery item created"
        );
        Ok(id)
    }

    /// Like [`Gallery::create`], for callers holding a media type as text.
    pub fn create_with_type(
        &self,
        title: &str,
        description: &str,
        media: Vec<u8>,
        media_type: &str,
    ) -> Result<i64> {
        let media_type = parse_media_type(media_type)?;
        self.create(NewGalleryItem {
            title: title.to_string(),
            description: description.to_string(),
            media,
            media_type,
        })
    }

    pub fn list(&self) -> Result<Vec<GalleryItem>> {
        store::list_items(&self.db)
    }

    /// Items newest first, each paired with whether its media decodes. A
    /// corrupt item carries an error message instead of failing the listing.
    pub fn listing(&self) -> Result<Vec<ListedItem>> {
        let items = self.list()?;
        Ok(items
            .into_iter()
            .map(|item| {
                let error = match media::check_decodable(&item.media, item.media_type) {
                    Ok(()) => None,
                    Err(reason) => {
                        let failure = GalleryError::DecodeFailure {
                            id: item.id,
                            reason,
                        };
                        tracing::warn!("{}", failure);
                        Some(failure.to_string())
                    }
                };
                ListedItem {
                    media_url: item.media_url(),
                    size_bytes: item.size_bytes(),
                    item,
                    error,
                }
            })
            .collect())
    }

    pub fn get(&self, id: i64) -> Result<Option<GalleryItem>> {
        store::get_item(&self.db, id)
    }

    /// Fails with [`GalleryError::NotFound`] when the id does not exist.
    pub fn update(&self, id: i64, update: UpdateGalleryItem) -> Result<()> {
        let replaced_media = update.media.is_some();
        if !store::update_item(&self.db, id, &update)? {
            return Err(GalleryError::NotFound(id));
        }
        tracing::info!(id, replaced_media, "Gallery item updated");
        Ok(())
    }

    /// Returns whether an item was removed. Deleting a missing id is not an error.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let removed = store::delete_item(&self.db, id)?;
        if removed {
            tracing::info!(id, "Gallery item deleted");
        } else {
            tracing::debug!(id, "Delete of missing gallery item ignored");
        }
        Ok(removed)
    }

    pub fn count(&self) -> Result<i64> {
        store::count_items(&self.db)
    }

    /// Counts one page load and returns the new total.
    pub fn totals(&self) -> Result<Vec<store::MediaTotals>> {
        store::media_totals(&self.db)
    }

    pub fn record_view(&self) -> Result<i64> {
        store::increment_view_counter(&self.db)
    }

    pub fn view_count(&self) -> Result<i64> {
        store::get_view_count(&self.db)
    }
}

pub fn parse_media_type(value: &str) -> Result<MediaType> {
    value
        .parse()
        .map_err(|_| GalleryError::UnknownMediaType(value.to_string()))
}
