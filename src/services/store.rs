//! Persistence for gallery items and the page-view counter.
//!
//! Every function checks one connection out of the pool, runs a single
//! statement against it and hands it back. Media type validation happens
//! before anything reaches this module.

use crate::error::Result;
use crate::models::{GalleryItem, MediaType, NewGalleryItem, UpdateGalleryItem};
use crate::Database;
use rusqlite::{OptionalExtension, Row};

const ITEM_COLUMNS: &str =
    "id, title, description, media, media_type, created_at, updated_at";

/// Item count and stored bytes for one media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTotals {
    pub media_type: MediaType,
    pub items: i64,
    pub bytes: i64,
}

fn media_type_at(row: &Row, idx: usize) -> rusqlite::Result<MediaType> {
    let media_type: String = row.get(idx)?;
    media_type.parse::<MediaType>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("unknown media type '{}'", media_type).into(),
        )
    })
}

fn row_to_item(row: &Row) -> rusqlite::Result<GalleryItem> {
    let media_type = media_type_at(row, 4)?;
    Ok(GalleryItem {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        media: row.get(3)?,
        media_type,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub fn create_item(db: &Database, item: &NewGalleryItem) -> Result<i64> {
    let conn = db.get()?;
    conn.execute(
        "INSERT INTO gallery_items (title, description, media, media_type) VALUES (?, ?, ?, ?)",
        (
            &item.title,
            &item.description,
            &item.media,
            item.media_type.as_str(),
        ),
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_items(db: &Database) -> Result<Vec<GalleryItem>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM gallery_items ORDER BY id DESC",
        ITEM_COLUMNS
    ))?;
    let items = stmt
        .query_map([], row_to_item)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(items)
}

pub fn get_item(db: &Database, id: i64) -> Result<Option<GalleryItem>> {
    let conn = db.get()?;
    let item = conn
        .query_row(
            &format!("SELECT {} FROM gallery_items WHERE id = ?", ITEM_COLUMNS),
            [id],
            row_to_item,
        )
        .optional()?;
    Ok(item)
}

/// Returns `false` when no item has the given id.
pub fn update_item(db: &Database, id: i64, update: &UpdateGalleryItem) -> Result<bool> {
    let conn = db.get()?;
    let affected = match &update.media {
        Some(replacement) => conn.execute(
            "UPDATE gallery_items SET title = ?, description = ?, media = ?, media_type = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
            (
                &update.title,
                &update.description,
                &replacement.media,
                replacement.media_type.as_str(),
                id,
            ),
        )?,
        None => conn.execute(
            "UPDATE gallery_items SET title = ?, description = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
            (&update.title, &update.description, id),
        )?,
    };
    Ok(affected > 0)
}

/// Returns `false` when there was nothing to delete.
pub fn delete_item(db: &Database, id: i64) -> Result<bool> {
    let conn = db.get()?;
    let affected = conn.execute("DELETE FROM gallery_items WHERE id = ?", [id])?;
    Ok(affected > 0)
}

pub fn count_items(db: &Database) -> Result<i64> {
    let conn = db.get()?;
    let count = conn.query_row("SELECT COUNT(*) FROM gallery_items", [], |row| row.get(0))?;
    Ok(count)
}

/// Per media type totals, computed in SQL so no blob is read into memory.
pub fn media_totals(db: &Database) -> Result<Vec<MediaTotals>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(
        "SELECT media_type, COUNT(*), COALESCE(SUM(length(media)), 0) FROM gallery_items GROUP BY media_type ORDER BY media_type",
    )?;
    let totals = stmt
        .query_map([], |row| {
            Ok(MediaTotals {
                media_type: media_type_at(row, 0)?,
                items: row.get(1)?,
                bytes: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(totals)
}

/// Adds one to the counter in a single statement and returns the new value.
pub fn increment_view_counter(db: &Database) -> Result<i64> {
    let conn = db.get()?;
    let count = conn.query_row(
        "UPDATE view_counter SET count = count + 1 WHERE id = 1 RETURNING count",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn get_view_count(db: &Database) -> Result<i64> {
    let conn = db.get()?;
    let count = conn
        .query_row("SELECT count FROM view_counter WHERE id = 1", [], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(count.unwrap_or(0))
}
