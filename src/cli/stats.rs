use crate::models::MediaType;
use crate::services::gallery::Gallery;
use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open_with_pool_size(&config.database.path, config.database.pool_size)?;
    db.migrate()?;

    let gallery = Gallery::new(db);
    let totals = gallery.totals()?;
    let count_of = |media_type: MediaType| {
        totals
            .iter()
            .filter(|t| t.media_type == media_type)
            .map(|t| t.items)
            .sum::<i64>()
    };
    let images = count_of(MediaType::Image);
    let videos = count_of(MediaType::Video);
    let bytes: i64 = totals.iter().map(|t| t.bytes).sum();

    println!("{:<12} {}", "ITEMS", images + videos);
    println!("{:<12} {}", "IMAGES", images);
    println!("{:<12} {}", "VIDEOS", videos);
    println!("{:<12} {}", "BYTES", bytes);
    println!("{:<12} {}", "VIEWS", gallery.view_count()?);

    Ok(())
}
