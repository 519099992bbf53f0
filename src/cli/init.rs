use anyhow::Result;
use std::path::PathBuf;

pub async fn run(path: PathBuf, title: Option<String>) -> Result<()> {
    let title = title.unwrap_or_else(|| "Art Gallery".to_string());

    let config_path = path.join("gallery.toml");
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    std::fs::create_dir_all(path.join("data"))?;

    let config = format!(
        r#"[site]
title = "{}"
description = "Explore art pieces displayed side by side."
columns = 3

[server]
host = "127.0.0.1"
port = 3000

[database]
path = "./data/gallery.db"

[media]
max_upload_size = "10MB"

[auth]
# Generate with 'gallery hash-secret', or set GALLERY_ADMIN_SECRET when serving.
# secret_hash = ""
session_lifetime = "7d"
"#,
        title.replace('\\', "\\\\").replace('"', "\\\"")
    );

    std::fs::write(&config_path, config)?;

    tracing::info!("Created new gallery at {:?}", path);
    tracing::info!("Run 'gallery hash-secret' and add the hash to gallery.toml");
    tracing::info!("Run 'gallery serve' to start the server");

    Ok(())
}
