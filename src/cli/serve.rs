use crate::services::auth::AdminGate;
use crate::{web, Config, Database};
use anyhow::Result;
use std::path::Path;

fn build_gate(config: &Config, admin_secret: Option<String>) -> Result<AdminGate> {
    match (admin_secret, &config.auth.secret_hash) {
        (Some(secret), _) => {
            tracing::info!("Using admin secret from GALLERY_ADMIN_SECRET");
            AdminGate::from_secret(&secret)
        }
        (None, Some(hash)) if !hash.trim().is_empty() => AdminGate::from_hash(hash.trim()),
        _ => Ok(AdminGate::disabled()),
    }
}

pub async fn run(
    config_path: &Path,
    host: Option<String>,
    port: Option<u16>,
    admin_secret: Option<String>,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open_with_pool_size(&config.database.path, config.database.pool_size)?;

    db.migrate()?;

    let gate = build_gate(&config, admin_secret)?;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server at http://{}", addr);

    web::serve(config, db, gate, &addr).await?;

    Ok(())
}
