use crate::services::auth::AdminGate;
use crate::services::gallery::Gallery;
use crate::web::security::RateLimiter;
use crate::{Config, Database};
use anyhow::Result;
use std::collections::HashMap;
use tera::{Tera, Value};

pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub gallery: Gallery,
    pub gate: AdminGate,
    pub templates: Tera,
    pub login_limiter: RateLimiter,
    pub max_upload_bytes: usize,
    pub session_days: i64,
}

impl AppState {
    pub fn new(config: Config, db: Database, gate: AdminGate) -> Result<Self> {
        let mut templates = Tera::default();

        templates.register_filter("format_date", format_date_filter);
        templates.register_filter("human_size", human_size_filter);
        templates.add_raw_templates(vec![
            ("css/gallery.css", include_str!("../../templates/css/gallery.css")),
            ("base.html", include_str!("../../templates/base.html")),
            ("index.html", include_str!("../../templates/index.html")),
            ("login.html", include_str!("../../templates/login.html")),
        ])?;

        let max_upload_bytes = config.media.max_upload_bytes()?;
        let session_days = config.auth.session_days()?;

        Ok(Self {
            gallery: Gallery::new(db.clone()),
            config,
            db,
            gate,
            templates,
            login_limiter: RateLimiter::default(),
            max_upload_bytes,
            session_days,
        })
    }
}

fn format_date_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let date_str = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("format_date requires a string"))?;

    let format = args
        .get("format")
        .and_then(|v| v.as_str())
        .unwrap_or("%B %d, %Y");

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S") {
        return Ok(Value::String(dt.format(format).to_string()));
    }

    Ok(Value::String(date_str.to_string()))
}

fn human_size_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let bytes = value
        .as_u64()
        .ok_or_else(|| tera::Error::msg("human_size requires a number"))?;
    let text = match bytes {
        b if b >= 1024 * 1024 => format!("{:.1} MB", b as f64 / (1024.0 * 1024.0)),
        b if b >= 1024 => format!("{:.1} KB", b as f64 / 1024.0),
        b => format!("{} B", b),
    };
    Ok(Value::String(text))
}
