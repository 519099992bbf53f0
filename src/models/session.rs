use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AdminSession {
    pub id: i64,
    #[serde(skip_serializing)]
    pub token: String,
    pub created_at: String,
    pub expires_at: String,
}
