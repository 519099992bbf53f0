use crate::error::Result;
use crate::models::AdminSession;
use crate::Database;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use rusqlite::OptionalExtension;

pub const MIN_SECRET_LENGTH: usize = 8;

pub fn validate_secret(secret: &str) -> anyhow::Result<()> {
    if secret.chars().count() < MIN_SECRET_LENGTH {
        anyhow::bail!(
            "Admin secret must be at least {} characters",
            MIN_SECRET_LENGTH
        );
    }
    if secret.trim() != secret {
        anyhow::bail!("Admin secret must not start or end with whitespace");
    }
    Ok(())
}

/// Hashes an admin secret into an Argon2 PHC string with a fresh salt.
pub fn hash_secret(secret: &str) -> anyhow::Result<String> {
    validate_secret(secret)?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Secret hashing failed: {}", e))?;
    Ok(hash.to_string())
}

fn verify_secret(secret: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(secret.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Decides whether a submitted credential grants admin capability.
///
/// The gate only ever holds a hash of the secret. A gate built without a
/// secret refuses everything.
#[derive(Clone)]
pub struct AdminGate {
    secret_hash: Option<String>,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl AdminGate {
    /// Builds a gate from an existing Argon2 hash, rejecting malformed ones.
    pub fn from_hash(hash: &str) -> anyhow::Result<Self> {
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid admin secret hash: {}", e))?;
        Ok(Self {
            secret_hash: Some(hash.to_string()),
        })
    }

    /// Builds a gate from a plaintext secret, hashing it immediately.
    pub fn from_secret(secret: &str) -> anyhow::Result<Self> {
        Ok(Self {
            secret_hash: Some(hash_secret(secret)?),
        })
    }

    pub fn disabled() -> Self {
        Self { secret_hash: None }
    }

    pub fn is_configured(&self) -> bool {
        self.secret_hash.is_some()
    }

    pub fn authorize(&self, submitted: &str) -> bool {
        if submitted.is_empty() {
            return false;
        }
        match &self.secret_hash {
            Some(hash) => verify_secret(submitted, hash),
            None => false,
        }
    }
}

pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn create_session(db: &Database, duration_days: i64) -> Result<String> {
    let token = generate_session_token();
    let conn = db.get()?;
    conn.execute(
        "INSERT INTO sessions (token, expires_at) VALUES (?, datetime('now', ?||' days'))",
        (&token, duration_days),
    )?;
    Ok(token)
}

pub fn validate_session(db: &Database, token: &str) -> Result<Option<AdminSession>> {
    let conn = db.get()?;
    let session = conn
        .query_row(
            "SELECT id, token, created_at, expires_at FROM sessions WHERE token = ? AND expires_at > datetime('now')",
            [token],
            |row| {
                Ok(AdminSession {
                    id: row.get(0)?,
                    token: row.get(1)?,
                    created_at: row.get(2)?,
                    expires_at: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(session)
}

pub fn delete_session(db: &Database, token: &str) -> Result<()> {
    let conn = db.get()?;
    conn.execute("DELETE FROM sessions WHERE token = ?", [token])?;
    Ok(())
}

pub fn cleanup_expired_sessions(db: &Database) -> Result<usize> {
    let conn = db.get()?;
    let removed = conn.execute(
        "DELETE FROM sessions WHERE expires_at <= datetime('now')",
        [],
    )?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    const SECRET: &str = "___your_password___";

    fn setup_test_db() -> Database {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db = Database::open_memory(&format!("auth_test_{}", id)).unwrap();
        db.migrate().unwrap();
        db
    }

    #[test]
    fn test_authorize_exact_secret_only() {
        let gate = AdminGate::from_secret(SECRET).unwrap();
        assert!(gate.authorize(SECRET));
        assert!(!gate.authorize(""));
        assert!(!gate.authorize("___your_password__"));
        assert!(!gate.authorize("___your_password___!"));
        assert!(!gate.authorize(" ___your_password___"));
        assert!(!gate.authorize("___YOUR_PASSWORD___"));
    }

    #[test]
    fn test_gate_from_hash() {
        let hash = hash_secret(SECRET).unwrap();
        assert!(hash.starts_with("$argon2"));
        let gate = AdminGate::from_hash(&hash).unwrap();
        assert!(gate.authorize(SECRET));
        assert!(!gate.authorize("wrong-secret"));
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(hash_secret(SECRET).unwrap(), hash_secret(SECRET).unwrap());
    }

    #[test]
    fn test_invalid_hash_rejected() {
        assert!(AdminGate::from_hash("plaintext").is_err());
    }

    #[test]
    fn test_verify_against_malformed_hash_fails() {
        assert!(!verify_secret(SECRET, "plaintext"));
        assert!(!verify_secret(SECRET, ""));
    }

    #[test]
    fn test_disabled_gate_refuses_everything() {
        let gate = AdminGate::disabled();
        assert!(!gate.is_configured());
        assert!(!gate.authorize(SECRET));
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(hash_secret("short").is_err());
        assert!(hash_secret(" padded-secret ").is_err());
    }

    #[test]
    fn test_session_lifecycle() {
        let db = setup_test_db();
        let token = create_session(&db, 7).unwrap();
        assert!(validate_session(&db, &token).unwrap().is_some());
        assert!(validate_session(&db, "bogus").unwrap().is_none());

        delete_session(&db, &token).unwrap();
        assert!(validate_session(&db, &token).unwrap().is_none());
    }

    #[test]
    fn test_expired_sessions_are_invalid_and_cleaned() {
        let db = setup_test_db();
        let token = create_session(&db, -1).unwrap();
        assert!(validate_session(&db, &token).unwrap().is_none());
        assert_eq!(cleanup_expired_sessions(&db).unwrap(), 1);
    }
}
