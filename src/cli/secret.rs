use crate::services::auth;
use anyhow::Result;

pub async fn run() -> Result<()> {
    let secret = rpassword::prompt_password("Admin secret: ")?;
    let confirm = rpassword::prompt_password("Confirm admin secret: ")?;

    if secret != confirm {
        anyhow::bail!("Secrets do not match");
    }

    let hash = auth::hash_secret(&secret)?;
    println!("Add this to the [auth] section of gallery.toml:\n");
    println!("secret_hash = \"{}\"", hash);

    Ok(())
}
