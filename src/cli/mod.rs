pub mod init;
pub mod migrate;
pub mod secret;
pub mod serve;
pub mod stats;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gallery")]
#[command(version)]
#[command(about = "A single-operator image and video gallery", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "gallery.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a gallery.toml and data directory
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long)]
        title: Option<String>,
    },
    /// Create or upgrade the database schema
    Migrate,
    /// Run the web server
    Serve {
        #[arg(short = 'H', long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
        /// Plaintext admin secret; hashed at startup and never stored
        #[arg(long, env = "GALLERY_ADMIN_SECRET", hide_env_values = true)]
        admin_secret: Option<String>,
    },
    /// Print an Argon2 hash of an admin secret for auth.secret_hash
    HashSecret,
    /// Show item and page-view counts
    Stats,
}
