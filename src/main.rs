use art_gallery::cli::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "art_gallery=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { path, title }) => {
            art_gallery::cli::init::run(path, title).await?;
        }
        Some(Commands::Migrate) => {
            art_gallery::cli::migrate::run(&cli.config).await?;
        }
        Some(Commands::Serve {
            host,
            port,
            admin_secret,
        }) => {
            art_gallery::cli::serve::run(&cli.config, host, port, admin_secret).await?;
        }
        Some(Commands::HashSecret) => {
            art_gallery::cli::secret::run().await?;
        }
        Some(Commands::Stats) => {
            art_gallery::cli::stats::run(&cli.config).await?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
