use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shopfeed::app::AppContext;
use shopfeed::cli::{commands, Cli, Commands};
use shopfeed::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    let ctx = AppContext::new(config).await?;

    let result = match &cli.command {
        Commands::Crawl { .. } => commands::crawl(&ctx).await.map(|_| ()),
        Commands::Links { .. } => commands::list_links(&ctx).await,
        Commands::Extract { url } => commands::extract(&ctx, url).await,
    };

    if let Err(e) = ctx.shutdown().await {
        error!("Failed to shut down fetcher: {}", e);
    }

    result?;
    Ok(())
}
