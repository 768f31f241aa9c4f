//! Checks that every listed post has its files, and that nothing else is
//! lying around in the content and asset directories.

use std::process::ExitCode;

use anyhow::{Context, Result};
use approvals_site::{
    blog::{BlogStore, reconcile},
    config::Config,
    telemetry::init_tracing,
};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Reconcile the blog listing store with files on disk")]
struct Args {
    /// Delete orphan files and staging leftovers.
    #[arg(long)]
    prune: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let args = Args::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let store = BlogStore::open(config.layout())
        .await
        .context("Failed to open the listing store")?;
    let posts = store.posts().await;

    let issues = reconcile::check(&posts, config.layout())
        .await
        .context("Failed to scan site directories")?;
    for issue in &issues {
        println!("{issue}");
    }

    let mut remaining = issues.len();
    if args.prune {
        remaining -= reconcile::prune(&issues).await;
    }

    info!(posts = posts.len(), issues = issues.len(), remaining, "reconcile finished");
    Ok(if remaining == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
