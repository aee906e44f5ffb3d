use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use tradepost_client::{
    config::ClientConfig,
    engine::SyncEngine,
    http::HttpMarketApi,
    push::LocalPushChannel,
};

#[derive(Parser)]
#[command(name = "tradepost", about = "Tradepost marketplace client")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the public item feed.
    Items,
    /// Show the signed-in viewer's swap requests.
    Requests,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig::load_with(cli.config)?;
    info!(api_base = %config.api_base, "starting tradepost client");

    let api = HttpMarketApi::new(&config)?;
    let push = Arc::new(LocalPushChannel::new());
    let (mut engine, _navigations) = SyncEngine::new(api, push);

    match cli.command {
        Command::Items => {
            engine.activate(None).await?;
            for item in engine.items() {
                println!(
                    "{id}  [{status}]  {title}  (by {owner})",
                    id = item.id,
                    status = item.status,
                    title = item.title,
                    owner = item.owner.fullname,
                );
            }
        }
        Command::Requests => {
            let token = config
                .load_token()
                .context("no credential token found; set token_path in the config")?;
            engine.activate(Some(token)).await?;

            let viewer = engine.viewer().context("viewer missing after activation")?;
            println!("signed in as {name} ({id})", name = viewer.fullname, id = viewer.id);

            println!("received:");
            for request in engine.received_requests() {
                println!(
                    "  {id}  [{status}]  {sender} offers {offered} for {desired}",
                    id = request.id,
                    status = request.status,
                    sender = request.sender.fullname,
                    offered = request.offered_item.title,
                    desired = request.desired_item.title,
                );
            }

            println!("sent:");
            for request in engine.sent_requests() {
                println!(
                    "  {id}  [{status}]  offered {offered} to {receiver} for {desired}",
                    id = request.id,
                    status = request.status,
                    offered = request.offered_item.title,
                    receiver = request.receiver.fullname,
                    desired = request.desired_item.title,
                );
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
