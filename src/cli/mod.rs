use crate::config::Config;
use crate::core::{create_embed_chat_url, create_embed_video_url, extract_video_id, Host, VideoEntry};
use crate::gateway::{self, GatewayClient};
use crate::providers::ProviderRegistry;
use crate::session::{AddOutcome, Session};
use crate::utils::host_label;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(name = "multiviewer")]
#[command(about = "Watch videos and livestreams from several hosts side by side")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./multiviewer.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the metadata lookup endpoints
    Serve {
        /// Address to bind, overrides the config
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Print the canonical id for a link
    Extract { host: String, input: String },
    /// Print the player (or chat) embed URL
    Embed {
        host: Host,
        id: String,
        #[arg(long)]
        chat: bool,
    },
    /// Look up metadata for a link through the gateway
    Fetch { host: String, input: String },
    /// Build a watch list from `host=link` items and print its share link
    Open {
        #[arg(value_name = "HOST=LINK", required = true)]
        items: Vec<String>,
    },
    /// Resolve a shared `list` value
    Hydrate { list: String },
    /// Print the effective configuration
    Config,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref()).context("loading configuration")?;

        match &self.command {
            Command::Serve { bind } => {
                let addr = bind.clone().unwrap_or_else(|| config.bind.clone());
                let registry = ProviderRegistry::from_config(&config)?;
                let listener = tokio::net::TcpListener::bind(&addr)
                    .await
                    .with_context(|| format!("binding to {}", addr))?;
                gateway::serve(listener, registry).await?;
            }
            Command::Extract { host, input } => {
                println!("{}", extract_video_id(host, input)?);
            }
            Command::Embed { host, id, chat } => {
                let url = if *chat {
                    create_embed_chat_url(*host, id, config.embed_domain())?
                } else {
                    create_embed_video_url(*host, id, config.embed_domain())?
                        .url()
                        .to_string()
                };
                println!("{}", url);
            }
            Command::Fetch { host, input } => {
                let id = extract_video_id(host, input)?;
                let client = GatewayClient::new(&config)?;
                let entry = client.fetch_video_metadata(Some(host.parse()?), &id).await?;
                println!("{}", serde_json::to_string_pretty(&entry)?);
            }
            Command::Open { items } => {
                let session = Session::new(GatewayClient::new(&config)?);
                for item in items {
                    let (host, link) = item
                        .split_once('=')
                        .with_context(|| format!("expected HOST=LINK, got {}", item))?;
                    match session.add_video(host, link).await {
                        Ok(AddOutcome::Added(entry)) => println!("Added: {}", describe(&entry)),
                        Ok(AddOutcome::Ignored) => {}
                        Err(err) => warn!("{}: {}", item, err),
                    }
                }
                print_list(&config, &session.videos().await);
                println!("Share: {}", session.share_params().await);
            }
            Command::Hydrate { list } => {
                let session = Session::new(GatewayClient::new(&config)?);
                let count = session.load_shared(list).await;
                println!("Resolved {} entries", count);
                print_list(&config, &session.videos().await);
            }
            Command::Config => {
                print!("{}", config.to_toml()?);
            }
        }

        Ok(())
    }
}

fn describe(entry: &VideoEntry) -> String {
    format!(
        "[{}] {} ({})",
        host_label(entry.host.as_str()),
        entry.title.as_deref().unwrap_or(&entry.id),
        entry.channel_name
    )
}

fn print_list(config: &Config, videos: &[VideoEntry]) {
    for (i, entry) in videos.iter().enumerate() {
        println!("  {}: {}", i + 1, describe(entry));
        match create_embed_video_url(entry.host, &entry.id, config.embed_domain()) {
            Ok(source) => println!("     player: {}", source.url()),
            Err(err) => println!("     player: {}", err),
        }
        if entry.livestream_chat {
            if let Ok(chat) = create_embed_chat_url(entry.host, &entry.id, config.embed_domain()) {
                println!("     chat:   {}", chat);
            }
        }
    }
}
