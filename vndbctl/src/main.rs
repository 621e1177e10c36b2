use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;
use vndb_config::ProviderConfig;
use vndb_core::{
    HttpTransport, MetadataProvider, VndbClient, VndbMetadataProvider,
};

#[derive(Parser, Debug)]
#[command(name = "vndbctl", version, about = "Query VNDB and map results to game metadata")]
struct Cli {
    /// Env file loaded before reading VNDB_* settings; a missing file is ignored
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    /// API base to query instead of the public Kana endpoint
    #[arg(long, global = true, env = "VNDB_API_ENDPOINT")]
    endpoint: Option<Url>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search visual novels by title or alias
    Search {
        text: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Full game metadata for a visual novel id (e.g. v17 or 17)
    Show { id: String },
    /// List releases of a visual novel
    Releases {
        id: String,
        #[arg(long, default_value_t = 100)]
        limit: usize,
        /// Include fan translations and other unofficial releases
        #[arg(long)]
        include_unofficial: bool,
    },
    /// Best match for a game title; honours `[vndbid-<n>]` tags
    Match { title: String },
    /// Print the effective provider configuration
    Config,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered =
        serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}

fn build_client(config: &ProviderConfig, endpoint: Option<Url>) -> VndbClient {
    let options = config.client_options();
    match endpoint {
        Some(endpoint) => VndbClient::with_transport(
            Arc::new(HttpTransport::with_endpoint(endpoint)),
            options,
        ),
        None => VndbClient::new(options),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let env_loaded = dotenvy::from_path(&cli.env_file).is_ok();

    // stdout carries the JSON output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vndb_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if env_loaded {
        info!(path = %cli.env_file.display(), "loaded .env file");
    }

    let config = ProviderConfig::from_env();
    if !config.enabled {
        warn!("VNDB provider is disabled by configuration");
    }

    let client = build_client(&config, cli.endpoint);
    let provider =
        VndbMetadataProvider::new(client.clone(), config.provider_settings());

    match cli.command {
        Command::Search { text, limit } => {
            let listing = client
                .search_visual_novels(&text, limit)
                .await
                .with_context(|| format!("search for '{text}' failed"))?;
            print_json(&json!({ "more": listing.more, "items": listing.items }))
        }
        Command::Show { id } => {
            let metadata = provider
                .get_by_provider_data_id(&id)
                .await
                .with_context(|| format!("lookup of '{id}' failed"))?;
            print_json(&metadata)
        }
        Command::Releases {
            id,
            limit,
            include_unofficial,
        } => {
            let listing = client
                .get_visual_novel_releases(
                    &id,
                    limit,
                    include_unofficial || config.include_unofficial_releases,
                )
                .await
                .with_context(|| format!("release listing for '{id}' failed"))?;
            print_json(&json!({ "more": listing.more, "items": listing.items }))
        }
        Command::Match { title } => {
            let best = provider
                .get_best_match(&title)
                .await
                .with_context(|| format!("no match for '{title}'"))?;
            print_json(&best)
        }
        Command::Config => print_json(&config),
    }
}
