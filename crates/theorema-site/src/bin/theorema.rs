use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use theorema_core::{ContentTree, TheoremaConfig};
use theorema_site::conversion::{hit_to_summary, page_summary};
use theorema_site::handlers::ALL_JSON;
use theorema_site::protocol::SearchResult;
use theorema_site::{handle_route, search_all_categories, Route, SiteState};

#[derive(Parser)]
#[command(name = "theorema", about = "Render and browse the math knowledge base")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content root directory, overrides `content.root`
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the HTML page for a site path
    Render {
        #[arg(default_value = "/")]
        route: String,
    },
    /// Print the content folder tree
    Tree {
        /// Build from the manifest instead of discovered files
        #[arg(long)]
        manifest: bool,
    },
    /// Search definitions and theorems in every theory
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
}

fn load_config(cli: &Cli) -> Result<TheoremaConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            TheoremaConfig::from_yaml(&content)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => TheoremaConfig::default(),
    };
    if let Some(root) = &cli.root {
        config.content.root = root.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_filter()),
    )
    .init();

    let snapshot = config
        .cache
        .snapshot_path
        .clone()
        .filter(|_| config.cache.enabled);
    let state = SiteState::from_config(config);

    if let Some(path) = snapshot.as_ref().filter(|path| path.exists()) {
        match state.loader.cache().load(path) {
            Ok(count) => info!("Loaded {} cached entries from {}", count, path.display()),
            Err(e) => warn!("Ignoring cache snapshot {}: {}", path.display(), e),
        }
    }

    match cli.command {
        Command::Render { route } => {
            let route = Route::parse(&route);
            let page = handle_route(&state, &route).await;
            let summary = page_summary(&route, &page);
            info!(
                "Rendered {} ({}, {} bytes)",
                summary.path, summary.status, summary.bytes
            );
            println!("{}", page.html);
        }
        Command::Tree { manifest } => {
            let loader = state.loader.clone();
            let tree = tokio::task::spawn_blocking(move || -> Result<ContentTree> {
                if manifest {
                    let manifest = loader.load_manifest().context("manifest unavailable")?;
                    Ok(ContentTree::from_manifest(&manifest))
                } else {
                    Ok(ContentTree::from_paths(loader.discover(ALL_JSON)))
                }
            })
            .await??;
            print!("{}", tree.outline());
        }
        Command::Search { query, json } => {
            let hits = search_all_categories(&state, &query).await;
            let result = SearchResult {
                hits: hits.iter().map(hit_to_summary).collect(),
                query,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if result.hits.is_empty() {
                println!("No matches for '{}'", result.query);
            } else {
                for hit in &result.hits {
                    println!("{:?}\t{}\t{}\t{}", hit.kind, hit.theory, hit.name, hit.href);
                }
            }
        }
    }

    if let Some(path) = &snapshot {
        state
            .loader
            .cache()
            .save(path)
            .with_context(|| format!("failed to save cache snapshot {}", path.display()))?;
        info!("Saved cache snapshot to {}", path.display());
    }
    Ok(())
}
