use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tierboard::api::state::AppState;
use tierboard::config::AppConfig;
use tierboard::identity::{HttpIdentityService, IdentityService, StaticIdentity};
use tierboard::models::{EntityId, EntityKind, ModeCategory, Region};
use tierboard::ranking::display::ordered_tiers;
use tierboard::ranking::{placement, rank, RankQuery, DEFAULT_LIMIT};
use tierboard::roster::{resolve_missing_names, Roster};
use tierboard::scoring::rank_title;
use tierboard::storage::{JsonlEntityStore, StorageConfig};

#[derive(Parser)]
#[command(name = "tierboard")]
#[command(about = "Tier-list leaderboards for PvP players and builders")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Player,
    Builder,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Player => EntityKind::Player,
            KindArg::Builder => EntityKind::Builder,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print a leaderboard
    Rank {
        #[arg(long, value_enum, default_value = "player")]
        kind: KindArg,

        /// Region code (NA, EU, AS, SA, AU, AF, ME)
        #[arg(long)]
        region: Option<String>,

        /// Mode category (main, sub, extra, bonus, overall)
        #[arg(long)]
        category: Option<String>,

        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Print one profile
    Profile {
        id: String,

        #[arg(long, value_enum, default_value = "player")]
        kind: KindArg,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn identity_service(config: &AppConfig) -> Arc<dyn IdentityService> {
    if !config.identity.enabled {
        return Arc::new(StaticIdentity::new());
    }
    match HttpIdentityService::new(&config.identity) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            tracing::warn!("Identity lookups disabled: {}", e);
            Arc::new(StaticIdentity::new())
        }
    }
}

async fn load_roster(config: &AppConfig) -> Roster {
    let store = JsonlEntityStore::new(StorageConfig::new(config.data_dir.clone()));
    Roster::load(&store).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_tracing(level, cli.json_logs);

    tracing::info!("Starting tierboard v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let store = Arc::new(JsonlEntityStore::new(StorageConfig::new(
                config.data_dir.clone(),
            )));
            let roster = Arc::new(RwLock::new(Roster::load(store.as_ref()).await));
            tracing::info!(
                "Loaded {} entities from {}",
                roster.read().await.len(),
                config.data_dir.display()
            );

            let identity = identity_service(&config);
            tokio::spawn(resolve_missing_names(roster.clone(), identity.clone()));

            let state = AppState {
                store,
                roster,
                identity,
            };
            let app = tierboard::api::build_router(state, &config.server);
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Rank {
            kind,
            region,
            category,
            limit,
        } => {
            let kind = EntityKind::from(kind);
            let mut query = RankQuery::default().with_limit(limit);
            if let Some(raw) = region {
                let region = Region::normalize(&raw)
                    .with_context(|| format!("Unknown region: {}", raw))?;
                query = query.with_region(region);
            }
            if let Some(raw) = category {
                let category = ModeCategory::parse(&raw)
                    .with_context(|| format!("Unknown category: {}", raw))?;
                query = query.with_category(category);
            }

            let roster = load_roster(&config).await;
            let entries = rank(roster.entities(kind), &query);
            if entries.is_empty() {
                println!("No {}s ranked", kind);
                return Ok(());
            }

            println!("{:>4}  {:<20} {:<6} {:>6}  Title", "#", "Name", "Region", "Score");
            for entry in entries {
                println!(
                    "{:>4}  {:<20} {:<6} {:>6}  {}",
                    entry.position,
                    entry.entity.name_or_unknown(),
                    entry.entity.region.map_or("-", |r| r.code()),
                    entry.score,
                    rank_title(entry.entity.total_score),
                );
            }
        }
        Commands::Profile { id, kind } => {
            let kind = EntityKind::from(kind);
            let id = EntityId::from(id);
            let roster = load_roster(&config).await;
            let entities = roster.entities(kind);
            let Some(entity) = roster.get(kind, &id) else {
                anyhow::bail!("No {} with id {}", kind, id);
            };

            println!("{} ({})", entity.name_or_unknown(), entity.id);
            println!(
                "Region: {}",
                entity.region.map_or("-".to_string(), |r| r.to_string())
            );
            println!(
                "Score:  {} ({})",
                entity.total_score,
                rank_title(entity.total_score)
            );
            if let Some(position) = placement(&id, entities, None) {
                println!("Placement: #{}", position);
            }
            if let Some(position) = entity
                .region
                .and_then(|region| placement(&id, entities, Some(region)))
            {
                println!("Regional placement: #{}", position);
            }
            for assignment in ordered_tiers(entity) {
                let tier = assignment
                    .tier
                    .map_or("unknown".to_string(), |t| t.to_string());
                let retired = if entity.is_retired(&assignment.subject) {
                    " (retired)"
                } else {
                    ""
                };
                println!("  {:<14} {}{}", assignment.subject, tier, retired);
            }
        }
    }

    Ok(())
}
