mod distance;
mod quote;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use moveq_core::{AppConfig, PricingPolicy};
use moveq_maps::{DistanceMatrixClient, ProviderConfig, Units};
use moveq_quote::{DistanceResolver, PgRecordStore, QuoteCalculator};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "moveq-cli")]
#[command(about = "Moving quote and distance cache command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Resolve the driving distance between two addresses
    Distance {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
    },
    /// Price a moving quote
    Quote {
        /// e.g. `local_residential_move`, `long_distance_move`, `on_demand_delivery`
        #[arg(long)]
        service_type: String,
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        /// Shipment weight in pounds (defaults to 4000)
        #[arg(long)]
        weight: Option<Decimal>,
        /// studio, `1_br`, `2_br`, `3_br`, `4_br_plus`
        #[arg(long)]
        move_size: Option<String>,
        #[arg(long, default_value = "0")]
        origin_stairs: u32,
        #[arg(long, default_value = "0")]
        destination_stairs: u32,
        #[arg(long)]
        elevator: bool,
        #[arg(long)]
        long_carry: bool,
        #[arg(long, default_value = "0")]
        additional_movers: u32,
        /// Comma-separated: piano, `gun_safe`, `fine_art`, `gym_equipment`
        #[arg(long, value_delimiter = ',')]
        specialty: Vec<String>,
    },
    /// List recently cached distances
    Records {
        #[arg(long, default_value = "20")]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("moveq-cli: run with --help for available commands");
        return Ok(());
    };

    let config = moveq_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = moveq_db::PoolConfig::from_app_config(&config);
    let pool = moveq_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Migrate => {
            let applied = moveq_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        Commands::Distance {
            origin,
            destination,
        } => {
            let resolver = build_resolver(&config, &pool)?;
            distance::run_distance(&resolver, &origin, &destination).await?;
        }
        Commands::Quote {
            service_type,
            origin,
            destination,
            weight,
            move_size,
            origin_stairs,
            destination_stairs,
            elevator,
            long_carry,
            additional_movers,
            specialty,
        } => {
            let calculator =
                QuoteCalculator::new(build_resolver(&config, &pool)?, PricingPolicy::default());
            let request = quote::QuoteArgs {
                service_type,
                origin,
                destination,
                weight,
                move_size,
                origin_stairs,
                destination_stairs,
                elevator,
                long_carry,
                additional_movers,
                specialty,
            }
            .into_request();
            quote::run_quote(&calculator, &request).await?;
        }
        Commands::Records { limit } => {
            distance::run_records(&pool, limit).await?;
        }
    }

    Ok(())
}

fn build_resolver(config: &AppConfig, pool: &sqlx::PgPool) -> anyhow::Result<DistanceResolver> {
    let client = DistanceMatrixClient::new(&ProviderConfig {
        api_key: config.maps_api_key.clone(),
        base_url: config.maps_base_url.clone(),
        timeout_secs: config.maps_timeout_secs,
        units: Units::Imperial,
    })
    .map_err(|e| anyhow::anyhow!("failed to build distance client: {e}"))?;

    Ok(DistanceResolver::new(
        Arc::new(client),
        Arc::new(PgRecordStore::new(pool.clone())),
    ))
}
