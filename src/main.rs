use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::{info, warn};
use tutorgrid_api::{config::ApiConfig, init_tracing, ApiState, Scheduler};
use tutorgrid_db::{load_seed, InMemoryDirectory, InMemorySlotStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;
    let grid = config.grid()?;

    // Fill the in-memory stores
    let (store, directory, seeded) = match &config.seed_path {
        Some(path) => {
            let seed = load_seed(path)?;
            if !seed.rejected.is_empty() {
                warn!("{} seed slots were rejected", seed.rejected.len());
            }
            let (store, directory) = seed.into_stores();
            (store, directory, true)
        }
        None => {
            info!("No SEED_PATH set, starting with an empty schedule");
            (InMemorySlotStore::new(), InMemoryDirectory::default(), false)
        }
    };

    // Without reference data there is nothing to check teachers and students against
    let scheduler = Scheduler::new(Arc::new(store), Arc::new(directory), grid)
        .with_reference_checks(seeded)
        .with_roster_enforcement(config.enforce_roster);

    let state = ApiState {
        scheduler,
        default_placement: config.default_placement,
        rooms: config.rooms.clone(),
    };

    // Start API server
    tutorgrid_api::start_server(config, state).await?;

    Ok(())
}
