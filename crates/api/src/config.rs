//! # API Configuration Module
//!
//! Loads configuration for the Tutorgrid server from environment variables,
//! with defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `GRID_FIRST_HOUR` / `GRID_LAST_HOUR`: First and last board tick (default: 13 and 20)
//! - `GRID_STEP_MINUTES`: Minutes between board ticks (default: 60)
//! - `ENFORCE_ROSTER`: Require a slot's students to be assigned to its teacher (default: false)
//! - `SEED_PATH`: JSON seed file to load at startup (optional)
//! - `DEFAULT_PLACEMENT`: Board placement when a request names none, `free` or `rooms` (default: "free")
//! - `ROOMS`: Comma-separated fixed room columns for the `rooms` placement (optional)

use chrono::NaiveTime;
use eyre::{eyre, Result, WrapErr};
use std::env;
use std::path::PathBuf;
use tracing::Level;
use tutorgrid_core::lanes::PlacementKind;
use tutorgrid_core::models::{RoomId, TimeGrid};

/// Configuration for the Tutorgrid API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use tutorgrid_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    pub grid_first_hour: u32,
    pub grid_last_hour: u32,
    pub grid_step_minutes: u32,

    pub enforce_roster: bool,

    /// Seed file loaded into the in-memory stores at startup
    pub seed_path: Option<PathBuf>,

    pub default_placement: PlacementKind,

    /// Fixed room columns; `None` derives the columns from the rooms the board shows across the week
    pub rooms: Option<Vec<RoomId>>,
}

fn list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `API_PORT` cannot be parsed as a u16
    /// - a grid setting is not a number
    /// - `ENFORCE_ROSTER` is not a boolean
    /// - `DEFAULT_PLACEMENT` names an unknown strategy
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`], reading values through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .wrap_err("Invalid API_PORT value")?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| list(&origins));

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(30);

        // Board settings
        let grid_first_hour = lookup("GRID_FIRST_HOUR")
            .map(|value| value.parse::<u32>())
            .transpose()
            .wrap_err("Invalid GRID_FIRST_HOUR value")?
            .unwrap_or(13);
        let grid_last_hour = lookup("GRID_LAST_HOUR")
            .map(|value| value.parse::<u32>())
            .transpose()
            .wrap_err("Invalid GRID_LAST_HOUR value")?
            .unwrap_or(20);
        let grid_step_minutes = lookup("GRID_STEP_MINUTES")
            .map(|value| value.parse::<u32>())
            .transpose()
            .wrap_err("Invalid GRID_STEP_MINUTES value")?
            .unwrap_or(60);

        let default_placement = lookup("DEFAULT_PLACEMENT")
            .map(|value| value.parse::<PlacementKind>())
            .transpose()
            .map_err(|e| eyre!("Invalid DEFAULT_PLACEMENT value: {}", e))?
            .unwrap_or_default();
        let rooms = lookup("ROOMS")
            .map(|rooms| list(&rooms).into_iter().map(RoomId::new).collect::<Vec<_>>())
            .filter(|rooms| !rooms.is_empty());

        // Scheduling rules
        let enforce_roster = match lookup("ENFORCE_ROSTER") {
            Some(value) => flag(&value).ok_or_else(|| eyre!("Invalid ENFORCE_ROSTER value: {}", value))?,
            None => false,
        };

        let seed_path = lookup("SEED_PATH").filter(|path| !path.trim().is_empty()).map(PathBuf::from);

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            grid_first_hour,
            grid_last_hour,
            grid_step_minutes,
            enforce_roster,
            seed_path,
            default_placement,
            rooms,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Board ticks from the first through the last grid hour.
    pub fn grid(&self) -> Result<TimeGrid> {
        let start = NaiveTime::from_hms_opt(self.grid_first_hour, 0, 0)
            .ok_or_else(|| eyre!("Invalid GRID_FIRST_HOUR value: {}", self.grid_first_hour))?;
        let end = NaiveTime::from_hms_opt(self.grid_last_hour, 0, 0)
            .ok_or_else(|| eyre!("Invalid GRID_LAST_HOUR value: {}", self.grid_last_hour))?;
        TimeGrid::stepped(start, end, self.grid_step_minutes).wrap_err("Invalid board grid configuration")
    }
}
