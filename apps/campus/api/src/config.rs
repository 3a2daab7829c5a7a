use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};

// Import the database config from the database library
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration.
///
/// Composes shared config components from the `core_config` and `database`
/// libraries.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Seed sample users at startup (dev workflows)
    pub load_initial_data: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - fails if DATABASE_URL not set
        let server = ServerConfig::from_env()?; // Defaults: HOST=0.0.0.0, PORT=8080

        let load_initial_data = env_or_default("LOAD_INITIAL_DATA", "false")
            .parse()
            .map_err(|e| eyre::eyre!("Failed to parse LOAD_INITIAL_DATA: {}", e))?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            load_initial_data,
        })
    }
}
