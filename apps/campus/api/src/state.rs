//! Application state management.
//!
//! Defines the shared state passed to request handlers that need it (the
//! readiness check). The users router applies its own state internally.

/// Shared application state.
///
/// Cloned per handler; only cheap Arc clones underneath.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
