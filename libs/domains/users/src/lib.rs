//! Users Domain
//!
//! Lifecycle management for registered user accounts: unique login name,
//! unique email address, store-assigned ids and timestamps.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP surface, DTO validation, status mapping
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Service   │  ← Upsert decision workflow, existence checks
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access port (in-memory + Postgres)
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Entity    │  ← users table, uniqueness constraints
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{PgUserRepository, UserService, handlers};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let repository = PgUserRepository::new(db);
//! let service = UserService::new(repository);
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::UsersApiDoc;
pub use models::{User, UserDto};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
