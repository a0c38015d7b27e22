/// truthdesk - community news verification backend
/// Exports all modules for use as a library crate

pub mod app_state;
pub mod auth;
pub mod categories;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod news;
pub mod routes;
pub mod store;
pub mod users;
pub mod verdict;

pub use app_state::{AppState, SharedState};
pub use config::{Config, ConfigError};
pub use error::{AppError, AppResult};
pub use models::{AiVerdict, Category, CurrentUser, NewsItem, User, Verdict};
pub use routes::router;
pub use store::Store;
pub use verdict::{Assessment, PendingVerdictProvider, RandomVerdictProvider, VerdictProvider, VerdictProviderKind};
