pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{AppConfig, ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
