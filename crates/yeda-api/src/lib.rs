pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod state;
pub mod topic;
pub mod tracing;

pub use config::{ApiConfig, Environment};
pub use state::ApiState;
