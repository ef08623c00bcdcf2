//! REST backend for task lists and the tasks that belong to them.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

pub use config::Config;
pub use routes::create_router;
pub use state::AppState;
