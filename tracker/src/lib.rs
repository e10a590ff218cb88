pub mod backend;

pub use backend::config::AppConfig;
pub use backend::{initialize_backend, initialize_with_store, AppState};
