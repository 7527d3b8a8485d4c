mod config;
mod errors;
mod file;
mod memory;
mod token;
mod types;

pub use config::backend_from_env;
pub use errors::StoreError;
pub use token::TokenStore;
pub use types::{FileStore, InMemoryStore, StorageBackend};
