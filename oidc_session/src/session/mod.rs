mod errors;
mod manager;
mod singleton;
mod types;

pub use errors::SessionError;
pub use manager::SessionManager;
pub use singleton::{register_broker, session_manager};
pub use types::SessionSnapshot;
