// Library root. Exposes the site internals to the binary and integration tests.

pub mod bootstrap;
pub mod core;
pub mod profile;
pub mod subsystems;

pub use bootstrap::logger;
pub use crate::core::{config, error};
