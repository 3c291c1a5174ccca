//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - ApiClient: REST adapter for the character backend
//! - Config: Application configuration and credentials
//! - Random: Thread RNG behind the dice port
//! - Scheduler: Cancelable delayed tasks and debouncing

pub mod api_client;
pub mod config;
pub mod random;
pub mod scheduler;
