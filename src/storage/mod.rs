pub mod config;
pub mod seed;
pub mod store;

pub use config::{Config, ConfigError};
pub use seed::{seed_sample_events, SeedReport};
pub use store::{EventStore, StoreError};
