//! API request handlers.

pub mod dashboard;
pub mod events;
pub mod health;

pub use dashboard::*;
pub use events::*;
pub use health::*;
