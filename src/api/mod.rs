//! HTTP API.
//!
//! - Unified listing of stored events and public holidays
//! - Event create, detail, partial update and delete
//! - Month grid for the dashboard
//! - Health check

pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
