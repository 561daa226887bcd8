//! HTTP server module.
//!
//! Exposes the dashboard services as a small read-only REST API for the
//! browser UI.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - View parsing, JSON responses                          │
//! │  - CORS, compression, error mapping                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                               │
//! │  - Tally, rank, bucket, chart layout                     │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                  │
//! │  - LocalRepository / MongoRepository                     │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
