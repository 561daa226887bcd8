//! # Pilates Viz
//!
//! Analytics backend for the Pilates dashboard.
//!
//! The crate reads two scraped collections from a document store (exercise
//! poses and Pilates video metadata), tallies and ranks them, buckets video
//! publish dates by year and month, and serves the results as chart-ready
//! payloads over a REST API consumed by the browser UI.
//!
//! ## Architecture
//!
//! - [`models`]: Raw documents, validated records and date parsing
//! - [`algorithms`]: Frequency ranking, calendar bucketing and word counts
//! - [`db`]: Repository pattern over the document store
//! - [`services`]: One full fetch, aggregate and lay out pass per view
//! - [`routes`]: Chart and dashboard payload types
//! - [`api`]: Re-exports of the public payload types
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod api;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
