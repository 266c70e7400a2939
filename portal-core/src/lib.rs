//! Core library for the captive Wi-Fi setup portal.
//! This crate classifies inbound HTTP requests (OS connectivity probes vs.
//! real page loads), aggregates raw `iw` scan output into a network list,
//! and hands connect requests off to an external join script. Backends
//! (external tools) and frontends (UI asset delivery) sit behind traits and
//! are selected by feature flags.

pub mod backends;
pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod frontends;
pub mod scan;
pub mod structs;
pub mod traits;
pub mod web_server;

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read asset {path}: {source}")]
    AssetRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("scan timed out after {0:?}")]
    ScanTimeout(Duration),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Web server error: {0}")]
    WebServer(#[from] axum::BoxError),
}

/// A specialized `Result` type for this crate's operations.
pub type Result<T> = std::result::Result<T, Error>;
