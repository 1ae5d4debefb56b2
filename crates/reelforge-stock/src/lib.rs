//! Stock-footage search and download client.
//!
//! This crate provides:
//! - Keyword search for a single portrait clip (Pexels-compatible API)
//! - Encoding selection by pixel area
//! - Streaming download to a local file

pub mod client;
pub mod error;
pub mod types;

pub use client::{StockClient, StockClientConfig};
pub use error::{StockError, StockResult};
pub use types::{SearchResponse, StockVideo, VideoFile};
