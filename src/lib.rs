//! image-gate - upload-and-moderate HTTP gateway
//!
//! This crate provides a small HTTP service with a single business
//! endpoint. An uploaded image is written to S3, submitted to Amazon
//! Rekognition for content moderation, and the moderation result is
//! written back to S3 next to the image before the labels are returned
//! to the caller.
//!
//! # Endpoints
//!
//! - `POST /upload_image` - multipart upload, field `image` (required)
//! - `GET /` - static upload form, only when `view_index` is enabled
//! - anything else - JSON `404` envelope
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use image_gate::GateConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = GateConfig::load()?;
//!     image_gate::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Persisted layout
//!
//! For every accepted upload two objects are written under the
//! configured key prefix: `{id}.{png|jpg}` with the raw bytes and
//! `{id}.json` with the moderation result document. The identifier is
//! a UUIDv7, so keys sort by upload time.

pub mod config;
pub mod error;
pub mod middleware;
pub mod moderation;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

pub use config::GateConfig;
pub use error::{GateError, GateResult};
pub use server::{router, start_server};
pub use state::AppState;
