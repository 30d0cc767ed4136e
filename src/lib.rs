//! # sentiwatch
//!
//! A terminal dashboard and library for watching a sentiment-analysis
//! backend in real time.
//!
//! The backend exposes three JSON endpoints: aggregate sentiment counts,
//! recent scored messages, and a per-bucket time series. The dashboard polls
//! all three on a fixed interval, normalizes each payload into display-ready
//! form, and renders summary tiles, a distribution chart, a stacked
//! sentiment-over-time chart and a message feed.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(dashboard)    │(rendering)   │         │ │
//! │  └────▲────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │ Update                                              │
//! │  ┌────┴────┐                                                │
//! │  │ source  │◀── Poller ──▶ JsonFetcher (HttpFetcher)        │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Endpoint polling. A [`Poller`] runs one task per endpoint
//!   per cycle and hands results to the UI thread as [`Update`]s
//! - **[`data`]**: Payload decoding, normalization, and the [`Dashboard`] state
//! - **[`app`]**: Application state, selection, and user actions
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered settings (file, environment)
//! - **[`error`]**: Fetch errors
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch the default backend at http://localhost:8000
//! sentiwatch
//!
//! # Another backend, polling every 5 seconds
//! sentiwatch --base-url http://stats.internal:8000 --refresh 5s
//!
//! # Fetch once and write the dashboard to a JSON file
//! sentiwatch --export dashboard.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use sentiwatch::{Dashboard, EndpointUrls, HttpFetcher, Poller};
//!
//! # tokio_test::block_on(async {
//! let fetcher = HttpFetcher::new("http://localhost:8000", None).unwrap();
//! let urls = EndpointUrls::from_base("http://localhost:8000");
//! let poller = Poller::new(Arc::new(fetcher), urls, Duration::from_secs(1));
//!
//! let mut handle = poller.spawn();
//! let mut dashboard = Dashboard::new();
//! if let Some(update) = handle.recv().await {
//!     dashboard.apply(update);
//! }
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::Settings;
pub use data::{Dashboard, Message, SentimentSnapshot, TimeBucket};
pub use error::FetchError;
pub use source::{Endpoint, EndpointUrls, HttpFetcher, JsonFetcher, Poller, PollerHandle, Update};
