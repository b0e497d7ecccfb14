//! Client assembly for the refresh-aware request pipeline
//!
//! Thin configuration and wiring around the core crates: an HTTP terminal
//! transport, a link that stamps the current access token onto outgoing
//! operations, file-backed cache persistence keyed by explicit
//! configuration, and `Client`, which composes
//! `[RefreshLink, AuthLink] → HttpTransport` the way a host application
//! would.

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;

pub use auth::{AuthLink, TokenSlot};
pub use cache::CacheStore;
pub use client::Client;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::HttpTransport;
