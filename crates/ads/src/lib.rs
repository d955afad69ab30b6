//! Google Ads REST client library.
//!
//! Provides typed mutate payloads for the five resources the launcher
//! creates, the [`AdsService`](service::AdsService) seam the orchestrator
//! calls through, an OAuth refresh-token exchange, and the concrete
//! [`GoogleAdsClient`](client::GoogleAdsClient).

pub mod client;
pub mod config;
pub mod error;
pub mod oauth;
pub mod resources;
pub mod service;
