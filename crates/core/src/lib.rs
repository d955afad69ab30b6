//! Domain layer for the campaign launcher.
//!
//! Holds the customer and campaign types, the static template catalog,
//! form conversion rules, resource naming, and the provisioning step
//! model shared by the orchestrator and the HTTP surface.

pub mod campaign;
pub mod customer;
pub mod error;
pub mod naming;
pub mod provisioning;
pub mod templates;
pub mod types;
