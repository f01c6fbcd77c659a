//! ZoomInfo Contact Relay Library
//!
//! Thin HTTP relay in front of the ZoomInfo enrich and search APIs: mints
//! access tokens through the PKI exchange, forwards match/search requests
//! and reshapes the replies.
//!
//! # Modules
//!
//! - `api`: HTTP-facing components.
//! - `core`: Relay logic, models and errors.
//! - `integrations`: External service clients.
//! - `app`: Router assembly.
//! - `auth_client`: Token providers (PKI exchange).
//! - `config`: Configuration management.
//! - `enrichment`: Validation and response shaping.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Request, payload and response models.
//! - `services`: Relay operations.
//! - `zoominfo_client`: ZoomInfo enrich/search client.

pub mod api;
pub mod core;
pub mod integrations;

pub mod app;
pub mod auth_client;
pub mod config;
pub mod enrichment;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod zoominfo_client;
