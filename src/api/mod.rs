//! HTTP client module for the authentication service.
//!
//! Provides the configured request client and the error types for
//! the service's loosely-shaped failure payloads.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
