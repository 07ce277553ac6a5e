//! Alerts backend client.

mod client;
mod dto;

pub use client::{DEFAULT_API_BASE, HttpApiClient};
