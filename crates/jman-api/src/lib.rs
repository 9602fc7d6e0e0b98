// jman-api: Async Rust client for the jman dashboard REST API

pub mod client;
pub mod error;
pub mod models;
pub mod resources;
pub mod transport;

pub use client::{DashboardClient, Listing, resolve_base_url};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
