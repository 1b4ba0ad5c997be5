pub mod client;
pub mod options;

// Re-export so callers can do "use crate::request::{RequestClient, RequestOptions};"
pub use client::{RequestClient, TransportError};
pub use options::RequestOptions;
