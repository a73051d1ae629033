//! JSON request helper for test fixtures that talk to a backend directly,
//! seeding or tearing down state outside the browser.

pub mod client;
pub mod errors;

pub use client::{ApiClient, ApiClientBuilder};
pub use errors::RequestError;
