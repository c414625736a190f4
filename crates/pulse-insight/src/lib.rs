//! Client for the hosted language-generation endpoint that writes chart
//! commentary.

mod client;
mod error;
mod types;

pub use client::{InsightClient, MISSING_KEY_MESSAGE};
pub use error::InsightError;
