pub mod client;
pub mod error;
pub mod models;
pub mod navigator;
pub mod transport;

#[cfg(test)]
pub mod testing;

pub use client::*;
pub use error::ApiError;
pub use models::*;
