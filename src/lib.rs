pub mod cli;
pub mod config;
pub mod endpoints;
pub mod http;
pub mod log;
pub mod models;
pub mod webhooks;

pub use crate::http::{BitIndexClient, BitIndexError, BitIndexResult};
pub use crate::models::{API_ENDPOINT, Network};
