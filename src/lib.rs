pub mod algorithm;
pub mod catalog;
pub mod client;
pub mod coastline;
pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod job;

pub use client::Client;
pub use error::{ClientError, Result};
