//! `partsdash-client` — HTTP bindings for the record and settings
//! stores, plus the polling dashboard binary.

pub mod client;
pub mod error;

pub use client::StoreClient;
pub use error::ClientError;
