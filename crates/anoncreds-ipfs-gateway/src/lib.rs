//! Content store client for an [IPFS](https://docs.ipfs.tech/reference/kubo/rpc/) HTTP gateway.
//!
//! Reads and writes go through [`ContentStore`]. [`GatewayClient`] talks to a
//! remote gateway, retrying network failures and 5xx responses with
//! exponential backoff. 4xx responses are never retried.

use std::{future::Future, pin::Pin, sync::Arc};

use tokio::time::Instant;

mod client;
mod config;
mod error;
#[cfg(feature = "memory")]
mod memory;
mod retry;

pub use client::GatewayClient;
pub use config::*;
pub use error::{ConfigError, GatewayError};
#[cfg(feature = "memory")]
pub use memory::{MemoryStore, compute_cid};
pub use retry::RetryPolicy;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, GatewayError>> + Send + 'a>>;

/// Byte storage keyed by content id.
///
/// `deadline` bounds the whole operation, retries included.
pub trait ContentStore: Send + Sync {
    fn get<'a>(&'a self, cid: &'a str, deadline: Option<Instant>) -> StoreFuture<'a, Vec<u8>>;

    /// Stores `bytes`, returning their content id.
    fn put(&self, bytes: Vec<u8>, deadline: Option<Instant>) -> StoreFuture<'_, String>;
}

impl<T: ContentStore + ?Sized> ContentStore for Arc<T> {
    fn get<'a>(&'a self, cid: &'a str, deadline: Option<Instant>) -> StoreFuture<'a, Vec<u8>> {
        (**self).get(cid, deadline)
    }

    fn put(&self, bytes: Vec<u8>, deadline: Option<Instant>) -> StoreFuture<'_, String> {
        (**self).put(bytes, deadline)
    }
}
