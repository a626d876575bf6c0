use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use ipld_core::cid::{Cid, multihash::Multihash};
use sha3::{Digest, Sha3_256};
use tokio::{sync::RwLock, time::Instant};

use crate::{ContentStore, GatewayError, StoreFuture};

const RAW_CODEC: u64 = 0x55;
const SHA3_256_CODE: u64 = 0x16;

/// In-process content store, minting CIDv1 ids over a sha3-256 multihash.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
    gets: AtomicUsize,
    puts: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get` calls served, including misses.
    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `put` calls served.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

pub fn compute_cid(bytes: &[u8]) -> Result<String, GatewayError> {
    let digest = Sha3_256::digest(bytes);
    let multihash = Multihash::<64>::wrap(SHA3_256_CODE, &digest)
        .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
    Ok(Cid::new_v1(RAW_CODEC, multihash).to_string())
}

impl ContentStore for MemoryStore {
    fn get<'a>(&'a self, cid: &'a str, _deadline: Option<Instant>) -> StoreFuture<'a, Vec<u8>> {
        Box::pin(async move {
            self.gets.fetch_add(1, Ordering::SeqCst);

            self.objects
                .read()
                .await
                .get(cid)
                .cloned()
                .ok_or_else(|| GatewayError::Client {
                    status: 404,
                    message: format!("{cid} not found"),
                })
        })
    }

    fn put(&self, bytes: Vec<u8>, _deadline: Option<Instant>) -> StoreFuture<'_, String> {
        Box::pin(async move {
            self.puts.fetch_add(1, Ordering::SeqCst);

            let cid = compute_cid(&bytes)?;
            self.objects
                .write()
                .await
                .entry(cid.clone())
                .or_insert(bytes);
            Ok(cid)
        })
    }
}
