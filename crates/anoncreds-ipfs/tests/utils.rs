#![allow(dead_code)]

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use anoncreds_ipfs::{
    core::objects::{
        AccumKey, CredentialDefinition, PublicKeys, RevocationRegistryDefinition,
        RevocationRegistryDefinitionValue, RevocationStatus, RevocationStatusList, Schema,
    },
    gateway::{ContentStore, GatewayError, StoreFuture},
};
use serde_json::json;
use tokio::time::Instant;

pub const ISSUER: &str = "did:web:issuer.example.com";

pub fn schema() -> Schema {
    Schema {
        issuer_id: ISSUER.to_string(),
        name: "employee".to_string(),
        version: "1.0".to_string(),
        attr_names: vec!["name".to_string(), "role".to_string()],
    }
}

pub fn cred_def(schema_id: &str) -> CredentialDefinition {
    CredentialDefinition {
        issuer_id: ISSUER.to_string(),
        schema_id: schema_id.to_string(),
        signature_type: "CL".to_string(),
        tag: "default".to_string(),
        value: json!({
            "primary": { "n": "1", "s": "2", "r": { "name": "3" }, "rctxt": "4", "z": "5" },
        }),
    }
}

pub fn rev_reg_def(cred_def_id: &str, max_cred_num: u32) -> RevocationRegistryDefinition {
    RevocationRegistryDefinition {
        issuer_id: ISSUER.to_string(),
        revoc_def_type: "CL_ACCUM".to_string(),
        cred_def_id: cred_def_id.to_string(),
        tag: "0".to_string(),
        value: RevocationRegistryDefinitionValue {
            public_keys: PublicKeys {
                accum_key: AccumKey {
                    z: "1 0BB 1 0CC".to_string(),
                },
            },
            max_cred_num,
            tails_location: "https://tails.example.com/abc".to_string(),
            tails_hash: "abc".to_string(),
        },
    }
}

pub fn status_list(issuer_id: &str, rev_reg_def_id: &str, len: usize) -> RevocationStatusList {
    RevocationStatusList {
        issuer_id: issuer_id.to_string(),
        rev_reg_def_id: rev_reg_def_id.to_string(),
        revocation_list: vec![RevocationStatus::Active; len],
        current_accumulator: "21 accum".to_string(),
        timestamp: 1_700_000_000,
    }
}

/// A store whose every call fails with HTTP 500, recording what it was given.
#[derive(Default)]
pub struct FailingStore {
    gets: AtomicUsize,
    puts: AtomicUsize,
    deadlines: Mutex<Vec<Option<Instant>>>,
}

impl FailingStore {
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn deadlines(&self) -> Vec<Option<Instant>> {
        self.deadlines.lock().unwrap().clone()
    }

    fn fail<T>(&self, deadline: Option<Instant>) -> Result<T, GatewayError> {
        self.deadlines.lock().unwrap().push(deadline);
        Err(GatewayError::Server {
            status: 500,
            message: "internal error".to_string(),
        })
    }
}

impl ContentStore for FailingStore {
    fn get<'a>(&'a self, _cid: &'a str, deadline: Option<Instant>) -> StoreFuture<'a, Vec<u8>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let res = self.fail(deadline);
        Box::pin(async move { res })
    }

    fn put(&self, _bytes: Vec<u8>, deadline: Option<Instant>) -> StoreFuture<'_, String> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        let res = self.fail(deadline);
        Box::pin(async move { res })
    }
}
