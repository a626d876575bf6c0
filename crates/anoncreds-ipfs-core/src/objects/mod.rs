//! AnonCreds objects stored in the registry.

mod credential_definition;
mod revocation_registry_definition;
mod revocation_status_list;
mod schema;

pub use credential_definition::*;
pub use revocation_registry_definition::*;
pub use revocation_status_list::*;
pub use schema::*;

use serde::{Deserialize, Serialize};

/// Accumulator delta for a revocation registry, as published by a ledger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RevocationDelta {
    pub accum: String,
    #[serde(default)]
    pub issued: Vec<u32>,
    #[serde(default)]
    pub revoked: Vec<u32>,
    pub txn_time: u64,
}

/// The four object kinds, used for logging and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Schema,
    CredentialDefinition,
    RevocationRegistryDefinition,
    RevocationStatusList,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Schema => "schema",
            Self::CredentialDefinition => "credential definition",
            Self::RevocationRegistryDefinition => "revocation registry definition",
            Self::RevocationStatusList => "revocation status list",
        })
    }
}
