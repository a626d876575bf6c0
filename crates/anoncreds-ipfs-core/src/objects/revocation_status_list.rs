use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::ids::{self, DidParts, IdError};

use super::RevocationRegistryDefinition;

/// State of a single credential index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevocationStatus {
    Active,
    Revoked,
}

impl Serialize for RevocationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            Self::Active => 0,
            Self::Revoked => 1,
        })
    }
}

impl<'de> Deserialize<'de> for RevocationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(Self::Active),
            1 => Ok(Self::Revoked),
            other => Err(serde::de::Error::custom(format!(
                "invalid revocation status {other}, expected 0 or 1"
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RevocationStatusList {
    pub issuer_id: String,
    pub rev_reg_def_id: String,
    pub revocation_list: Vec<RevocationStatus>,
    pub current_accumulator: String,
    /// Ledger time of the delta this list was built from, in seconds.
    pub timestamp: u64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssuerMismatch {
    #[error("invalid issuer: {0}")]
    InvalidIssuer(#[from] IdError),
    #[error("namespace mismatch: expected {expected}, found {found}")]
    Namespace { expected: String, found: String },
    #[error("issuer mismatch: expected {expected}, found {found}")]
    Identifier { expected: String, found: String },
}

impl RevocationStatusList {
    pub fn status(&self, index: usize) -> Option<RevocationStatus> {
        self.revocation_list.get(index).copied()
    }

    /// Checks that this list and its revocation registry definition are
    /// published by the same issuer.
    pub fn verify_issuer(&self, def: &RevocationRegistryDefinition) -> Result<(), IssuerMismatch> {
        let issuer = ids::parse_any_did(&self.issuer_id)?;
        let def_issuer = ids::parse_any_did(&def.issuer_id)?;

        compare(&def_issuer, &issuer)?;

        // DID-based registry ids embed their issuer, which must agree as well.
        // Content-addressed ids carry no issuer.
        if let Ok(parts) = ids::parse_revocation_registry_id(&self.rev_reg_def_id) {
            if let Some(namespace) = parts.namespace {
                if namespace != issuer.namespace {
                    return Err(IssuerMismatch::Namespace {
                        expected: namespace,
                        found: issuer.namespace,
                    });
                }
            }

            if parts.namespace_identifier != issuer.namespace_identifier {
                return Err(IssuerMismatch::Identifier {
                    expected: parts.namespace_identifier,
                    found: issuer.namespace_identifier,
                });
            }
        }

        Ok(())
    }
}

fn compare(expected: &DidParts, found: &DidParts) -> Result<(), IssuerMismatch> {
    if expected.namespace != found.namespace {
        return Err(IssuerMismatch::Namespace {
            expected: expected.namespace.clone(),
            found: found.namespace.clone(),
        });
    }

    if expected.namespace_identifier != found.namespace_identifier {
        return Err(IssuerMismatch::Identifier {
            expected: expected.namespace_identifier.clone(),
            found: found.namespace_identifier.clone(),
        });
    }

    Ok(())
}
