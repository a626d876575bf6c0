use serde::{Deserialize, Serialize};

pub const REVOCATION_TYPE_CL_ACCUM: &str = "CL_ACCUM";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RevocationRegistryDefinition {
    pub issuer_id: String,
    pub revoc_def_type: String,
    pub cred_def_id: String,
    pub tag: String,
    pub value: RevocationRegistryDefinitionValue,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RevocationRegistryDefinitionValue {
    pub public_keys: PublicKeys,
    /// Capacity of the registry, and length of every status list built from it.
    pub max_cred_num: u32,
    pub tails_location: String,
    pub tails_hash: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeys {
    pub accum_key: AccumKey,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccumKey {
    pub z: String,
}

/// A revocation registry definition as found in storage.
///
/// Stored payloads may come from older writers and carry extra fields
/// (`ver`, `id`, `issuanceType`, ...). Unknown fields are ignored, and the
/// canonical shape is rebuilt field by field through the `From` impl.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoredRevocationRegistryDefinition {
    pub issuer_id: String,
    #[serde(alias = "type")]
    pub revoc_def_type: String,
    pub cred_def_id: String,
    pub tag: String,
    pub value: StoredRevocationRegistryDefinitionValue,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoredRevocationRegistryDefinitionValue {
    pub public_keys: StoredPublicKeys,
    pub max_cred_num: u32,
    pub tails_location: String,
    pub tails_hash: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoredPublicKeys {
    pub accum_key: StoredAccumKey,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StoredAccumKey {
    pub z: String,
}

impl From<StoredRevocationRegistryDefinition> for RevocationRegistryDefinition {
    fn from(stored: StoredRevocationRegistryDefinition) -> Self {
        let value = stored.value;

        Self {
            issuer_id: stored.issuer_id,
            revoc_def_type: stored.revoc_def_type,
            value: RevocationRegistryDefinitionValue {
                max_cred_num: value.max_cred_num,
                tails_hash: value.tails_hash,
                tails_location: value.tails_location,
                public_keys: PublicKeys {
                    accum_key: AccumKey {
                        z: value.public_keys.accum_key.z,
                    },
                },
            },
            tag: stored.tag,
            cred_def_id: stored.cred_def_id,
        }
    }
}
