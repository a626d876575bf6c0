use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SIGNATURE_TYPE_CL: &str = "CL";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDefinition {
    pub issuer_id: String,
    /// Must resolve to a registered [`Schema`](super::Schema).
    pub schema_id: String,
    #[serde(rename = "type", default = "default_signature_type")]
    pub signature_type: String,
    pub tag: String,
    /// Issuer public keys. Opaque to the registry.
    pub value: Value,
}

fn default_signature_type() -> String {
    SIGNATURE_TYPE_CL.to_string()
}
