use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub issuer_id: String,
    pub name: String,
    pub version: String,
    pub attr_names: Vec<String>,
}
