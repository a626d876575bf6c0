use anoncreds_ipfs_core::{IdError, ids::DEFAULT_SCHEME};
use anoncreds_ipfs_gateway::{ConfigError, GatewayConfig};
use serde::Deserialize;
use thiserror::Error;

pub const ENV_SCHEME: &str = "ANONCREDS_IPFS_SCHEME";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Scheme of minted object ids, as in `ipfs://<cid>`.
    pub scheme: String,
    pub gateway: GatewayConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl RegistryConfig {
    pub fn from_env() -> Result<Self, RegistryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RegistryError> {
        let scheme = lookup(ENV_SCHEME).unwrap_or_else(|| DEFAULT_SCHEME.to_string());
        let gateway = GatewayConfig::from_lookup(lookup)?;
        Ok(Self { scheme, gateway })
    }
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Identifier(#[from] IdError),
}
