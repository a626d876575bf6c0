use anoncreds_ipfs_core::{
    Registration, Resolution, Resolved,
    objects::{ObjectKind, RevocationRegistryDefinition, StoredRevocationRegistryDefinition},
};
use anoncreds_ipfs_gateway::ContentStore;

use crate::Registry;

impl<S: ContentStore> Registry<S> {
    /// Resolves a revocation registry definition.
    ///
    /// The stored payload is rebuilt into the canonical shape, dropping any
    /// fields older writers may have added.
    pub async fn get_revocation_registry_definition(
        &self,
        id: &str,
    ) -> Resolution<RevocationRegistryDefinition> {
        let stored: StoredRevocationRegistryDefinition = self
            .fetch(ObjectKind::RevocationRegistryDefinition, id)
            .await?;

        Ok(Resolved::new(
            id.to_string(),
            RevocationRegistryDefinition::from(stored),
        ))
    }

    pub async fn register_revocation_registry_definition(
        &self,
        def: RevocationRegistryDefinition,
    ) -> Registration<RevocationRegistryDefinition> {
        self.upload(ObjectKind::RevocationRegistryDefinition, def)
            .await
    }
}
