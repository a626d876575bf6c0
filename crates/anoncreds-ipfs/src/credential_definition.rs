use anoncreds_ipfs_core::{
    Registration, RegistrationFailure, Resolution, Resolved,
    objects::{CredentialDefinition, ObjectKind},
};
use anoncreds_ipfs_gateway::ContentStore;
use tracing::warn;

use crate::Registry;

impl<S: ContentStore> Registry<S> {
    pub async fn get_credential_definition(&self, id: &str) -> Resolution<CredentialDefinition> {
        let cred_def = self.fetch(ObjectKind::CredentialDefinition, id).await?;
        Ok(Resolved::new(id.to_string(), cred_def))
    }

    /// Registers `cred_def` once its schema resolves.
    ///
    /// Nothing is uploaded if the schema cannot be resolved.
    pub async fn register_credential_definition(
        &self,
        cred_def: CredentialDefinition,
    ) -> Registration<CredentialDefinition> {
        if let Err(failure) = self.get_schema(&cred_def.schema_id).await {
            warn!(schema_id = %cred_def.schema_id, error = %failure, "schema did not resolve");
            return Err(RegistrationFailure::invalid(format!(
                "schema {} could not be resolved",
                cred_def.schema_id
            ))
            .with_cause(failure));
        }

        self.upload(ObjectKind::CredentialDefinition, cred_def).await
    }
}
