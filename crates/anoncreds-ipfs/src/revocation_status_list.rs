use anoncreds_ipfs_core::{
    CapacityError, Registration, RegistrationFailure, Resolution, ResolutionErrorKind,
    ResolutionFailure, Resolved, build_revocation_status_list,
    ids::parse_revocation_registry_id,
    objects::{ObjectKind, RevocationDelta, RevocationRegistryDefinition, RevocationStatusList},
};
use anoncreds_ipfs_gateway::ContentStore;
use thiserror::Error;
use tracing::{debug, warn};

use crate::Registry;

#[derive(Error, Debug)]
pub enum StatusListError {
    #[error("failed to resolve revocation registry definition: {0}")]
    Resolution(#[from] ResolutionFailure),
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

impl<S: ContentStore> Registry<S> {
    pub async fn get_revocation_status_list(&self, id: &str) -> Resolution<RevocationStatusList> {
        let list = self.fetch(ObjectKind::RevocationStatusList, id).await?;
        Ok(Resolved::new(id.to_string(), list))
    }

    /// Resolving the status list of a registry as of a past timestamp is not
    /// supported. Always fails, with `invalid` for a malformed id and
    /// `notImplemented` otherwise.
    pub async fn get_revocation_status_list_at(
        &self,
        rev_reg_def_id: &str,
        timestamp: u64,
    ) -> Resolution<RevocationStatusList> {
        if !self.ids.validate(rev_reg_def_id) {
            return Err(ResolutionFailure::new(
                ResolutionErrorKind::Invalid,
                "id provided is invalid",
            ));
        }

        debug!(rev_reg_def_id, timestamp, "historical status list requested");

        Err(ResolutionFailure::new(
            ResolutionErrorKind::NotImplemented,
            "resolving a revocation status list at a timestamp is not implemented",
        ))
    }

    /// Builds a fresh status list for the registered definition
    /// `rev_reg_def_id` by applying `delta`. The list is not registered.
    pub async fn create_revocation_status_list(
        &self,
        rev_reg_def_id: &str,
        delta: &RevocationDelta,
        issuance_by_default: bool,
    ) -> Result<RevocationStatusList, StatusListError> {
        let def = self
            .get_revocation_registry_definition(rev_reg_def_id)
            .await?
            .object;

        Ok(build_revocation_status_list(
            rev_reg_def_id,
            &def,
            delta,
            issuance_by_default,
        )?)
    }

    /// Registers `list`, published under the revocation registry `def`.
    ///
    /// Fails with `invalid` before touching the store if the list and the
    /// definition disagree on their issuer or capacity. A content-addressed
    /// `revRegDefId` must resolve, and the resolved definition must share the
    /// list's issuer. Any other `revRegDefId` must be a DID-based revocation
    /// registry id.
    pub async fn register_revocation_status_list(
        &self,
        list: RevocationStatusList,
        def: &RevocationRegistryDefinition,
    ) -> Registration<RevocationStatusList> {
        if let Err(e) = list.verify_issuer(def) {
            warn!(issuer_id = %list.issuer_id, error = %e, "status list issuer mismatch");
            return Err(RegistrationFailure::invalid(
                "revocation status list issuer does not match its revocation registry definition",
            )
            .with_cause(e));
        }

        if list.revocation_list.len() != def.value.max_cred_num as usize {
            warn!(
                len = list.revocation_list.len(),
                max_cred_num = def.value.max_cred_num,
                "status list length does not match registry capacity"
            );
            return Err(RegistrationFailure::invalid(
                "revocation status list length does not match registry capacity",
            ));
        }

        if self.ids.parse_content_id(&list.rev_reg_def_id).is_ok() {
            let referenced = self
                .get_revocation_registry_definition(&list.rev_reg_def_id)
                .await
                .map_err(|failure| {
                    warn!(
                        rev_reg_def_id = %list.rev_reg_def_id,
                        error = %failure,
                        "referenced revocation registry definition did not resolve"
                    );
                    RegistrationFailure::invalid(format!(
                        "revocation registry definition {} could not be resolved",
                        list.rev_reg_def_id
                    ))
                    .with_cause(failure)
                })?
                .object;

            if let Err(e) = list.verify_issuer(&referenced) {
                warn!(
                    rev_reg_def_id = %list.rev_reg_def_id,
                    error = %e,
                    "status list issuer does not own the referenced registry"
                );
                return Err(RegistrationFailure::invalid(
                    "revocation status list issuer does not match the referenced revocation registry definition",
                )
                .with_cause(e));
            }

            if referenced.value.max_cred_num != def.value.max_cred_num {
                return Err(RegistrationFailure::invalid(
                    "revocation status list length does not match registry capacity",
                ));
            }
        } else if let Err(e) = parse_revocation_registry_id(&list.rev_reg_def_id) {
            warn!(rev_reg_def_id = %list.rev_reg_def_id, "unrecognized revocation registry id");
            return Err(RegistrationFailure::invalid(
                "revocation status list references an invalid revocation registry id",
            )
            .with_cause(e));
        }

        self.upload(ObjectKind::RevocationStatusList, list).await
    }
}
