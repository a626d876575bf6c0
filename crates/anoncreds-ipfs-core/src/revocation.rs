//! Rebuilds a revocation status list from an accumulator delta.

use thiserror::Error;

use crate::objects::{
    RevocationDelta, RevocationRegistryDefinition, RevocationStatus, RevocationStatusList,
};

/// Largest registry capacity a status list is built for.
pub const MAX_CAPACITY: u32 = 1 << 24;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    #[error("delta references index {index}, but the registry holds at most {max_cred_num} credentials")]
    IndexOutOfRange { index: u32, max_cred_num: u32 },
    #[error("registry capacity {max_cred_num} exceeds the limit of {}", MAX_CAPACITY)]
    TooLarge { max_cred_num: u32 },
}

/// Builds the full status list for `def` after applying `delta`.
///
/// Every index starts [`RevocationStatus::Active`] when issuance is by
/// default, [`RevocationStatus::Revoked`] otherwise. Issued indices are then
/// marked active and revoked indices revoked, in that order, so an index
/// present in both ends up revoked.
pub fn build_revocation_status_list(
    rev_reg_def_id: &str,
    def: &RevocationRegistryDefinition,
    delta: &RevocationDelta,
    issuance_by_default: bool,
) -> Result<RevocationStatusList, CapacityError> {
    let max_cred_num = def.value.max_cred_num;

    if max_cred_num > MAX_CAPACITY {
        return Err(CapacityError::TooLarge { max_cred_num });
    }

    if let Some(&index) = delta.issued.iter().chain(&delta.revoked).max() {
        if index >= max_cred_num {
            return Err(CapacityError::IndexOutOfRange {
                index,
                max_cred_num,
            });
        }
    }

    let default = if issuance_by_default {
        RevocationStatus::Active
    } else {
        RevocationStatus::Revoked
    };

    let mut revocation_list = vec![default; max_cred_num as usize];

    for &index in &delta.issued {
        revocation_list[index as usize] = RevocationStatus::Active;
    }

    for &index in &delta.revoked {
        revocation_list[index as usize] = RevocationStatus::Revoked;
    }

    Ok(RevocationStatusList {
        issuer_id: def.issuer_id.clone(),
        current_accumulator: delta.accum.clone(),
        rev_reg_def_id: rev_reg_def_id.to_string(),
        revocation_list,
        timestamp: delta.txn_time,
    })
}
