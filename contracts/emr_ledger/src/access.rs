//! Share-based access control.
//!
//! Authorization is derived from the `shares` field of the version being
//! read; this module keeps no copy of its own. Share sets are stored in
//! canonical form (ascending, unique) so membership is a binary search.

use soroban_sdk::{Env, Vec};

use crate::errors::ContractError;
use crate::store;
use crate::types::{LedgerConfig, UnsharedRead, Version};

/// Canonicalizes a caller-supplied share sequence.
///
/// Fails with `InvalidShares` when the sequence repeats an id, exceeds
/// `cfg.max_shares`, or is empty while `cfg.require_shares` is set.
pub fn normalize_shares(
    env: &Env,
    shares: &Vec<u64>,
    cfg: &LedgerConfig,
) -> Result<Vec<u64>, ContractError> {
    if shares.is_empty() && cfg.require_shares {
        return Err(ContractError::InvalidShares);
    }
    if shares.len() > cfg.max_shares {
        return Err(ContractError::InvalidShares);
    }

    let mut sorted: Vec<u64> = Vec::new(env);
    for share in shares.iter() {
        match sorted.binary_search(share) {
            Ok(_) => return Err(ContractError::InvalidShares),
            Err(pos) => sorted.insert(pos, share),
        }
    }
    Ok(sorted)
}

/// Decides whether `requested` may read a version authorized for
/// `version_shares` (canonical form).
///
/// Every requested id must be authorized; a partial overlap is a denial.
/// An empty authorized set denies everything unless `policy` is
/// [`UnsharedRead::Open`] and the request is empty too.
pub fn authorize(requested: &Vec<u64>, version_shares: &Vec<u64>, policy: UnsharedRead) -> bool {
    if version_shares.is_empty() {
        return policy == UnsharedRead::Open && requested.is_empty();
    }
    if requested.is_empty() {
        return false;
    }
    requested
        .iter()
        .all(|share| version_shares.binary_search(share).is_ok())
}

/// The version of `emr_id` in effect at `block_number`: the one with the
/// greatest block number not above the query.
pub fn version_at_block(
    env: &Env,
    emr_id: u64,
    block_number: u64,
) -> Result<Version, ContractError> {
    let meta = store::get_meta(env, emr_id)?;
    if block_number < meta.created_block {
        return Err(ContractError::VersionNotFound);
    }

    // Invariant: version `lo` is at or before the query, `hi` is past it.
    let mut lo: u32 = 0;
    let mut hi: u32 = meta.version_count;
    let mut found = store::version_of(env, &meta, 0)?;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        let candidate = store::version_of(env, &meta, mid)?;
        if candidate.block_number <= block_number {
            lo = mid;
            found = candidate;
        } else {
            hi = mid;
        }
    }
    Ok(found)
}

/// Share set that was authorized for `emr_id` at `block_number`.
pub fn shares_at_block(
    env: &Env,
    emr_id: u64,
    block_number: u64,
) -> Result<Vec<u64>, ContractError> {
    Ok(version_at_block(env, emr_id, block_number)?.shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{vec, Env};

    #[test]
    fn normalize_sorts_and_rejects_duplicates() {
        let env = Env::default();
        let cfg = LedgerConfig::standard();

        let sorted = normalize_shares(&env, &vec![&env, 30u64, 10, 20], &cfg).unwrap();
        assert_eq!(sorted, vec![&env, 10u64, 20, 30]);

        assert_eq!(
            normalize_shares(&env, &vec![&env, 4u64, 9, 4], &cfg),
            Err(ContractError::InvalidShares)
        );
    }

    #[test]
    fn normalize_enforces_size_policy() {
        let env = Env::default();
        let mut cfg = LedgerConfig::standard();

        assert_eq!(
            normalize_shares(&env, &Vec::new(&env), &cfg),
            Err(ContractError::InvalidShares)
        );

        cfg.require_shares = false;
        assert!(normalize_shares(&env, &Vec::new(&env), &cfg).unwrap().is_empty());

        cfg.max_shares = 2;
        assert_eq!(
            normalize_shares(&env, &vec![&env, 1u64, 2, 3], &cfg),
            Err(ContractError::InvalidShares)
        );
    }

    #[test]
    fn authorize_requires_full_subset() {
        let env = Env::default();
        let granted = vec![&env, 1u64, 5, 9];

        assert!(authorize(&vec![&env, 5u64], &granted, UnsharedRead::Deny));
        assert!(authorize(&vec![&env, 9u64, 1], &granted, UnsharedRead::Deny));
        assert!(authorize(&vec![&env, 5u64, 5], &granted, UnsharedRead::Deny));
        assert!(!authorize(&vec![&env, 5u64, 6], &granted, UnsharedRead::Deny));
        assert!(!authorize(&vec![&env, 2u64], &granted, UnsharedRead::Deny));
        assert!(!authorize(&Vec::new(&env), &granted, UnsharedRead::Open));
    }

    #[test]
    fn authorize_fails_closed_on_unshared_version() {
        let env = Env::default();
        let none: Vec<u64> = Vec::new(&env);

        assert!(!authorize(&none, &none, UnsharedRead::Deny));
        assert!(!authorize(&vec![&env, 1u64], &none, UnsharedRead::Deny));
        assert!(!authorize(&vec![&env, 1u64], &none, UnsharedRead::Open));
        assert!(authorize(&none, &none, UnsharedRead::Open));
    }
}
