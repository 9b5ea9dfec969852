//! Record store: append-only EMR records and their version sequences.
//!
//! Layout (persistent storage):
//! - `DataKey::Record(emr_id)` → [`RecordMeta`]
//! - `DataKey::Version(emr_id, index)` → [`Version`], written once
//!
//! The allocation counter lives in instance storage next to the clock.

use soroban_sdk::{Address, Env, String, Vec};

use crate::access;
use crate::clock;
use crate::errors::ContractError;
use crate::types::{DataKey, HistoryEntry, LedgerConfig, RecordMeta, Version};
use crate::validation;

const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Number of records created so far; also the highest allocated id.
pub fn record_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::RecordCount)
        .unwrap_or(0)
}

pub fn get_meta(env: &Env, emr_id: u64) -> Result<RecordMeta, ContractError> {
    let key = DataKey::Record(emr_id);
    let meta: RecordMeta = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::RecordNotFound)?;
    extend_ttl(env, &key);
    Ok(meta)
}

/// Version at `index` of a record whose metadata is already loaded.
pub fn version_of(env: &Env, meta: &RecordMeta, index: u32) -> Result<Version, ContractError> {
    if index >= meta.version_count {
        return Err(ContractError::VersionNotFound);
    }
    let key = DataKey::Version(meta.emr_id, index);
    let version: Version = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::StorageError)?;
    extend_ttl(env, &key);
    Ok(version)
}

fn write_version(env: &Env, version: &Version) {
    let key = DataKey::Version(version.emr_id, version.index);
    env.storage().persistent().set(&key, version);
    extend_ttl(env, &key);
}

fn write_meta(env: &Env, meta: &RecordMeta) {
    let key = DataKey::Record(meta.emr_id);
    env.storage().persistent().set(&key, meta);
    extend_ttl(env, &key);
}

/// Creates a record with its initial version and returns that version.
///
/// The initial version has no authorized shares and an empty message.
pub fn create_record(
    env: &Env,
    owner: &Address,
    data: String,
    t: u64,
    cfg: &LedgerConfig,
) -> Result<Version, ContractError> {
    validation::validate_data(&data, cfg)?;

    let emr_id = record_count(env)
        .checked_add(1)
        .ok_or(ContractError::StorageError)?;
    let tick = clock::advance(env)?;

    let version = Version {
        emr_id,
        index: 0,
        data,
        message: String::from_str(env, ""),
        timestamp: tick.timestamp,
        block_number: tick.block_number,
        shares: Vec::new(env),
        t,
        author: owner.clone(),
    };
    let meta = RecordMeta {
        emr_id,
        owner: owner.clone(),
        t,
        created_at: tick.timestamp,
        created_block: tick.block_number,
        version_count: 1,
    };

    env.storage().instance().set(&DataKey::RecordCount, &emr_id);
    write_meta(env, &meta);
    write_version(env, &version);

    Ok(version)
}

/// Appends a version carrying a new share set, payload and message.
pub fn append_version(
    env: &Env,
    emr_id: u64,
    author: &Address,
    shares: &Vec<u64>,
    data: String,
    message: String,
    cfg: &LedgerConfig,
) -> Result<Version, ContractError> {
    let mut meta = get_meta(env, emr_id)?;
    let shares = access::normalize_shares(env, shares, cfg)?;
    validation::validate_data(&data, cfg)?;
    validation::validate_message(&message, cfg)?;

    let index = meta.version_count;
    meta.version_count = index.checked_add(1).ok_or(ContractError::StorageError)?;
    let tick = clock::advance(env)?;

    let version = Version {
        emr_id,
        index,
        data,
        message,
        timestamp: tick.timestamp,
        block_number: tick.block_number,
        shares,
        t: meta.t,
        author: author.clone(),
    };

    write_version(env, &version);
    write_meta(env, &meta);

    Ok(version)
}

pub fn get_version(env: &Env, emr_id: u64, index: u32) -> Result<Version, ContractError> {
    let meta = get_meta(env, emr_id)?;
    version_of(env, &meta, index)
}

pub fn get_latest_version(env: &Env, emr_id: u64) -> Result<Version, ContractError> {
    let meta = get_meta(env, emr_id)?;
    let last = meta
        .version_count
        .checked_sub(1)
        .ok_or(ContractError::StorageError)?;
    version_of(env, &meta, last)
}

/// Every version of the record, oldest first, as of this call.
pub fn get_history(env: &Env, emr_id: u64) -> Result<Vec<HistoryEntry>, ContractError> {
    let meta = get_meta(env, emr_id)?;
    let mut history = Vec::new(env);
    for index in 0..meta.version_count {
        let version = version_of(env, &meta, index)?;
        history.push_back(HistoryEntry {
            data: version.data,
            message: version.message,
            timestamp: version.timestamp,
            block_number: version.block_number,
        });
    }
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{contract, contractimpl, testutils::Address as _, vec, Env};

    #[contract]
    pub struct TestContract;

    #[contractimpl]
    impl TestContract {}

    fn with_contract_env<F: FnOnce(&Env)>(f: F) {
        let env = Env::default();
        let contract_id = env.register(TestContract, ());
        env.as_contract(&contract_id, || {
            f(&env);
        });
    }

    #[test]
    fn create_allocates_sequential_ids() {
        with_contract_env(|env| {
            let cfg = LedgerConfig::standard();
            let owner = Address::generate(env);
            let a = create_record(env, &owner, String::from_str(env, "a"), 0, &cfg).unwrap();
            let b = create_record(env, &owner, String::from_str(env, "b"), 7, &cfg).unwrap();
            assert_eq!(a.emr_id, 1);
            assert_eq!(b.emr_id, 2);
            assert_eq!(record_count(env), 2);
            assert_eq!(get_meta(env, 2).unwrap().t, 7);
            assert!(a.shares.is_empty());
            assert!(a.message.is_empty());
        });
    }

    #[test]
    fn empty_payload_allocates_nothing() {
        with_contract_env(|env| {
            let cfg = LedgerConfig::standard();
            let owner = Address::generate(env);
            let err = create_record(env, &owner, String::from_str(env, ""), 0, &cfg);
            assert_eq!(err, Err(ContractError::InvalidInput));
            assert_eq!(record_count(env), 0);
            assert_eq!(clock::current(env), 0);
        });
    }

    #[test]
    fn append_keeps_prior_versions() {
        with_contract_env(|env| {
            let cfg = LedgerConfig::standard();
            let owner = Address::generate(env);
            create_record(env, &owner, String::from_str(env, "v0"), 3, &cfg).unwrap();
            let v1 = append_version(
                env,
                1,
                &owner,
                &vec![env, 9u64, 2u64],
                String::from_str(env, "v1"),
                String::from_str(env, "add shares"),
                &cfg,
            )
            .unwrap();

            assert_eq!(v1.index, 1);
            assert_eq!(v1.t, 3);
            assert_eq!(v1.shares, vec![env, 2u64, 9u64]);
            assert_eq!(get_version(env, 1, 0).unwrap().data, String::from_str(env, "v0"));
            assert_eq!(get_latest_version(env, 1).unwrap(), v1);
            assert_eq!(get_history(env, 1).unwrap().len(), 2);
        });
    }

    #[test]
    fn lookups_distinguish_record_and_version() {
        with_contract_env(|env| {
            let cfg = LedgerConfig::standard();
            let owner = Address::generate(env);
            create_record(env, &owner, String::from_str(env, "v0"), 0, &cfg).unwrap();
            assert_eq!(get_version(env, 2, 0), Err(ContractError::RecordNotFound));
            assert_eq!(get_version(env, 1, 1), Err(ContractError::VersionNotFound));
            assert_eq!(get_history(env, 9), Err(ContractError::RecordNotFound));
        });
    }

    #[test]
    fn missing_version_entry_is_a_storage_error() {
        with_contract_env(|env| {
            let cfg = LedgerConfig::standard();
            let owner = Address::generate(env);
            create_record(env, &owner, String::from_str(env, "v0"), 0, &cfg).unwrap();
            env.storage().persistent().remove(&DataKey::Version(1, 0));
            assert_eq!(get_version(env, 1, 0), Err(ContractError::StorageError));
        });
    }
}
