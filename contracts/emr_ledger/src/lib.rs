#![no_std]
#![allow(clippy::too_many_arguments)]

pub mod access;
pub mod circuit_breaker;
pub mod clock;
pub mod errors;
pub mod events;
pub mod store;
pub mod types;
pub mod validation;


use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};

pub use circuit_breaker::PauseScope;
pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use types::{
    CommitKind, CommitOptions, CommitReceipt, EmrHistory, HistoryEntry, LedgerConfig, RecordMeta,
    UnsharedRead, Version,
};

use types::DataKey;

/// TTL constants for instance storage (in ledgers)
const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

#[contract]
pub struct EmrLedgerContract;

#[contractimpl]
impl EmrLedgerContract {
    // ── Initialization ───────────────────────────────────────────────────────

    /// Initialize the ledger with an administrator and its configuration.
    pub fn initialize(env: Env, admin: Address, config: LedgerConfig) -> Result<(), ContractError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }

        admin.require_auth();
        config.validate()?;

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);

        events::publish_initialized(&env, admin, config);

        Ok(())
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&DataKey::Admin)
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_config(env: Env) -> Result<LedgerConfig, ContractError> {
        Self::load_config(&env)
    }

    /// Replace the ledger configuration. Admin only; history is unaffected.
    pub fn set_config(env: Env, caller: Address, config: LedgerConfig) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        config.validate()?;

        env.storage().instance().set(&DataKey::Config, &config);
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);

        events::publish_config_updated(&env, caller, config);

        Ok(())
    }

    // ── Commits ──────────────────────────────────────────────────────────────

    /// Create a record from `data`. Returns `(emr_id, block_number)`.
    pub fn upload(env: Env, caller: Address, data: String, t: u64) -> Result<(u64, u64), ContractError> {
        let receipt = Self::upload_with(env, caller, data, t, CommitOptions::none())?;
        Ok((receipt.emr_id, receipt.block_number))
    }

    /// `upload` with an idempotency key and commit deadline.
    pub fn upload_with(
        env: Env,
        caller: Address,
        data: String,
        t: u64,
        opts: CommitOptions,
    ) -> Result<CommitReceipt, ContractError> {
        caller.require_auth();
        let cfg = Self::load_config(&env)?;
        circuit_breaker::require_not_paused(&env, &circuit_breaker::UPLOAD_FN)?;

        if let Some(receipt) = Self::replay(&env, &caller, &opts, CommitKind::Upload, None)? {
            return Ok(receipt);
        }
        validation::check_deadline(&env, &opts, &cfg)?;

        let version = store::create_record(&env, &caller, data, t, &cfg)?;
        let receipt = CommitReceipt {
            kind: CommitKind::Upload,
            emr_id: version.emr_id,
            block_number: version.block_number,
            version: version.index,
            timestamp: version.timestamp,
        };
        Self::finish_commit(&env, &caller, &opts, &receipt);

        events::publish_uploaded(&env, version.emr_id, version.block_number, caller, t);

        Ok(receipt)
    }

    /// Append a version with a new share set. Returns `(emr_id, block_number)`.
    pub fn update(
        env: Env,
        caller: Address,
        emr_id: u64,
        shares: Vec<u64>,
        change_data: String,
        change_message: String,
    ) -> Result<(u64, u64), ContractError> {
        let receipt = Self::update_with(
            env,
            caller,
            emr_id,
            shares,
            change_data,
            change_message,
            CommitOptions::none(),
        )?;
        Ok((receipt.emr_id, receipt.block_number))
    }

    /// `update` with an idempotency key and commit deadline.
    pub fn update_with(
        env: Env,
        caller: Address,
        emr_id: u64,
        shares: Vec<u64>,
        change_data: String,
        change_message: String,
        opts: CommitOptions,
    ) -> Result<CommitReceipt, ContractError> {
        caller.require_auth();
        let cfg = Self::load_config(&env)?;
        circuit_breaker::require_not_paused(&env, &circuit_breaker::UPDATE_FN)?;

        if let Some(receipt) =
            Self::replay(&env, &caller, &opts, CommitKind::Update, Some(emr_id))?
        {
            return Ok(receipt);
        }
        validation::check_deadline(&env, &opts, &cfg)?;

        if cfg.owner_only_updates {
            let meta = store::get_meta(&env, emr_id)?;
            if meta.owner != caller {
                return Err(ContractError::Unauthorized);
            }
        }

        let version = store::append_version(
            &env,
            emr_id,
            &caller,
            &shares,
            change_data,
            change_message,
            &cfg,
        )?;
        let receipt = CommitReceipt {
            kind: CommitKind::Update,
            emr_id,
            block_number: version.block_number,
            version: version.index,
            timestamp: version.timestamp,
        };
        Self::finish_commit(&env, &caller, &opts, &receipt);

        events::publish_updated(
            &env,
            emr_id,
            version.block_number,
            version.index,
            version.shares.len(),
            caller,
        );

        Ok(receipt)
    }

    /// Receipt stored for an idempotency key, if that commit finalized.
    pub fn get_receipt(env: Env, caller: Address, key: BytesN<32>) -> Option<CommitReceipt> {
        common::lookup_receipt(&env, &caller, &key)
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    /// Latest payload of `emr_id`, if every requested share is authorized.
    pub fn get_data(
        env: Env,
        requested_shares: Vec<u64>,
        emr_id: u64,
    ) -> Result<String, ContractError> {
        let cfg = Self::load_config(&env)?;
        let version = store::get_latest_version(&env, emr_id)?;
        if !access::authorize(&requested_shares, &version.shares, cfg.unshared_read) {
            return Err(ContractError::AccessDenied);
        }
        Ok(version.data)
    }

    /// Payload of `emr_id` as of `block_number`, authorized against the
    /// share set in effect at that block.
    pub fn get_data_at_block(
        env: Env,
        requested_shares: Vec<u64>,
        emr_id: u64,
        block_number: u64,
    ) -> Result<String, ContractError> {
        let cfg = Self::load_config(&env)?;
        let version = access::version_at_block(&env, emr_id, block_number)?;
        if !access::authorize(&requested_shares, &version.shares, cfg.unshared_read) {
            return Err(ContractError::AccessDenied);
        }
        Ok(version.data)
    }

    /// Full history with timestamps rendered in the configured zone.
    pub fn get_history(env: Env, emr_id: u64) -> Result<EmrHistory, ContractError> {
        let cfg = Self::load_config(&env)?;
        let entries = store::get_history(&env, emr_id)?;

        let mut history = EmrHistory {
            data: Vec::new(&env),
            timestamps: Vec::new(&env),
            block_numbers: Vec::new(&env),
        };
        for entry in entries.iter() {
            history.data.push_back(entry.data);
            history.timestamps.push_back(common::to_human_readable(
                &env,
                entry.timestamp,
                cfg.utc_offset_minutes,
            ));
            history.block_numbers.push_back(entry.block_number);
        }
        Ok(history)
    }

    /// Full history with raw epoch-second timestamps.
    pub fn get_raw_history(env: Env, emr_id: u64) -> Result<Vec<HistoryEntry>, ContractError> {
        store::get_history(&env, emr_id)
    }

    pub fn get_shares_by_block_number(
        env: Env,
        emr_id: u64,
        block_number: u64,
    ) -> Result<Vec<u64>, ContractError> {
        access::shares_at_block(&env, emr_id, block_number)
    }

    pub fn get_record(env: Env, emr_id: u64) -> Result<RecordMeta, ContractError> {
        store::get_meta(&env, emr_id)
    }

    pub fn get_record_count(env: Env) -> u64 {
        store::record_count(&env)
    }

    pub fn get_version(env: Env, emr_id: u64, index: u32) -> Result<Version, ContractError> {
        store::get_version(&env, emr_id, index)
    }

    pub fn get_latest_version(env: Env, emr_id: u64) -> Result<Version, ContractError> {
        store::get_latest_version(&env, emr_id)
    }

    /// Last block number assigned to a commit.
    pub fn current_block(env: Env) -> u64 {
        clock::current(&env)
    }

    // ── Circuit Breaker ──────────────────────────────────────────────────────

    pub fn pause(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        caller.require_auth();
        circuit_breaker::pause_contract(&env, &caller, scope)
    }

    pub fn resume(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        caller.require_auth();
        circuit_breaker::resume_contract(&env, &caller, scope)
    }

    pub fn is_paused(env: Env, scope: PauseScope) -> bool {
        circuit_breaker::is_paused(&env, &scope)
    }

    // ── Internal Helpers ─────────────────────────────────────────────────────

    fn load_config(env: &Env) -> Result<LedgerConfig, ContractError> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(ContractError::NotInitialized)
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Answers a retried commit from its stored receipt.
    ///
    /// A key already bound to another kind of commit, or to another record,
    /// is rejected instead of replayed.
    fn replay(
        env: &Env,
        caller: &Address,
        opts: &CommitOptions,
        kind: CommitKind,
        emr_id: Option<u64>,
    ) -> Result<Option<CommitReceipt>, ContractError> {
        let key = match &opts.idempotency_key {
            Some(key) => key,
            None => return Ok(None),
        };
        let receipt: CommitReceipt = match common::lookup_receipt(env, caller, key) {
            Some(receipt) => receipt,
            None => return Ok(None),
        };

        if receipt.kind != kind || emr_id.is_some_and(|id| id != receipt.emr_id) {
            return Err(ContractError::IdempotencyConflict);
        }

        events::publish_replayed(env, caller.clone(), receipt.clone());
        Ok(Some(receipt))
    }

    fn finish_commit(env: &Env, caller: &Address, opts: &CommitOptions, receipt: &CommitReceipt) {
        if let Some(key) = &opts.idempotency_key {
            common::remember_receipt(env, caller, key, receipt);
        }
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
