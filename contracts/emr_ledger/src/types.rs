use common::MAX_UTC_OFFSET_MINUTES;
use soroban_sdk::{contracttype, Address, BytesN, String, Vec};

use crate::errors::ContractError;

/// Upper bound for `LedgerConfig::max_shares`.
pub const MAX_SHARES_CAP: u32 = 256;
/// Upper bound for `LedgerConfig::max_data_len`, in bytes.
pub const MAX_DATA_LEN_CAP: u32 = 65_536;
/// Upper bound for `LedgerConfig::max_message_len`, in bytes.
pub const MAX_MESSAGE_LEN_CAP: u32 = 4_096;

/// Storage keys for the contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Config,
    /// Last block number handed out by the ledger clock.
    Clock,
    /// Last allocated EMR id.
    RecordCount,
    Record(u64),
    Version(u64, u32),
}

/// How reads are treated while a version has no authorized shares.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnsharedRead {
    /// Fail closed: nobody may read an unshared version.
    Deny,
    /// An empty share request may read an unshared version.
    Open,
}

/// Engine configuration, fixed at `initialize` and changed only by the admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    /// Default commit deadline, in seconds after `CommitOptions::submitted_at`.
    /// Zero disables the deadline unless the caller supplies one.
    pub commit_timeout_secs: u64,
    /// Offset applied when rendering timestamps for `get_history`.
    pub utc_offset_minutes: i32,
    pub max_data_len: u32,
    pub max_message_len: u32,
    pub max_shares: u32,
    /// Reject `update` calls with an empty share set.
    pub require_shares: bool,
    pub unshared_read: UnsharedRead,
    /// Only the uploader of a record may append versions to it.
    pub owner_only_updates: bool,
}

impl LedgerConfig {
    /// Configuration used by a fresh deployment.
    pub fn standard() -> Self {
        LedgerConfig {
            commit_timeout_secs: 300,
            utc_offset_minutes: 330,
            max_data_len: 4_096,
            max_message_len: 256,
            max_shares: 64,
            require_shares: true,
            unshared_read: UnsharedRead::Deny,
            owner_only_updates: false,
        }
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        if self.utc_offset_minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES.unsigned_abs() {
            return Err(ContractError::InvalidConfig);
        }
        if !(1..=MAX_SHARES_CAP).contains(&self.max_shares) {
            return Err(ContractError::InvalidConfig);
        }
        if !(1..=MAX_DATA_LEN_CAP).contains(&self.max_data_len) {
            return Err(ContractError::InvalidConfig);
        }
        if self.max_message_len > MAX_MESSAGE_LEN_CAP {
            return Err(ContractError::InvalidConfig);
        }
        Ok(())
    }
}

/// Per-record metadata. Written at upload, then only `version_count` moves.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordMeta {
    pub emr_id: u64,
    pub owner: Address,
    pub t: u64,
    pub created_at: u64,
    pub created_block: u64,
    pub version_count: u32,
}

/// One immutable revision of a record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Version {
    pub emr_id: u64,
    pub index: u32,
    pub data: String,
    /// Empty for the version created by `upload`.
    pub message: String,
    /// Ledger close time in epoch seconds (UTC).
    pub timestamp: u64,
    pub block_number: u64,
    /// Authorized share ids, ascending and unique.
    pub shares: Vec<u64>,
    pub t: u64,
    pub author: Address,
}

/// Raw history row, timestamps in epoch seconds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryEntry {
    pub data: String,
    pub message: String,
    pub timestamp: u64,
    pub block_number: u64,
}

/// History in presentation form: three parallel sequences, oldest first.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmrHistory {
    pub data: Vec<String>,
    pub timestamps: Vec<String>,
    pub block_numbers: Vec<u64>,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommitKind {
    Upload,
    Update,
}

/// Finality record of a commit.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitReceipt {
    pub kind: CommitKind,
    pub emr_id: u64,
    pub block_number: u64,
    pub version: u32,
    pub timestamp: u64,
}

/// Retry and deadline controls for `upload_with` / `update_with`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitOptions {
    pub idempotency_key: Option<BytesN<32>>,
    /// Caller-side submission time in epoch seconds; zero skips the deadline.
    pub submitted_at: u64,
    /// Overrides `LedgerConfig::commit_timeout_secs` when non-zero.
    pub timeout_secs: u64,
}

impl CommitOptions {
    pub fn none() -> Self {
        CommitOptions {
            idempotency_key: None,
            submitted_at: 0,
            timeout_secs: 0,
        }
    }
}

/// Ledger clock reading for one commit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tick {
    pub block_number: u64,
    pub timestamp: u64,
}
