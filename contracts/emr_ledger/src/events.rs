use crate::circuit_breaker::PauseScope;
use crate::types::{CommitReceipt, LedgerConfig};
use soroban_sdk::{symbol_short, Address, Env};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub config: LedgerConfig,
    pub timestamp: u64,
}

/// Event published when a new record is uploaded.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmrUploadedEvent {
    pub emr_id: u64,
    pub block_number: u64,
    pub owner: Address,
    pub t: u64,
    pub timestamp: u64,
}

/// Event published when a version is appended to a record.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmrUpdatedEvent {
    pub emr_id: u64,
    pub block_number: u64,
    pub version: u32,
    pub share_count: u32,
    pub author: Address,
    pub timestamp: u64,
}

/// Event published when a retried commit is answered from its receipt.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitReplayedEvent {
    pub caller: Address,
    pub receipt: CommitReceipt,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub admin: Address,
    pub config: LedgerConfig,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub admin: Address,
    pub scope: PauseScope,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, config: LedgerConfig) {
    let topics = (symbol_short!("EMR_INIT"),);
    let data = InitializedEvent {
        admin,
        config,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a record is created.
/// Clients recover the new `emr_id` from this event.
pub fn publish_uploaded(env: &Env, emr_id: u64, block_number: u64, owner: Address, t: u64) {
    let topics = (symbol_short!("EMR_UP"), owner.clone());
    let data = EmrUploadedEvent {
        emr_id,
        block_number,
        owner,
        t,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_updated(
    env: &Env,
    emr_id: u64,
    block_number: u64,
    version: u32,
    share_count: u32,
    author: Address,
) {
    let topics = (symbol_short!("EMR_UPD"), emr_id);
    let data = EmrUpdatedEvent {
        emr_id,
        block_number,
        version,
        share_count,
        author,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_replayed(env: &Env, caller: Address, receipt: CommitReceipt) {
    let topics = (symbol_short!("REPLAY"), receipt.emr_id);
    env.events()
        .publish(topics, CommitReplayedEvent { caller, receipt });
}

pub fn publish_config_updated(env: &Env, admin: Address, config: LedgerConfig) {
    let topics = (symbol_short!("CFG_UPD"),);
    let data = ConfigUpdatedEvent {
        admin,
        config,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_contract_paused(env: &Env, admin: Address, scope: PauseScope) {
    let topics = (symbol_short!("PAUSED"),);
    let data = PauseChangedEvent {
        admin,
        scope,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_contract_resumed(env: &Env, admin: Address, scope: PauseScope) {
    let topics = (symbol_short!("RESUMED"),);
    let data = PauseChangedEvent {
        admin,
        scope,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
