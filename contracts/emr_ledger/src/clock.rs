//! Ledger clock: hands out the block number and timestamp of each commit.
//!
//! Block numbers follow the host ledger sequence when commits land in
//! distinct ledgers and keep counting upward when several commits share one
//! ledger, so they stay globally unique and strictly increasing either way.

use soroban_sdk::Env;

use crate::errors::ContractError;
use crate::types::{DataKey, Tick};

/// Last block number handed out, `0` before the first commit.
pub fn current(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::Clock).unwrap_or(0)
}

/// Issues the tick for the commit in progress.
///
/// Must be called once per mutation, after validation and before the write.
/// The counter update is part of the invocation's storage changes, so a
/// failed invocation never leaks a block number.
pub fn advance(env: &Env) -> Result<Tick, ContractError> {
    let next = current(env)
        .checked_add(1)
        .ok_or(ContractError::StorageError)?;
    let block_number = next.max(u64::from(env.ledger().sequence()));
    env.storage().instance().set(&DataKey::Clock, &block_number);

    Ok(Tick {
        block_number,
        timestamp: env.ledger().timestamp(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{contract, contractimpl, testutils::Ledger as _, Env};

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
    fn starts_at_zero() {
        with_contract_env(|env| {
            assert_eq!(current(env), 0);
        });
    }

    #[test]
    fn same_ledger_commits_get_distinct_blocks() {
        with_contract_env(|env| {
            env.ledger().set_sequence_number(10);
            let a = advance(env).unwrap();
            let b = advance(env).unwrap();
            let c = advance(env).unwrap();
            assert_eq!(a.block_number, 10);
            assert_eq!(b.block_number, 11);
            assert_eq!(c.block_number, 12);
            assert_eq!(current(env), 12);
        });
    }

    #[test]
    fn jumps_forward_with_ledger_sequence() {
        with_contract_env(|env| {
            env.ledger().set_sequence_number(5);
            assert_eq!(advance(env).unwrap().block_number, 5);
            env.ledger().set_sequence_number(40);
            env.ledger().set_timestamp(1_700_000_000);
            let tick = advance(env).unwrap();
            assert_eq!(tick.block_number, 40);
            assert_eq!(tick.timestamp, 1_700_000_000);
        });
    }

    #[test]
    fn overflow_is_a_storage_error() {
        with_contract_env(|env| {
            env.storage().instance().set(&DataKey::Clock, &u64::MAX);
            assert_eq!(advance(env), Err(ContractError::StorageError));
        });
    }
}
