use crate::{errors::ContractError, events, types::DataKey};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Types ─────────────────────────────────────────────────────

/// Defines the scope of the pause mechanism
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PauseScope {
    /// Halts every mutating entry point
    Global,
    /// Halts a single mutating entry point, e.g. `UPLOAD` or `UPDATE`
    Function(Symbol),
}

pub const UPLOAD_FN: Symbol = symbol_short!("UPLOAD");
pub const UPDATE_FN: Symbol = symbol_short!("UPDATE");

// ── Storage Keys ─────────────────────────────────────────────

fn global_pause_key() -> Symbol {
    symbol_short!("P_GLOB")
}

fn function_pause_key(func: &Symbol) -> (Symbol, Symbol) {
    (symbol_short!("P_FUNC"), func.clone())
}

// ── Core Logistics ───────────────────────────────────────────

pub fn is_paused(env: &Env, scope: &PauseScope) -> bool {
    match scope {
        PauseScope::Global => env
            .storage()
            .instance()
            .get(&global_pause_key())
            .unwrap_or(false),
        PauseScope::Function(func_name) => env
            .storage()
            .instance()
            .get(&function_pause_key(func_name))
            .unwrap_or(false),
    }
}

/// Fails with `Paused` if either the global breaker or the breaker for
/// `func` is engaged.
pub fn require_not_paused(env: &Env, func: &Symbol) -> Result<(), ContractError> {
    if is_paused(env, &PauseScope::Global)
        || is_paused(env, &PauseScope::Function(func.clone()))
    {
        return Err(ContractError::Paused);
    }
    Ok(())
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

fn set_flag(env: &Env, scope: &PauseScope, value: bool) {
    match scope {
        PauseScope::Global => {
            env.storage().instance().set(&global_pause_key(), &value);
        }
        PauseScope::Function(func_name) => {
            env.storage()
                .instance()
                .set(&function_pause_key(func_name), &value);
        }
    }
}

/// Engages a circuit breaker for the specified scope. Admin only.
pub fn pause_contract(env: &Env, caller: &Address, scope: PauseScope) -> Result<(), ContractError> {
    require_admin(env, caller)?;
    set_flag(env, &scope, true);
    events::publish_contract_paused(env, caller.clone(), scope);
    Ok(())
}

/// Releases the circuit breaker for the specified scope. Admin only.
pub fn resume_contract(
    env: &Env,
    caller: &Address,
    scope: PauseScope,
) -> Result<(), ContractError> {
    require_admin(env, caller)?;
    set_flag(env, &scope, false);
    events::publish_contract_resumed(env, caller.clone(), scope);
    Ok(())
}
