//! # Idempotent commit receipts
//!
//! A caller that retries a commit after a timeout cannot tell whether the
//! original attempt was finalized. Attaching a 32-byte idempotency key to the
//! commit lets the contract answer the retry with the stored receipt instead
//! of appending a second time.
//!
//! Receipts are scoped per `(caller, key)` so two callers never collide, and
//! are opaque to this module: any `#[contracttype]` value can be stored.
//!
//! ## Usage pattern
//!
//! ```ignore
//! if let Some(receipt) = idempotency::lookup_receipt::<CommitReceipt>(&env, &caller, &key) {
//!     return Ok(receipt);
//! }
//! let receipt = commit(...)?;
//! idempotency::remember_receipt(&env, &caller, &key, &receipt);
//! ```

use soroban_sdk::{contracttype, Address, BytesN, Env, IntoVal, TryFromVal, Val};

// ── Storage key ──────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum ReceiptKey {
    Receipt(Address, BytesN<32>),
}

// ── TTL constants ────────────────────────────────────────────────────────────

const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

fn receipt_key(caller: &Address, key: &BytesN<32>) -> ReceiptKey {
    ReceiptKey::Receipt(caller.clone(), key.clone())
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Returns `true` if a receipt was already recorded for `(caller, key)`.
pub fn has_receipt(env: &Env, caller: &Address, key: &BytesN<32>) -> bool {
    env.storage().persistent().has(&receipt_key(caller, key))
}

/// Loads the receipt recorded for `(caller, key)`, if any.
pub fn lookup_receipt<R>(env: &Env, caller: &Address, key: &BytesN<32>) -> Option<R>
where
    R: TryFromVal<Env, Val>,
{
    let storage_key = receipt_key(caller, key);
    let receipt = env.storage().persistent().get(&storage_key);
    if receipt.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&storage_key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    receipt
}

/// Records `receipt` for `(caller, key)`. An existing receipt is never
/// overwritten; the first finalized commit wins.
pub fn remember_receipt<R>(env: &Env, caller: &Address, key: &BytesN<32>, receipt: &R)
where
    R: IntoVal<Env, Val>,
{
    let storage_key = receipt_key(caller, key);
    if env.storage().persistent().has(&storage_key) {
        return;
    }
    env.storage().persistent().set(&storage_key, receipt);
    env.storage()
        .persistent()
        .extend_ttl(&storage_key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
