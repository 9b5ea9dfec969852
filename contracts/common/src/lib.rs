//! Shared helpers for the EMR ledger contracts.
//!
//! This crate provides:
//! - [`time`]: epoch-seconds to ISO-8601 conversion for the presentation
//!   boundary. Storage never holds anything but raw epoch seconds.
//! - [`idempotency`]: a per-caller receipt registry that makes commit
//!   retries safe.
//!
//! Everything here is `no_std` and usable from inside a contract.

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod idempotency;
pub mod time;

pub use idempotency::{has_receipt, lookup_receipt, remember_receipt};
pub use time::{format_iso8601, to_human_readable, ISO_8601_LEN, MAX_UTC_OFFSET_MINUTES};
