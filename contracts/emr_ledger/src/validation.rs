use soroban_sdk::{Env, String};

use crate::errors::ContractError;
use crate::types::{CommitOptions, LedgerConfig};

/// Validate an EMR payload.
/// Payloads are opaque but must be non-empty and within the configured size.
pub fn validate_data(data: &String, cfg: &LedgerConfig) -> Result<(), ContractError> {
    let len = data.len();
    if len == 0 || len > cfg.max_data_len {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Validate a change message. Empty messages are allowed.
pub fn validate_message(message: &String, cfg: &LedgerConfig) -> Result<(), ContractError> {
    if message.len() > cfg.max_message_len {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Reject a commit whose deadline passed before the ledger reached it.
///
/// The deadline is `submitted_at + timeout`, where the caller's
/// `timeout_secs` takes precedence over the configured default. A zero
/// `submitted_at` or a zero effective timeout means no deadline.
pub fn check_deadline(
    env: &Env,
    opts: &CommitOptions,
    cfg: &LedgerConfig,
) -> Result<(), ContractError> {
    if opts.submitted_at == 0 {
        return Ok(());
    }
    let timeout = if opts.timeout_secs > 0 {
        opts.timeout_secs
    } else {
        cfg.commit_timeout_secs
    };
    if timeout == 0 {
        return Ok(());
    }

    let deadline = opts.submitted_at.saturating_add(timeout);
    if env.ledger().timestamp() > deadline {
        return Err(ContractError::Timeout);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{testutils::Ledger as _, Env};

    #[test]
    fn test_validate_data() {
        let env = Env::default();
        let cfg = LedgerConfig::standard();

        assert!(validate_data(&String::from_str(&env, "patient-record-v1"), &cfg).is_ok());
        assert_eq!(
            validate_data(&String::from_str(&env, ""), &cfg),
            Err(ContractError::InvalidInput)
        );

        let mut tight = cfg.clone();
        tight.max_data_len = 4;
        assert!(validate_data(&String::from_str(&env, "abcd"), &tight).is_ok());
        assert_eq!(
            validate_data(&String::from_str(&env, "abcde"), &tight),
            Err(ContractError::InvalidInput)
        );
    }

    #[test]
    fn test_validate_message() {
        let env = Env::default();
        let mut cfg = LedgerConfig::standard();
        cfg.max_message_len = 3;

        assert!(validate_message(&String::from_str(&env, ""), &cfg).is_ok());
        assert!(validate_message(&String::from_str(&env, "abc"), &cfg).is_ok());
        assert_eq!(
            validate_message(&String::from_str(&env, "abcd"), &cfg),
            Err(ContractError::InvalidInput)
        );
    }

    #[test]
    fn test_check_deadline() {
        let env = Env::default();
        env.ledger().set_timestamp(1_000);
        let cfg = LedgerConfig::standard();

        // No submission time: never times out.
        assert!(check_deadline(&env, &CommitOptions::none(), &cfg).is_ok());

        // Configured default of 300 seconds.
        let mut opts = CommitOptions::none();
        opts.submitted_at = 700;
        assert!(check_deadline(&env, &opts, &cfg).is_ok());
        opts.submitted_at = 699;
        assert_eq!(check_deadline(&env, &opts, &cfg), Err(ContractError::Timeout));

        // Caller override wins over the default.
        opts.timeout_secs = 500;
        assert!(check_deadline(&env, &opts, &cfg).is_ok());
        opts.timeout_secs = 10;
        assert_eq!(check_deadline(&env, &opts, &cfg), Err(ContractError::Timeout));

        // Deadline disabled entirely.
        let mut open = cfg.clone();
        open.commit_timeout_secs = 0;
        opts.timeout_secs = 0;
        assert!(check_deadline(&env, &opts, &open).is_ok());
    }
}
