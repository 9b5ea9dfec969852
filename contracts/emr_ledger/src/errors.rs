use soroban_sdk::contracttype;

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: malformed payloads, share sets or configuration
    Validation = 1,
    /// Authorization errors: admin checks and share-based read denials
    Authorization = 2,
    /// Not found errors: unknown records, versions or block positions
    NotFound = 3,
    /// State conflict errors: lifecycle and idempotency-key misuse
    StateConflict = 4,
    /// Storage errors: the ledger substrate is inconsistent
    Storage = 5,
    /// Transient errors: the commit may succeed on retry
    Transient = 6,
    /// System errors: contract-level issues like pausing
    System = 7,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    RecordNotFound = 4,
    VersionNotFound = 5,
    InvalidInput = 6,
    InvalidShares = 7,
    AccessDenied = 8,
    Timeout = 9,
    StorageError = 10,
    Paused = 11,
    IdempotencyConflict = 12,
    InvalidConfig = 13,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidInput
            | ContractError::InvalidShares
            | ContractError::InvalidConfig => ErrorCategory::Validation,
            ContractError::Unauthorized | ContractError::AccessDenied => {
                ErrorCategory::Authorization
            }
            ContractError::RecordNotFound | ContractError::VersionNotFound => {
                ErrorCategory::NotFound
            }
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::IdempotencyConflict => ErrorCategory::StateConflict,
            ContractError::StorageError => ErrorCategory::Storage,
            ContractError::Timeout => ErrorCategory::Transient,
            ContractError::Paused => ErrorCategory::System,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::InvalidInput
            | ContractError::InvalidShares
            | ContractError::InvalidConfig
            | ContractError::RecordNotFound
            | ContractError::VersionNotFound
            | ContractError::AlreadyInitialized => ErrorSeverity::Low,
            ContractError::Unauthorized
            | ContractError::AccessDenied
            | ContractError::IdempotencyConflict
            | ContractError::Timeout
            | ContractError::NotInitialized => ErrorSeverity::Medium,
            ContractError::StorageError => ErrorSeverity::High,
            ContractError::Paused => ErrorSeverity::Critical,
        }
    }

    /// Returns whether the failed call may be retried.
    ///
    /// Only a commit that missed its deadline qualifies, and the retry must
    /// carry the same idempotency key so a commit that did finalize is not
    /// applied twice. Every other error is terminal for the call.
    pub fn retryable(&self) -> bool {
        matches!(self, ContractError::Timeout)
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::RecordNotFound => "EMR record not found",
            ContractError::VersionNotFound => "No version exists at the requested position",
            ContractError::InvalidInput => "Invalid input parameters provided",
            ContractError::InvalidShares => "Share set is empty, oversized or has duplicates",
            ContractError::AccessDenied => "Requested shares are not authorized for this version",
            ContractError::Timeout => "Commit was not finalized before its deadline",
            ContractError::StorageError => "Ledger storage is inconsistent",
            ContractError::Paused => "Contract operations are currently paused",
            ContractError::IdempotencyConflict => {
                "Idempotency key was already used for a different commit"
            }
            ContractError::InvalidConfig => "Invalid ledger configuration",
        }
    }
}
