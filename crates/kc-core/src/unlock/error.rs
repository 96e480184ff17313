use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to persist unlock ledger: {0}")]
    PersistenceWriteFailed(String),

    #[error("failed to read unlock ledger: {0}")]
    ReadFailed(String),
}
