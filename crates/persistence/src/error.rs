//! Errors surfaced by the repository. Per the error handling design, a
//! [`PersistenceError`] is only ever logged by the caller and aborts that
//! one position's writes — it never propagates to the consumer.

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("tender {0} has no company_id on record")]
    MissingCompany(i64),
}
