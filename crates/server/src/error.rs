//! The aggregate error surfaced at the service boundary. Per §7, only
//! configuration/startup errors ever reach `main` — everything downstream
//! (HTTP clients, parsing, scoring, a single position's persistence) is
//! absorbed and logged at its originating boundary.

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error(transparent)]
    Consumer(#[from] consumer::ConsumerError),

    #[error(transparent)]
    Persistence(#[from] persistence::PersistenceError),

    #[error("health server error: {0}")]
    Health(#[source] std::io::Error),
}
