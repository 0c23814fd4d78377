//! Postgres persistence: read-only tender/position/attribute loads, and
//! transactional writes of match results.
//!
//! `tenders_info`, `tenders_positions`, and `tenders_position_attributes`
//! are read-only to this crate; only `tender_matches` and
//! `tenders_position_attributes_matches` are ever written, each position
//! under its own fresh transaction (see [`TenderRepository::persist_position_matches`]).

pub mod error;
pub mod models;
pub mod repository;

pub use error::PersistenceError;
pub use models::{TenderMatchRecord, TenderPositionAttributeMatchRecord};
pub use repository::TenderRepository;
