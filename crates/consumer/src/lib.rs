//! The AMQP consumer: binds to `tender.events`/`matching_queue` and drives
//! the retrieval → parsing → scoring → persistence pipeline for every
//! position of an incoming tender.

pub mod candidate;
pub mod consumer;
pub mod error;
pub mod message;

pub use consumer::{run, PipelineDeps};
pub use error::ConsumerError;
pub use message::TenderReadyMessage;
