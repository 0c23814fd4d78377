//! Thin typed wrappers over the three remote NLP services and the search
//! index this service depends on.
//!
//! Every client shares one pooled [`reqwest::Client`] (built once from
//! [`ClientsConfig`] via [`build_http_client`]) and wraps its request in the
//! same fixed-attempts retry policy (see [`retry`]). None of these clients
//! ever return an error to their caller: on exhausted retries or a 4xx
//! response they degrade to a neutral result (`None`, an unmodified value,
//! a score of `0.0`, or an empty candidate list) and log what happened.
//! That degrade-on-failure behavior is what lets a single flaky dependency
//! fail one attribute instead of the whole tender.

pub mod attr_parser;
pub mod config;
pub mod error;
pub mod retry;
pub mod search;
pub mod semantic_matcher;
pub mod types;
pub mod unit_normalizer;

pub use attr_parser::AttrParserClient;
pub use config::{build_http_client, ClientsConfig};
pub use error::ClientError;
pub use retry::RetryPolicy;
pub use search::{SearchClient, SearchIndex};
pub use semantic_matcher::SemanticMatcherClient;
pub use types::{ParsedAttributeBlob, RawCandidate, RawCandidateAttribute};
pub use unit_normalizer::{Normalized, UnitNormalizerClient};
