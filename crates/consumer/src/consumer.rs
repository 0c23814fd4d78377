//! AMQP consumer wiring: receives `tender.ready_for_matching` deliveries off
//! `matching_queue` and drives retrieval → parsing → scoring → persistence
//! for every position of the tender, per §4.7.

use std::sync::Arc;

use attrmodel::Position;
use clients::{AttrParserClient, SearchIndex, SemanticMatcherClient, UnitNormalizerClient};
use futures_util::StreamExt;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{Connection, ConnectionProperties, ExchangeKind};
use persistence::TenderRepository;
use scoring::{CandidateScore, PositionMatcher, PositionMatcherConfig};

use crate::candidate::into_product_candidate;
use crate::error::ConsumerError;
use crate::message::TenderReadyMessage;

const EXCHANGE: &str = "tender.events";
const QUEUE: &str = "matching_queue";
const ROUTING_KEY: &str = "tender.ready_for_matching";

/// Everything a single tender's pipeline run needs. Cloned cheaply (every
/// field is an `Arc`) into each spawned consumer task.
#[derive(Clone)]
pub struct PipelineDeps {
    pub repository: Arc<TenderRepository>,
    pub search: Arc<dyn SearchIndex>,
    pub attr_parser: Arc<AttrParserClient>,
    pub unit_normalizer: Arc<UnitNormalizerClient>,
    pub semantic_matcher: Arc<SemanticMatcherClient>,
    pub position_matcher_config: PositionMatcherConfig,
    pub search_index_name: String,
    pub candidates_qty: usize,
}

/// Connects to the broker, declares the topic exchange/durable queue/binding
/// from §4.7, and consumes forever. Only connection/channel setup is fatal;
/// every per-message failure is absorbed and logged.
pub async fn run(amqp_url: &str, deps: PipelineDeps) -> Result<(), ConsumerError> {
    let connection = Connection::connect(amqp_url, ConnectionProperties::default()).await?;
    let channel = connection.create_channel().await?;

    channel
        .exchange_declare(
            EXCHANGE,
            ExchangeKind::Topic,
            ExchangeDeclareOptions { durable: true, ..Default::default() },
            FieldTable::default(),
        )
        .await?;

    channel
        .queue_declare(QUEUE, QueueDeclareOptions { durable: true, ..Default::default() }, FieldTable::default())
        .await?;

    channel
        .queue_bind(QUEUE, EXCHANGE, ROUTING_KEY, QueueBindOptions::default(), FieldTable::default())
        .await?;

    let mut consumer = channel
        .basic_consume(QUEUE, "tender-matcher", BasicConsumeOptions::default(), FieldTable::default())
        .await?;

    tracing::info!(exchange = EXCHANGE, queue = QUEUE, routing_key = ROUTING_KEY, "consuming tender events");

    while let Some(delivery) = consumer.next().await {
        let delivery = match delivery {
            Ok(d) => d,
            Err(err) => {
                tracing::error!(error = %err, "failed to receive delivery");
                continue;
            }
        };

        match serde_json::from_slice::<TenderReadyMessage>(&delivery.data) {
            Ok(message) => process_tender(&deps, message).await,
            Err(err) => tracing::error!(error = %err, "malformed tender.ready_for_matching payload"),
        }

        if let Err(err) = delivery.ack(BasicAckOptions::default()).await {
            tracing::error!(error = %err, "failed to ack delivery");
        }
    }

    Ok(())
}

/// §4.7: load positions, load `company_id`, process each position in order,
/// never aborting the tender over a single position's failure.
async fn process_tender(deps: &PipelineDeps, message: TenderReadyMessage) {
    let tender_id = message.tender_id;
    tracing::info!(tender_id, tender_number = ?message.tender_number, "received tender for matching");

    let positions = match deps.repository.load_positions(tender_id).await {
        Ok(p) => p,
        Err(err) => {
            tracing::error!(tender_id, error = %err, "failed to load tender positions");
            return;
        }
    };

    let company_id = match deps.repository.load_company_id(tender_id).await {
        Ok(id) => id,
        Err(err) => {
            tracing::warn!(tender_id, error = %err, "failed to load company_id, continuing without it");
            0
        }
    };
    tracing::info!(tender_id, company_id, positions = positions.len(), "processing tender positions");

    for position in positions {
        if let Err(err) = process_position(deps, tender_id, &position).await {
            tracing::error!(tender_id, position_id = position.id, error = %err, "position processing failed, continuing tender");
        }
    }

    tracing::info!(tender_id, "tender matching complete");
}

async fn process_position(
    deps: &PipelineDeps,
    tender_id: i64,
    position: &Position,
) -> Result<(), persistence::PersistenceError> {
    let parsed_attrs = attrmodel::parse_position_attributes(position, &deps.attr_parser, &deps.unit_normalizer).await;

    if parsed_attrs.is_empty() {
        tracing::debug!(position_id = position.id, "no parsed attributes for position");
        return deps.repository.increment_processed_positions(tender_id).await;
    }

    let query = build_query(position, deps.candidates_qty);
    let raw_candidates = deps.search.find(&deps.search_index_name, &query).await;
    tracing::info!(position_id = position.id, candidates = raw_candidates.len(), "retrieved candidates");

    let mut mongo_ids = std::collections::HashMap::with_capacity(raw_candidates.len());
    let mut candidates = Vec::with_capacity(raw_candidates.len());
    for raw in raw_candidates {
        let candidate = into_product_candidate(raw);
        mongo_ids.insert(candidate.id, candidate.mongo_id.clone());
        let grouped = attrmodel::parse_candidate(&candidate, &deps.unit_normalizer).await;
        candidates.push((candidate, grouped));
    }

    let matcher = PositionMatcher::new(deps.position_matcher_config, Arc::clone(&deps.unit_normalizer), Arc::clone(&deps.semantic_matcher));

    let scores: Vec<CandidateScore> = matcher.match_candidates(position, parsed_attrs.clone(), candidates).await.unwrap_or_default();

    deps.repository
        .persist_position_matches(tender_id, position.id, parsed_attrs.len(), &scores, |id| {
            mongo_ids.get(&id).cloned().unwrap_or_default()
        })
        .await
}

fn build_query(position: &Position, size: usize) -> serde_json::Value {
    serde_json::json!({
        "size": size,
        "query": {
            "multi_match": {
                "query": position.title,
                "fields": ["title^2", "category"],
            }
        }
    })
}
