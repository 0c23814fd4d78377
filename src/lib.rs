//! Wires the seven crates together: builds the pooled HTTP clients and
//! persistence pool from [`server::Settings`], starts the health server and
//! the tender consumer concurrently, and aggregates startup failures into
//! [`server::ServiceError`].

use std::sync::Arc;

use clients::{build_http_client, AttrParserClient, ClientsConfig, SearchClient, SemanticMatcherClient, UnitNormalizerClient};
use consumer::PipelineDeps;
use persistence::TenderRepository;
use scoring::{ComparatorConfig, PositionMatcherConfig};
use server::health::ReadinessState;
use server::{ServiceError, Settings};

/// Runs the service until the consumer loop exits (only on a fatal broker
/// error) or a shutdown signal arrives. Startup failures (config, initial
/// DB connect, broker connect) are fatal per §7 kind 5; everything after is
/// absorbed at its own boundary.
pub async fn run(settings: Settings) -> Result<(), ServiceError> {
    let clients_config = ClientsConfig {
        attr_parser_base_url: settings.http_services.attr_parser_base_url.clone(),
        unit_normalizer_base_url: settings.http_services.unit_normalizer_base_url.clone(),
        semantic_matcher_base_url: settings.http_services.semantic_matcher_base_url.clone(),
        request_timeout: settings.http_request_timeout(),
        pool_max_idle_per_host: settings.http_services.pool_max_idle_per_host,
        retry: clients::RetryPolicy { max_attempts: settings.http_services.max_retries, ..Default::default() },
    };
    let http = build_http_client(&clients_config).map_err(|e| ServiceError::Config(e.into()))?;

    let attr_parser = Arc::new(AttrParserClient::new(http.clone(), clients_config.clone()));
    let unit_normalizer = Arc::new(UnitNormalizerClient::new(http.clone(), clients_config.clone()));
    let semantic_matcher = Arc::new(SemanticMatcherClient::new(http.clone(), clients_config.clone()));
    let search: Arc<dyn clients::SearchIndex> =
        Arc::new(SearchClient::new(http, format!("{}/_search", settings.search.dsn()), clients_config));

    let repository = Arc::new(TenderRepository::connect(&settings.database.postgres_dsn()).await?);

    let readiness = ReadinessState::default();
    readiness.mark_db_ready();

    let health_router = server::health::router(readiness.clone());
    let health_addr = format!("{}:{}", settings.health.host, settings.health.port);
    let health_task = tokio::spawn(async move {
        match tokio::net::TcpListener::bind(&health_addr).await {
            Ok(listener) => {
                if let Err(err) = axum::serve(listener, health_router).await {
                    tracing::error!(error = %err, "health server stopped");
                }
            }
            Err(err) => tracing::error!(error = %err, health_addr, "failed to bind health server"),
        }
    });

    let deps = PipelineDeps {
        repository,
        search,
        attr_parser,
        unit_normalizer,
        semantic_matcher,
        position_matcher_config: PositionMatcherConfig {
            comparator: ComparatorConfig {
                name_ngram_threshold: 0.7,
                multiple_textual_threshold: settings.matching.threshold_value_match,
                numeric_tolerance: 0.1,
            },
            semaphore_capacity: settings.matching.shrinker_semaphore_size,
            min_required_ratio: settings.matching.candidates_threshold_score,
        },
        search_index_name: settings.search.index.clone(),
        candidates_qty: settings.search.candidates_qty,
    };

    let amqp_url = settings.broker.amqp_url();
    readiness.mark_broker_ready();

    tokio::select! {
        result = consumer::run(&amqp_url, deps) => result.map_err(ServiceError::from),
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
            Ok(())
        }
    }?;

    health_task.abort();
    Ok(())
}
