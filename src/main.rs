use credit_risk_api::auth::StaticKeyVerifier;
use credit_risk_api::config::{Config, ScoringModelKind};
use credit_risk_api::handlers::AppState;
use credit_risk_api::scoring::{SharedModel, TrainedScoringModel, WeightedScoringModel};
use credit_risk_api::server;
use credit_risk_api::service::CreditAssessmentService;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Loads the scoring model selected by the configuration.
///
/// Trained parameters are read once here and shared read-only afterwards.
fn load_model(config: &Config) -> anyhow::Result<SharedModel> {
    let model: SharedModel = match config.scoring_model {
        ScoringModelKind::Weighted => Arc::new(WeightedScoringModel::default()),
        ScoringModelKind::Trained => {
            let path = config.model_params_path.as_ref().ok_or_else(|| {
                anyhow::anyhow!("MODEL_PARAMS_PATH is required when SCORING_MODEL=trained")
            })?;
            Arc::new(TrainedScoringModel::from_path(path)?)
        }
    };
    Ok(model)
}

/// Main entry point for the application.
///
/// Initializes logging, configuration, the scoring model, the API key
/// verifier and the HTTP routes (body limit, rate limiting, CORS), then
/// starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credit_risk_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let model = load_model(&config)?;
    tracing::info!("Scoring model initialized: {}", model.name());

    let app_state = Arc::new(AppState {
        service: CreditAssessmentService::new(model),
        verifier: Arc::new(StaticKeyVerifier::new(&config.api_keys)),
    });

    // Per-IP rate limiting on the scoring API
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?,
    );

    let api = server::api_routes(app_state.clone()).layer(GovernorLayer {
        config: governor_conf,
    });
    let app = server::assemble(app_state, api, config.max_body_bytes);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
