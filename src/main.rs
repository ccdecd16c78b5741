use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tabletalk_backend::controllers::{table::TableController, tts::TtsController};
use tabletalk_backend::domain::tts::ConversionService;
use tabletalk_backend::infrastructure::config::{Config, LogFormat, TtsBackend};
use tabletalk_backend::infrastructure::http::start_http_server;
use tabletalk_backend::infrastructure::repositories::{
    EspeakTtsRepository, OpenAiTtsRepository, PollyTtsRepository, TtsRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting TableTalk Backend on {}:{}",
        config.host,
        config.port
    );

    // One synthesis backend per process
    let tts_repo = build_tts_repository(&config).await?;

    if tts_repo.is_available().await {
        tracing::info!(backend = tts_repo.name(), "TTS backend ready");
    } else {
        tracing::warn!(
            backend = tts_repo.name(),
            "TTS backend not available yet, conversions will fail until it is"
        );
    }

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    tracing::info!("Instantiating services...");
    let conversion_service = Arc::new(ConversionService::new(tts_repo.clone()));

    tracing::info!("Instantiating controllers...");
    let table_controller = Arc::new(TableController::new(conversion_service.clone()));
    let tts_controller = Arc::new(TtsController::new(conversion_service));

    // Start HTTP server with all routes
    start_http_server(config, tts_repo, table_controller, tts_controller).await?;

    Ok(())
}

async fn build_tts_repository(
    config: &Config,
) -> Result<Arc<dyn TtsRepository>, Box<dyn std::error::Error>> {
    let repo: Arc<dyn TtsRepository> = match config.tts_backend {
        TtsBackend::Espeak => {
            tracing::info!(binary = %config.espeak_path.display(), "Using local espeak-ng engine");
            Arc::new(
                EspeakTtsRepository::new(config.espeak_path.clone())
                    .with_voice(config.espeak_voice.clone())
                    .with_rate(config.espeak_rate)
                    .with_temp_dir(config.tts_temp_dir.clone()),
            )
        }
        TtsBackend::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;

            tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
            Arc::new(PollyTtsRepository::new(
                polly_client,
                &config.polly_voice_id,
                &config.polly_engine,
            ))
        }
        TtsBackend::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or("OPENAI_API_KEY is required when TTS_BACKEND=openai")?;
            tracing::info!(model = %config.openai_tts_model, "Using OpenAI speech API");

            let client = Arc::new(async_openai::Client::with_config(
                async_openai::config::OpenAIConfig::new().with_api_key(api_key),
            ));
            Arc::new(OpenAiTtsRepository::new(
                client,
                config.openai_tts_model.clone(),
                config.openai_tts_voice.clone(),
            ))
        }
    };

    Ok(repo)
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "tabletalk_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "tabletalk_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
