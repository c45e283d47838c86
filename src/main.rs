use anyhow::Context;
use siteqa::cli::init::{self, InitOptions, InitOutcome};
use siteqa::cli::output::Output;
use siteqa::cli::{Cli, Commands};
use siteqa::{AppState, DaedraFetcher, OpenAiPlatform, Pipeline, SiteQaConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let output = Output::new(!cli.no_color);

    // .env may provide the API key; a missing file is fine
    dotenvy::dotenv().ok();

    match cli.command {
        Some(Commands::Init {
            path,
            force,
            host,
            port,
        }) => {
            let opts = InitOptions {
                dir: path,
                force,
                host,
                port,
            };
            match init::run(&opts, &output) {
                InitOutcome::Written(_) => Ok(()),
                InitOutcome::AlreadyInitialized(_) => std::process::exit(1),
                InitOutcome::Failed(e) => {
                    Err(e).with_context(|| format!("init failed in {}", opts.dir.display()))
                }
            }
        }
        Some(Commands::Config { validate }) => {
            if !siteqa::cli::config::run(&cli.config, validate, &output) {
                std::process::exit(1);
            }
            Ok(())
        }
        None => serve(cli.config, cli.verbose).await,
    }
}

async fn serve(config_path: std::path::PathBuf, verbose: bool) -> anyhow::Result<()> {
    let config = SiteQaConfig::load_or_default(&config_path)
        .with_context(|| format!("invalid configuration in {}", config_path.display()))?;

    init_tracing(&config, verbose);
    if !config_path.exists() {
        info!(path = %config_path.display(), "No config file, running with defaults");
    }

    let api_key = config.api_key()?;
    let platform = OpenAiPlatform::from_config(&config.openai, api_key)?;
    let fetcher = DaedraFetcher::new(config.scrape.include_images, config.scrape.selector.clone());
    let pipeline = Pipeline::from_config(&config, Arc::new(fetcher), Arc::new(platform))?;

    info!(
        model = %config.openai.model,
        cleanup_rules = pipeline.rules().len(),
        "Pipeline ready"
    );

    let addr = config.listen_addr();
    let state = AppState {
        config: Arc::new(config),
        pipeline: Arc::new(pipeline),
    };
    let app = siteqa::api::create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("SiteQA listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(config: &SiteQaConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.as_str()))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.server.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
