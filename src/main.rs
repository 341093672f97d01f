mod config;
mod presets;
mod identifier;
mod engine;
mod sink;
mod pipeline;
mod errors;
mod metrics;
mod logger;

use clap::Parser;
use config::{load_config, SinkMode};
use engine::{CodeTransformer, HttpTransformEngine};
use errors::AppError;
use identifier::BrandedNamer;
use metrics::Metrics;
use pipeline::{Orchestrator, Submission, SubmissionBody};
use sink::{ArtifactSink, LocalSink, RemoteSink};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "jscloak", version)]
struct Cli {
    /// JavaScript file to obfuscate
    #[arg(short, long)]
    input: String,

    /// Protection level: low, medium or high
    #[arg(short, long, default_value = "low")]
    level: String,

    /// Anti-forgery token issued for this submission
    #[arg(long)]
    token: String,

    #[arg(long, default_value = "application/javascript")]
    media_type: String,

    /// Artifact delivery: local or remote
    #[arg(long, default_value = "local")]
    sink: String,

    #[arg(long, default_value = "public/downloads")]
    output_dir: String,

    #[arg(long, default_value = "https://storage.example.com")]
    bucket_endpoint: String,

    #[arg(long, default_value = "jscloak-artifacts")]
    bucket_name: String,

    #[arg(long, default_value = "https://engine.example.com/v1/obfuscate")]
    engine_endpoint: String,

    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    logger::init();
    let cli = Cli::parse();
    let cfg = load_config(
        &cli.engine_endpoint,
        &cli.api_key,
        &cli.output_dir,
        &cli.bucket_endpoint,
        &cli.bucket_name,
    )?;

    let registry = prometheus::Registry::new();
    let metrics = Metrics::new(&registry);

    let engine: Arc<dyn CodeTransformer> = Arc::new(HttpTransformEngine::new(
        cfg.engine_endpoint.clone(),
        cfg.engine_api_key.clone(),
    ));
    let sink: Arc<dyn ArtifactSink> = match cli.sink.parse::<SinkMode>()? {
        SinkMode::Local => Arc::new(LocalSink::new(&cfg.output_dir)),
        SinkMode::Remote => Arc::new(RemoteSink::new(
            cfg.bucket_endpoint.clone(),
            cfg.bucket_name.clone(),
        )),
    };
    let orchestrator = Orchestrator::new(engine, sink, Arc::new(BrandedNamer::new()));

    let content = tokio::fs::read(&cli.input).await?;
    let filename = Path::new(&cli.input)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.js".to_string());
    let submission = Submission {
        body: SubmissionBody::InMemory(content),
        media_type: cli.media_type.clone(),
        filename,
        level: cli.level.clone(),
        token: cli.token.clone(),
    };

    metrics.submissions_received.inc();
    match orchestrator.run(submission).await {
        Ok(outcome) => {
            metrics.submissions_completed.inc();
            info!(original = %outcome.original_filename, "obfuscation complete");
            println!("{}", outcome.locator);
            Ok(())
        }
        Err(err) => {
            metrics.submissions_failed.inc();
            error!(%err, "submission failed");
            eprintln!("{}", err.caller_message());
            Err(AppError::Pipeline(err))
        }
    }
}
