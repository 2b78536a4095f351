//! Command-line quotation against the configured rating service.
//!
//! Reads a JSON quote request, prices it through the HTTP rating service and
//! prints the resulting quotation as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use policy_quotation::application::services::QuotationEngine;
use policy_quotation::config::{LogFormat, LoggingConfig, QuotationConfig};
use policy_quotation::domain::entities::{
    Applicant, BeneficiaryRecord, ProductSelection, QuoteContext,
};
use policy_quotation::infrastructure::pricing::HttpPricingService;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "quote",
    about = "Price an insurance policy quotation",
    after_help = "Examples:\n  quote request.json\n  quote request.json --service-url http://rating:8080 --pretty"
)]
struct Cli {
    #[arg(help = "Path to the JSON quote request")]
    request: PathBuf,
    #[arg(long, help = "Override the rating service base URL")]
    service_url: Option<String>,
    #[arg(long, help = "Override the log filter, e.g. debug")]
    log_level: Option<String>,
    #[arg(long, help = "Log format: compact, pretty or json")]
    log_format: Option<LogFormat>,
    #[arg(long, help = "Pretty-print the quotation JSON")]
    pretty: bool,
}

/// Quote request file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteRequest {
    applicant: Applicant,
    #[serde(default)]
    products: Vec<ProductSelection>,
    #[serde(default)]
    beneficiaries: Option<Vec<BeneficiaryRecord>>,
    #[serde(default)]
    breakdown: bool,
    #[serde(default)]
    context: QuoteContext,
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = QuotationConfig::load().context("loading configuration")?;
    if let Some(url) = cli.service_url {
        config.service.base_url = url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    init_logging(&config.logging);

    let raw = std::fs::read_to_string(&cli.request)
        .with_context(|| format!("reading {}", cli.request.display()))?;
    let request: QuoteRequest = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", cli.request.display()))?;

    let service = HttpPricingService::new(&config.service.base_url, config.service.timeout_ms)?;
    tracing::info!(
        endpoint = service.endpoint(),
        workers = config.worker_count,
        "rating service configured"
    );
    let engine = QuotationEngine::from_config(&config, Arc::new(service))?;

    let result = engine
        .quote(
            &request.applicant,
            &request.products,
            request.beneficiaries.as_deref(),
            request.breakdown,
            &request.context,
        )
        .await?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{output}");
    Ok(())
}
