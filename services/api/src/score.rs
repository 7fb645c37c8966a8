use crate::infra::build_scoring_service;
use clap::Args;
use lead_scorer::config::AppConfig;
use lead_scorer::error::AppError;
use lead_scorer::scoring::{Offer, ScoredResult};
use lead_scorer::telemetry;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Offer definition as a JSON object
    #[arg(long)]
    pub(crate) offer: PathBuf,
    /// Leads CSV with a header row
    #[arg(long)]
    pub(crate) leads: PathBuf,
    /// Write the scored results as CSV to this path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) async fn run_offline_scoring(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let offer: Offer = serde_json::from_slice(&std::fs::read(&args.offer)?)?;
    let leads_csv = std::fs::read(&args.leads)?;

    let service = build_scoring_service(&config.classifier)?;
    service.submit_offer(offer)?;
    service.upload_leads(&display_name(&args.leads), &leads_csv)?;
    service.score().await?;

    let results = service.results()?;
    render_results(&results);

    if let Some(path) = args.output {
        std::fs::write(&path, service.export_csv()?)?;
        println!("\nResults written to {}", path.display());
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn render_results(results: &[ScoredResult]) {
    println!("Lead scoring results ({} leads)", results.len());
    for result in results {
        println!(
            "- {} ({} @ {}): score {} [rules {}, ai {}] intent {}",
            result.lead.text("name"),
            result.lead.text("role"),
            result.lead.text("company"),
            result.score,
            result.rule_points,
            result.ai_points,
            result.intent,
        );
        println!("    {}", result.reasoning);
    }
}
