//! Score one recruitment campaign from the command line.
//!
//! Examples:
//! - Even split over all channels:
//!   `campaign-predict --artifacts models --weeks 4 --budget 1000`
//!
//! - LinkedIn-heavy hard role, JSON output:
//!   `campaign-predict --artifacts models --difficulty hard --linkedin 60 --meta 10 --indeed 10 --google-ads 10 --youtube 10 --json`
//!
//! Exit status is 0 when a prediction was made, 2 when the request was
//! rejected, and 1 on any other failure.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use campaign_predictor::{
    ArtifactPaths, ArtifactSet, CampaignRequest, ChannelAllocation, Difficulty, Pipeline,
    PipelineConfig, PredictError, Prediction,
};

#[derive(Debug, Parser)]
#[command(name = "campaign-predict", version, about = "Estimate recruitment campaign success")]
struct Args {
    /// Campaign duration in weeks.
    #[arg(long, default_value_t = 4)]
    weeks: u32,

    /// Total advertising budget in euro.
    #[arg(long, default_value_t = 1000)]
    budget: u32,

    /// Role difficulty. Only used with a `selected` difficulty config.
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Meta share, in percent.
    #[arg(long, default_value_t = 20)]
    meta: u8,

    /// Indeed share, in percent.
    #[arg(long, default_value_t = 20)]
    indeed: u8,

    /// LinkedIn share, in percent.
    #[arg(long, default_value_t = 20)]
    linkedin: u8,

    /// Google Ads share, in percent.
    #[arg(long, default_value_t = 20)]
    google_ads: u8,

    /// YouTube share, in percent.
    #[arg(long, default_value_t = 20)]
    youtube: u8,

    /// Directory holding the three artifact files.
    #[arg(long, default_value = ".")]
    artifacts: PathBuf,

    /// TOML pipeline configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn request(&self) -> CampaignRequest {
        CampaignRequest::builder()
            .campaign_weeks(self.weeks)
            .total_add_budget(self.budget)
            .difficulty(self.difficulty)
            .allocation(ChannelAllocation::from([
                self.meta,
                self.indeed,
                self.linkedin,
                self.google_ads,
                self.youtube,
            ]))
            .build()
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_pipeline(args: &Args) -> Result<Pipeline, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => PipelineConfig::from_toml_file(path)?,
        None => PipelineConfig::default(),
    };
    let artifacts = ArtifactSet::load(&ArtifactPaths::in_dir(&args.artifacts))?;
    Ok(Pipeline::new(artifacts, config))
}

/// Exit status: a prediction was made.
const EXIT_OK: u8 = 0;
/// Exit status: startup, argument or inference failure.
const EXIT_FAILURE: u8 = 1;
/// Exit status: the request was rejected before inference.
const EXIT_REJECTED: u8 = 2;

fn exit_status(result: &Result<Prediction, PredictError>) -> u8 {
    match result {
        Ok(_) => EXIT_OK,
        Err(PredictError::Validation(_)) => EXIT_REJECTED,
        Err(PredictError::Transform(_)) => EXIT_FAILURE,
    }
}

fn render_text(request: &CampaignRequest, result: &Result<Prediction, PredictError>) -> String {
    let verdict = match result {
        Ok(prediction) => format!(
            "{} (Success probability: {}%)",
            prediction.outcome,
            prediction.percent()
        ),
        Err(e) => e.to_string(),
    };
    format!("Total allocation: {}%\n{verdict}", request.sum_budget_pct())
}

fn render_json(
    request: &CampaignRequest,
    result: &Result<Prediction, PredictError>,
) -> serde_json::Value {
    match result {
        Ok(prediction) => json!({
            "sum_budget_pct": request.sum_budget_pct(),
            "probability": prediction.probability,
            "outcome": prediction.outcome,
            "message": prediction.outcome.to_string(),
        }),
        Err(e) => json!({
            "sum_budget_pct": request.sum_budget_pct(),
            "reason": e.reason(),
            "message": e.to_string(),
        }),
    }
}

fn main() -> ExitCode {
    init_logging();
    let args = match Args::try_parse() {
        Ok(args) => args,
        // Help and version go to stdout and exit 0
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let pipeline = match load_pipeline(&args) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let request = args.request();
    let result = pipeline.predict(&request);

    if args.json {
        println!("{}", render_json(&request, &result));
    } else {
        println!("{}", render_text(&request, &result));
    }

    ExitCode::from(exit_status(&result))
}
