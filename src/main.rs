use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use weather_advisory::{AdvisoryConfig, AdvisoryPipeline, ForecastRecord, History, LoggingConfig};

const USAGE: &str =
    "usage: weather-advisory <forecast.json> [history.json] [--config <config.toml>]";

struct Args {
    forecast: PathBuf,
    history: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut positional = Vec::new();
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config requires a path")?;
                config = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let mut positional = positional.into_iter();
    let Some(forecast) = positional.next() else {
        bail!("missing forecast file\n{USAGE}");
    };
    let history = positional.next();
    if positional.next().is_some() {
        bail!("too many arguments\n{USAGE}");
    }

    Ok(Args {
        forecast,
        history,
        config,
    })
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("weather_advisory={}", logging.level)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = AdvisoryConfig::load_from_path(args.config)?;
    init_tracing(&config.logging);

    let forecast_json = fs::read_to_string(&args.forecast)
        .with_context(|| format!("Failed to read forecast file: {}", args.forecast.display()))?;
    let forecast: ForecastRecord =
        serde_json::from_str(&forecast_json).context("Failed to parse forecast record")?;

    let history = match &args.history {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read history file: {}", path.display()))?;
            History::from_json(&json)
                .context("Failed to parse history records")?
                .truncated(config.analysis.analysis_days)
        }
        None => History::empty(),
    };
    debug!("Loaded {} historical record(s)", history.len());

    let pipeline = AdvisoryPipeline::new(&config)?;
    let report = pipeline.run_now(&forecast, &history).inspect_err(|e| {
        error!("{}", e.user_message());
    })?;

    println!("{}\n\n{}", report.title, report.body);
    Ok(())
}
