use clap::Parser;
use techspace_shorts::pipeline::{error_message, parse_max_items};
use techspace_shorts::{AggregationPolicy, ShortsConfig, ShortsPipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate a tech & space news short from today's Google News headlines.
#[derive(Debug, Parser)]
#[command(name = "techspace-shorts", version)]
struct Cli {
    /// Number of stories to cover (clamped to 1..=3)
    #[arg(long)]
    max_items: Option<String>,

    /// Topic query; repeat to replace the default topics
    #[arg(long = "topic")]
    topics: Vec<String>,

    /// Keep going when some topics fail to fetch
    #[arg(long)]
    best_effort: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ShortsConfig::from_env();
    if !cli.topics.is_empty() {
        config.topics = cli.topics;
    }
    if cli.best_effort {
        config.policy = AggregationPolicy::BestEffort;
    }

    info!("Starting TechSpace Shorts with {} topics", config.topics.len());

    let pipeline = ShortsPipeline::from_config(config)?;
    let max_items = parse_max_items(cli.max_items.as_deref());

    let (body, ok) = match pipeline.generate(max_items).await {
        Ok(response) => (serde_json::to_value(&response)?, true),
        Err(e) => (serde_json::json!({ "error": error_message(&e) }), false),
    };

    let output = if cli.pretty {
        serde_json::to_string_pretty(&body)?
    } else {
        serde_json::to_string(&body)?
    };
    println!("{}", output);

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
