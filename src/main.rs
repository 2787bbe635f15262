use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kgexplain::metakg::FilterCriteria;
use kgexplain::{Config, ConceptRecord, Explainer, MetaKg, MetaKgIndex};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "kgexplain")]
#[command(about = "Find intermediate nodes connecting biomedical concepts in two hops", version)]
struct Args {
    /// Config file (defaults to $KGEXPLAIN_CONFIG, then ./config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an explain query and print the response as JSON
    Query {
        /// JSON file with an array of input concepts
        #[arg(long)]
        inputs: PathBuf,

        /// JSON file with an array of output concepts
        #[arg(long)]
        outputs: PathBuf,

        /// Intermediate semantic type (repeatable); all types when omitted
        #[arg(long = "intermediate")]
        intermediate: Vec<String>,

        /// Pretty-print the response
        #[arg(long)]
        pretty: bool,
    },
    /// List relation templates leaving a semantic type
    Templates {
        #[arg(long)]
        input_type: String,

        /// Output semantic type (repeatable)
        #[arg(long = "output-type")]
        output_type: Vec<String>,
    },
}

fn read_concepts(path: &Path) -> Result<Vec<ConceptRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read concepts file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} must contain a JSON array of concepts", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => {
            let _ = dotenv::dotenv();
            Config::load_from(path)?
        }
        None => Config::load()?,
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.explain.log_level.as_str()),
    )
    .init();

    match args.command {
        Command::Query {
            inputs,
            outputs,
            intermediate,
            pretty,
        } => run_query(&config, &inputs, &outputs, intermediate, pretty).await,
        Command::Templates {
            input_type,
            output_type,
        } => list_templates(&config, &input_type, output_type),
    }
}

async fn run_query(
    config: &Config,
    inputs: &Path,
    outputs: &Path,
    intermediate: Vec<String>,
    pretty: bool,
) -> Result<()> {
    log::info!("Starting kgexplain v{}", env!("CARGO_PKG_VERSION"));
    let explainer = Explainer::from_config(config)?;

    let inputs = read_concepts(inputs)?;
    let outputs = read_concepts(outputs)?;
    let intermediate = if intermediate.is_empty() {
        None
    } else {
        Some(intermediate.as_slice())
    };

    let start = std::time::Instant::now();
    let response = explainer.query(&inputs, &outputs, intermediate).await?;
    log::info!("Query finished in {:?}", start.elapsed());

    match response {
        Some(response) => {
            let json = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            println!("{}", json);
        }
        None => {
            log::warn!("Inputs and outputs must both be non-empty concept arrays");
            println!("null");
        }
    }

    Ok(())
}

fn list_templates(config: &Config, input_type: &str, output_type: Vec<String>) -> Result<()> {
    let path = config
        .metakg
        .path
        .as_ref()
        .context("metakg.path is not set in the config")?;
    let meta_kg = MetaKg::load(&config.metakg.source, path)?;

    let criteria = FilterCriteria::one_hop(
        input_type,
        if output_type.is_empty() {
            None
        } else {
            Some(output_type.as_slice())
        },
    );
    let templates = meta_kg.filter(&criteria);

    for t in &templates {
        let a = &t.association;
        println!(
            "{} ({}) --{}--> {} [{}]",
            a.input_type, a.input_id, a.predicate, a.output_type, a.api_name
        );
    }
    log::info!("{} of {} templates match", templates.len(), meta_kg.len());

    Ok(())
}
