//! vidsearch command line entry point
//!
//! Runs one video search and prints every status snapshot as a JSON line.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vidsearch::{
    config::{self, Settings},
    search::user_message,
    SearchJob, SearchOrchestrator, SearchRequest,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            println!("vidsearch {}", vidsearch::VERSION);
            return Ok(());
        }
        Command::Search(args) => args,
    };

    let settings = config::load_settings(args.config.as_deref())?;
    init_logging(&settings);
    info!("Starting vidsearch v{}", vidsearch::VERSION);

    let mut request = SearchRequest::new(args.query);
    request.count = args.count;
    request.duration = args.duration;
    request.collection_id = args.collection_id;

    let job = SearchJob {
        engine: args.engine.unwrap_or_else(|| "serp".to_string()),
        ..SearchJob::new(request)
    };

    let orchestrator = Arc::new(SearchOrchestrator::new(settings));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let run = tokio::spawn({
        let orchestrator = Arc::clone(&orchestrator);
        async move { orchestrator.run_job(job, &tx).await }
    });

    while let Some(snapshot) = rx.recv().await {
        println!("{}", serde_json::to_string(&snapshot)?);
    }

    match run.await.context("search task panicked")? {
        Ok(videos) => {
            info!("Search finished with {} videos", videos.len());
            Ok(())
        }
        Err(err) => {
            if err.is_rejection() {
                eprintln!("error: {}", user_message(&err));
            }
            std::process::exit(1);
        }
    }
}

/// Install the stderr subscriber; `RUST_LOG` wins over settings
fn init_logging(settings: &Settings) {
    let default_level = if settings.general.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Version,
    Search(SearchArgs),
}

#[derive(Debug, Default, PartialEq)]
struct SearchArgs {
    query: String,
    count: Option<u32>,
    duration: Option<String>,
    collection_id: Option<String>,
    engine: Option<String>,
    config: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command> {
    let mut parsed = SearchArgs::default();
    let mut query = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .with_context(|| format!("missing value for {}", name))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-n" | "--count" => {
                let raw = value(&arg)?;
                parsed.count = Some(
                    raw.parse()
                        .with_context(|| format!("invalid count: {}", raw))?,
                );
            }
            "-d" | "--duration" => parsed.duration = Some(value(&arg)?),
            "--collection" => parsed.collection_id = Some(value(&arg)?),
            "-e" | "--engine" => parsed.engine = Some(value(&arg)?),
            "-c" | "--config" => parsed.config = Some(PathBuf::from(value(&arg)?)),
            flag if flag.starts_with('-') && flag.len() > 1 => bail!("unknown option: {}", flag),
            _ => query.push(arg),
        }
    }

    if query.is_empty() {
        bail!("missing search query (see --help)");
    }
    parsed.query = query.join(" ");
    Ok(Command::Search(parsed))
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
vidsearch v{}
Video search over SerpAPI

USAGE:
    vidsearch [OPTIONS] <QUERY>...

OPTIONS:
    -n, --count <N>            Number of results (1-50, default 5)
    -d, --duration <LENGTH>    short, medium or long
        --collection <ID>      Collection ID attached to every result
    -e, --engine <ENGINE>      Search engine (default serp)
    -c, --config <FILE>        Path to configuration file
    -h, --help                 Print help information
    -V, --version              Print version information

ENVIRONMENT VARIABLES:
    SERP_API_KEY               SerpAPI access key
    VIDSEARCH_SETTINGS_PATH    Path to settings.yml
    VIDSEARCH_DEBUG            Enable debug logging (true/false)
    VIDSEARCH_REQUEST_TIMEOUT  Per-attempt timeout in seconds
    VIDSEARCH_SERP_BASE_URL    SerpAPI endpoint
    RUST_LOG                   Log filter
"#,
        vidsearch::VERSION
    );
}
