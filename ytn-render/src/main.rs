//! ytn-render - render a YouTube annotation timeline from the command line
//!
//! Examples:
//!
//! ```text
//! ytn-render --project 3f2c... --duration 300
//! ytn-render --input annotations.json --expand 0 --format json
//! ytn-render --project 3f2c... --at 42.5 --author Dana --add "Tighten this cut"
//! ytn-render --create-project https://youtu.be/dQw4w9WgXcQ
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ytn_common::config::{ConfigResolver, Settings};
use ytn_common::AnnotationStatus;
use ytn_render::{
    finish_event_logger, list_text, overlay_text, read_input, seed, spawn_event_logger,
    timeline_json, timeline_text, OutputFormat,
};
use ytn_timeline::{
    create_project, AnnotationApi, DurationPoller, HttpAnnotationApi, MemoryApi, ScriptedPlayer,
    Session,
};

/// Command-line arguments for ytn-render
#[derive(Parser, Debug)]
#[command(name = "ytn-render")]
#[command(about = "Render a YouTube annotation timeline")]
#[command(version)]
struct Args {
    /// Config file (default: <user config dir>/ytn/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Annotation server URL (overrides YTN_SERVER_URL and the config file)
    #[arg(long)]
    server_url: Option<String>,

    /// Project id to load from the server
    #[arg(short, long, env = "YTN_PROJECT", conflicts_with = "input")]
    project: Option<String>,

    /// Render a project from a JSON file instead of the server
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Create a project for a YouTube link and print its share URL
    #[arg(long, value_name = "YOUTUBE_URL", conflicts_with_all = ["project", "input"])]
    create_project: Option<String>,

    /// Video duration in seconds, as the player would report it
    #[arg(short, long)]
    duration: Option<f64>,

    /// Current playback position in seconds, stamps --add
    #[arg(long)]
    at: Option<f64>,

    /// Author for --add (default: default_author from the config file)
    #[arg(short, long)]
    author: Option<String>,

    /// Add an annotation with this text at --at
    #[arg(long, value_name = "TEXT")]
    add: Option<String>,

    /// Mark an annotation accepted
    #[arg(long, value_name = "ID")]
    accept: Option<String>,

    /// Mark an annotation rejected
    #[arg(long, value_name = "ID")]
    reject: Option<String>,

    /// Delete an annotation
    #[arg(long, value_name = "ID")]
    delete: Option<String>,

    /// Fan out this cluster after rendering
    #[arg(long, value_name = "CLUSTER_INDEX")]
    expand: Option<usize>,

    /// Also print the annotation list (text output)
    #[arg(long)]
    list: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = ConfigResolver::new()
        .with_config_path(args.config.clone())
        .with_server_url(args.server_url.clone())
        .with_author(args.author.clone())
        .resolve();

    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting YTN timeline renderer (ytn-render) v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!(server_url = %settings.server_url, "Configuration resolved");

    if let Some(url) = &args.create_project {
        let api = HttpAnnotationApi::new(settings.server_url.clone())?;
        let created = create_project(&api, url)
            .await
            .context("Failed to create project")?;
        match args.format {
            OutputFormat::Text => println!("{}", created.share_url),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&created)?),
        }
        return Ok(());
    }

    if let Some(path) = &args.input {
        let input = read_input(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let api = MemoryApi::new();
        let project_id = seed(&api, input).await;
        return run(api, project_id, &args, &settings).await;
    }

    let Some(project_id) = args.project.clone() else {
        bail!("one of --project, --input or --create-project is required");
    };
    let api = HttpAnnotationApi::new(settings.server_url.clone())?;
    run(api, project_id, &args, &settings).await
}

async fn run<A: AnnotationApi>(
    api: A,
    project_id: String,
    args: &Args,
    settings: &Settings,
) -> Result<()> {
    let mut player = ScriptedPlayer::new();
    player.set_current_time(args.at);
    player.set_duration(args.duration);

    let mut session = Session::new(project_id.clone(), api, player)
        .with_author(settings.default_author.clone());
    let logger = spawn_event_logger(session.events());

    session
        .load()
        .await
        .with_context(|| format!("Failed to load project {project_id}"))?;

    // first tick completes immediately
    let mut poller = DurationPoller::from_millis(settings.duration_poll_interval_ms);
    poller.tick(&mut session).await;

    if let Some(text) = &args.add {
        let author = session.last_author().unwrap_or_default().to_string();
        session.add_annotation(&author, text).await?;
    }
    if let Some(id) = &args.accept {
        session.set_status(id, AnnotationStatus::Accepted).await?;
    }
    if let Some(id) = &args.reject {
        session.set_status(id, AnnotationStatus::Rejected).await?;
    }
    if let Some(id) = &args.delete {
        session.delete_annotation(id).await?;
    }
    if let Some(index) = args.expand {
        if session.expand(index).is_none() {
            warn!(cluster_index = index, "Cluster has fewer than two members, not expanded");
        }
    }

    let list = session.annotation_list();
    match args.format {
        OutputFormat::Text => {
            print!("{}", timeline_text(session.rendered()));
            if let Some(overlay) = session.overlay() {
                print!("\n{}", overlay_text(overlay));
            }
            if args.list {
                print!("\n{}", list_text(&list));
            }
        }
        OutputFormat::Json => {
            let document = timeline_json(session.rendered(), &list, session.overlay());
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    // closing the bus ends the logger
    drop(session);
    finish_event_logger(logger).await;
    Ok(())
}
