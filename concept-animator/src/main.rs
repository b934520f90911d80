use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use concept_animator::config::AnimatorConfig;
use concept_animator::core::{EducationLevel, FormData, StepStatus};
use concept_animator::events::LoggingEventSink;
use concept_animator::library::ContentSelector;
use concept_animator::observability::init_tracing;
use concept_animator::pipeline::{FixedDelay, PipelineRunner, RandomDelay, RunOutcome, StageDelay};
use concept_animator::remote::{HttpVideoGenerator, LocalVideoGenerator, VideoGenerator};
use concept_animator::server;
use concept_animator::store::{JsonFileRequestStore, RequestStore};

#[derive(Parser)]
#[command(name = "concept-animator", version)]
#[command(about = "Educational concept animation pipeline", long_about = None)]
struct Cli {
    /// Request store file (overrides ANIMATOR_STORE_PATH)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the selection HTTP service
    Serve {
        /// Host or IP to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run the five-stage pipeline for one concept
    Generate {
        /// Concept title
        #[arg(short, long)]
        title: String,

        /// Optional description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Education level (elementary, middle, high, college, adult)
        #[arg(short, long, default_value = "middle")]
        level: String,

        /// Narration language
        #[arg(long, default_value = "english")]
        language: String,

        /// Select in process instead of calling the function URL
        #[arg(long)]
        local: bool,

        /// Skip the simulated stage delays
        #[arg(long)]
        fast: bool,
    },

    /// Print the video selected for a concept
    Select {
        /// Concept title
        #[arg(short, long)]
        title: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,

        /// Education level; unknown values resolve to middle
        #[arg(short, long, default_value = "middle")]
        level: String,
    },

    /// List stored requests, newest first
    History {
        /// Maximum number of records to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AnimatorConfig::from_env().context("invalid configuration")?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    init_tracing(&config.log).map_err(|e| anyhow::anyhow!("failed to install tracing: {e}"))?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let selector = Arc::new(ContentSelector::standard()?);
            server::serve(&config.server, selector).await?;
        }

        Commands::Generate {
            title,
            description,
            level,
            language,
            local,
            fast,
        } => {
            let level: EducationLevel = level.parse()?;
            let form = FormData::new(title)
                .with_description(description)
                .with_level(level)
                .with_language(language);
            generate(&config, form, local, fast).await?;
        }

        Commands::Select {
            title,
            description,
            level,
        } => {
            let selector = ContentSelector::standard()?;
            let selection = selector.select(&title, description.as_deref(), &level)?;
            println!("{}", serde_json::to_string_pretty(&selection)?);
        }

        Commands::History { limit } => {
            let store = JsonFileRequestStore::open(&config.store_path).await?;
            let records = store.list().await?;
            if records.is_empty() {
                println!("No animation requests in {}", config.store_path.display());
            }
            for record in records.into_iter().take(limit) {
                println!(
                    "{}  {:<10}  {:<10}  {}  {}",
                    record.created_at.format("%Y-%m-%d %H:%M:%S"),
                    record.status.as_str(),
                    record.education_level.as_str(),
                    record.title,
                    record.video_url.as_deref().unwrap_or("-"),
                );
            }
        }
    }

    Ok(())
}

async fn generate(
    config: &AnimatorConfig,
    form: FormData,
    local: bool,
    fast: bool,
) -> anyhow::Result<()> {
    let store: Arc<dyn RequestStore> =
        Arc::new(JsonFileRequestStore::open(&config.store_path).await?);
    let generator: Arc<dyn VideoGenerator> = if local {
        Arc::new(LocalVideoGenerator::new(Arc::new(ContentSelector::standard()?)))
    } else {
        Arc::new(HttpVideoGenerator::new(config.function.clone())?)
    };
    let delay: Arc<dyn StageDelay> = if fast {
        Arc::new(FixedDelay(Duration::ZERO))
    } else {
        Arc::new(RandomDelay::from_config(&config.stage_delay))
    };

    let runner = PipelineRunner::new(store, generator)
        .with_delay(delay)
        .with_sink(Arc::new(LoggingEventSink::debug()));

    // Print each step as it completes.
    let mut updates = runner.subscribe();
    let progress = tokio::spawn(async move {
        let mut printed = 0;
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            for step in state.steps.iter().skip(printed) {
                if step.status != StepStatus::Complete {
                    break;
                }
                println!("[{}/5] {}: {}", step.id, step.title, step.visual_description);
                printed += 1;
            }
        }
    });

    let handle = runner.start(form).await?;
    info!(request_id = %handle.request_id(), "run started");
    let outcome = handle.outcome().await?;
    // Closing the channel lets the printer drain the final state and exit.
    drop(runner);
    progress.await.ok();

    match outcome {
        RunOutcome::Completed {
            video_url,
            persisted,
            ..
        } => {
            println!("Your educational animation is ready: {video_url}");
            if !persisted {
                println!("(warning: the completed status could not be saved)");
            }
            Ok(())
        }
        RunOutcome::Failed { reason, .. } => anyhow::bail!("generation failed: {reason}"),
    }
}
