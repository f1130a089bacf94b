use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use mathreel::{composition::CompositionEngine, config::Config, latex};

/// Expressions checked by `mathreel latex` when none are given
const SAMPLE_EXPRESSIONS: [&str; 4] = [
    "x^2 + y^2 = z^2",
    r"\frac{-b \pm \sqrt{b^2 - 4ac}}{2a}",
    r"\sum_{i=1}^{n} x_i",
    r"\int_{0}^{\infty} e^{-x} dx",
];

#[derive(Parser)]
#[command(
    name = "mathreel",
    version,
    about = "Turn JSON lesson scripts into timed display plans",
    long_about = "mathreel schedules a lesson script (introduction, sections of visual elements, conclusion) into a display plan: every object and every timed animation, with budgets split per element and text fallbacks for anything that cannot be rendered."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Schedule a script and write its display plan
    Plan {
        /// Lesson script (JSON)
        #[arg(short, long)]
        script: PathBuf,

        /// Output path for the display plan (JSON)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Lay a narration track under a rendered video
    Mux {
        /// Rendered video
        #[arg(long)]
        video: PathBuf,

        /// Narration audio
        #[arg(short, long)]
        audio: PathBuf,

        /// Output video path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Normalize and check math expressions
    Latex {
        /// Expressions to check (a built-in sample set if empty)
        expressions: Vec<String>,
    },

    /// Write the default configuration to a file
    InitConfig {
        /// Output path for the TOML configuration
        #[arg(short, long, default_value = "mathreel.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the flag
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string().to_lowercase()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting mathreel v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            let config = Config::from_file(config_path).map_err(|e| anyhow::anyhow!(e.user_message()))?;
            config.validate()?;
            config
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Plan { script, output } => {
            let engine = CompositionEngine::new(config);
            let plan = engine
                .compose(&script, &output)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;

            info!(
                "{} object(s), {} op(s), {:.1}s scheduled for a {:.1}s target",
                plan.objects.len(),
                plan.ops.len(),
                plan.scheduled_duration,
                plan.target_duration
            );
            if plan.fallbacks > 0 {
                warn!("{} of {} element(s) used a text fallback", plan.fallbacks, plan.elements);
            }
        }
        Command::Mux { video, audio, output } => {
            let engine = CompositionEngine::new(config);
            engine
                .mux(&video, &audio, &output)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
        }
        Command::Latex { expressions } => {
            let expressions = if expressions.is_empty() {
                SAMPLE_EXPRESSIONS.iter().map(|s| s.to_string()).collect()
            } else {
                expressions
            };

            let mut failures = 0;
            for raw in &expressions {
                let normalized = latex::normalize(raw);
                match latex::validate_markup(&normalized) {
                    Ok(()) => println!("ok    {}", normalized),
                    Err(e) => {
                        failures += 1;
                        println!("FAIL  {}  ({})", normalized, e);
                    }
                }
            }

            if failures > 0 {
                anyhow::bail!("{} of {} expression(s) failed", failures, expressions.len());
            }
        }
        Command::InitConfig { output } => {
            config.save_to_file(&output)?;
            info!("Configuration written to {:?}", output);
        }
    }

    Ok(())
}
