use std::io::{self, Write};
use std::time::Duration;

use clap::{Parser, Subcommand};
use eyre::Result;
use mindwell_core::models::alert::{AlertSubscriber, RiskAlert};
use mindwell_interventions::catalog::Category;
use mindwell_interventions::clock::InterventionClock;
use tracing_subscriber::EnvFilter;

use mindwell_cli::commands::{self, LogAlertSubscriber};
use mindwell_cli::config;

#[derive(Parser)]
#[command(name = "mindwell", version, about = "Mental-health screening and guided exercises")]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available screening instruments.
    Instruments {
        #[arg(long)]
        json: bool,
    },
    /// Take a screening (phq9, gad7, k10).
    Screen { instrument: String },
    /// Run a box breathing exercise.
    Breathe {
        /// Session length in seconds.
        #[arg(long, env = "MINDWELL_TARGET_SECONDS")]
        target: Option<u32>,
        /// Reject clock misuse instead of ignoring it.
        #[arg(long)]
        strict: bool,
    },
    /// List guided exercises.
    Interventions {
        #[arg(long)]
        category: Option<Category>,
    },
    /// Walk through 5-4-3-2-1 grounding.
    Grounding,
    /// Inspect or write the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Show,
    Init {
        /// Overwrite an existing config.
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let settings = config::load_config()?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Instruments { json } => commands::list_instruments(&mut stdout, json)?,
        Command::Screen { instrument } => {
            let stdin = io::stdin().lock();
            let quiet = |_: &RiskAlert| {};
            let subscriber: &dyn AlertSubscriber = if settings.log_alerts {
                &LogAlertSubscriber
            } else {
                &quiet
            };
            commands::run_screening(&instrument, stdin, &mut stdout, subscriber)?;
        }
        Command::Breathe { target, strict } => {
            let mut clock_config = settings.clock_config(target)?;
            clock_config.strict |= strict;
            let mut clock = InterventionClock::new(clock_config);
            commands::run_breathing(&mut clock, &mut stdout, Duration::from_secs(1)).await?;
        }
        Command::Interventions { category } => {
            commands::list_interventions(&mut stdout, category)?
        }
        Command::Grounding => commands::print_grounding(&mut stdout)?,
        Command::Config { action } => match action {
            ConfigAction::Show => {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&settings)?)?;
            }
            ConfigAction::Init { force } => {
                let dir = config::config_dir()?;
                if config::has_config_in(&dir) && !force {
                    return Err(eyre::eyre!(
                        "config already exists in {}; pass --force to overwrite",
                        dir.display()
                    ));
                }
                let path = config::save_config(&config::MindwellConfig::default())?;
                writeln!(stdout, "wrote {}", path.display())?;
            }
        },
    }

    Ok(())
}
