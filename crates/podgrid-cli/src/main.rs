use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "podgrid",
    about = "podgrid — match pods against resource offers",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to podgrid.toml (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether an offer can host a pod
    Match {
        #[command(flatten)]
        input: InputArgs,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Bind a pod to an offer and print the launch descriptor as JSON.
    ///
    /// Fails if the offer does not fit the pod.
    Bind {
        #[command(flatten)]
        input: InputArgs,
        /// Executor id carried in the launch descriptor
        #[arg(short, long, default_value = "podgrid-executor")]
        executor_id: String,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
struct InputArgs {
    /// Pod definition (JSON)
    #[arg(short, long)]
    pod: PathBuf,
    /// Offer snapshot (JSON)
    #[arg(short, long)]
    offer: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("podgrid=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Match { input, format } => {
            commands::evaluate(&config, &input.pod, &input.offer, &format)
        }
        Commands::Bind { input, executor_id } => {
            commands::bind(&config, &input.pod, &input.offer, &executor_id)
        }
        Commands::Config => commands::show_config(&config),
    }
}
