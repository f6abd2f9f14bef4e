mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "albaran",
    version,
    about = "Turn delivery-note PDFs into per-store stock databases"
)]
struct Cli {
    /// Log extraction details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ProfileArgs {
    /// Predefined profile: packing-list (default) or blue-boxes
    #[arg(short, long, value_name = "NAME", conflicts_with = "profile_file")]
    profile: Option<String>,

    /// Custom JSON profile file
    #[arg(long, value_name = "FILE")]
    profile_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, file and persist one or more PDFs under a destination folder
    Convert {
        /// PDF files, processed in the order given
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Destination root (Store_<code>/<date>/ folders are created inside)
        #[arg(short, long, value_name = "DIR")]
        dest: PathBuf,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Extract a PDF and print what would be stored (writes nothing)
    Parse {
        /// Path to PDF file
        input_file: PathBuf,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect extraction profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List predefined profiles
    List,
    /// Print a predefined profile as JSON
    Show {
        /// Profile name (e.g., "blue-boxes")
        name: String,
    },
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            inputs,
            dest,
            profile,
            output,
        } => commands::convert::run(inputs, dest, profile.profile, profile.profile_file, &output),
        Commands::Parse {
            input_file,
            profile,
            output,
        } => commands::parse::run(input_file, profile.profile, profile.profile_file, &output),
        Commands::Profiles { action } => match action {
            ProfilesAction::List => commands::profiles::list(),
            ProfilesAction::Show { name } => commands::profiles::show(&name),
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
