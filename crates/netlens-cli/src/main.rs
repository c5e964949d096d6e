use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use netlens_cli::OutputFormat;
use netlens_cli::commands;
use netlens_cli::commands::compare::LabelArg;
use netlens_cli::commands::view::FilterArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "netlens")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Inspect and compare page-load network telemetry",
    long_about = "netlens reads the per-request waterfall captured while target pages load, \
                  filters and aggregates it per site, and compares several analyzed sites."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true, env = "NETLENS_VERBOSE")]
    verbose: bool,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        default_value = "pretty",
        env = "NETLENS_FORMAT"
    )]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the filtered request waterfall of one site or all sites
    View {
        /// Path to the analysis results file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Site URL to show, or "all" for every analyzed site
        #[arg(long, default_value = "all")]
        site: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Compare load time, requests, content types and status classes across sites
    Compare {
        /// Path to the analysis results file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Content types to chart
        #[arg(long, value_enum, default_value = "union")]
        labels: LabelArg,
    },

    /// Summarize an analysis run (how many URLs succeeded, what failed)
    Summary {
        /// Path to the analysis results file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List the values accepted by `view --site`
    Sites {
        /// Path to the analysis results file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:\n  \
                            bash, zsh, fish, powershell, elvish\n\n\
                            INSTALLATION:\n  \
                            bash: netlens completion --shell bash >> ~/.bashrc\n  \
                            zsh:  echo 'source <(netlens completion --shell zsh)' >> ~/.zshrc\n  \
                            fish: netlens completion --shell fish > ~/.config/fish/completions/netlens.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::View {
            file,
            site,
            filters,
        } => commands::view::execute(&file, &site, &filters, cli.format),
        Commands::Compare { file, labels } => commands::compare::execute(&file, labels, cli.format),
        Commands::Summary { file } => commands::summary::execute(&file, cli.format),
        Commands::Sites { file } => commands::sites::execute(&file, cli.format),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("netlens=debug,netlens_cli=debug,netlens_core=debug")
    } else {
        EnvFilter::new("netlens=info,netlens_core=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
