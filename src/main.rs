//! # toolhub CLI
//!
//! Builds the comparison and guide site from TOML page files.
//!
//! ## Usage
//!
//! ```bash
//! toolhub --config ./site.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `toolhub build` | Validate content and write the static site |
//! | `toolhub check` | Validate content and summarize every scoreboard |
//! | `toolhub scoreboard <slug>` | Print one comparison's scoreboard |
//! | `toolhub brand <name>` | Show the brand key and style for a display name |
//! | `toolhub serve` | Serve the rendered site for local preview |
//! | `toolhub completions <shell>` | Print shell completions |
//!
//! Logs go to stderr. Set `RUST_LOG` (e.g. `RUST_LOG=toolhub=debug`) or pass
//! `-v` for more detail.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use toolhub::{config, report, server, site};

/// toolhub — a static site generator for software comparison pages.
#[derive(Parser)]
#[command(
    name = "toolhub",
    about = "Static site generator for software comparison pages and guides",
    version,
    long_about = "toolhub reads one TOML file per page, validates every comparison scoreboard, \
    and renders HTML pages with schema.org JSON-LD, a sitemap, and a page index."
)]
struct Cli {
    /// Path to the site configuration file (TOML).
    #[arg(long, global = true, default_value = "./site.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate content and write the site to `[output].dir`.
    Build,

    /// Validate content and print a summary of every page.
    ///
    /// Exits non-zero on the first invalid page. Comparisons whose overall
    /// averages are tied are flagged.
    Check,

    /// Print the scoreboard for one comparison page.
    Scoreboard {
        /// Page slug, e.g. `zoom-vs-webinarjam`.
        slug: String,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show how a display name maps to a brand key and style.
    ///
    /// Uses `[[brands]]` from the config file. Without a config file only the
    /// built-in brands are known.
    Brand {
        /// Display name, e.g. "Microsoft Teams".
        name: String,
    },

    /// Serve the rendered site on `[server].bind`.
    Serve,

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("toolhub={level},tower_http={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Commands that don't require config
    match &cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "toolhub", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Brand { name } => {
            // Built-in brands only when there is no config file at all.
            let cfg = if cli.config.exists() {
                config::load_config(&cli.config)?
            } else {
                config::Config::minimal("https://localhost")
            };
            report::run_brand(&cfg, name)?;
            return Ok(());
        }
        _ => {}
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Build => {
            let summary = site::build_site(&cfg)?;
            println!(
                "built {} pages ({} comparisons) into {}",
                summary.pages,
                summary.comparisons,
                summary.output.display()
            );
        }
        Commands::Check => {
            report::run_check(&cfg)?;
        }
        Commands::Scoreboard { slug, json } => {
            report::run_scoreboard(&cfg, &slug, json)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Brand { .. } | Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
