//! pageblock-ctl
//!
//! Render views from a configured view tree, check whether views resolve, and
//! inspect the namespace table.

mod cli_config;
mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pageblock::{Environment, DEFAULT_NAMESPACE};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pageblock-ctl", version, about, styles = output::clap_styles())]
struct Cli {
    /// Configuration file (default: ./.pageblock.toml, then ~/.config/pageblock.toml)
    #[arg(long, global = true, env = "PAGEBLOCK_CONFIG")]
    config: Option<PathBuf>,

    /// Directory of the default namespace (overrides the config file)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// View file extension (overrides the config file)
    #[arg(long, global = true)]
    extension: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a view and print the result
    Render {
        /// View reference, e.g. `pages.home` or `shared::card`
        view: String,

        /// Render data as a JSON object
        #[arg(long, conflicts_with = "data_file")]
        data: Option<String>,

        /// Read render data from a JSON file
        #[arg(long)]
        data_file: Option<PathBuf>,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether a view resolves to an existing file
    Has {
        /// View reference
        view: String,
    },

    /// List configured namespaces and the view extension
    Dirs,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "pageblock=debug"
    } else {
        "pageblock=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = cli_config::load_environment_config(cli.config.as_deref())?;
    let mut env = Environment::from_config(&config);
    if let Some(dir) = &cli.dir {
        env.set_directory(dir, DEFAULT_NAMESPACE);
    }
    if let Some(ext) = &cli.extension {
        env.set_view_extension(ext);
    }

    if env.resolver().namespaces().is_empty() {
        output::warning("No view directories configured.");
        output::hint("Pass --dir <path> or create .pageblock.toml with `default-directory`.");
    }

    match cli.command {
        Commands::Render {
            view,
            data,
            data_file,
            output,
        } => {
            let data = commands::render::read_data(data.as_deref(), data_file.as_deref())?;
            commands::handle_render_command(&env, &view, data, output.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Has { view } => Ok(if commands::handle_has_command(&env, &view) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }),
        Commands::Dirs => {
            commands::handle_dirs_command(&env);
            Ok(ExitCode::SUCCESS)
        }
    }
}
