//! Inkpress CLI
//!
//! Renders site templates with Liquid-style filters such as `join`.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use inkpress::cmd;

/// Command-line interface for Inkpress.
#[derive(Parser)]
#[command(
    name = "inkpress",
    version,
    about = "Render site templates with Liquid-style filters"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "inkpress.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Render a single template file
    Render {
        /// Template file to render
        template: PathBuf,
        /// YAML, JSON or TOML file providing template variables
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Set a variable (KEY=VALUE), may be repeated
        #[arg(long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate configuration and templates
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// List available template filters
    Filters,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    inkpress::init_tracing(cli.verbose);

    match cli.command {
        Commands::Render {
            template,
            data,
            vars,
            output,
        } => {
            let args = cmd::render::RenderArgs {
                template: &template,
                data: data.as_deref(),
                vars: &vars,
                output: output.as_deref(),
            };
            cmd::render::run(&cli.config, &args)?;
        }
        Commands::Check { strict } => {
            cmd::check::run(&cli.config, strict)?;
        }
        Commands::Filters => {
            cmd::filters::run()?;
        }
    }

    Ok(())
}
