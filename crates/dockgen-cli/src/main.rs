mod commands;

use std::path::PathBuf;

use clap::Parser;
use dockgen_core::DEFAULT_CONFIG_FILE;
use dockgen_render::{DEFAULT_OUTPUT, DEFAULT_TEMPLATE, DEFAULT_TEMPLATE_DIR};

#[derive(Parser)]
#[command(
    name = "dockgen",
    about = "Render a Dockerfile from a project description"
)]
#[command(version)]
struct Cli {
    /// Project document (YAML, or TOML with a .toml extension)
    #[arg(short, long, env = "DOCKGEN_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory containing the template
    #[arg(short, long, env = "DOCKGEN_TEMPLATE_DIR", default_value = DEFAULT_TEMPLATE_DIR)]
    template_dir: PathBuf,

    /// Template file name inside the template directory
    #[arg(short = 'n', long, env = "DOCKGEN_TEMPLATE", default_value = DEFAULT_TEMPLATE)]
    template: String,

    /// Where to write the rendered Dockerfile
    #[arg(short, long, env = "DOCKGEN_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Print the rendered Dockerfile instead of writing it (takes precedence over --output)
    #[arg(long)]
    stdout: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                // arch-lint: allow(no-silent-result-drop) reason="unset or invalid RUST_LOG falls back to info"
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let target = if cli.stdout {
        commands::Target::Stdout
    } else {
        commands::Target::File(cli.output)
    };

    commands::generate(&commands::GenerateArgs {
        config: cli.config,
        template_dir: cli.template_dir,
        template: cli.template,
        target,
    })
}
