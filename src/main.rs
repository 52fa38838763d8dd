mod cli;

use ffcompose::{config, job};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use ffcompose_args::EscapeLevel;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "ffcompose=trace,ffcompose_args=trace".to_string()
        } else {
            "ffcompose=debug,ffcompose_args=debug".to_string()
        }
    });

    // stdout carries the rendered arguments
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render { job, json, shell } => {
            render_job(&job, cli.config.as_deref(), json, shell)
        }
        Commands::Validate { job } => validate_job(&job, cli.config.as_deref()),
        Commands::Escape { text, level } => escape_text(&text, level),
        Commands::Version => {
            println!("ffcompose {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn render_job(path: &Path, config_path: Option<&Path>, json: bool, shell: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let job = job::load_job(path)?;

    tracing::info!("Rendering job: {:?}", path);
    let cmd = job::build_command(&job, &config)?;

    if shell {
        println!("{}", cmd.to_shell_string(&config.program)?);
    } else if json {
        let args = cmd.build()?;
        println!("{}", serde_json::to_string_pretty(&args)?);
    } else {
        for arg in cmd.build()? {
            println!("{}", arg);
        }
    }

    Ok(())
}

fn validate_job(path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    println!("Validating job: {:?}", path);
    let job = job::load_job(path)?;
    let cmd = job::build_command(&job, &config)?;
    let args = cmd.build()?;

    println!("✓ Job is valid");
    println!("  Inputs: {}", cmd.inputs().len());
    println!(
        "    Generated: {}",
        cmd.inputs().iter().filter(|i| i.is_virtual()).count()
    );
    println!("  Filter chains: {}", cmd.filter_graph().chains().len());
    println!("  Outputs: {}", cmd.outputs().len());
    for output in cmd.outputs() {
        println!("    {} ({} maps)", output.path(), output.maps().count());
    }
    println!("  Arguments: {}", args.len());

    Ok(())
}

fn escape_text(text: &str, level: EscapeLevel) -> Result<()> {
    println!("{}", level.apply(text));
    Ok(())
}
