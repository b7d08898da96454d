use vacuum_planner::config::{Cli, Config};
use vacuum_planner::solver::replay;
use vacuum_planner::stat::Report;
use vacuum_planner::world::World;

use anyhow::{bail, Context};
use clap::Parser;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("failed to read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;

    let strategy = config.strategy()?;
    let world_path = config.world_path()?;
    let world = World::load_from_file(world_path)?;

    let result = strategy.search(&world.map, &world.start);

    if config.verify && result.is_solved() {
        let end = replay(&world.map, &world.start, &result.path)
            .context("plan failed verification")?;
        if !end.is_goal() {
            bail!("plan leaves {} dirty cells behind", end.dirty.len());
        }
        info!("plan verified: {} actions", result.path.len());
    }

    println!("{result}");

    if let Some(output_path) = config.output_path.as_deref() {
        Report::new(strategy, world_path, &result)
            .write_json(output_path)
            .with_context(|| format!("failed to write report: {output_path}"))?;
    }

    if result.is_solved() {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("no plan cleans every dirty cell in {world_path}");
        Ok(ExitCode::FAILURE)
    }
}
