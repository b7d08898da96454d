use anyhow::{anyhow, Result};
use clap::Parser;
use serde::Deserialize;

use crate::solver::Strategy;

#[derive(Parser, Debug)]
#[command(
    name = "vacuum_planner",
    about = "Plan a cleaning route for a vacuum agent on a grid world.",
    version = "0.1"
)]
pub struct Cli {
    #[arg(value_enum, help = "Search strategy to run")]
    pub strategy: Option<Strategy>,

    #[arg(help = "Path to the world description file")]
    pub world_path: Option<String>,

    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Write a JSON search report to this path")]
    pub output_path: Option<String>,

    #[arg(
        long,
        help = "Replay the plan against the world before printing it",
        default_value_t = false
    )]
    pub verify: bool,

    #[arg(
        long,
        help = "Log filter used when RUST_LOG is unset",
        default_value = "warn"
    )]
    pub log_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub strategy: Option<Strategy>,
    pub world_path: Option<String>,
    pub output_path: Option<String>,
    pub verify: bool,
}

impl Config {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Command-line values win over the config file.
    pub fn override_from_command_line(mut self, cli: &Cli) -> Result<Self> {
        if let Some(strategy) = cli.strategy {
            self.strategy = Some(strategy);
        }
        if let Some(world_path) = &cli.world_path {
            self.world_path = Some(world_path.clone());
        }
        if let Some(output_path) = &cli.output_path {
            self.output_path = Some(output_path.clone());
        }
        self.verify |= cli.verify;

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        self.strategy()?;
        self.world_path()?;
        Ok(())
    }

    pub fn strategy(&self) -> Result<Strategy> {
        self.strategy
            .ok_or_else(|| anyhow!("No search strategy given, expected depth-first or uniform-cost"))
    }

    pub fn world_path(&self) -> Result<&str> {
        self.world_path
            .as_deref()
            .ok_or_else(|| anyhow!("No world file given"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_positional_args() {
        let cli = Cli::try_parse_from(["vacuum_planner", "uniform-cost", "world.txt"]).unwrap();
        assert_eq!(cli.strategy, Some(Strategy::UniformCost));
        assert_eq!(cli.world_path.as_deref(), Some("world.txt"));
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_cli_rejects_unknown_strategy() {
        let err = Cli::try_parse_from(["vacuum_planner", "breadth-first", "world.txt"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_read_config() {
        let config = Config::from_yaml_str(
            "strategy: uniform-search\nworld_path: world_file/tiny-1x3.txt\nverify: true\n",
        )
        .unwrap();

        assert_eq!(config.strategy, Some(Strategy::UniformCost));
        assert_eq!(config.world_path.as_deref(), Some("world_file/tiny-1x3.txt"));
        assert!(config.verify);
        assert!(config.output_path.is_none());
    }

    #[test]
    fn test_bad_config() {
        assert!(Config::from_yaml_str("strategy: best-first\n").is_err());
        assert!(Config::from_yaml_str("strategy: depth-first\nseed: 3\n").is_err());
    }

    #[test]
    fn test_command_line_overrides_config() {
        let config = Config::from_yaml_str(
            "strategy: depth-first\nworld_path: a.txt\noutput_path: report.json\n",
        )
        .unwrap();
        let cli = Cli::try_parse_from(["vacuum_planner", "uniform-cost", "b.txt", "--verify"]).unwrap();

        let config = config.override_from_command_line(&cli).unwrap();
        assert_eq!(config.strategy, Some(Strategy::UniformCost));
        assert_eq!(config.world_path.as_deref(), Some("b.txt"));
        assert_eq!(config.output_path.as_deref(), Some("report.json"));
        assert!(config.verify);
    }

    #[test]
    fn test_missing_settings() {
        let cli = Cli::try_parse_from(["vacuum_planner"]).unwrap();
        assert!(Config::default().override_from_command_line(&cli).is_err());

        let config = Config {
            strategy: Some(Strategy::DepthFirst),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
