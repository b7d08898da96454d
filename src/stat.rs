use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

use crate::common::{Action, Outcome, SearchResult};
use crate::solver::Strategy;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub nodes_generated: usize,
    pub nodes_expanded: usize,
    pub time_us: usize,
}

impl Stats {
    pub(crate) fn print(&self, strategy: Strategy) {
        info!(
            "{strategy:?}: Time(microseconds) {:?} Nodes generated: {:?} Nodes expanded: {:?}",
            self.time_us, self.nodes_generated, self.nodes_expanded
        );
    }
}

/// Machine-readable summary of a single search run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub strategy: Strategy,
    pub world_path: &'a str,
    pub outcome: Outcome,
    pub path: &'a [Action],
    pub stats: &'a Stats,
}

impl<'a> Report<'a> {
    pub fn new(strategy: Strategy, world_path: &'a str, result: &'a SearchResult) -> Self {
        Report {
            strategy,
            world_path,
            outcome: result.outcome,
            path: &result.path,
            stats: &result.stats,
        }
    }

    pub fn write_json(&self, path: &str) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("failed to create report file {path}"))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json() {
        let result = SearchResult {
            path: vec![Action::E, Action::V],
            outcome: Outcome::Solved,
            stats: Stats {
                nodes_generated: 4,
                nodes_expanded: 3,
                time_us: 12,
            },
        };
        let report = Report::new(Strategy::UniformCost, "world_file/tiny-1x3.txt", &result);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["strategy"], "uniform-cost");
        assert_eq!(value["outcome"], "solved");
        assert_eq!(value["path"], serde_json::json!(["E", "V"]));
        assert_eq!(value["stats"]["nodes_generated"], 4);
        assert_eq!(value["stats"]["nodes_expanded"], 3);
    }
}
