mod dfs;
mod successor;
mod ucs;

pub use dfs::DepthFirst;
pub use successor::{replay, successors};
pub use ucs::UniformCost;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::common::{Action, Outcome, SearchResult, State};
use crate::map::Map;
use crate::stat::Stats;

pub trait Solver {
    fn solve(&mut self) -> SearchResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Exhaustive depth-first search; returns the first plan found.
    DepthFirst,
    /// Uniform-cost search; returns a plan with the fewest actions.
    #[value(alias = "uniform-search")]
    #[serde(alias = "uniform-search")]
    UniformCost,
}

impl Strategy {
    pub fn search(self, map: &Map, start: &State) -> SearchResult {
        let result = match self {
            Strategy::DepthFirst => DepthFirst::new(map, start.clone()).solve(),
            Strategy::UniformCost => UniformCost::new(map, start.clone()).solve(),
        };
        result.stats.print(self);
        result
    }
}

// Child state -> (parent state, action taken from the parent).
type Trace = HashMap<State, (State, Action)>;

fn construct_path(trace: &Trace, goal: &State) -> Vec<Action> {
    let mut path = Vec::new();
    let mut current = goal;
    while let Some((parent, action)) = trace.get(current) {
        path.push(*action);
        current = parent;
    }
    path.reverse();
    path
}

fn build_result(goal: Option<&State>, trace: &Trace, stats: Stats) -> SearchResult {
    match goal {
        Some(goal) => SearchResult {
            path: construct_path(trace, goal),
            outcome: Outcome::Solved,
            stats,
        },
        None => {
            warn!(
                "search exhausted after expanding {} states, no clean state is reachable",
                stats.nodes_expanded
            );
            SearchResult {
                path: Vec::new(),
                outcome: Outcome::Exhausted,
                stats,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::World;

    const FIXTURES: [&str; 5] = [
        "world_file/tiny-1x3.txt",
        "world_file/ring-3x3.txt",
        "world_file/corridor-4x6.txt",
        "world_file/walled-2x4.txt",
        "world_file/random-5x7.txt",
    ];

    #[test]
    fn test_uniform_cost_never_longer_than_depth_first() {
        for fixture in FIXTURES {
            let world = World::load_from_file(fixture).unwrap();
            let dfs = Strategy::DepthFirst.search(&world.map, &world.start);
            let ucs = Strategy::UniformCost.search(&world.map, &world.start);

            assert_eq!(dfs.outcome, ucs.outcome, "{fixture}");
            assert!(ucs.path.len() <= dfs.path.len(), "{fixture}");
        }
    }

    #[test]
    fn test_plans_replay_to_clean_state() {
        for fixture in FIXTURES {
            let world = World::load_from_file(fixture).unwrap();
            for strategy in [Strategy::DepthFirst, Strategy::UniformCost] {
                let result = strategy.search(&world.map, &world.start);
                if !result.is_solved() {
                    continue;
                }
                let end = replay(&world.map, &world.start, &result.path).unwrap();
                assert!(end.is_goal(), "{fixture} {strategy:?}");
            }
        }
    }

    #[test]
    fn test_repeated_search_is_deterministic() {
        for fixture in FIXTURES {
            let world = World::load_from_file(fixture).unwrap();
            for strategy in [Strategy::DepthFirst, Strategy::UniformCost] {
                let first = strategy.search(&world.map, &world.start);
                let second = strategy.search(&world.map, &world.start);

                assert_eq!(first.path, second.path);
                assert_eq!(first.nodes_generated(), second.nodes_generated());
                assert_eq!(first.nodes_expanded(), second.nodes_expanded());
            }
        }
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(
            Strategy::from_str("depth-first", false).unwrap(),
            Strategy::DepthFirst
        );
        assert_eq!(
            Strategy::from_str("uniform-cost", false).unwrap(),
            Strategy::UniformCost
        );
        assert_eq!(
            Strategy::from_str("uniform-search", false).unwrap(),
            Strategy::UniformCost
        );
        assert!(Strategy::from_str("breadth-first", false).is_err());
    }
}
