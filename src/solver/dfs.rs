use super::{build_result, successors, Solver, Trace};
use crate::common::{SearchResult, State};
use crate::map::Map;
use crate::stat::Stats;

use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, instrument, trace};

/// Depth-first search over an explicit stack. Returns the first clean state it reaches, which is
/// not necessarily the closest one.
pub struct DepthFirst<'a> {
    map: &'a Map,
    start: State,
}

impl<'a> DepthFirst<'a> {
    pub fn new(map: &'a Map, start: State) -> Self {
        DepthFirst { map, start }
    }
}

impl Solver for DepthFirst<'_> {
    #[instrument(skip_all, name = "depth_first", fields(start = ?self.start.position), level = "debug")]
    fn solve(&mut self) -> SearchResult {
        let solve_start_time = Instant::now();
        let mut stats = Stats::default();

        let mut stack = vec![self.start.clone()];
        let mut visited = HashSet::new();
        let mut trace = Trace::new();
        let mut goal = None;

        while let Some(current) = stack.pop() {
            // Duplicates are allowed on the stack; only the first pop of a state counts.
            if !visited.insert(current.clone()) {
                continue;
            }
            stats.nodes_expanded += 1;

            if current.is_goal() {
                goal = Some(current);
                break;
            }

            let next_states = successors(&current, self.map);
            debug!(
                "expand node at {:?} with {} dirty, {} successors",
                current.position,
                current.dirty.len(),
                next_states.len()
            );

            for (action, next) in next_states {
                if visited.contains(&next) {
                    continue;
                }
                trace!("push {action} -> {:?}", next.position);
                // A later push of the same state pops first, so its parent wins.
                trace.insert(next.clone(), (current.clone(), action));
                stack.push(next);
                stats.nodes_generated += 1;
            }
        }

        stats.time_us = solve_start_time.elapsed().as_micros() as usize;
        build_result(goal.as_ref(), &trace, stats)
    }
}
