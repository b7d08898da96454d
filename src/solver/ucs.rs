use super::{build_result, successors, Solver, Trace};
use crate::common::{SearchResult, State};
use crate::map::Map;
use crate::stat::Stats;

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;
use tracing::{debug, instrument, trace};

#[derive(Debug, PartialEq, Eq)]
struct OpenNode {
    cost: usize,
    seq: usize, // generation order, unique per push
    state: State,
}

// Lowest cost first; among equal costs the most recently generated node first.
impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Uniform-cost (Dijkstra) search. With unit action costs the returned plan has the fewest
/// possible actions.
pub struct UniformCost<'a> {
    map: &'a Map,
    start: State,
}

impl<'a> UniformCost<'a> {
    pub fn new(map: &'a Map, start: State) -> Self {
        UniformCost { map, start }
    }
}

impl Solver for UniformCost<'_> {
    #[instrument(skip_all, name = "uniform_cost", fields(start = ?self.start.position), level = "debug")]
    fn solve(&mut self) -> SearchResult {
        let solve_start_time = Instant::now();
        let mut stats = Stats::default();

        let mut open_list = BinaryHeap::new();
        let mut g_cost_map = HashMap::new();
        let mut trace = Trace::new();
        let mut seq = 0;
        let mut goal = None;

        g_cost_map.insert(self.start.clone(), 0);
        open_list.push(OpenNode {
            cost: 0,
            seq,
            state: self.start.clone(),
        });
        stats.nodes_generated = 1;

        while let Some(OpenNode { cost, state, .. }) = open_list.pop() {
            // A cheaper entry for this state was pushed after this one.
            if g_cost_map.get(&state).is_some_and(|&best| cost > best) {
                trace!("skip stale node at {:?} with cost {cost}", state.position);
                continue;
            }
            stats.nodes_expanded += 1;

            if state.is_goal() {
                goal = Some(state);
                break;
            }

            let next_states = successors(&state, self.map);
            debug!(
                "expand node at {:?} with {} dirty, cost {cost}, {} successors",
                state.position,
                state.dirty.len(),
                next_states.len()
            );

            for (action, next) in next_states {
                let tentative_g_cost = cost + action.cost();
                let old_g_cost = *g_cost_map.get(&next).unwrap_or(&usize::MAX);
                if tentative_g_cost >= old_g_cost {
                    continue;
                }

                trace!(
                    "push {action} -> {:?} with cost {tentative_g_cost}",
                    next.position
                );
                g_cost_map.insert(next.clone(), tentative_g_cost);
                trace.insert(next.clone(), (state.clone(), action));
                seq += 1;
                open_list.push(OpenNode {
                    cost: tentative_g_cost,
                    seq,
                    state: next,
                });
                stats.nodes_generated += 1;
            }
        }

        stats.time_us = solve_start_time.elapsed().as_micros() as usize;
        build_result(goal.as_ref(), &trace, stats)
    }
}
