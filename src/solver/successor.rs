use anyhow::{Context, Result};

use crate::common::{Action, State};
use crate::map::Map;

/// All `(action, next state)` pairs reachable from `state` in one step.
///
/// Moves come first, in N, S, W, E order, followed by `V` when the agent stands on a dirty cell.
/// The caller's dirty set is never modified; vacuuming produces a new one.
pub fn successors(state: &State, map: &Map) -> Vec<(Action, State)> {
    let mut next: Vec<(Action, State)> = map
        .neighbors(state.position)
        .iter()
        .map(|&(action, position)| (action, State::new(position, state.dirty.clone())))
        .collect();

    if state.dirty.contains(state.position) {
        next.push((
            Action::V,
            State::new(state.position, state.dirty.without(state.position)),
        ));
    }

    next
}

/// Re-apply `path` from `start`, returning the state it ends in.
pub fn replay(map: &Map, start: &State, path: &[Action]) -> Result<State> {
    let mut current = start.clone();
    for (step, &action) in path.iter().enumerate() {
        current = successors(&current, map)
            .into_iter()
            .find(|(candidate, _)| *candidate == action)
            .map(|(_, next)| next)
            .with_context(|| {
                format!(
                    "step {step}: action {action} is not legal at {:?}",
                    current.position
                )
            })?;
    }
    Ok(current)
}
