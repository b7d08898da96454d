use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::stat::Stats;

pub type Position = (usize, usize); // (row, column)

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Action {
    N,
    S,
    W,
    E,
    /// Vacuum the current cell.
    V,
}

impl Action {
    /// Every action is unit cost for now; uniform-cost search only reads costs through here.
    pub fn cost(&self) -> usize {
        1
    }

    pub fn token(&self) -> char {
        match self {
            Action::N => 'N',
            Action::S => 'S',
            Action::W => 'W',
            Action::E => 'E',
            Action::V => 'V',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Cells that still need cleaning.
///
/// The set is frozen once built: the only way to "change" it is [`DirtySet::without`], which
/// returns a new set. Clones share the underlying storage, so states produced by move actions
/// are cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirtySet(Rc<BTreeSet<Position>>);

impl DirtySet {
    pub fn new<I: IntoIterator<Item = Position>>(cells: I) -> Self {
        DirtySet(Rc::new(cells.into_iter().collect()))
    }

    pub fn contains(&self, position: Position) -> bool {
        self.0.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.0.iter()
    }

    pub fn without(&self, position: Position) -> Self {
        let mut remaining = (*self.0).clone();
        remaining.remove(&position);
        DirtySet(Rc::new(remaining))
    }
}

impl FromIterator<Position> for DirtySet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        DirtySet::new(iter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    pub position: Position,
    pub dirty: DirtySet,
}

impl State {
    pub fn new(position: Position, dirty: DirtySet) -> Self {
        State { position, dirty }
    }

    pub fn is_goal(&self) -> bool {
        self.dirty.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// A state with no dirty cells was reached. The path may be empty if the start was clean.
    Solved,
    /// Every reachable state was examined without reaching a clean one.
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub path: Vec<Action>,
    pub outcome: Outcome,
    pub stats: Stats,
}

impl SearchResult {
    pub fn is_solved(&self) -> bool {
        self.outcome == Outcome::Solved
    }

    pub fn nodes_generated(&self) -> usize {
        self.stats.nodes_generated
    }

    pub fn nodes_expanded(&self) -> usize {
        self.stats.nodes_expanded
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.path {
            writeln!(f, "{action}")?;
        }
        writeln!(f, "{} nodes generated", self.stats.nodes_generated)?;
        write!(f, "{} nodes expanded", self.stats.nodes_expanded)
    }
}
