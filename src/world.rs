use anyhow::{bail, Context, Result};
use rand::Rng;
use std::collections::HashSet;
use std::fs;
use std::str::FromStr;
use tracing::{debug, info};

use crate::common::{DirtySet, Position, State};
use crate::map::Map;

/// A parsed world: the grid plus the agent's starting state.
///
/// Text format:
///
/// ```text
/// <columns>
/// <rows>
/// <rows lines of exactly <columns> characters from '@', '*', '#', '.'>
/// ```
///
/// `@` is the agent start, `*` a dirty cell, `#` a blocked cell and `.` a clear cell.
#[derive(Debug, Clone)]
pub struct World {
    pub map: Map,
    pub start: State,
}

impl World {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read world file {path}"))?;
        World::parse(&text).with_context(|| format!("malformed world file {path}"))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().map(str::trim);

        let columns = parse_dimension(lines.next(), "column count")?;
        let rows = parse_dimension(lines.next(), "row count")?;

        let mut start: Option<Position> = None;
        let mut dirty = Vec::new();
        let mut blocked = HashSet::new();

        for row in 0..rows {
            let line = lines
                .next()
                .with_context(|| format!("expected {rows} grid rows, found {row}"))?;
            let width = line.chars().count();
            if width != columns {
                bail!("row {row} has {width} cells, expected {columns}");
            }

            for (column, cell) in line.chars().enumerate() {
                match cell {
                    '@' => {
                        if let Some(first) = start.replace((row, column)) {
                            bail!("second agent start at ({row}, {column}), first one at {first:?}");
                        }
                    }
                    '*' => dirty.push((row, column)),
                    '#' => {
                        blocked.insert((row, column));
                    }
                    '.' => {}
                    other => bail!("unknown cell {other:?} at ({row}, {column})"),
                }
            }
        }

        if let Some(extra) = lines.find(|line| !line.is_empty()) {
            bail!("unexpected line after the grid: {extra:?}");
        }

        let start = start.context("grid has no agent start '@'")?;
        let map = Map::new(rows, columns, &blocked)?;
        debug!(
            "parsed {rows}x{columns} world: start {start:?}, {} dirty, {} blocked",
            dirty.len(),
            blocked.len()
        );

        Ok(World {
            map,
            start: State::new(start, DirtySet::new(dirty)),
        })
    }

    /// Build a random world. The start cell is picked uniformly; every other cell is blocked
    /// with probability `blocked_ratio`, and otherwise dirty with probability `dirty_ratio`.
    /// The result is not guaranteed to be solvable.
    pub fn generate<R: Rng + ?Sized>(
        rows: usize,
        columns: usize,
        blocked_ratio: f64,
        dirty_ratio: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if rows == 0 || columns == 0 {
            bail!("grid dimensions must be positive, got {rows} rows x {columns} columns");
        }
        for (name, ratio) in [("blocked", blocked_ratio), ("dirty", dirty_ratio)] {
            if !(0.0..=1.0).contains(&ratio) {
                bail!("{name} ratio must be within [0, 1], got {ratio}");
            }
        }

        let start = (rng.gen_range(0..rows), rng.gen_range(0..columns));
        let mut dirty = Vec::new();
        let mut blocked = HashSet::new();

        for row in 0..rows {
            for column in 0..columns {
                if (row, column) == start {
                    continue;
                }
                if rng.gen_bool(blocked_ratio) {
                    blocked.insert((row, column));
                } else if rng.gen_bool(dirty_ratio) {
                    dirty.push((row, column));
                }
            }
        }

        info!(
            "Generate world: {rows}x{columns}, start {start:?}, {} dirty, {} blocked",
            dirty.len(),
            blocked.len()
        );

        Ok(World {
            map: Map::new(rows, columns, &blocked)?,
            start: State::new(start, DirtySet::new(dirty)),
        })
    }

    /// Write the world back out in the text format. A dirty start cell renders as `@`, so that
    /// piece of dirt does not survive a round trip.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n{}\n", self.map.columns, self.map.rows);
        for row in 0..self.map.rows {
            for column in 0..self.map.columns {
                let position = (row, column);
                out.push(if position == self.start.position {
                    '@'
                } else if !self.map.is_passable(position) {
                    '#'
                } else if self.start.dirty.contains(position) {
                    '*'
                } else {
                    '.'
                });
            }
            out.push('\n');
        }
        out
    }
}

impl FromStr for World {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        World::parse(s)
    }
}

fn parse_dimension(line: Option<&str>, what: &str) -> Result<usize> {
    let line = line.with_context(|| format!("missing {what} line"))?;
    let value: usize = line
        .parse()
        .with_context(|| format!("invalid {what} {line:?}"))?;
    if value == 0 {
        bail!("{what} must be positive");
    }
    Ok(value)
}
