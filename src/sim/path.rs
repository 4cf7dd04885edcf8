//! Path resolution
//!
//! A path starts at the top of a leg and moves strictly downward, crossing
//! every rung that touches its current leg. Resolution is a pure function of
//! the ladder and the start column.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ladder::{Ladder, Rung};
use crate::error::LadderError;
use crate::ladder_point;

/// Resolved path for one start column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traversal {
    pub start: usize,
    pub terminal: usize,
    /// Rungs crossed, in the order they were crossed
    pub rungs: Vec<Rung>,
}

impl Traversal {
    /// Polyline a renderer draws for this path, in ladder space.
    ///
    /// Only meaningful for downward traversals produced by [`resolve_path`].
    pub fn waypoints(&self, ladder: &Ladder) -> Vec<Vec2> {
        let mut points = Vec::with_capacity(self.rungs.len() * 2 + 2);
        let mut column = self.start;
        points.push(ladder_point(column, ladder.top()));
        for rung in &self.rungs {
            let next = rung.cross_from(column).unwrap_or(column);
            points.push(ladder_point(column, rung.y));
            points.push(ladder_point(next, rung.y));
            column = next;
        }
        points.push(ladder_point(column, ladder.bottom()));
        points
    }
}

fn check_column(ladder: &Ladder, column: usize) -> Result<(), LadderError> {
    if column >= ladder.columns() {
        return Err(LadderError::ColumnOutOfRange {
            column,
            columns: ladder.columns(),
        });
    }
    Ok(())
}

fn walk<'a>(start: usize, rungs: impl Iterator<Item = &'a Rung>) -> Traversal {
    let mut current = start;
    let mut crossed = Vec::new();
    for rung in rungs {
        if let Some(next) = rung.cross_from(current) {
            crossed.push(*rung);
            current = next;
        }
    }
    Traversal {
        start,
        terminal: current,
        rungs: crossed,
    }
}

/// Follow the path from the top of `start` to the bottom of the ladder
pub fn resolve_path(ladder: &Ladder, start: usize) -> Result<Traversal, LadderError> {
    check_column(ladder, start)?;
    let traversal = walk(start, ladder.sorted_rungs().iter());
    log::debug!(
        "Path {} -> {} ({} crossings)",
        start,
        traversal.terminal,
        traversal.rungs.len()
    );
    Ok(traversal)
}

/// Follow the path from the bottom of `column` back up to the top
pub fn resolve_path_upward(ladder: &Ladder, column: usize) -> Result<Traversal, LadderError> {
    check_column(ladder, column)?;
    Ok(walk(column, ladder.sorted_rungs().iter().rev()))
}

impl Ladder {
    /// Terminal column for every start column, indexed by start
    pub fn permutation(&self) -> Vec<usize> {
        let sorted = self.sorted_rungs();
        (0..self.columns())
            .map(|start| walk(start, sorted.iter()).terminal)
            .collect()
    }
}
