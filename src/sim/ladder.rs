//! Ladder structure and random generation
//!
//! A ladder is `columns` vertical legs joined by horizontal rungs. Each rung
//! joins two adjacent legs at one vertical slot; slots are evenly spaced
//! strictly between `top` and `bottom`.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_COLUMNS;
use crate::error::LadderError;
use crate::prize::Prize;
use crate::settings::LadderSettings;
use crate::slot_position;

/// A horizontal connector between `left` and `left + 1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rung {
    /// Vertical position (grows downward)
    pub y: f32,
    /// Left leg index; the right leg is always `left + 1`
    pub left: usize,
}

impl Rung {
    pub fn new(y: f32, left: usize) -> Self {
        Self { y, left }
    }

    #[inline]
    pub fn right(&self) -> usize {
        self.left + 1
    }

    /// Leg reached by crossing this rung from `column`, if it touches it
    #[inline]
    pub fn cross_from(&self, column: usize) -> Option<usize> {
        if self.left == column {
            Some(self.right())
        } else if self.right() == column {
            Some(self.left)
        } else {
            None
        }
    }
}

/// One immutable game ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    columns: usize,
    /// Rungs in storage order (not necessarily sorted)
    rungs: Vec<Rung>,
    /// Prize awarded at each terminal column
    prizes: Vec<Prize>,
    top: f32,
    bottom: f32,
}

impl Ladder {
    /// Build a ladder from explicit rungs and an already-ordered prize list
    pub fn from_parts(
        columns: usize,
        rungs: Vec<Rung>,
        prizes: Vec<Prize>,
        top: f32,
        bottom: f32,
    ) -> Result<Self, LadderError> {
        if columns < MIN_COLUMNS {
            return Err(LadderError::InvalidColumnCount(columns));
        }
        if prizes.len() != columns {
            return Err(LadderError::PrizeSelectionMismatch {
                expected: columns,
                selected: prizes.len(),
            });
        }
        if let Some(rung) = rungs.iter().find(|r| r.right() >= columns) {
            return Err(LadderError::ColumnOutOfRange {
                column: rung.right(),
                columns,
            });
        }
        Ok(Self {
            columns,
            rungs,
            prizes,
            top,
            bottom,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rungs(&self) -> &[Rung] {
        &self.rungs
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Prizes indexed by terminal column
    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    /// Prize at the bottom of `column`
    pub fn prize_at(&self, column: usize) -> Option<&Prize> {
        self.prizes.get(column)
    }

    /// Rungs in traversal order (top to bottom), independent of storage order
    pub fn sorted_rungs(&self) -> Vec<Rung> {
        let mut rungs = self.rungs.clone();
        rungs.sort_by(|a, b| a.y.total_cmp(&b.y));
        rungs
    }
}

/// Generate a fresh ladder for `columns` players over `prizes`.
///
/// Precondition: `columns >= 2`, `prizes.len() == columns` and valid
/// `settings`; violations are reported as errors rather than panics.
pub fn generate_ladder<R: Rng + ?Sized>(
    columns: usize,
    prizes: &[Prize],
    settings: &LadderSettings,
    rng: &mut R,
) -> Result<Ladder, LadderError> {
    settings.validate()?;
    if columns < MIN_COLUMNS {
        return Err(LadderError::InvalidColumnCount(columns));
    }
    if prizes.len() != columns {
        return Err(LadderError::PrizeSelectionMismatch {
            expected: columns,
            selected: prizes.len(),
        });
    }

    let rung_count = rng.random_range(settings.min_rungs..=settings.max_rungs);
    let rungs: Vec<Rung> = (1..=rung_count)
        .map(|i| {
            let y = slot_position(settings.top, settings.bottom, i, rung_count);
            Rung::new(y, rng.random_range(0..columns - 1))
        })
        .collect();

    let mut shuffled = prizes.to_vec();
    shuffled.shuffle(rng);

    log::info!("Generated ladder: {} columns, {} rungs", columns, rungs.len());

    Ok(Ladder {
        columns,
        rungs,
        prizes: shuffled,
        top: settings.top,
        bottom: settings.bottom,
    })
}
