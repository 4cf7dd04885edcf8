//! Ghost Leg - ladder lunch picker engine
//!
//! Core modules:
//! - `sim`: Deterministic ladder engine (generation, paths, session, reveal)
//! - `prize`: Restaurant prizes and players
//! - `settings`: Data-driven engine configuration
//! - `history`: Selection records handed to the caller for logging
//! - `error`: Error taxonomy

pub mod error;
pub mod history;
pub mod prize;
pub mod settings;
pub mod sim;

pub use error::{LadderError, StoreError};
pub use history::{SelectionHistory, SelectionRecord};
pub use prize::{Assignment, Player, Prize};
pub use settings::LadderSettings;

use glam::Vec2;

/// Engine configuration constants
pub mod consts {
    /// Fixed reveal timestep (60 Hz is plenty for a drawn line)
    pub const REVEAL_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Rung count range
    pub const DEFAULT_MIN_RUNGS: u32 = 8;
    pub const DEFAULT_MAX_RUNGS: u32 = 15;
    /// Hard ceiling on rungs per ladder
    pub const MAX_RUNGS: u32 = 64;

    /// Ladder bounds in normalized ladder units
    pub const LADDER_TOP: f32 = 0.0;
    pub const LADDER_BOTTOM: f32 = 1.0;

    /// A ladder needs at least two legs
    pub const MIN_COLUMNS: usize = 2;
    pub const DEFAULT_MAX_PLAYERS: usize = 10;

    /// Pen speed along the path (ladder units per second)
    pub const DEFAULT_REVEAL_SPEED: f32 = 1.5;
}

/// Point in ladder space: `x` is the column index, `y` the vertical position
#[inline]
pub fn ladder_point(column: usize, y: f32) -> Vec2 {
    Vec2::new(column as f32, y)
}

/// Evenly spaced vertical slot `i` (1-indexed) of `count` inside `(top, bottom)`
#[inline]
pub fn slot_position(top: f32, bottom: f32, i: u32, count: u32) -> f32 {
    top + (bottom - top) * i as f32 / (count + 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_position_strictly_inside() {
        let count = 8;
        for i in 1..=count {
            let y = slot_position(0.0, 1.0, i, count);
            assert!(y > 0.0 && y < 1.0);
        }
        assert!((slot_position(0.0, 1.0, 1, 1) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ladder_point() {
        let p = ladder_point(3, 0.25);
        assert_eq!(p, Vec2::new(3.0, 0.25));
    }
}
