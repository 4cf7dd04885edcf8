//! Deterministic ladder engine
//!
//! All round logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Rungs traversed in vertical order, never storage order
//! - No rendering or platform dependencies

pub mod ladder;
pub mod path;
pub mod reveal;
pub mod state;

pub use ladder::{Ladder, Rung, generate_ladder};
pub use path::{Traversal, resolve_path, resolve_path_upward};
pub use reveal::RevealAnimation;
pub use state::{Session, SessionEvent, SessionPhase};
