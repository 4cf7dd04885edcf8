//! Prizes (restaurants) and players
//!
//! Both are supplied by the caller; the engine only needs an id and a name.

use serde::{Deserialize, Serialize};

/// A restaurant record from the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub id: String,
    pub name: String,
}

impl Prize {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A player standing at the top of one ladder leg
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
}

impl Player {
    /// Blank names fall back to "Player N" (1-indexed)
    pub fn from_input(index: usize, name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() {
            Self {
                name: format!("Player {}", index + 1),
            }
        } else {
            Self {
                name: name.to_string(),
            }
        }
    }
}

/// Outcome for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub player: Player,
    pub start_column: usize,
    pub terminal_column: usize,
    pub prize: Prize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_player_name() {
        assert_eq!(Player::from_input(0, "   ").name, "Player 1");
        assert_eq!(Player::from_input(4, "").name, "Player 5");
        assert_eq!(Player::from_input(1, "  Mina ").name, "Mina");
    }
}
