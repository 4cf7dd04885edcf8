//! Session state machine
//!
//! Owns one round: the players, the chosen prizes, the ladder and the
//! recorded results. Every transition validates first and mutates after, so a
//! rejected call leaves the session exactly as it was.

use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ladder::{Ladder, generate_ladder};
use super::path::{Traversal, resolve_path};
use crate::consts::MIN_COLUMNS;
use crate::error::LadderError;
use crate::history::SelectionRecord;
use crate::prize::{Assignment, Player, Prize};
use crate::settings::LadderSettings;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Collecting player count and names
    Setup,
    /// Choosing exactly one prize per player
    SelectingPrizes,
    /// Ladder built, waiting for a play
    Ready,
    /// A path reveal is in flight
    Playing,
    /// Every column has a result
    Result,
}

/// Pending events kept for a caller that stops polling
pub const MAX_PENDING_EVENTS: usize = 64;

/// Notifications for the renderer, drained by polling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    PlayersConfigured { count: usize },
    LadderGenerated { columns: usize, rungs: usize },
    PathStarted { start: usize },
    PathFinished { start: usize, terminal: usize },
    AllRevealed,
    Reset,
}

/// One game round
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed for reproducibility
    seed: u64,
    rng: Pcg32,
    settings: LadderSettings,
    /// Prizes available for selection
    pool: Vec<Prize>,
    phase: SessionPhase,
    players: Vec<Player>,
    /// Chosen prizes, in selection order
    selected: Vec<Prize>,
    ladder: Option<Ladder>,
    /// Result per start column
    results: Vec<Option<Assignment>>,
    /// Start column whose reveal has not been acknowledged
    in_flight: Option<usize>,
    /// Oldest first; drained by `drain_events`, capped at `MAX_PENDING_EVENTS`
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create a session over a prize pool with the given seed
    pub fn new(settings: LadderSettings, pool: Vec<Prize>, seed: u64) -> Result<Self, LadderError> {
        settings.validate()?;
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            pool,
            phase: SessionPhase::Setup,
            players: Vec::new(),
            selected: Vec::new(),
            ladder: None,
            results: Vec::new(),
            in_flight: None,
            events: Vec::new(),
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn settings(&self) -> &LadderSettings {
        &self.settings
    }

    pub fn pool(&self) -> &[Prize] {
        &self.pool
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn selected_prizes(&self) -> &[Prize] {
        &self.selected
    }

    pub fn ladder(&self) -> Option<&Ladder> {
        self.ladder.as_ref()
    }

    /// True while a reveal awaits `finish_animation`
    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_played(&self, column: usize) -> bool {
        matches!(self.results.get(column), Some(Some(_)))
    }

    /// Start columns not yet played
    pub fn remaining(&self) -> Vec<usize> {
        (0..self.results.len())
            .filter(|&c| !self.is_played(c))
            .collect()
    }

    /// Recorded results, in start column order
    pub fn assignments(&self) -> Vec<Assignment> {
        self.results.iter().flatten().cloned().collect()
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn push_event(&mut self, event: SessionEvent) {
        self.events.push(event);
        if self.events.len() > MAX_PENDING_EVENTS {
            let overflow = self.events.len() - MAX_PENDING_EVENTS;
            self.events.drain(..overflow);
        }
    }

    fn wrong_phase(&self, action: &'static str) -> LadderError {
        LadderError::WrongPhase {
            phase: self.phase,
            action,
        }
    }

    /// Setup -> SelectingPrizes
    pub fn configure_players<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), LadderError> {
        if self.phase != SessionPhase::Setup {
            return Err(self.wrong_phase("configure players"));
        }
        let count = names.len();
        if count < MIN_COLUMNS {
            return Err(LadderError::InvalidColumnCount(count));
        }
        if count > self.settings.max_players {
            return Err(LadderError::TooManyPlayers {
                requested: count,
                max: self.settings.max_players,
            });
        }
        if self.pool.len() < count {
            return Err(LadderError::NotEnoughPrizes {
                needed: count,
                available: self.pool.len(),
            });
        }

        self.players = names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::from_input(i, name.as_ref()))
            .collect();
        self.phase = SessionPhase::SelectingPrizes;
        self.push_event(SessionEvent::PlayersConfigured { count });
        log::info!("Configured {} players", count);
        Ok(())
    }

    /// SelectingPrizes -> Ready, choosing prizes by id
    pub fn select_prizes<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<(), LadderError> {
        if self.phase != SessionPhase::SelectingPrizes {
            return Err(self.wrong_phase("select prizes"));
        }
        if ids.len() != self.players.len() {
            return Err(LadderError::PrizeSelectionMismatch {
                expected: self.players.len(),
                selected: ids.len(),
            });
        }

        let mut selected: Vec<Prize> = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.as_ref();
            if selected.iter().any(|p| p.id == id) {
                return Err(LadderError::DuplicatePrize(id.to_string()));
            }
            let prize = self
                .pool
                .iter()
                .find(|p| p.id == id)
                .ok_or_else(|| LadderError::UnknownPrize(id.to_string()))?;
            selected.push(prize.clone());
        }

        self.build_round(selected)
    }

    /// SelectingPrizes -> Ready, letting the session pick the prizes
    pub fn select_random_prizes(&mut self) -> Result<(), LadderError> {
        if self.phase != SessionPhase::SelectingPrizes {
            return Err(self.wrong_phase("select prizes"));
        }
        let selected: Vec<Prize> = self
            .pool
            .choose_multiple(&mut self.rng, self.players.len())
            .cloned()
            .collect();
        self.build_round(selected)
    }

    fn build_round(&mut self, selected: Vec<Prize>) -> Result<(), LadderError> {
        let ladder = generate_ladder(self.players.len(), &selected, &self.settings, &mut self.rng)?;
        self.selected = selected;
        self.install_ladder(ladder);
        Ok(())
    }

    fn install_ladder(&mut self, ladder: Ladder) {
        self.push_event(SessionEvent::LadderGenerated {
            columns: ladder.columns(),
            rungs: ladder.rungs().len(),
        });
        self.results = vec![None; ladder.columns()];
        self.ladder = Some(ladder);
        self.in_flight = None;
        self.phase = SessionPhase::Ready;
    }

    fn assignment_for(&self, ladder: &Ladder, traversal: &Traversal) -> Assignment {
        Assignment {
            player: self.players[traversal.start].clone(),
            start_column: traversal.start,
            terminal_column: traversal.terminal,
            prize: ladder.prizes()[traversal.terminal].clone(),
        }
    }

    /// Ready -> Playing. The result is recorded immediately; the returned
    /// traversal is what the renderer replays.
    pub fn play(&mut self, start: usize) -> Result<Traversal, LadderError> {
        match self.phase {
            SessionPhase::Ready => {}
            SessionPhase::Playing => return Err(LadderError::AnimationInProgress),
            _ => return Err(self.wrong_phase("play")),
        }
        let Some(ladder) = self.ladder.as_ref() else {
            return Err(self.wrong_phase("play"));
        };
        let traversal = resolve_path(ladder, start)?;
        if self.is_played(start) {
            return Err(LadderError::AlreadyPlayed(start));
        }

        let assignment = self.assignment_for(ladder, &traversal);
        log::info!(
            "{} plays column {} -> {}",
            assignment.player.name,
            start,
            assignment.prize.name
        );
        self.results[start] = Some(assignment);
        self.in_flight = Some(start);
        self.phase = SessionPhase::Playing;
        self.push_event(SessionEvent::PathStarted { start });
        Ok(traversal)
    }

    /// Playing -> Ready or Result, once the renderer is done with the path
    pub fn finish_animation(&mut self) -> Result<SessionPhase, LadderError> {
        let Some(start) = self.in_flight else {
            return Err(self.wrong_phase("finish animation"));
        };
        let terminal = self.results[start]
            .as_ref()
            .map(|a| a.terminal_column)
            .unwrap_or(start);

        self.in_flight = None;
        self.push_event(SessionEvent::PathFinished { start, terminal });
        self.phase = if self.remaining().is_empty() {
            self.push_event(SessionEvent::AllRevealed);
            SessionPhase::Result
        } else {
            SessionPhase::Ready
        };
        Ok(self.phase)
    }

    /// Ready -> Result, resolving every unplayed column at once.
    /// In Result this returns the recorded results unchanged.
    pub fn reveal_all(&mut self) -> Result<Vec<Assignment>, LadderError> {
        match self.phase {
            SessionPhase::Ready => {}
            SessionPhase::Result => return Ok(self.assignments()),
            SessionPhase::Playing => return Err(LadderError::AnimationInProgress),
            _ => return Err(self.wrong_phase("reveal all")),
        }
        let Some(ladder) = self.ladder.as_ref() else {
            return Err(self.wrong_phase("reveal all"));
        };

        let mut revealed = Vec::new();
        for start in self.remaining() {
            let traversal = resolve_path(ladder, start)?;
            revealed.push(self.assignment_for(ladder, &traversal));
        }

        log::info!("Revealed {} remaining columns", revealed.len());
        for assignment in revealed {
            let start = assignment.start_column;
            self.results[start] = Some(assignment);
        }
        self.phase = SessionPhase::Result;
        self.push_event(SessionEvent::AllRevealed);
        Ok(self.assignments())
    }

    /// Ready/Result -> Ready with a freshly drawn ladder over the same prizes
    pub fn new_ladder(&mut self) -> Result<(), LadderError> {
        match self.phase {
            SessionPhase::Ready | SessionPhase::Result => {}
            SessionPhase::Playing => return Err(LadderError::AnimationInProgress),
            _ => return Err(self.wrong_phase("draw a new ladder")),
        }
        let ladder = generate_ladder(
            self.players.len(),
            &self.selected,
            &self.settings,
            &mut self.rng,
        )?;
        self.install_ladder(ladder);
        Ok(())
    }

    /// Any phase -> Setup
    pub fn reset_game(&mut self) {
        self.phase = SessionPhase::Setup;
        self.players.clear();
        self.selected.clear();
        self.ladder = None;
        self.results.clear();
        self.in_flight = None;
        self.push_event(SessionEvent::Reset);
        log::info!("Session reset");
    }

    /// Record of a finished round for the caller to log
    pub fn selection_record(&self, timestamp: f64) -> Result<SelectionRecord, LadderError> {
        if self.phase != SessionPhase::Result {
            return Err(LadderError::NotFinished);
        }
        Ok(SelectionRecord {
            timestamp,
            seed: self.seed,
            assignments: self.assignments(),
        })
    }
}
