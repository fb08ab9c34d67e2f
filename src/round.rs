//! Drives a [`Game`] from the player's side: letter tiles, the answer being
//! built, error flashes and the pauses between words.
//!
//! The engine itself has no notion of time. A `Round` waits out its pauses
//! on `on_tick` so the event loop stays the only clock.

use std::time::Duration;

use tracing::debug;

use crate::game::{Game, SubmitOutcome};

/// How long a wrongly picked tile is highlighted
pub const FLASH: Duration = Duration::from_millis(200);

/// One shuffled letter offered to the player
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub letter: char,
    pub used: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Guessing,
    /// The word failed and its answer is shown
    Revealing { word: String },
    /// Waiting before moving on to the next word
    Advancing,
    Finished,
}

#[derive(Debug)]
pub struct Round {
    game: Game,
    tiles: Vec<Tile>,
    answer: Vec<char>,
    phase: Phase,
    wait: Duration,
    next_word_delay: Duration,
    flash: Option<(usize, Duration)>,
}

impl Round {
    pub fn new(game: Game, next_word_delay: Duration) -> Self {
        let mut round = Self {
            game,
            tiles: vec![],
            answer: vec![],
            phase: Phase::Guessing,
            wait: Duration::ZERO,
            next_word_delay,
            flash: None,
        };
        round.load_tiles();
        round
    }

    fn load_tiles(&mut self) {
        self.tiles = self
            .game
            .current_shuffled_letters()
            .into_iter()
            .map(|letter| Tile {
                letter,
                used: false,
            })
            .collect();
        self.answer.clear();
        self.flash = None;
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn answer(&self) -> &[char] {
        &self.answer
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Index of the tile currently highlighted as a mistake
    pub fn flashing_tile(&self) -> Option<usize> {
        self.flash.map(|(idx, _)| idx)
    }

    pub fn remaining_mistakes(&self) -> u32 {
        self.game
            .max_errors()
            .saturating_sub(self.game.current_word_errors())
    }

    /// The words of this round in play order
    pub fn words(&self) -> Vec<String> {
        self.game.words().iter().map(|w| w.word.clone()).collect()
    }

    /// Pick the tile at `idx`. Returns `None` when the pick is not allowed.
    pub fn select_tile(&mut self, idx: usize) -> Option<SubmitOutcome> {
        if self.phase != Phase::Guessing {
            return None;
        }

        let tile = self.tiles.get(idx).filter(|t| !t.used)?;
        let letter = tile.letter;
        Some(self.submit(letter, Some(idx)))
    }

    /// Submit a typed letter. The first unused tile with that letter is
    /// consumed; letters with no tile still count as a mistake.
    pub fn type_letter(&mut self, letter: char) -> Option<SubmitOutcome> {
        if self.phase != Phase::Guessing {
            return None;
        }

        let idx = self
            .tiles
            .iter()
            .position(|t| !t.used && t.letter == letter);
        Some(self.submit(letter, idx))
    }

    fn submit(&mut self, letter: char, tile: Option<usize>) -> SubmitOutcome {
        let outcome = self.game.submit_letter(letter);

        match &outcome {
            SubmitOutcome::Correct => {
                if let Some(idx) = tile {
                    self.tiles[idx].used = true;
                }
                self.answer.push(letter);
                self.flash = None;
            }
            SubmitOutcome::Incorrect => {
                self.flash = tile.map(|idx| (idx, FLASH));
            }
            SubmitOutcome::WordFailed(word) => {
                self.answer = word.chars().collect();
                self.flash = None;
                self.enter(Phase::Revealing { word: word.clone() });
            }
            SubmitOutcome::Ignored => {}
        }

        if self.phase == Phase::Guessing {
            if self.game.is_end_game() {
                self.enter(Phase::Finished);
            } else if self.game.is_end_word() {
                self.enter(Phase::Advancing);
            }
        }

        outcome
    }

    fn enter(&mut self, phase: Phase) {
        debug!(?phase, question = self.game.current_question_number(), "phase");
        self.wait = match phase {
            Phase::Revealing { .. } | Phase::Advancing => self.next_word_delay,
            Phase::Guessing | Phase::Finished => Duration::ZERO,
        };
        self.phase = phase;
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        if let Some((idx, left)) = self.flash {
            let left = left.saturating_sub(elapsed);
            self.flash = (!left.is_zero()).then_some((idx, left));
        }

        if !matches!(self.phase, Phase::Revealing { .. } | Phase::Advancing) {
            return;
        }

        self.wait = self.wait.saturating_sub(elapsed);
        if !self.wait.is_zero() {
            return;
        }

        match self.phase {
            Phase::Revealing { .. } if self.game.is_end_game() => self.enter(Phase::Finished),
            Phase::Revealing { .. } => self.enter(Phase::Advancing),
            Phase::Advancing => {
                self.game.advance_to_next_word();
                self.load_tiles();
                self.enter(Phase::Guessing);
            }
            Phase::Guessing | Phase::Finished => {}
        }
    }
}
