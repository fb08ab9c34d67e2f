// Library surface for headless/integration tests and reuse.
// The terminal front end (CLI, App, rendering) lives in the binary.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod round;
pub mod runtime;
pub mod word_list;

pub use error::{GameError, WordListError};
pub use game::{Game, GameStats, SubmitOutcome, WordRecord, DEFAULT_MAX_ERRORS};
