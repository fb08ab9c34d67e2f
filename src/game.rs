use crate::error::GameError;
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info};

pub const DEFAULT_MAX_ERRORS: u32 = 3;

/// Result of submitting a single letter for the current word
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct,
    Incorrect,
    /// The word reached the error limit; carries the word so it can be revealed
    WordFailed(String),
    /// The current word already ended; nothing changed
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordRecord {
    pub word: String,
    pub shuffled_word: String,
    pub errors_number: u32,
}

impl WordRecord {
    fn new<R: Rng + ?Sized>(word: String, rng: &mut R) -> Self {
        let mut letters: Vec<char> = word.chars().collect();
        letters.shuffle(rng);

        Self {
            shuffled_word: letters.into_iter().collect(),
            word,
            errors_number: 0,
        }
    }

    fn letter_at(&self, idx: usize) -> Option<char> {
        self.word.chars().nth(idx)
    }

    fn len(&self) -> usize {
        self.word.chars().count()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameStats {
    pub correct_words_number: usize,
    pub total_errors_number: u32,
    pub most_errors_word: String,
}

/// State of one quiz over an ordered list of words
#[derive(Debug)]
pub struct Game {
    words: Vec<WordRecord>,
    max_errors: u32,
    current_question_index: usize,
    current_letter_index: usize,
    correct_words_number: usize,
    total_errors_number: u32,
    is_end_word: bool,
    is_end_game: bool,
}

impl Game {
    pub fn new<I, S>(words: I, max_errors: u32) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_rng(words, max_errors, &mut rand::thread_rng())
    }

    /// Same as [`Game::new`] but shuffles with the given rng
    pub fn with_rng<I, S, R>(words: I, max_errors: u32, rng: &mut R) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        R: Rng + ?Sized,
    {
        if max_errors == 0 {
            return Err(GameError::ZeroMaxErrors);
        }

        let words = words
            .into_iter()
            .map(Into::into)
            .enumerate()
            .map(|(index, word)| {
                if word.is_empty() {
                    Err(GameError::EmptyWord { index })
                } else {
                    Ok(WordRecord::new(word, rng))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if words.is_empty() {
            return Err(GameError::NoWords);
        }

        info!(words = words.len(), max_errors, "new game");

        Ok(Self {
            words,
            max_errors,
            current_question_index: 0,
            current_letter_index: 0,
            correct_words_number: 0,
            total_errors_number: 0,
            is_end_word: false,
            is_end_game: false,
        })
    }

    fn current(&self) -> &WordRecord {
        &self.words[self.current_question_index]
    }

    fn has_next_word(&self) -> bool {
        self.current_question_index + 1 < self.words.len()
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions_number(&self) -> usize {
        self.words.len()
    }

    pub fn current_word(&self) -> &str {
        &self.current().word
    }

    pub fn current_shuffled_letters(&self) -> Vec<char> {
        self.current().shuffled_word.chars().collect()
    }

    pub fn current_letter_index(&self) -> usize {
        self.current_letter_index
    }

    pub fn current_word_errors(&self) -> u32 {
        self.current().errors_number
    }

    pub fn max_errors(&self) -> u32 {
        self.max_errors
    }

    pub fn words(&self) -> &[WordRecord] {
        &self.words
    }

    /// Moves to the next word. Does nothing on the last word.
    pub fn advance_to_next_word(&mut self) {
        if self.has_next_word() {
            self.is_end_word = false;
            self.current_letter_index = 0;
            self.current_question_index += 1;
            debug!(question = self.current_question_number(), "advanced");
        }
    }

    pub fn submit_letter(&mut self, letter: char) -> SubmitOutcome {
        if self.is_end_word {
            return SubmitOutcome::Ignored;
        }

        let idx = self.current_letter_index;
        let is_last_letter = idx + 1 >= self.current().len();
        let has_next_word = self.has_next_word();

        if self.current().letter_at(idx) == Some(letter) {
            if is_last_letter {
                self.correct_words_number += 1;
                self.finish_word(has_next_word);
                info!(word = self.current_word(), "word solved");
            } else {
                self.current_letter_index += 1;
            }

            return SubmitOutcome::Correct;
        }

        self.total_errors_number += 1;
        let max_errors = self.max_errors;
        let record = &mut self.words[self.current_question_index];
        record.errors_number += 1;

        if record.errors_number == max_errors {
            let word = record.word.clone();
            self.finish_word(has_next_word);
            info!(word = %word, "word failed");
            return SubmitOutcome::WordFailed(word);
        }

        SubmitOutcome::Incorrect
    }

    fn finish_word(&mut self, has_next_word: bool) {
        self.is_end_word = true;
        if !has_next_word {
            self.is_end_game = true;
            info!(
                correct = self.correct_words_number,
                errors = self.total_errors_number,
                "game finished"
            );
        }
    }

    pub fn is_end_word(&self) -> bool {
        self.is_end_word
    }

    pub fn is_end_game(&self) -> bool {
        self.is_end_game
    }

    pub fn stats(&self) -> GameStats {
        // strict comparison keeps the first word on ties
        let (_, most_errors_word) = self.words.iter().fold((0, ""), |(max, word), record| {
            if record.errors_number > max {
                (record.errors_number, record.word.as_str())
            } else {
                (max, word)
            }
        });

        GameStats {
            correct_words_number: self.correct_words_number,
            total_errors_number: self.total_errors_number,
            most_errors_word: most_errors_word.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use itertools::Itertools;
    use rand::{rngs::StdRng, SeedableRng};

    fn game(words: &[&str], max_errors: u32) -> Game {
        Game::with_rng(
            words.iter().copied(),
            max_errors,
            &mut StdRng::seed_from_u64(7),
        )
        .unwrap()
    }

    fn type_word(game: &mut Game, word: &str) -> Vec<SubmitOutcome> {
        word.chars().map(|c| game.submit_letter(c)).collect()
    }

    #[test]
    fn test_new_game() {
        let game = game(&["cat", "dog", "bird"], 3);

        assert_eq!(game.current_question_number(), 1);
        assert_eq!(game.total_questions_number(), 3);
        assert_eq!(game.current_word(), "cat");
        assert_eq!(game.max_errors(), 3);
        assert!(!game.is_end_word());
        assert!(!game.is_end_game());
        assert!(game.words().iter().all(|w| w.errors_number == 0));
    }

    #[test]
    fn test_new_rejects_bad_input() {
        let empty: Vec<String> = vec![];
        assert_eq!(Game::new(empty, 3).unwrap_err(), GameError::NoWords);
        assert_eq!(
            Game::new(["cat", ""], 3).unwrap_err(),
            GameError::EmptyWord { index: 1 }
        );
        assert_eq!(Game::new(["cat"], 0).unwrap_err(), GameError::ZeroMaxErrors);
    }

    #[test]
    fn test_shuffled_letters_are_permutation() {
        let words = ["banana", "letter", "x", "mississippi", "ёжик"];
        for seed in 0..20 {
            let game = Game::with_rng(words, 3, &mut StdRng::seed_from_u64(seed)).unwrap();
            for record in game.words() {
                assert_eq!(
                    record.word.chars().counts(),
                    record.shuffled_word.chars().counts()
                );
            }
        }
    }

    #[test]
    fn test_shuffled_letters_are_stable() {
        let game = game(&["scramble"], 3);
        let first = game.current_shuffled_letters();

        assert_eq!(first, game.current_shuffled_letters());
        assert_eq!(first.iter().collect::<String>(), game.words()[0].shuffled_word);
    }

    #[test]
    fn test_correct_sequence_finishes_word() {
        let mut game = game(&["cat", "dog"], 3);

        let outcomes = type_word(&mut game, "cat");

        assert!(outcomes.iter().all(|o| *o == SubmitOutcome::Correct));
        assert!(game.is_end_word());
        assert!(!game.is_end_game());
        assert_eq!(game.stats().correct_words_number, 1);
    }

    #[test]
    fn test_correct_letter_advances_letter_index() {
        let mut game = game(&["cat"], 3);

        game.submit_letter('c');
        assert_eq!(game.current_letter_index(), 1);
        assert!(!game.is_end_word());
    }

    #[test]
    fn test_incorrect_letter_counts_errors() {
        let mut game = game(&["cat", "dog"], 3);

        assert_eq!(game.submit_letter('x'), SubmitOutcome::Incorrect);
        assert_eq!(game.stats().total_errors_number, 1);
        assert_eq!(game.current_word_errors(), 1);
        assert_eq!(game.current_letter_index(), 0);
        assert!(!game.is_end_word());

        // a wrong letter mid-word does not move the cursor back
        game.submit_letter('c');
        assert_eq!(game.submit_letter('x'), SubmitOutcome::Incorrect);
        assert_eq!(game.current_letter_index(), 1);
        assert_eq!(game.current_word_errors(), 2);
    }

    #[test]
    fn test_word_failed_once_at_max_errors() {
        let mut game = game(&["cat", "dog"], 2);

        assert_eq!(game.submit_letter('x'), SubmitOutcome::Incorrect);
        assert_matches!(game.submit_letter('y'), SubmitOutcome::WordFailed(w) if w == "cat");
        assert!(game.is_end_word());
        assert!(!game.is_end_game());

        // the ended word no longer reacts
        assert_eq!(game.submit_letter('z'), SubmitOutcome::Ignored);
        assert_eq!(game.submit_letter('c'), SubmitOutcome::Ignored);
        assert_eq!(game.current_word_errors(), 2);
        assert_eq!(game.stats().total_errors_number, 2);
    }

    #[test]
    fn test_end_game_only_on_last_word() {
        let mut game = game(&["ab", "cd", "ef"], 1);

        type_word(&mut game, "ab");
        assert!(!game.is_end_game());
        game.advance_to_next_word();

        assert_matches!(game.submit_letter('x'), SubmitOutcome::WordFailed(_));
        assert!(!game.is_end_game());
        game.advance_to_next_word();

        type_word(&mut game, "ef");
        assert!(game.is_end_word());
        assert!(game.is_end_game());
    }

    #[test]
    fn test_advance_resets_word_state() {
        let mut game = game(&["cat", "dog"], 3);

        type_word(&mut game, "cat");
        game.advance_to_next_word();

        assert_eq!(game.current_question_number(), 2);
        assert_eq!(game.current_word(), "dog");
        assert_eq!(game.current_letter_index(), 0);
        assert!(!game.is_end_word());
    }

    #[test]
    fn test_advance_after_last_word_is_noop() {
        let mut game = game(&["cat"], 3);

        type_word(&mut game, "cat");
        game.advance_to_next_word();

        assert_eq!(game.current_question_number(), 1);
        assert!(game.is_end_word());
        assert!(game.is_end_game());
    }

    #[test]
    fn test_stats_most_errors_word() {
        let mut game = game(&["one", "two", "six"], 3);
        assert_eq!(game.stats().most_errors_word, "");

        game.submit_letter('x');
        type_word(&mut game, "one");
        game.advance_to_next_word();

        game.submit_letter('x');
        type_word(&mut game, "two");
        game.advance_to_next_word();

        // ties keep the first word
        assert_eq!(game.stats().most_errors_word, "one");

        game.submit_letter('x');
        game.submit_letter('x');
        assert_eq!(game.stats().most_errors_word, "six");
    }

    #[test]
    fn test_cat_dog_scenario() {
        let mut game = game(&["cat", "dog"], 3);

        assert_eq!(type_word(&mut game, "cat"), vec![SubmitOutcome::Correct; 3]);
        assert!(game.is_end_word());
        assert!(!game.is_end_game());

        game.advance_to_next_word();
        assert_eq!(game.submit_letter('x'), SubmitOutcome::Incorrect);
        assert_eq!(game.submit_letter('x'), SubmitOutcome::Incorrect);
        assert_eq!(
            game.submit_letter('x'),
            SubmitOutcome::WordFailed("dog".to_string())
        );
        assert!(game.is_end_game());

        let stats = game.stats();
        assert_eq!(stats.correct_words_number, 1);
        assert_eq!(stats.total_errors_number, 3);
        assert_eq!(stats.most_errors_word, "dog");
    }

    #[test]
    fn test_single_word_single_error() {
        let mut game = game(&["sun"], 1);

        assert_eq!(
            game.submit_letter('x'),
            SubmitOutcome::WordFailed("sun".to_string())
        );
        assert!(game.is_end_word());
        assert!(game.is_end_game());
        assert_eq!(game.stats().correct_words_number, 0);
    }

    #[test]
    fn test_single_letter_word() {
        let mut game = game(&["a", "b"], 3);

        assert_eq!(game.submit_letter('a'), SubmitOutcome::Correct);
        assert!(game.is_end_word());
        assert_eq!(game.current_letter_index(), 0);
    }

    #[test]
    fn test_repeated_letters() {
        let mut game = game(&["noon"], 3);

        assert_eq!(type_word(&mut game, "noon"), vec![SubmitOutcome::Correct; 4]);
        assert!(game.is_end_game());
    }
}
