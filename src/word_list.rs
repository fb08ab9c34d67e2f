use crate::error::WordListError;
use include_dir::{include_dir, Dir};
use rand::{seq::SliceRandom, Rng};
use serde::Deserialize;
use serde_json::from_str;

static LANG_DIR: Dir = include_dir!("src/lang");

#[derive(Deserialize, Clone, Debug)]
pub struct WordList {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordList {
    /// Load one of the bundled lists by file stem, e.g. `english`
    pub fn load(name: &str) -> Result<Self, WordListError> {
        let file_name = format!("{name}.json");
        let file = LANG_DIR
            .get_file(&file_name)
            .ok_or_else(|| WordListError::NotFound(name.to_string()))?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| WordListError::Utf8(name.to_string()))?;

        Self::parse(name, contents)
    }

    fn parse(name: &str, contents: &str) -> Result<Self, WordListError> {
        let mut list: WordList = from_str(contents).map_err(|source| WordListError::Parse {
            name: name.to_string(),
            source,
        })?;

        list.words.retain(|w| !w.trim().is_empty());
        if list.words.is_empty() {
            return Err(WordListError::Empty(name.to_string()));
        }

        Ok(list)
    }

    /// Pick `count` distinct words in random order.
    /// Asking for more words than the list holds returns the whole list shuffled.
    pub fn pick<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<String> {
        let mut words: Vec<String> = self.words.choose_multiple(rng, count).cloned().collect();
        // choose_multiple does not randomize order
        words.shuffle(rng);
        words
    }
}

/// Split a comma separated word list given on the command line
pub fn parse_custom(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
