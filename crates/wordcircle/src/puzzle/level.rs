use serde::Deserialize;
use thiserror::Error;

/// Level table bundled with the crate.
pub const BUNDLED_LEVELS: &str = include_str!("../../assets/levels.json");

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level table is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level table is empty")]
    Empty,
    #[error("level {0} has no letters")]
    NoLetters(usize),
    #[error("level {0} has no words")]
    NoWords(usize),
    #[error("level {level}: word {word} is not uppercase")]
    NotUppercase { level: usize, word: String },
    #[error("level {level}: word {word} is listed twice")]
    Duplicate { level: usize, word: String },
    #[error("level {level}: word {word} cannot be spelled from {letters}")]
    Unspellable { level: usize, word: String, letters: String },
}

/// A letter multiset plus its complete solution list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Level {
    pub letters: String,
    pub words: Vec<String>,
}

impl Level {
    pub fn new(letters: &str, words: &[&str]) -> Self {
        Self {
            letters: letters.to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Whether `word` uses each letter of the ring at most as often as it appears.
    pub fn can_spell(&self, word: &str) -> bool {
        let mut pool: Vec<char> = self.letters.chars().collect();
        word.chars().all(|c| match pool.iter().position(|&p| p == c) {
            Some(i) => {
                pool.swap_remove(i);
                true
            }
            None => false,
        })
    }

    /// Words in display order: shortest first, then alphabetical.
    pub fn grid_order(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        words
    }

    fn validate(&self, index: usize) -> Result<(), LevelError> {
        if self.letters.is_empty() {
            return Err(LevelError::NoLetters(index));
        }
        if self.words.is_empty() {
            return Err(LevelError::NoWords(index));
        }
        for (i, word) in self.words.iter().enumerate() {
            if word.is_empty() || *word != word.to_uppercase() {
                return Err(LevelError::NotUppercase { level: index, word: word.clone() });
            }
            if self.words[..i].contains(word) {
                return Err(LevelError::Duplicate { level: index, word: word.clone() });
            }
            if !self.can_spell(word) {
                return Err(LevelError::Unspellable {
                    level: index,
                    word: word.clone(),
                    letters: self.letters.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Ordered sequence of levels. Indexing wraps around the end.
#[derive(Debug, Clone)]
pub struct LevelBook {
    levels: Vec<Level>,
}

impl LevelBook {
    /// Parse and validate a JSON array of `{ "letters", "words" }` objects.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn new(levels: Vec<Level>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::Empty);
        }
        for (i, level) in levels.iter().enumerate() {
            level.validate(i)?;
        }
        Ok(Self { levels })
    }

    /// The bundled table, or a one-level stand-in if it fails to load.
    pub fn bundled() -> Self {
        match Self::from_json(BUNDLED_LEVELS) {
            Ok(book) => book,
            Err(err) => {
                log::warn!("bundled levels rejected ({err}); using fallback level");
                Self {
                    levels: vec![Level::new("AET", &["ATE", "EAT", "TEA"])],
                }
            }
        }
    }

    pub fn get(&self, index: usize) -> &Level {
        &self.levels[index % self.levels.len()]
    }

    /// Index after `index`, wrapping to 0 past the last level.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.levels.len()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_table_is_valid() {
        let book = LevelBook::from_json(BUNDLED_LEVELS).unwrap();
        assert_eq!(book.len(), 6);
        assert_eq!(book.get(0).letters, "AET");
        assert_eq!(book.get(5).words.len(), 10);
    }

    #[test]
    fn indexing_wraps() {
        let book = LevelBook::bundled();
        assert_eq!(book.next_index(5), 0);
        assert_eq!(book.get(7), book.get(1));
    }

    #[test]
    fn can_spell_respects_letter_counts() {
        let level = Level::new("EHLOL", &["HELLO"]);
        assert!(level.can_spell("HELLO"));
        assert!(!level.can_spell("HELLLO"));
        assert!(!level.can_spell("HAT"));
    }

    #[test]
    fn grid_order_sorts_by_length_then_alpha() {
        let level = Level::new("OTGDA", &["GOAT", "GOT", "DOG", "GOAD", "AGO"]);
        assert_eq!(level.grid_order(), vec!["AGO", "DOG", "GOT", "GOAD", "GOAT"]);
    }

    #[test]
    fn rejects_bad_tables() {
        assert!(matches!(LevelBook::from_json("[]"), Err(LevelError::Empty)));
        assert!(matches!(LevelBook::from_json("{"), Err(LevelError::Json(_))));
        let dup = r#"[{ "letters": "AET", "words": ["ATE", "ATE"] }]"#;
        assert!(matches!(LevelBook::from_json(dup), Err(LevelError::Duplicate { .. })));
        let lower = r#"[{ "letters": "AET", "words": ["ate"] }]"#;
        assert!(matches!(LevelBook::from_json(lower), Err(LevelError::NotUppercase { .. })));
        let bad = r#"[{ "letters": "AET", "words": ["TAX"] }]"#;
        assert!(matches!(LevelBook::from_json(bad), Err(LevelError::Unspellable { .. })));
    }
}
