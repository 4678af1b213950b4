use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub term: String,
    pub definition: String,
}

impl Card {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// One line of a card file: `term:definition:mistakes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub term: String,
    pub definition: String,
    pub mistakes: u32,
}

/// Terms tied for the highest mistake count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HardestCards {
    pub terms: Vec<String>,
    pub mistakes: u32,
}

impl HardestCards {
    pub fn has_errors(&self) -> bool {
        self.mistakes > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    /// The answer belongs to another card, named here.
    CorrectForOther(String),
    Wrong,
}
