use crate::core::card_file;
use crate::domain::model::{Card, CardRecord, HardestCards};
use crate::utils::error::{FlashcardError, Result};
use std::collections::HashMap;

/// In-memory deck: cards in insertion order plus per-term mistake counts.
///
/// Every key of `mistakes` is also a card term. A missing entry means the
/// card has never been answered wrongly.
#[derive(Debug, Default, Clone)]
pub struct CardStore {
    cards: Vec<Card>,
    mistakes: HashMap<String, u32>,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.position(term).is_some()
    }

    pub fn contains_definition(&self, definition: &str) -> bool {
        self.find_term_by_definition(definition).is_some()
    }

    pub fn add(&mut self, term: &str, definition: &str) -> Result<()> {
        if self.contains_term(term) {
            return Err(FlashcardError::DuplicateTerm {
                term: term.to_string(),
            });
        }
        if self.contains_definition(definition) {
            return Err(FlashcardError::DuplicateDefinition {
                definition: definition.to_string(),
            });
        }

        self.cards.push(Card::new(term, definition));
        Ok(())
    }

    pub fn remove(&mut self, term: &str) -> Result<Card> {
        let index = self.position(term).ok_or_else(|| FlashcardError::CardNotFound {
            term: term.to_string(),
        })?;

        self.mistakes.remove(term);
        Ok(self.cards.remove(index))
    }

    /// Returns the new count, or `None` for a term that is not in the deck.
    pub fn record_mistake(&mut self, term: &str) -> Option<u32> {
        if !self.contains_term(term) {
            tracing::warn!("Ignoring mistake for unknown card {:?}", term);
            return None;
        }

        let count = self.mistakes.entry(term.to_string()).or_insert(0);
        *count += 1;
        Some(*count)
    }

    pub fn mistakes_for(&self, term: &str) -> u32 {
        self.mistakes.get(term).copied().unwrap_or(0)
    }

    pub fn has_statistics(&self) -> bool {
        !self.mistakes.is_empty()
    }

    pub fn lookup_definition(&self, term: &str) -> Option<&str> {
        self.position(term).map(|i| self.cards[i].definition.as_str())
    }

    pub fn find_term_by_definition(&self, definition: &str) -> Option<&str> {
        self.find_term_matching(definition, |a, b| a == b)
    }

    /// First term, in deck order, whose definition `same` considers equal to `definition`.
    pub fn find_term_matching(
        &self,
        definition: &str,
        same: impl Fn(&str, &str) -> bool,
    ) -> Option<&str> {
        self.cards
            .iter()
            .find(|card| same(&card.definition, definition))
            .map(|card| card.term.as_str())
    }

    pub fn terms_in_order(&self) -> Vec<String> {
        self.cards.iter().map(|card| card.term.clone()).collect()
    }

    /// Terms tied for the highest mistake count, listed in deck order.
    pub fn hardest_terms(&self) -> HardestCards {
        let max = self.mistakes.values().copied().max().unwrap_or(0);
        if max == 0 {
            return HardestCards::default();
        }

        let terms = self
            .cards
            .iter()
            .filter(|card| self.mistakes_for(&card.term) == max)
            .map(|card| card.term.clone())
            .collect();

        HardestCards {
            terms,
            mistakes: max,
        }
    }

    pub fn reset_stats(&mut self) {
        self.mistakes.clear();
    }

    /// Parses a card file and merges it in. Nothing changes if any line is malformed.
    pub fn import_from(&mut self, content: &str) -> Result<usize> {
        let records = card_file::parse(content)?;
        Ok(self.import_records(records))
    }

    /// Overwrites matching terms in place and appends new ones. No duplicate checks.
    pub fn import_records(&mut self, records: Vec<CardRecord>) -> usize {
        let count = records.len();

        for record in records {
            match self.position(&record.term) {
                Some(index) => self.cards[index].definition = record.definition,
                None => self
                    .cards
                    .push(Card::new(record.term.clone(), record.definition)),
            }
            self.mistakes.insert(record.term, record.mistakes);
        }

        count
    }

    pub fn export_records(&self) -> Vec<CardRecord> {
        self.cards
            .iter()
            .map(|card| CardRecord {
                term: card.term.clone(),
                definition: card.definition.clone(),
                mistakes: self.mistakes_for(&card.term),
            })
            .collect()
    }

    /// Renders the deck as card-file text, returning it with the line count.
    pub fn export_to(&self) -> Result<(String, usize)> {
        let records = self.export_records();
        let text = card_file::render(&records)?;
        Ok((text, records.len()))
    }

    fn position(&self, term: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.term == term)
    }
}
