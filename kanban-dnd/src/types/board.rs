//! Board-level types: Board, Column, Card

use super::ids::{CardId, ColumnId};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The kanban board: an ordered sequence of columns.
///
/// Column order is the display order (left to right). A `Board` is never
/// mutated in place once published by the store; every committed intent
/// produces a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    columns: Vec<Column>,
}

/// Where a card currently lives on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLocation {
    /// Index of the owning column within the board
    pub column_index: usize,
    /// Index of the card within its column
    pub card_index: usize,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from columns, rewriting card back-references
    pub fn from_columns(columns: Vec<Column>) -> Self {
        let mut board = Self { columns };
        board.relink();
        board
    }

    /// Columns in display order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of cards across all columns
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }

    /// True when the board has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Find a column by ID
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Position of a column within the board
    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    /// Find where a card lives by scanning ownership, not the back-reference
    pub fn locate_card(&self, id: &CardId) -> Option<CardLocation> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(column_index, column)| {
                column.card_index(id).map(|card_index| CardLocation {
                    column_index,
                    card_index,
                })
            })
    }

    /// Find a card by ID
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.locate_card(id)
            .map(|loc| &self.columns[loc.column_index].cards[loc.card_index])
    }

    /// Rewrite every card's `column_id` from the column that owns it
    pub fn relink(&mut self) {
        for column in &mut self.columns {
            for card in &mut column.cards {
                card.column_id = column.id.clone();
            }
        }
    }

    /// Check the structural invariants of the board.
    ///
    /// Column IDs are unique, card IDs are unique board-wide, and every
    /// card's back-reference names the column that owns it.
    pub fn validate(&self) -> Result<()> {
        let mut column_ids = HashSet::new();
        let mut card_ids = HashSet::new();

        for column in &self.columns {
            if !column_ids.insert(&column.id) {
                return Err(EngineError::integrity(format!(
                    "duplicate column ID: {}",
                    column.id
                )));
            }
            for card in &column.cards {
                if !card_ids.insert(&card.id) {
                    return Err(EngineError::integrity(format!(
                        "duplicate card ID: {}",
                        card.id
                    )));
                }
                if card.column_id != column.id {
                    return Err(EngineError::integrity(format!(
                        "card {} is owned by column {} but references column {}",
                        card.id, column.id, card.column_id
                    )));
                }
            }
        }

        Ok(())
    }
}

/// An ordered container of cards with a title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    /// Create an empty column with a fresh ID
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(ColumnId::new(), title)
    }

    /// Create an empty column with an explicit ID
    pub fn with_id(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cards: Vec::new(),
        }
    }

    /// Append a card, taking ownership and fixing its back-reference
    pub fn with_card(mut self, mut card: Card) -> Self {
        card.column_id = self.id.clone();
        self.cards.push(card);
        self
    }

    /// Position of a card within this column
    pub fn card_index(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| &c.id == id)
    }

    /// True when the column holds no cards
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// An orderable item owned by exactly one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub text: String,
    /// Back-reference to the owning column, for lookup only.
    /// The column's card list is the ownership record.
    #[serde(default)]
    pub column_id: ColumnId,
}

impl Card {
    /// Create a card with a fresh ID belonging to a column
    pub fn new(text: impl Into<String>, column_id: impl Into<ColumnId>) -> Self {
        Self::with_id(CardId::new(), text, column_id)
    }

    /// Create a card with an explicit ID
    pub fn with_id(
        id: impl Into<CardId>,
        text: impl Into<String>,
        column_id: impl Into<ColumnId>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            column_id: column_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board {
        Board::from_columns(vec![
            Column::with_id("a", "A")
                .with_card(Card::with_id("c1", "one", "a"))
                .with_card(Card::with_id("c2", "two", "a")),
            Column::with_id("b", "B").with_card(Card::with_id("c3", "three", "b")),
        ])
    }

    #[test]
    fn test_locate_card() {
        let board = sample();
        let loc = board.locate_card(&"c3".into()).unwrap();
        assert_eq!(loc.column_index, 1);
        assert_eq!(loc.card_index, 0);
        assert!(board.locate_card(&"missing".into()).is_none());
    }

    #[test]
    fn test_counts() {
        let board = sample();
        assert_eq!(board.column_count(), 2);
        assert_eq!(board.card_count(), 3);
        assert!(!board.is_empty());
        assert!(Board::new().is_empty());
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_card() {
        let board = Board::from_columns(vec![
            Column::with_id("a", "A").with_card(Card::with_id("c1", "one", "a")),
            Column::with_id("b", "B").with_card(Card::with_id("c1", "dup", "b")),
        ]);
        let err = board.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate card ID: c1"));
    }

    #[test]
    fn test_validate_rejects_duplicate_column() {
        let board = Board::from_columns(vec![
            Column::with_id("a", "A"),
            Column::with_id("a", "Again"),
        ]);
        assert!(matches!(
            board.validate(),
            Err(EngineError::Integrity { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_stale_back_reference() {
        let mut board = sample();
        board.columns_mut()[0].cards[0].column_id = "b".into();
        assert!(board.validate().is_err());
        board.relink();
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_deserialize_without_back_references() {
        let json = r#"{
            "columns": [
                {"id": "a", "title": "A", "cards": [{"id": "c1", "text": "one"}]},
                {"id": "b", "title": "B"}
            ]
        }"#;
        let mut board: Board = serde_json::from_str(json).unwrap();
        board.relink();
        assert!(board.validate().is_ok());
        assert_eq!(board.card(&"c1".into()).unwrap().column_id.as_str(), "a");
        assert!(board.column(&"b".into()).unwrap().is_empty());
    }
}
