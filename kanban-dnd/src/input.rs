//! Text entry surface for adding columns and cards

use crate::error::{EngineError, Result};
use crate::store::Intent;
use crate::types::ColumnId;

/// Text typed by the user, with the column it targets when adding a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub text: String,
    pub column: Option<ColumnId>,
}

impl TextEntry {
    /// Entry that adds a new column
    pub fn column(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            column: None,
        }
    }

    /// Entry that adds a card to `column`
    pub fn card(column: impl Into<ColumnId>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            column: Some(column.into()),
        }
    }

    /// Convert to an intent. Blank text is rejected; nothing else is checked.
    pub fn into_intent(self) -> Result<Intent> {
        if self.text.trim().is_empty() {
            return Err(EngineError::EmptyText);
        }

        Ok(match self.column {
            None => Intent::AddColumn { title: self.text },
            Some(column) => Intent::AddCard {
                column,
                text: self.text,
            },
        })
    }
}
