//! Drag payload types: what is being dragged and what it hovers over

use super::ids::{CardId, ColumnId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two kinds of draggable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    Column,
    Card,
}

impl DragKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Column => "column",
            Self::Card => "card",
        }
    }
}

impl fmt::Display for DragKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The item a host reports as picked up at drag start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragSource {
    Column(ColumnId),
    Card(CardId),
}

impl DragSource {
    pub fn kind(&self) -> DragKind {
        match self {
            Self::Column(_) => DragKind::Column,
            Self::Card(_) => DragKind::Card,
        }
    }
}

/// Transient record of the item being dragged.
///
/// Holds identifiers only. The dragged entity is always looked up in the
/// current board snapshot, so a commit can never be invalidated by a stale
/// copy held here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragState {
    Column {
        id: ColumnId,
    },
    Card {
        id: CardId,
        /// Column the card was in when the drag began
        origin_column: ColumnId,
    },
}

impl DragState {
    pub fn kind(&self) -> DragKind {
        match self {
            Self::Column { .. } => DragKind::Column,
            Self::Card { .. } => DragKind::Card,
        }
    }

    /// Identifier of the dragged item as a string
    pub fn id_str(&self) -> &str {
        match self {
            Self::Column { id } => id.as_str(),
            Self::Card { id, .. } => id.as_str(),
        }
    }

    /// True when this drag carries the given column
    pub fn is_column(&self, column: &ColumnId) -> bool {
        matches!(self, Self::Column { id } if id == column)
    }

    /// True when this drag carries the given card
    pub fn is_card(&self, card: &CardId) -> bool {
        matches!(self, Self::Card { id, .. } if id == card)
    }
}

/// The item currently under the pointer during a drag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverTarget {
    /// A column header or frame
    Column(ColumnId),
    /// A card
    Card(CardId),
    /// The card area of a column, outside any card
    ColumnBody(ColumnId),
}

impl HoverTarget {
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Column(_) => "column",
            Self::Card(_) => "card",
            Self::ColumnBody(_) => "column body",
        }
    }
}
