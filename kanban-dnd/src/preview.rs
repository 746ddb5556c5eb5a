//! Floating drag preview
//!
//! A read-only projection of the drag state for the host's render layer. It
//! borrows the board and drag state immutably and can only feed back into
//! the store through ordinary intents.

use crate::types::{Board, DragKind, DragState, Point};
use serde::Serialize;

/// What the host should draw under the pointer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DragPreview {
    pub kind: DragKind,
    pub id: String,
    /// Column title or card text
    pub label: String,
    /// Number of cards carried along when a column is dragged
    pub card_count: usize,
    pub position: Point,
}

impl DragPreview {
    /// CSS-style transform placing the preview at its position
    pub fn transform(&self) -> String {
        format!("translate({}px, {}px)", self.position.x, self.position.y)
    }
}

/// Project the active drag into a preview.
///
/// Returns `None` when nothing is being dragged, when the host has no
/// pointer offset yet, or when the dragged item is no longer on the board.
pub fn project(
    board: &Board,
    drag: Option<&DragState>,
    pointer: Option<Point>,
) -> Option<DragPreview> {
    let drag = drag?;
    let position = pointer?;

    match drag {
        DragState::Column { id } => {
            let column = board.column(id)?;
            Some(DragPreview {
                kind: DragKind::Column,
                id: id.to_string(),
                label: column.title.clone(),
                card_count: column.cards.len(),
                position,
            })
        }
        DragState::Card { id, .. } => {
            let card = board.card(id)?;
            Some(DragPreview {
                kind: DragKind::Card,
                id: id.to_string(),
                label: card.text.clone(),
                card_count: 0,
                position,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Card, Column};

    fn board() -> Board {
        Board::from_columns(vec![Column::with_id("a", "Todo")
            .with_card(Card::with_id("c1", "Write docs", "a"))
            .with_card(Card::with_id("c2", "Ship", "a"))])
    }

    #[test]
    fn test_no_preview_without_drag_or_pointer() {
        let board = board();
        let drag = DragState::Column { id: "a".into() };
        assert!(project(&board, None, Some(Point::new(1.0, 2.0))).is_none());
        assert!(project(&board, Some(&drag), None).is_none());
    }

    #[test]
    fn test_column_preview() {
        let board = board();
        let drag = DragState::Column { id: "a".into() };
        let preview = project(&board, Some(&drag), Some(Point::new(12.0, 30.5))).unwrap();
        assert_eq!(preview.kind, DragKind::Column);
        assert_eq!(preview.label, "Todo");
        assert_eq!(preview.card_count, 2);
        assert_eq!(preview.transform(), "translate(12px, 30.5px)");
    }

    #[test]
    fn test_card_preview_follows_current_board() {
        let board = board();
        let drag = DragState::Card {
            id: "c2".into(),
            origin_column: "a".into(),
        };
        let preview = project(&board, Some(&drag), Some(Point::new(0.0, 0.0))).unwrap();
        assert_eq!(preview.label, "Ship");

        let stale = DragState::Card {
            id: "gone".into(),
            origin_column: "a".into(),
        };
        assert!(project(&board, Some(&stale), Some(Point::new(0.0, 0.0))).is_none());
    }
}
