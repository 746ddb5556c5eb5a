//! Render-facing views of a board snapshot.
//!
//! Each view exposes a stable identifier to key UI elements by, the item's
//! current index, its contents, and whether it is the item being dragged
//! (which hosts render hidden in place while the preview follows the pointer).

use crate::types::{Board, Card, CardId, Column, ColumnId, DragState};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView<'a> {
    pub id: &'a ColumnId,
    pub index: usize,
    pub title: &'a str,
    pub hidden: bool,
    pub cards: Vec<CardView<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView<'a> {
    pub id: &'a CardId,
    pub index: usize,
    pub text: &'a str,
    pub column_id: &'a ColumnId,
    pub hidden: bool,
}

/// Build views for every column and card, in display order
pub fn board_view<'a>(board: &'a Board, drag: Option<&DragState>) -> Vec<ColumnView<'a>> {
    board
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| column_view(index, column, drag))
        .collect()
}

fn column_view<'a>(index: usize, column: &'a Column, drag: Option<&DragState>) -> ColumnView<'a> {
    ColumnView {
        id: &column.id,
        index,
        title: &column.title,
        hidden: drag.is_some_and(|d| d.is_column(&column.id)),
        cards: column
            .cards
            .iter()
            .enumerate()
            .map(|(index, card)| card_view(index, card, drag))
            .collect(),
    }
}

fn card_view<'a>(index: usize, card: &'a Card, drag: Option<&DragState>) -> CardView<'a> {
    CardView {
        id: &card.id,
        index,
        text: &card.text,
        column_id: &card.column_id,
        hidden: drag.is_some_and(|d| d.is_card(&card.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_mark_dragged_card_hidden() {
        let board = Board::from_columns(vec![
            Column::with_id("a", "A")
                .with_card(Card::with_id("c1", "one", "a"))
                .with_card(Card::with_id("c2", "two", "a")),
            Column::with_id("b", "B"),
        ]);
        let drag = DragState::Card {
            id: "c2".into(),
            origin_column: "a".into(),
        };

        let views = board_view(&board, Some(&drag));
        assert_eq!(views.len(), 2);
        assert!(!views[0].hidden);
        assert_eq!(views[0].cards[1].index, 1);
        assert!(views[0].cards[1].hidden);
        assert!(!views[0].cards[0].hidden);
        assert_eq!(views[1].index, 1);
        assert!(views[1].cards.is_empty());
    }

    #[test]
    fn test_views_without_drag() {
        let board = Board::from_columns(vec![Column::with_id("a", "A")]);
        let views = board_view(&board, None);
        assert!(!views[0].hidden);
        assert_eq!(views[0].id.as_str(), "a");
    }
}
