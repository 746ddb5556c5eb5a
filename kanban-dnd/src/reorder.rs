//! Reorder algorithm
//!
//! Pure functions that decide where a dragged item lands and that relocate
//! elements within or between ordered lists. Nothing here touches the store
//! or the session tracker: the placement is computed from a board snapshot,
//! the drag state, and the latest hover report.
//!
//! ## Midpoint rule
//!
//! A move inside one container only commits once the pointer has crossed the
//! midpoint of the hovered item in the direction of travel:
//!
//! | Direction | Commit when |
//! |-----------|-------------|
//! | forward (`drag_index < hover_index`) | pointer is past the midpoint |
//! | backward (`drag_index > hover_index`) | pointer is before the midpoint |
//!
//! Once committed, the dragged item takes the hovered item's index, so the
//! hovered item slides out from under the pointer and the next tick compares
//! against a different item. This keeps the index from oscillating while the
//! pointer rests near a boundary.
//!
//! A card entering a different column is inserted at the hovered card's index
//! right away. Indices of two different containers are not comparable, so
//! there is no direction to gate on.

use crate::error::{EngineError, Result};
use crate::store::Intent;
use crate::types::{Axis, Board, CardId, ColumnId, DragState, HoverTarget, Point, Rect};
use serde::{Deserialize, Serialize};

/// One hover tick: what is under the pointer, where it is drawn, and where
/// the pointer is now
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hover {
    pub target: HoverTarget,
    pub bounds: Rect,
    pub pointer: Point,
}

impl Hover {
    pub fn new(target: HoverTarget, bounds: Rect, pointer: Point) -> Self {
        Self {
            target,
            bounds,
            pointer,
        }
    }
}

/// Outcome of evaluating a hover tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Leave the board as it is
    Stay,
    /// Relocate a column
    Column { id: ColumnId, from: usize, to: usize },
    /// Relocate a card, possibly into another column
    Card {
        id: CardId,
        from_column: ColumnId,
        to_column: ColumnId,
        to_index: usize,
    },
}

impl Placement {
    pub fn is_stay(&self) -> bool {
        matches!(self, Self::Stay)
    }

    /// The store intent that commits this placement, if any
    pub fn into_intent(self) -> Option<Intent> {
        match self {
            Self::Stay => None,
            Self::Column { from, to, .. } => Some(Intent::MoveColumn { from, to }),
            Self::Card {
                id,
                from_column,
                to_column,
                to_index,
            } => Some(Intent::MoveCard {
                card: id,
                from_column,
                to_column,
                to_index,
            }),
        }
    }
}

/// Compute where the dragged item should be placed for a hover tick.
///
/// Returns `Placement::Stay` when nothing should change, and an error when
/// the dragged item or the hover target no longer resolves, or when the
/// target cannot accept the dragged kind.
pub fn compute_placement(board: &Board, drag: &DragState, hover: &Hover) -> Result<Placement> {
    match drag {
        DragState::Column { id } => place_column(board, id, hover),
        DragState::Card { id, .. } => place_card(board, id, hover),
    }
}

fn place_column(board: &Board, dragged: &ColumnId, hover: &Hover) -> Result<Placement> {
    let drag_index = board
        .column_index(dragged)
        .ok_or_else(|| EngineError::unresolved_column(dragged))?;

    let target = match &hover.target {
        HoverTarget::Column(id) | HoverTarget::ColumnBody(id) => id,
        HoverTarget::Card(_) => {
            return Err(EngineError::KindMismatch {
                dragged: "column",
                target: "card",
            })
        }
    };
    let hover_index = board
        .column_index(target)
        .ok_or_else(|| EngineError::unresolved_column(target))?;

    if drag_index == hover_index
        || !crossed_midpoint(drag_index, hover_index, hover, Axis::Horizontal)
    {
        return Ok(Placement::Stay);
    }

    Ok(Placement::Column {
        id: dragged.clone(),
        from: drag_index,
        to: hover_index,
    })
}

fn place_card(board: &Board, dragged: &CardId, hover: &Hover) -> Result<Placement> {
    let drag_loc = board
        .locate_card(dragged)
        .ok_or_else(|| EngineError::unresolved_card(dragged))?;
    let from_column = board.columns()[drag_loc.column_index].id.clone();

    match &hover.target {
        HoverTarget::Card(target) => {
            if target == dragged {
                return Ok(Placement::Stay);
            }
            let hover_loc = board
                .locate_card(target)
                .ok_or_else(|| EngineError::unresolved_card(target))?;

            if hover_loc.column_index == drag_loc.column_index {
                let (drag_index, hover_index) = (drag_loc.card_index, hover_loc.card_index);
                if drag_index == hover_index
                    || !crossed_midpoint(drag_index, hover_index, hover, Axis::Vertical)
                {
                    return Ok(Placement::Stay);
                }
            }

            Ok(Placement::Card {
                id: dragged.clone(),
                from_column,
                to_column: board.columns()[hover_loc.column_index].id.clone(),
                to_index: hover_loc.card_index,
            })
        }
        HoverTarget::Column(target) | HoverTarget::ColumnBody(target) => {
            let column = board
                .column(target)
                .ok_or_else(|| EngineError::unresolved_column(target))?;

            // Only an empty column needs the body as a drop target; a
            // populated column is entered through its cards.
            if column.id == from_column || !column.is_empty() {
                return Ok(Placement::Stay);
            }

            Ok(Placement::Card {
                id: dragged.clone(),
                from_column,
                to_column: column.id.clone(),
                to_index: 0,
            })
        }
    }
}

/// Whether the pointer has crossed the hovered item's midpoint in the
/// direction of travel
fn crossed_midpoint(drag_index: usize, hover_index: usize, hover: &Hover, axis: Axis) -> bool {
    let midpoint = hover.bounds.midpoint(axis);
    let pointer = hover.pointer.along(axis);

    if drag_index < hover_index {
        pointer > midpoint
    } else {
        pointer < midpoint
    }
}

/// Relocate the element at `from` to `to` within one list, shifting the
/// elements in between by one position.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    let len = items.len();
    if from >= len {
        return Err(EngineError::invalid_index(from, len));
    }
    if to >= len {
        return Err(EngineError::invalid_index(to, len));
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}

/// Remove the element at `from` in `source` and insert it into `target` at
/// `to`. `to` may equal `target.len()`, which appends.
pub fn transfer_item<T>(
    source: &mut Vec<T>,
    from: usize,
    target: &mut Vec<T>,
    to: usize,
) -> Result<()> {
    if from >= source.len() {
        return Err(EngineError::invalid_index(from, source.len()));
    }
    if to > target.len() {
        return Err(EngineError::invalid_index(to, target.len()));
    }
    let item = source.remove(from);
    target.insert(to, item);
    Ok(())
}
