//! Board store: the single authoritative board + drag state pair
//!
//! All state changes go through [`BoardStore::dispatch`]. Each committed
//! intent publishes a complete new [`Snapshot`]; observers never see a board
//! in the middle of a move. A board change always allocates a new
//! `Arc<Board>`, so `Arc::ptr_eq` on two snapshots tells whether the board
//! changed.
//!
//! Dispatch never fails past its boundary. Unresolvable identifiers and
//! out-of-range indices come back as [`DispatchOutcome::Rejected`] and are
//! logged.

use crate::error::{EngineError, Result};
use crate::reorder::{move_item, transfer_item};
use crate::types::{Board, Card, CardId, Column, ColumnId, DragState};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

/// A named request to change board or drag state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Append a new, empty column with a fresh ID
    AddColumn { title: String },
    /// Append a new card to a column
    AddCard { column: ColumnId, text: String },
    /// Replace the drag state wholesale
    SetDraggedItem { drag: Option<DragState> },
    /// Relocate the column at `from` to `to`
    MoveColumn { from: usize, to: usize },
    /// Move a card out of `from_column` into `to_column` at `to_index`.
    ///
    /// Within one column `to_index` must be a current index. Across columns
    /// it may also equal the target's length, which appends. Anything larger
    /// is rejected with `InvalidIndex`, as for `MoveColumn`.
    MoveCard {
        card: CardId,
        from_column: ColumnId,
        to_column: ColumnId,
        to_index: usize,
    },
    /// Delete a column and the cards it owns
    RemoveColumn { column: ColumnId },
    /// Delete a card
    RemoveCard { card: CardId },
    /// Replace the whole board, clearing drag state
    LoadBoard { board: Board },
}

impl Intent {
    /// Short name used in log events
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddColumn { .. } => "add column",
            Self::AddCard { .. } => "add card",
            Self::SetDraggedItem { .. } => "set dragged item",
            Self::MoveColumn { .. } => "move column",
            Self::MoveCard { .. } => "move card",
            Self::RemoveColumn { .. } => "remove column",
            Self::RemoveCard { .. } => "remove card",
            Self::LoadBoard { .. } => "load board",
        }
    }
}

/// Result of a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A new snapshot was published
    Committed { revision: u64 },
    /// The intent was valid but changed nothing
    Unchanged,
    /// The intent was not applied
    Rejected(EngineError),
}

impl DispatchOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn error(&self) -> Option<&EngineError> {
        match self {
            Self::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

/// Immutable view of the store at one revision
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub board: Arc<Board>,
    pub drag: Option<DragState>,
    pub revision: u64,
}

/// What an intent changes
enum Change {
    Board(Board),
    Drag(Option<DragState>),
    Reset(Board),
    Nothing,
}

/// Holder of the authoritative board and drag state
pub struct BoardStore {
    current: Snapshot,
    publisher: watch::Sender<Snapshot>,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStore {
    /// Create a store holding an empty board.
    ///
    /// Hosts that load asynchronously start here and dispatch
    /// `Intent::LoadBoard` once the board arrives.
    pub fn new() -> Self {
        let current = Snapshot {
            board: Arc::new(Board::new()),
            drag: None,
            revision: 0,
        };
        let (publisher, _) = watch::channel(current.clone());
        Self { current, publisher }
    }

    /// Create a store holding an existing board, which must be valid
    pub fn with_board(board: Board) -> Result<Self> {
        board.validate()?;
        let mut store = Self::new();
        store.current.board = Arc::new(board);
        store.publisher.send_replace(store.current.clone());
        Ok(store)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    pub fn board(&self) -> &Arc<Board> {
        &self.current.board
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.current.drag.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.current.revision
    }

    /// Watch every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.publisher.subscribe()
    }

    /// Apply an intent, publishing a new snapshot when something changed
    pub fn dispatch(&mut self, intent: Intent) -> DispatchOutcome {
        let name = intent.name();

        match self.apply(intent) {
            Ok(Change::Nothing) => {
                trace!(intent = name, "intent changed nothing");
                DispatchOutcome::Unchanged
            }
            Ok(change) => {
                let revision = self.commit(change);
                debug!(intent = name, revision, "committed intent");
                DispatchOutcome::Committed { revision }
            }
            Err(error) => {
                warn!(intent = name, %error, "intent rejected");
                DispatchOutcome::Rejected(error)
            }
        }
    }

    fn apply(&self, intent: Intent) -> Result<Change> {
        let board = self.current.board.as_ref();

        match intent {
            Intent::AddColumn { title } => {
                let mut next = board.clone();
                next.columns_mut().push(Column::new(title));
                Ok(Change::Board(next))
            }
            Intent::AddCard { column, text } => {
                let index = board
                    .column_index(&column)
                    .ok_or_else(|| EngineError::unresolved_column(&column))?;
                let mut next = board.clone();
                next.columns_mut()[index].cards.push(Card::new(text, column));
                Ok(Change::Board(next))
            }
            Intent::SetDraggedItem { drag } => {
                if drag == self.current.drag {
                    Ok(Change::Nothing)
                } else {
                    Ok(Change::Drag(drag))
                }
            }
            Intent::MoveColumn { from, to } => {
                let mut next = board.clone();
                move_item(next.columns_mut(), from, to)?;
                if from == to {
                    return Ok(Change::Nothing);
                }
                Ok(Change::Board(next))
            }
            Intent::MoveCard {
                card,
                from_column,
                to_column,
                to_index,
            } => move_card(board, &card, &from_column, &to_column, to_index),
            Intent::RemoveColumn { column } => {
                let index = board
                    .column_index(&column)
                    .ok_or_else(|| EngineError::unresolved_column(&column))?;
                let mut next = board.clone();
                next.columns_mut().remove(index);
                Ok(Change::Board(next))
            }
            Intent::RemoveCard { card } => {
                let loc = board
                    .locate_card(&card)
                    .ok_or_else(|| EngineError::unresolved_card(&card))?;
                let mut next = board.clone();
                next.columns_mut()[loc.column_index]
                    .cards
                    .remove(loc.card_index);
                Ok(Change::Board(next))
            }
            Intent::LoadBoard { board } => {
                board.validate()?;
                Ok(Change::Reset(board))
            }
        }
    }

    fn commit(&mut self, change: Change) -> u64 {
        let mut next = self.current.clone();
        next.revision += 1;

        match change {
            Change::Board(board) => next.board = Arc::new(board),
            Change::Drag(drag) => next.drag = drag,
            Change::Reset(board) => {
                next.board = Arc::new(board);
                next.drag = None;
            }
            Change::Nothing => {}
        }

        if let Some(drag) = &next.drag {
            if !drag_resolves(&next.board, drag) {
                debug!(dragged = drag.id_str(), "dragged item removed, clearing drag state");
                next.drag = None;
            }
        }

        self.current = next;
        self.publisher.send_replace(self.current.clone());
        self.current.revision
    }
}

fn move_card(
    board: &Board,
    card: &CardId,
    from_column: &ColumnId,
    to_column: &ColumnId,
    to_index: usize,
) -> Result<Change> {
    let source = board
        .column_index(from_column)
        .ok_or_else(|| EngineError::unresolved_column(from_column))?;
    let target = board
        .column_index(to_column)
        .ok_or_else(|| EngineError::unresolved_column(to_column))?;
    let from = board.columns()[source]
        .card_index(card)
        .ok_or_else(|| EngineError::unresolved_card(card))?;

    let mut next = board.clone();
    let columns = next.columns_mut();

    if source == target {
        move_item(&mut columns[source].cards, from, to_index)?;
        if from == to_index {
            return Ok(Change::Nothing);
        }
    } else {
        // Split the borrow so both columns can be mutated in one step.
        let (source_col, target_col) = if source < target {
            let (left, right) = columns.split_at_mut(target);
            (&mut left[source], &mut right[0])
        } else {
            let (left, right) = columns.split_at_mut(source);
            (&mut right[0], &mut left[target])
        };
        transfer_item(&mut source_col.cards, from, &mut target_col.cards, to_index)?;
        target_col.cards[to_index].column_id = target_col.id.clone();
    }

    Ok(Change::Board(next))
}

/// Whether the item named by a drag state still exists on a board
fn drag_resolves(board: &Board, drag: &DragState) -> bool {
    match drag {
        DragState::Column { id } => board.column(id).is_some(),
        DragState::Card { id, .. } => board.card(id).is_some(),
    }
}
