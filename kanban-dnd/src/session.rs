//! Drag session tracker
//!
//! Bridges continuous drag events to discrete store intents. A session is
//! either idle or dragging exactly one item:
//!
//! ```text
//! Idle --start--> Dragging --hover--> Dragging (move committed live)
//!                     |
//!                     +--release over target--> Idle (drop)
//!                     +--release elsewhere / abort--> Idle (cancel)
//! ```
//!
//! Every hover tick that crosses a midpoint commits through
//! [`BoardStore::dispatch`] before the next tick is evaluated, so the board
//! always shows the dragged item where it would land.
//!
//! ## Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Start while dragging | Second pointer, duplicated host event | Ignored, current session continues |
//! | Hover or release while idle | Late event after drop | Ignored |
//! | Dragged or hovered item gone | Structural change mid-drag | Tick ignored |
//! | Drag state replaced or cleared in the store | Host dispatched `SetDraggedItem` | Session returns to idle |
//! | Origin column gone on rollback | Column removed mid-drag | Drag state cleared, position kept |

use crate::config::CancelPolicy;
use crate::error::EngineError;
use crate::reorder::{compute_placement, Hover};
use crate::store::{BoardStore, DispatchOutcome, Intent};
use crate::types::{ColumnId, DragSource, DragState, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// A drag event reported by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DragEvent {
    /// An item was picked up
    Start { source: DragSource },
    /// The pointer moved over an item
    Hover(Hover),
    /// The pointer was released, over a drop target or not
    Release { over_target: bool },
    /// The host aborted the drag (escape key, focus loss)
    Abort,
}

/// What the tracker did with an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A drag session began
    Started,
    /// A hover tick moved the dragged item
    Moved { revision: u64 },
    /// A hover tick left the board as it was
    Unchanged,
    /// The drag ended on a target
    Dropped,
    /// The drag was cancelled
    Cancelled { rolled_back: bool },
    /// The event was not applied
    Ignored(EngineError),
}

/// Where the dragged item was when the drag began
#[derive(Debug, Clone, PartialEq, Eq)]
enum Origin {
    Column { index: usize },
    Card { column: ColumnId, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Idle,
    Dragging { drag: DragState, origin: Origin },
}

/// State machine for one drag gesture at a time
#[derive(Debug)]
pub struct DragSession {
    policy: CancelPolicy,
    state: SessionState,
    last_pointer: Option<Point>,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(CancelPolicy::default())
    }
}

impl DragSession {
    pub fn new(policy: CancelPolicy) -> Self {
        Self {
            policy,
            state: SessionState::Idle,
            last_pointer: None,
        }
    }

    pub fn policy(&self) -> CancelPolicy {
        self.policy
    }

    /// True while a drag is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SessionState::Dragging { .. })
    }

    /// Pointer position from the latest hover tick of the current drag
    pub fn last_pointer(&self) -> Option<Point> {
        self.last_pointer
    }

    /// Route a host event to the matching transition
    pub fn handle(&mut self, store: &mut BoardStore, event: DragEvent) -> SessionOutcome {
        match event {
            DragEvent::Start { source } => self.begin(store, source),
            DragEvent::Hover(hover) => self.hover(store, &hover),
            DragEvent::Release { over_target: true } => self.drop(store),
            DragEvent::Release { over_target: false } | DragEvent::Abort => self.cancel(store),
        }
    }

    /// Idle -> Dragging
    pub fn begin(&mut self, store: &mut BoardStore, source: DragSource) -> SessionOutcome {
        self.sync(store);

        if self.is_dragging() || store.drag().is_some() {
            let error = EngineError::illegal_session("a drag is already in progress");
            warn!(%error, "ignoring drag start");
            return SessionOutcome::Ignored(error);
        }

        let kind = source.kind();
        let board = store.board();
        let (drag, origin) = match source {
            DragSource::Column(id) => match board.column_index(&id) {
                Some(index) => (DragState::Column { id }, Origin::Column { index }),
                None => return ignored(EngineError::unresolved_column(&id)),
            },
            DragSource::Card(id) => match board.locate_card(&id) {
                Some(loc) => {
                    let column = board.columns()[loc.column_index].id.clone();
                    (
                        DragState::Card {
                            id,
                            origin_column: column.clone(),
                        },
                        Origin::Card {
                            column,
                            index: loc.card_index,
                        },
                    )
                }
                None => return ignored(EngineError::unresolved_card(&id)),
            },
        };

        debug!(kind = %kind, dragged = drag.id_str(), "drag started");
        match store.dispatch(Intent::SetDraggedItem {
            drag: Some(drag.clone()),
        }) {
            DispatchOutcome::Rejected(error) => SessionOutcome::Ignored(error),
            _ => {
                self.state = SessionState::Dragging { drag, origin };
                self.last_pointer = None;
                SessionOutcome::Started
            }
        }
    }

    /// One hover tick while dragging
    pub fn hover(&mut self, store: &mut BoardStore, hover: &Hover) -> SessionOutcome {
        self.sync(store);

        let SessionState::Dragging { drag, .. } = &self.state else {
            return ignored(EngineError::illegal_session("hover without an active drag"));
        };
        let drag = drag.clone();
        self.last_pointer = Some(hover.pointer);

        let placement = match compute_placement(store.board(), &drag, hover) {
            Ok(placement) => placement,
            Err(error) => return ignored(error),
        };

        let Some(intent) = placement.into_intent() else {
            trace!(target_kind = hover.target.kind_str(), "hover tick without move");
            return SessionOutcome::Unchanged;
        };

        match store.dispatch(intent) {
            DispatchOutcome::Committed { revision } => SessionOutcome::Moved { revision },
            DispatchOutcome::Unchanged => SessionOutcome::Unchanged,
            DispatchOutcome::Rejected(error) => SessionOutcome::Ignored(error),
        }
    }

    /// Dragging -> Idle, keeping the position of the last hover commit
    pub fn drop(&mut self, store: &mut BoardStore) -> SessionOutcome {
        self.sync(store);

        if !self.is_dragging() {
            return ignored(EngineError::illegal_session("drop without an active drag"));
        }

        self.finish(store);
        debug!("drag dropped");
        SessionOutcome::Dropped
    }

    /// Dragging -> Idle without a drop, applying the cancel policy
    pub fn cancel(&mut self, store: &mut BoardStore) -> SessionOutcome {
        self.sync(store);

        let SessionState::Dragging { drag, origin } = self.state.clone() else {
            return ignored(EngineError::illegal_session("cancel without an active drag"));
        };

        let rolled_back = match self.policy {
            CancelPolicy::Keep => false,
            CancelPolicy::Rollback => restore_origin(store, &drag, &origin),
        };

        self.finish(store);
        debug!(rolled_back, "drag cancelled");
        SessionOutcome::Cancelled { rolled_back }
    }

    fn finish(&mut self, store: &mut BoardStore) {
        store.dispatch(Intent::SetDraggedItem { drag: None });
        self.state = SessionState::Idle;
        self.last_pointer = None;
    }

    /// Drop back to idle if the store's drag state is no longer the one this
    /// session started, e.g. the dragged item was removed or another caller
    /// dispatched `SetDraggedItem`
    fn sync(&mut self, store: &BoardStore) {
        let SessionState::Dragging { drag, .. } = &self.state else {
            return;
        };
        if store.drag() != Some(drag) {
            debug!(
                dragged = drag.id_str(),
                "drag state changed outside the session, returning to idle"
            );
            self.state = SessionState::Idle;
            self.last_pointer = None;
        }
    }
}

/// Move the dragged item back to its origin. Returns whether it moved.
///
/// Only acts while the store still carries `drag`, so a drag replaced by
/// another caller is never moved to this session's origin.
fn restore_origin(store: &mut BoardStore, drag: &DragState, origin: &Origin) -> bool {
    if store.drag() != Some(drag) {
        return false;
    }
    let board = store.board();

    let intent = match (drag, origin) {
        (DragState::Column { id }, Origin::Column { index }) => {
            let Some(current) = board.column_index(id) else {
                return false;
            };
            let to = (*index).min(board.column_count().saturating_sub(1));
            Intent::MoveColumn { from: current, to }
        }
        (DragState::Card { id, .. }, Origin::Card { column, index }) => {
            let (Some(loc), Some(target)) = (board.locate_card(id), board.column_index(column))
            else {
                return false;
            };
            // The origin column may have lost cards since the drag began.
            let len = board.columns()[target].cards.len();
            let last = if loc.column_index == target { len - 1 } else { len };
            Intent::MoveCard {
                card: id.clone(),
                from_column: board.columns()[loc.column_index].id.clone(),
                to_column: column.clone(),
                to_index: (*index).min(last),
            }
        }
        _ => return false,
    };

    store.dispatch(intent).is_committed()
}

fn ignored(error: EngineError) -> SessionOutcome {
    debug!(%error, "drag event ignored");
    SessionOutcome::Ignored(error)
}
