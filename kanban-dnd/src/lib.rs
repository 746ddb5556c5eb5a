//! Drag-and-drop reordering engine for kanban boards
//!
//! A board is an ordered list of columns, each holding an ordered list of
//! cards. This crate tracks the item being dragged, decides from pointer
//! movement where it would land, and applies each move as one atomic change
//! to the board.
//!
//! ## Overview
//!
//! - **Board store** - the single owner of board + drag state; every change is
//!   an [`Intent`] dispatched through [`BoardStore::dispatch`]
//! - **Reorder algorithm** - pure placement math ([`reorder::compute_placement`])
//!   using the midpoint rule
//! - **Drag session** - [`DragSession`] turns host drag events into intents and
//!   commits moves live while the pointer moves
//! - **Preview and views** - read-only projections for the render layer
//! - **Persistence gateway** - async load/save boundary ([`PersistenceGateway`])
//!
//! ## Basic Usage
//!
//! ```rust
//! use kanban_dnd::{
//!     reorder::Hover, Board, BoardStore, Card, Column, DragSession, DragSource,
//!     HoverTarget, Point, Rect,
//! };
//!
//! let board = Board::from_columns(vec![
//!     Column::with_id("a", "Todo")
//!         .with_card(Card::with_id("c1", "Write docs", "a"))
//!         .with_card(Card::with_id("c2", "Ship", "a")),
//!     Column::with_id("b", "Done").with_card(Card::with_id("c3", "Plan", "b")),
//! ]);
//! let mut store = BoardStore::with_board(board).unwrap();
//! let mut session = DragSession::default();
//!
//! session.begin(&mut store, DragSource::Card("c1".into()));
//! session.hover(
//!     &mut store,
//!     &Hover::new(
//!         HoverTarget::Card("c3".into()),
//!         Rect::new(220.0, 0.0, 200.0, 40.0),
//!         Point::new(300.0, 30.0),
//!     ),
//! );
//! session.drop(&mut store);
//!
//! let done = store.board().column(&"b".into()).unwrap();
//! assert_eq!(done.cards[0].id.as_str(), "c1");
//! ```

pub mod config;
mod error;
pub mod gateway;
pub mod input;
pub mod preview;
pub mod reorder;
mod session;
mod store;
pub mod types;
pub mod views;

pub use config::{CancelPolicy, EngineConfig};
pub use error::{ConfigError, EngineError, LoadError, Result, SaveError};
pub use gateway::{
    bootstrap, Autosaver, JsonFileGateway, LoadStatus, MemoryGateway, PersistenceGateway,
    Startup,
};
pub use session::{DragEvent, DragSession, SessionOutcome};
pub use store::{BoardStore, DispatchOutcome, Intent, Snapshot};

// Re-export commonly used types
pub use types::{
    Axis, Board, Card, CardId, CardLocation, Column, ColumnId, DragKind, DragSource, DragState,
    HoverTarget, Point, Rect,
};
