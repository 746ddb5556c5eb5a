//! Core types for the drag-and-drop engine

mod board;
mod drag;
mod geometry;
mod ids;

// Re-export all types
pub use board::{Board, Card, CardLocation, Column};
pub use drag::{DragKind, DragSource, DragState, HoverTarget};
pub use geometry::{Axis, Point, Rect};
pub use ids::{CardId, ColumnId};
