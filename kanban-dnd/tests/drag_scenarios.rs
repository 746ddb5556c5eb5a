//! End-to-end drag scenarios driven through the session tracker

use kanban_dnd::{
    reorder::Hover, views::board_view, Board, BoardStore, CancelPolicy, Card, Column,
    DispatchOutcome, DragEvent, DragSession, DragSource, DragState, EngineError, HoverTarget,
    Intent, Point, Rect, SessionOutcome,
};
use std::sync::Arc;

fn ids(store: &BoardStore, column: &str) -> Vec<String> {
    store
        .board()
        .column(&column.into())
        .unwrap()
        .cards
        .iter()
        .map(|c| c.id.to_string())
        .collect()
}

fn column_ids(store: &BoardStore) -> Vec<String> {
    store
        .board()
        .columns()
        .iter()
        .map(|c| c.id.to_string())
        .collect()
}

/// Columns are 200 wide with a 20 gap; cards are 40 high.
fn card_bounds(column: usize, row: usize) -> Rect {
    Rect::new(column as f64 * 220.0, 50.0 + row as f64 * 40.0, 200.0, 40.0)
}

fn column_bounds(column: usize) -> Rect {
    Rect::new(column as f64 * 220.0, 0.0, 200.0, 600.0)
}

#[test]
fn test_card_moves_to_other_column_past_midpoint() {
    let board = Board::from_columns(vec![
        Column::with_id("A", "Column A")
            .with_card(Card::with_id("Card1", "first", "A"))
            .with_card(Card::with_id("Card2", "second", "A")),
        Column::with_id("B", "Column B").with_card(Card::with_id("Card3", "third", "B")),
    ]);
    let mut store = BoardStore::with_board(board).unwrap();
    let mut session = DragSession::default();

    session.handle(
        &mut store,
        DragEvent::Start {
            source: DragSource::Card("Card1".into()),
        },
    );
    let bounds = card_bounds(1, 0);
    let outcome = session.handle(
        &mut store,
        DragEvent::Hover(Hover::new(
            HoverTarget::Card("Card3".into()),
            bounds,
            Point::new(300.0, bounds.y + 30.0),
        )),
    );
    assert!(matches!(outcome, SessionOutcome::Moved { .. }));
    session.handle(&mut store, DragEvent::Release { over_target: true });

    assert_eq!(ids(&store, "A"), vec!["Card2"]);
    assert_eq!(ids(&store, "B"), vec!["Card1", "Card3"]);
    let moved = store.board().card(&"Card1".into()).unwrap();
    assert_eq!(moved.column_id.as_str(), "B");
    assert!(store.drag().is_none());
    assert!(store.board().validate().is_ok());
}

#[test]
fn test_column_dragged_to_front() {
    let board = Board::from_columns(vec![
        Column::with_id("A", "A"),
        Column::with_id("B", "B"),
        Column::with_id("C", "C"),
    ]);
    let mut store = BoardStore::with_board(board).unwrap();
    let mut session = DragSession::default();

    session.begin(&mut store, DragSource::Column("C".into()));

    // Passing over B then A, left of each midpoint.
    for (target, index) in [("B", 1usize), ("A", 0usize)] {
        let bounds = column_bounds(index);
        let outcome = session.hover(
            &mut store,
            &Hover::new(
                HoverTarget::Column(target.into()),
                bounds,
                Point::new(bounds.x + 10.0, 20.0),
            ),
        );
        assert!(matches!(outcome, SessionOutcome::Moved { .. }));
    }
    session.drop(&mut store);

    assert_eq!(column_ids(&store), vec!["C", "A", "B"]);
}

#[test]
fn test_column_move_intent_to_front() {
    let board = Board::from_columns(vec![
        Column::with_id("A", "A"),
        Column::with_id("B", "B"),
        Column::with_id("C", "C"),
    ]);
    let mut store = BoardStore::with_board(board).unwrap();
    store.dispatch(Intent::MoveColumn { from: 2, to: 0 });
    assert_eq!(column_ids(&store), vec!["C", "A", "B"]);
}

#[test]
fn test_boundary_move_to_end_of_other_column() {
    let board = Board::from_columns(vec![
        Column::with_id("src", "Source")
            .with_card(Card::with_id("m", "mover", "src"))
            .with_card(Card::with_id("s2", "stays", "src")),
        Column::with_id("dst", "Target")
            .with_card(Card::with_id("d1", "1", "dst"))
            .with_card(Card::with_id("d2", "2", "dst"))
            .with_card(Card::with_id("d3", "3", "dst")),
    ]);
    let mut store = BoardStore::with_board(board).unwrap();

    let outcome = store.dispatch(Intent::MoveCard {
        card: "m".into(),
        from_column: "src".into(),
        to_column: "dst".into(),
        to_index: 3,
    });
    assert!(outcome.is_committed());

    assert_eq!(ids(&store, "dst"), vec!["d1", "d2", "d3", "m"]);
    assert_eq!(ids(&store, "src"), vec!["s2"]);
    assert_eq!(store.board().card_count(), 5);
}

#[test]
fn test_same_position_move_is_structurally_equal() {
    let board = Board::from_columns(vec![Column::with_id("A", "A")
        .with_card(Card::with_id("c1", "1", "A"))
        .with_card(Card::with_id("c2", "2", "A"))]);
    let mut store = BoardStore::with_board(board).unwrap();
    let before = Arc::clone(store.board());

    let outcome = store.dispatch(Intent::MoveCard {
        card: "c2".into(),
        from_column: "A".into(),
        to_column: "A".into(),
        to_index: 1,
    });
    assert_eq!(outcome, DispatchOutcome::Unchanged);
    assert_eq!(*before, **store.board());
}

#[test]
fn test_second_drag_leaves_state_unchanged() {
    let board = Board::from_columns(vec![
        Column::with_id("A", "A").with_card(Card::with_id("c1", "1", "A")),
        Column::with_id("B", "B"),
    ]);
    let mut store = BoardStore::with_board(board).unwrap();
    let mut session = DragSession::default();

    session.begin(&mut store, DragSource::Card("c1".into()));
    let drag = store.drag().cloned();
    let revision = store.revision();

    let outcome = session.begin(&mut store, DragSource::Column("B".into()));
    assert!(matches!(
        outcome,
        SessionOutcome::Ignored(EngineError::IllegalSessionState { .. })
    ));
    assert_eq!(store.drag().cloned(), drag);
    assert_eq!(store.revision(), revision);
}

#[test]
fn test_cancel_leaves_no_stale_drag_references() {
    let board = Board::from_columns(vec![
        Column::with_id("A", "A")
            .with_card(Card::with_id("c1", "1", "A"))
            .with_card(Card::with_id("c2", "2", "A")),
        Column::with_id("B", "B"),
    ]);
    let mut store = BoardStore::with_board(board).unwrap();
    let mut session = DragSession::default();

    session.begin(&mut store, DragSource::Card("c2".into()));
    session.hover(
        &mut store,
        &Hover::new(
            HoverTarget::ColumnBody("B".into()),
            column_bounds(1),
            Point::new(300.0, 100.0),
        ),
    );
    assert_eq!(
        session.handle(&mut store, DragEvent::Abort),
        SessionOutcome::Cancelled { rolled_back: false }
    );

    assert!(store.drag().is_none());
    let views = board_view(store.board(), store.drag());
    assert!(views.iter().all(|c| !c.hidden));
    assert!(views.iter().flat_map(|c| &c.cards).all(|c| !c.hidden));
    // Incremental commit keeps the last hover position.
    assert_eq!(ids(&store, "B"), vec!["c2"]);
}

#[test]
fn test_rollback_policy_restores_column_order() {
    let board = Board::from_columns(vec![
        Column::with_id("A", "A"),
        Column::with_id("B", "B"),
        Column::with_id("C", "C"),
    ]);
    let mut store = BoardStore::with_board(board).unwrap();
    let mut session = DragSession::new(CancelPolicy::Rollback);

    session.begin(&mut store, DragSource::Column("A".into()));
    let bounds = column_bounds(2);
    session.hover(
        &mut store,
        &Hover::new(
            HoverTarget::Column("C".into()),
            bounds,
            Point::new(bounds.x + 150.0, 10.0),
        ),
    );
    assert_eq!(column_ids(&store), vec!["B", "C", "A"]);

    session.cancel(&mut store);
    assert_eq!(column_ids(&store), vec!["A", "B", "C"]);
    assert!(store.drag().is_none());
}

#[test]
fn test_column_removed_mid_drag_does_not_crash() {
    let board = Board::from_columns(vec![
        Column::with_id("A", "A").with_card(Card::with_id("c1", "1", "A")),
        Column::with_id("B", "B").with_card(Card::with_id("c2", "2", "B")),
    ]);
    let mut store = BoardStore::with_board(board).unwrap();
    let mut session = DragSession::default();

    session.begin(&mut store, DragSource::Card("c1".into()));
    store.dispatch(Intent::RemoveColumn { column: "B".into() });

    let outcome = session.hover(
        &mut store,
        &Hover::new(
            HoverTarget::Card("c2".into()),
            card_bounds(1, 0),
            Point::new(300.0, 60.0),
        ),
    );
    assert!(matches!(outcome, SessionOutcome::Ignored(ref e) if e.is_stale_reference()));
    assert_eq!(ids(&store, "A"), vec!["c1"]);
    assert!(store.drag().is_some());

    session.drop(&mut store);
    assert!(store.drag().is_none());
}

#[test]
fn test_drag_state_only_holds_identifiers() {
    let board = Board::from_columns(vec![
        Column::with_id("A", "A").with_card(Card::with_id("c1", "1", "A"))
    ]);
    let mut store = BoardStore::with_board(board).unwrap();
    let mut session = DragSession::default();
    session.begin(&mut store, DragSource::Card("c1".into()));

    let json = serde_json::to_value(store.drag().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"kind": "card", "id": "c1", "origin_column": "A"})
    );
    assert!(matches!(store.drag(), Some(DragState::Card { .. })));
}
