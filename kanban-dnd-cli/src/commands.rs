//! Subcommand execution against a board file

use crate::cli::{Cli, Commands};
use anyhow::{bail, Context, Result};
use kanban_dnd::{
    input::TextEntry,
    preview::{self, DragPreview},
    views::board_view,
    Autosaver, Board, BoardStore, CancelPolicy, DispatchOutcome, DragEvent, DragSession,
    DragState, EngineConfig, EngineError, Intent, JsonFileGateway, LoadStatus,
    PersistenceGateway, SessionOutcome, Startup,
};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of one replayed event
#[derive(Debug, Serialize)]
struct ReplayStep {
    index: usize,
    event: &'static str,
    outcome: String,
}

#[derive(Debug, Serialize)]
struct ReplayReport<'a> {
    policy: CancelPolicy,
    steps: Vec<ReplayStep>,
    /// Whether the script ended mid-drag
    dragging: bool,
    drag: Option<&'a DragState>,
    preview: Option<DragPreview>,
    revision: u64,
    board: &'a Board,
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = EngineConfig::load_from(cli.config.as_deref()).context("loading config")?;
    let path = cli.board.clone().unwrap_or_else(|| config.board_file.clone());
    debug!(path = %path.display(), policy = ?config.cancel_policy, "using board file");

    let gateway = JsonFileGateway::new(&path);
    let mut store = open(&gateway).await?;
    let mut autosaver = Autosaver::new();
    autosaver.mark_saved(&store);

    match cli.command {
        Commands::Show { views } => {
            if views {
                print_json(&board_view(store.board(), store.drag()))?;
            } else {
                print_json(store.board().as_ref())?;
            }
            return Ok(());
        }
        Commands::AddColumn { title } => {
            let intent = TextEntry::column(title).into_intent()?;
            apply(&mut store, intent)?;
        }
        Commands::AddCard { column, text } => {
            let intent = TextEntry::card(column, text).into_intent()?;
            apply(&mut store, intent)?;
        }
        Commands::MoveColumn { from, to } => {
            apply(&mut store, Intent::MoveColumn { from, to })?;
        }
        Commands::MoveCard {
            card,
            column,
            index,
        } => {
            let card = card.into();
            let board = store.board();
            let Some(loc) = board.locate_card(&card) else {
                return Err(EngineError::unresolved_card(&card).into());
            };
            let from_column = board.columns()[loc.column_index].id.clone();
            apply(
                &mut store,
                Intent::MoveCard {
                    card,
                    from_column,
                    to_column: column.into(),
                    to_index: index,
                },
            )?;
        }
        Commands::RemoveColumn { column } => {
            apply(
                &mut store,
                Intent::RemoveColumn {
                    column: column.into(),
                },
            )?;
        }
        Commands::RemoveCard { card } => {
            apply(&mut store, Intent::RemoveCard { card: card.into() })?;
        }
        Commands::Replay { script } => {
            let events = read_script(&script).await?;
            let mut session = DragSession::new(config.cancel_policy);
            let steps = replay(&mut store, &mut session, events);

            let snapshot = store.snapshot();
            let report = ReplayReport {
                policy: session.policy(),
                steps,
                dragging: session.is_dragging(),
                drag: snapshot.drag.as_ref(),
                preview: preview::project(
                    &snapshot.board,
                    snapshot.drag.as_ref(),
                    session.last_pointer(),
                ),
                revision: snapshot.revision,
                board: snapshot.board.as_ref(),
            };
            print_json(&report)?;
            save(&config, &mut autosaver, &store, &gateway).await?;
            return Ok(());
        }
    }

    save(&config, &mut autosaver, &store, &gateway).await?;
    print_json(store.board().as_ref())
}

/// Load the board, starting empty when the file does not exist yet.
///
/// Any other load failure aborts so a later save cannot overwrite a file the
/// user may still want to repair.
async fn open(gateway: &JsonFileGateway) -> Result<BoardStore> {
    let Startup { store, status } = kanban_dnd::bootstrap(gateway).await;
    match status {
        LoadStatus::Ready => Ok(store),
        LoadStatus::Failed(error) if error.is_not_found() => {
            warn!(path = %gateway.path().display(), "board file missing, starting empty");
            Ok(store)
        }
        LoadStatus::Failed(error) => Err(error)
            .with_context(|| format!("loading board from {}", gateway.path().display())),
    }
}

fn apply(store: &mut BoardStore, intent: Intent) -> Result<()> {
    match store.dispatch(intent) {
        DispatchOutcome::Rejected(error) => bail!(error),
        DispatchOutcome::Committed { .. } | DispatchOutcome::Unchanged => Ok(()),
    }
}

async fn save(
    config: &EngineConfig,
    autosaver: &mut Autosaver,
    store: &BoardStore,
    gateway: &JsonFileGateway,
) -> Result<()> {
    if !config.autosave {
        debug!("autosave disabled, not writing board");
        return Ok(());
    }

    autosaver
        .flush(store, gateway as &dyn PersistenceGateway)
        .await
        .with_context(|| format!("saving board to {}", gateway.path().display()))?;
    Ok(())
}

async fn read_script(path: &Path) -> Result<Vec<DragEvent>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading script {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing script {}", path.display()))
}

fn replay(
    store: &mut BoardStore,
    session: &mut DragSession,
    events: Vec<DragEvent>,
) -> Vec<ReplayStep> {
    events
        .into_iter()
        .enumerate()
        .map(|(index, event)| {
            let name = event_name(&event);
            let outcome = describe(&session.handle(store, event));
            ReplayStep {
                index,
                event: name,
                outcome,
            }
        })
        .collect()
}

fn event_name(event: &DragEvent) -> &'static str {
    match event {
        DragEvent::Start { .. } => "start",
        DragEvent::Hover(_) => "hover",
        DragEvent::Release { .. } => "release",
        DragEvent::Abort => "abort",
    }
}

fn describe(outcome: &SessionOutcome) -> String {
    match outcome {
        SessionOutcome::Started => "started".to_string(),
        SessionOutcome::Moved { revision } => format!("moved (revision {revision})"),
        SessionOutcome::Unchanged => "unchanged".to_string(),
        SessionOutcome::Dropped => "dropped".to_string(),
        SessionOutcome::Cancelled { rolled_back: true } => "cancelled, rolled back".to_string(),
        SessionOutcome::Cancelled { rolled_back: false } => "cancelled".to_string(),
        SessionOutcome::Ignored(error) => format!("ignored: {error}"),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
