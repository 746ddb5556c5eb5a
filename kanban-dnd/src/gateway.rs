//! Persistence gateway: the load/save boundary around the engine
//!
//! The engine only sees `Board` values going in and out. Loading is async and
//! may fail; a failed load still yields a working store holding an empty
//! board, with the error reported alongside for the presentation layer.

use crate::error::{LoadError, SaveError};
use crate::store::{BoardStore, DispatchOutcome, Intent};
use crate::types::Board;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Source and sink of board state
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Load the stored board
    async fn load(&self) -> Result<Board, LoadError>;

    /// Persist a board
    async fn save(&self, board: &Board) -> Result<(), SaveError>;
}

/// Gateway storing the board as one pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PersistenceGateway for JsonFileGateway {
    async fn load(&self) -> Result<Board, LoadError> {
        if !self.path.exists() {
            return Err(LoadError::NotFound {
                path: self.path.clone(),
            });
        }

        let content = fs::read_to_string(&self.path).await?;
        let mut board: Board = serde_json::from_str(&content)?;
        board.relink();
        board.validate()?;

        info!(
            path = %self.path.display(),
            columns = board.column_count(),
            cards = board.card_count(),
            "loaded board"
        );
        Ok(board)
    }

    async fn save(&self, board: &Board) -> Result<(), SaveError> {
        let content = serde_json::to_string_pretty(board)?;
        atomic_write(&self.path, content.as_bytes()).await?;
        info!(path = %self.path.display(), "saved board");
        Ok(())
    }
}

/// Gateway keeping the board in memory
#[derive(Debug, Default)]
pub struct MemoryGateway {
    board: Mutex<Option<Board>>,
    saves: Mutex<usize>,
}

impl MemoryGateway {
    /// A gateway holding a board
    pub fn new(board: Board) -> Self {
        Self {
            board: Mutex::new(Some(board)),
            saves: Mutex::new(0),
        }
    }

    /// A gateway with nothing stored, whose loads fail with `NotFound`
    pub fn empty() -> Self {
        Self::default()
    }

    /// The last board stored
    pub async fn stored(&self) -> Option<Board> {
        self.board.lock().await.clone()
    }

    /// How many times `save` was called
    pub async fn save_count(&self) -> usize {
        *self.saves.lock().await
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn load(&self) -> Result<Board, LoadError> {
        self.board
            .lock()
            .await
            .clone()
            .ok_or_else(|| LoadError::NotFound {
                path: PathBuf::from(":memory:"),
            })
    }

    async fn save(&self, board: &Board) -> Result<(), SaveError> {
        *self.board.lock().await = Some(board.clone());
        *self.saves.lock().await += 1;
        Ok(())
    }
}

/// Result of the initial load
#[derive(Debug)]
pub enum LoadStatus {
    Ready,
    Failed(LoadError),
}

impl LoadStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// A store ready for use, plus how the initial load went
pub struct Startup {
    pub store: BoardStore,
    pub status: LoadStatus,
}

/// Create a store and fill it from the gateway.
///
/// The store starts empty and receives the loaded board through
/// `Intent::LoadBoard`. On failure it stays empty and the error is returned
/// in `status`.
pub async fn bootstrap(gateway: &dyn PersistenceGateway) -> Startup {
    let mut store = BoardStore::new();

    let status = match gateway.load().await {
        Ok(board) => match store.dispatch(Intent::LoadBoard { board }) {
            DispatchOutcome::Rejected(error) => LoadStatus::Failed(LoadError::Invalid(error)),
            _ => LoadStatus::Ready,
        },
        Err(error) => LoadStatus::Failed(error),
    };

    if let LoadStatus::Failed(error) = &status {
        warn!(%error, "initial load failed, starting from an empty board");
    }

    Startup { store, status }
}

/// Saves the board whenever it changed since the last save.
///
/// Change detection compares `Arc<Board>` pointers, which the store replaces
/// on every board mutation and keeps on drag-only changes.
#[derive(Debug, Default)]
pub struct Autosaver {
    last_saved: Option<Arc<Board>>,
}

impl Autosaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat the store's current board as already persisted
    pub fn mark_saved(&mut self, store: &BoardStore) {
        self.last_saved = Some(Arc::clone(store.board()));
    }

    /// Whether the store's board differs from the last one saved
    pub fn is_dirty(&self, store: &BoardStore) -> bool {
        match &self.last_saved {
            Some(saved) => !Arc::ptr_eq(saved, store.board()),
            None => true,
        }
    }

    /// Save if dirty. Returns whether a save happened.
    pub async fn flush(
        &mut self,
        store: &BoardStore,
        gateway: &dyn PersistenceGateway,
    ) -> Result<bool, SaveError> {
        if !self.is_dirty(store) {
            return Ok(false);
        }

        let board = Arc::clone(store.board());
        gateway.save(&board).await?;
        self.last_saved = Some(board);
        Ok(true)
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, path).await?;

    Ok(())
}
