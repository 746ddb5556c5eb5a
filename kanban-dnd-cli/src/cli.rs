use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kanban-dnd")]
#[command(version)]
#[command(about = "Edit and reorder a kanban board stored as JSON")]
#[command(long_about = "
kanban-dnd edits a kanban board kept in a JSON file. Columns and cards can be
added, moved and removed directly, or a recorded drag gesture can be replayed
through the drag engine.

Global arguments can be used with any command:
  --board       Board file to operate on (overrides the config file)
  --config      Explicit config file instead of ./kanban-dnd.toml
  --verbose     Trace every hover tick and intent
  --debug       Log committed intents
  --quiet       Suppress all logging except errors

Example usage:
  kanban-dnd add-column Todo
  kanban-dnd add-card <column-id> \"Write docs\"
  kanban-dnd move-card <card-id> <column-id> 0
  kanban-dnd --board demo.json replay drag.json
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Board file to load and save
    #[arg(long, global = true)]
    pub board: Option<PathBuf>,

    /// Config file to read instead of kanban-dnd.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the board
    Show {
        /// Print render views (indices and hidden flags) instead of raw board
        #[arg(long)]
        views: bool,
    },
    /// Append a column
    AddColumn {
        /// Column title
        title: String,
    },
    /// Append a card to a column
    AddCard {
        /// ID of the column receiving the card
        column: String,
        /// Card text
        text: String,
    },
    /// Move the column at one index to another
    MoveColumn { from: usize, to: usize },
    /// Move a card into a column at an index
    MoveCard {
        /// ID of the card to move
        card: String,
        /// ID of the destination column
        column: String,
        /// Position within the destination column
        index: usize,
    },
    /// Delete a column with its cards
    RemoveColumn { column: String },
    /// Delete a card
    RemoveCard { card: String },
    /// Replay a JSON array of drag events against the board
    #[command(long_about = "
Replay a recorded drag gesture. The script is a JSON array of events:

  [
    {\"event\": \"start\", \"source\": {\"card\": \"c1\"}},
    {\"event\": \"hover\", \"target\": {\"card\": \"c3\"},
     \"bounds\": {\"x\": 220, \"y\": 0, \"width\": 200, \"height\": 40},
     \"pointer\": {\"x\": 300, \"y\": 30}},
    {\"event\": \"release\", \"over_target\": true}
  ]

Prints a report with the outcome of every event and the resulting board.
")]
    Replay {
        /// Path of the event script
        script: PathBuf,
    },
}
