pub mod commands;
pub mod history;
pub mod property;

pub use commands::{shared, PropertySetCommand, SharedState};
pub use history::HistoryManager;
pub use property::{Property, PropertyRegistry, Reflect};
pub use undoredo_core::{
    BoxError, Command, CommandProcessor, HistoryConfig, UndoRedoError, UndoRedoResult,
};
