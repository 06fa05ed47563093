pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use config::HistoryConfig;
pub use error::{BoxError, UndoRedoError};
pub use result::UndoRedoResult;
pub use traits::{Command, CommandProcessor};
