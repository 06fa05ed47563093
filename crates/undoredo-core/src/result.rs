use crate::error::UndoRedoError;

pub type UndoRedoResult<T> = Result<T, UndoRedoError>;
