use crate::UndoRedoResult;

/// A reversible unit of work.
///
/// `execute` applies the change and `revert` takes it back. A processor
/// alternates the two according to its undo/redo stacks; calling them outside
/// that discipline is allowed but carries no meaning.
pub trait Command {
    /// Apply this command's effect.
    fn execute(&mut self) -> UndoRedoResult<()>;

    /// Undo this command's effect.
    fn revert(&mut self) -> UndoRedoResult<()>;

    /// True when applying the command changes nothing observable. Fixed at
    /// construction. Redundant commands are executed but never recorded.
    fn is_redundant(&self) -> bool {
        false
    }

    /// Human-readable description of what this command does
    fn description(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// Records executed commands and walks them back and forth.
pub trait CommandProcessor {
    /// Execute `command` and, unless it is redundant, record it for undo.
    /// Recording a command discards everything that could have been redone.
    fn add_and_execute(&mut self, command: Box<dyn Command>) -> UndoRedoResult<()>;

    /// Revert the most recently applied command. No-op when nothing to undo.
    fn undo(&mut self) -> UndoRedoResult<()>;

    /// Re-apply the most recently reverted command. No-op when nothing to redo.
    fn redo(&mut self) -> UndoRedoResult<()>;
}
