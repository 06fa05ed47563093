//! Undo/redo history management.
//!
//! Provides a command-based history manager for implementing undo/redo.
//! Every recorded command is either applied (on the undo stack) or reverted
//! (on the redo stack); undo and redo move it between the two.

use std::collections::VecDeque;
use std::fmt;
use undoredo_core::{Command, CommandProcessor, HistoryConfig, UndoRedoResult};

/// Manages undo/redo history as two stacks of executed commands.
///
/// History is linear: recording a new command drops everything on the redo
/// stack. Redundant commands are executed but never recorded, so they neither
/// appear in the undo stack nor clear the redo stack.
pub struct HistoryManager {
    /// Stack of applied commands for undo (most recent = back of deque).
    undo_stack: VecDeque<Box<dyn Command>>,

    /// Stack of reverted commands for redo (most recent = back of deque).
    redo_stack: VecDeque<Box<dyn Command>>,

    /// Cap on the undo stack; the oldest command goes first when exceeded.
    /// `Some(0)` disables recording altogether.
    max_depth: Option<usize>,
}

impl HistoryManager {
    /// Create new history manager with unbounded history.
    pub fn new() -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth: None,
        }
    }

    /// Create a history manager honouring `config`.
    pub fn with_config(config: &HistoryConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            ..Self::new()
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get undo stack depth (for debugging/status display).
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get redo stack depth (for debugging/status display).
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Description of the command the next undo would revert.
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.back().map(|command| command.description())
    }

    /// Description of the command the next redo would re-apply.
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.back().map(|command| command.description())
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn enforce_max_depth(&mut self) {
        let Some(max_depth) = self.max_depth else {
            return;
        };
        while self.undo_stack.len() > max_depth {
            if let Some(evicted) = self.undo_stack.pop_front() {
                tracing::trace!(
                    command = %evicted.description(),
                    max_depth,
                    "Evicted oldest command from undo history"
                );
            }
        }
    }
}

impl CommandProcessor for HistoryManager {
    fn add_and_execute(&mut self, mut command: Box<dyn Command>) -> UndoRedoResult<()> {
        command.execute()?;

        if command.is_redundant() {
            tracing::trace!(
                command = %command.description(),
                "Executed redundant command without recording it"
            );
            return Ok(());
        }

        if self.max_depth == Some(0) {
            tracing::trace!(
                command = %command.description(),
                "History disabled, executed command without recording it"
            );
            return Ok(());
        }

        tracing::debug!(
            command = %command.description(),
            discarded_redo = self.redo_stack.len(),
            "Recorded command"
        );
        self.undo_stack.push_back(command);
        // Any new action clears the redo history
        self.redo_stack.clear();
        self.enforce_max_depth();
        Ok(())
    }

    fn undo(&mut self) -> UndoRedoResult<()> {
        let Some(mut command) = self.undo_stack.pop_back() else {
            tracing::trace!("Nothing to undo");
            return Ok(());
        };

        if let Err(err) = command.revert() {
            self.undo_stack.push_back(command);
            return Err(err);
        }

        tracing::debug!(
            command = %command.description(),
            undo_depth = self.undo_stack.len(),
            "Undid command"
        );
        self.redo_stack.push_back(command);
        Ok(())
    }

    fn redo(&mut self) -> UndoRedoResult<()> {
        let Some(mut command) = self.redo_stack.pop_back() else {
            tracing::trace!("Nothing to redo");
            return Ok(());
        };

        if let Err(err) = command.execute() {
            self.redo_stack.push_back(command);
            return Err(err);
        }

        tracing::debug!(
            command = %command.description(),
            redo_depth = self.redo_stack.len(),
            "Redid command"
        );
        self.undo_stack.push_back(command);
        self.enforce_max_depth();
        Ok(())
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HistoryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryManager")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::{mock, Sequence};
    use undoredo_core::UndoRedoError;

    mock! {
        Cmd {}

        impl Command for Cmd {
            fn execute(&mut self) -> UndoRedoResult<()>;
            fn revert(&mut self) -> UndoRedoResult<()>;
            fn is_redundant(&self) -> bool;
            fn description(&self) -> String;
        }
    }

    fn labelled(mock: &mut MockCmd, label: &'static str) {
        mock.expect_description()
            .returning(move || label.to_string());
    }

    fn recordable(label: &'static str) -> MockCmd {
        let mut mock = MockCmd::new();
        mock.expect_execute().returning(|| Ok(()));
        mock.expect_revert().returning(|| Ok(()));
        mock.expect_is_redundant().return_const(false);
        labelled(&mut mock, label);
        mock
    }

    #[test]
    fn test_add_executes_and_records() {
        let mut history = HistoryManager::new();
        let mut mock = MockCmd::new();
        mock.expect_execute().times(1).returning(|| Ok(()));
        mock.expect_is_redundant().return_const(false);
        labelled(&mut mock, "rename");

        history.add_and_execute(Box::new(mock)).unwrap();

        assert!(history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.undo_description().as_deref(), Some("rename"));
    }

    #[test]
    fn test_undo_then_redo_calls_revert_then_execute() {
        let mut history = HistoryManager::new();
        let mut seq = Sequence::new();
        let mut mock = MockCmd::new();
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        mock.expect_revert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        mock.expect_is_redundant().return_const(false);
        labelled(&mut mock, "move");

        history.add_and_execute(Box::new(mock)).unwrap();
        history.undo().unwrap();
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 1);
        assert_eq!(history.redo_description().as_deref(), Some("move"));

        history.redo().unwrap();
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_redundant_command_executes_but_is_not_recorded() {
        let mut history = HistoryManager::new();
        history.add_and_execute(Box::new(recordable("first"))).unwrap();
        history.undo().unwrap();
        assert!(history.can_redo());

        let mut redundant = MockCmd::new();
        redundant.expect_execute().times(1).returning(|| Ok(()));
        redundant.expect_revert().never();
        redundant.expect_is_redundant().return_const(true);
        labelled(&mut redundant, "no-op");

        history.add_and_execute(Box::new(redundant)).unwrap();

        assert!(!history.can_undo());
        // Redo history survives a redundant command
        assert_eq!(history.redo_depth(), 1);
        assert_eq!(history.redo_description().as_deref(), Some("first"));
    }

    #[test]
    fn test_new_command_clears_redo_stack() {
        let mut history = HistoryManager::new();
        history.add_and_execute(Box::new(recordable("a"))).unwrap();
        history.undo().unwrap();
        history.add_and_execute(Box::new(recordable("b"))).unwrap();

        assert!(!history.can_redo());
        assert_eq!(history.redo_depth(), 0);
        assert_eq!(history.undo_description().as_deref(), Some("b"));
    }

    #[test]
    fn test_undo_redo_on_empty_stacks_are_noops() {
        let mut history = HistoryManager::new();

        history.undo().unwrap();
        history.redo().unwrap();

        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_description(), None);
        assert_eq!(history.redo_description(), None);
    }

    #[test]
    fn test_failed_execute_records_nothing() {
        let mut history = HistoryManager::new();
        history.add_and_execute(Box::new(recordable("kept"))).unwrap();
        history.undo().unwrap();

        let mut failing = MockCmd::new();
        failing
            .expect_execute()
            .times(1)
            .returning(|| Err(UndoRedoError::StateBorrowed));
        failing.expect_is_redundant().return_const(false);
        labelled(&mut failing, "failing");

        let result = history.add_and_execute(Box::new(failing));

        assert!(matches!(result, Err(UndoRedoError::StateBorrowed)));
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 1);
    }

    #[test]
    fn test_failed_revert_keeps_command_on_undo_stack() {
        let mut history = HistoryManager::new();
        let mut mock = MockCmd::new();
        mock.expect_execute().returning(|| Ok(()));
        mock.expect_revert()
            .times(1)
            .returning(|| Err(UndoRedoError::NullState));
        mock.expect_is_redundant().return_const(false);
        labelled(&mut mock, "stuck");

        history.add_and_execute(Box::new(mock)).unwrap();
        let result = history.undo();

        assert!(matches!(result, Err(UndoRedoError::NullState)));
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_failed_redo_keeps_command_on_redo_stack() {
        let mut history = HistoryManager::new();
        let mut seq = Sequence::new();
        let mut mock = MockCmd::new();
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        mock.expect_revert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(UndoRedoError::NullState));
        mock.expect_is_redundant().return_const(false);
        labelled(&mut mock, "gone");

        history.add_and_execute(Box::new(mock)).unwrap();
        history.undo().unwrap();
        let result = history.redo();

        assert!(matches!(result, Err(UndoRedoError::NullState)));
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 1);
    }

    #[test]
    fn test_max_depth_evicts_oldest() {
        let config = HistoryConfig::default().with_max_depth(3);
        let mut history = HistoryManager::with_config(&config);

        for label in ["1", "2", "3", "4", "5"] {
            history.add_and_execute(Box::new(recordable(label))).unwrap();
        }

        assert_eq!(history.max_depth(), Some(3));
        assert_eq!(history.undo_depth(), 3);
        assert_eq!(history.undo_description().as_deref(), Some("5"));

        history.undo().unwrap();
        history.undo().unwrap();
        history.undo().unwrap();
        history.undo().unwrap();
        assert_eq!(history.redo_depth(), 3);
        assert_eq!(history.redo_description().as_deref(), Some("3"));
    }

    #[test]
    fn test_zero_max_depth_executes_without_touching_history() {
        let mut history = HistoryManager::new();
        history.add_and_execute(Box::new(recordable("kept"))).unwrap();
        history.undo().unwrap();

        // Switch off recording while a redo is pending
        history.max_depth = Some(0);
        let mut mock = MockCmd::new();
        mock.expect_execute().times(1).returning(|| Ok(()));
        mock.expect_revert().never();
        mock.expect_is_redundant().return_const(false);
        labelled(&mut mock, "unrecorded");

        history.add_and_execute(Box::new(mock)).unwrap();

        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 1);
        assert_eq!(history.redo_description().as_deref(), Some("kept"));
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryManager::new();
        history.add_and_execute(Box::new(recordable("a"))).unwrap();
        history.add_and_execute(Box::new(recordable("b"))).unwrap();
        history.undo().unwrap();

        history.clear();

        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
