use super::SharedState;
use crate::property::{Property, PropertyRegistry, Reflect};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use undoredo_core::{Command, UndoRedoError, UndoRedoResult};

/// Set one property of a caller-owned state object, remembering the previous
/// value so the change can be reverted.
///
/// The command holds only a weak handle to the state. The previous value is
/// read when the command is built, and a command whose new value equals that
/// previous value is redundant.
///
/// ```
/// use undoredo_domain::{property, shared, CommandProcessor, HistoryManager, PropertySetCommand};
///
/// struct Counter {
///     value: i32,
/// }
///
/// let counter = shared(Counter { value: 5 });
/// let mut history = HistoryManager::new();
///
/// let cmd = PropertySetCommand::new(&counter, property!(Counter, value), 10).unwrap();
/// history.add_and_execute(Box::new(cmd)).unwrap();
/// assert_eq!(counter.borrow().value, 10);
///
/// history.undo().unwrap();
/// assert_eq!(counter.borrow().value, 5);
/// ```
pub struct PropertySetCommand<S, V> {
    state: Weak<RefCell<S>>,
    property: Property<S, V>,
    new_value: V,
    old_value: V,
    redundant: bool,
}

impl<S, V> PropertySetCommand<S, V>
where
    S: 'static,
    V: Clone + PartialEq + fmt::Debug + 'static,
{
    /// Target the property selected by `property`, typically built with
    /// [`property!`](crate::property!).
    pub fn new(
        state: &SharedState<S>,
        property: Property<S, V>,
        new_value: V,
    ) -> UndoRedoResult<Self> {
        Self::from_weak(Rc::downgrade(state), property, new_value)
    }

    /// Target a property by name through the state type's registry.
    ///
    /// Fails with [`UndoRedoError::PropertyNotFound`] when `S` has no such
    /// property, and with [`UndoRedoError::InvalidArgument`] when it holds a
    /// value type other than `V`.
    ///
    /// Builds a fresh registry through [`Reflect::properties`] on every call;
    /// use [`from_registry`](Self::from_registry) to reuse one.
    pub fn by_name(state: &SharedState<S>, name: &str, new_value: V) -> UndoRedoResult<Self>
    where
        S: Reflect,
    {
        Self::from_registry(state, &S::properties()?, name, new_value)
    }

    /// Target a property by name in an existing registry. Fails like
    /// [`by_name`](Self::by_name).
    pub fn from_registry(
        state: &SharedState<S>,
        registry: &PropertyRegistry<S>,
        name: &str,
        new_value: V,
    ) -> UndoRedoResult<Self> {
        let property = registry.lookup::<V>(name)?;
        Self::new(state, property, new_value)
    }

    /// Fails with [`UndoRedoError::NullState`] when `state` no longer points
    /// at a live value.
    pub fn from_weak(
        state: Weak<RefCell<S>>,
        property: Property<S, V>,
        new_value: V,
    ) -> UndoRedoResult<Self> {
        let target = state.upgrade().ok_or(UndoRedoError::NullState)?;
        let old_value = {
            let current = target
                .try_borrow()
                .map_err(|_| UndoRedoError::StateBorrowed)?;
            property.get(&current)
        };
        let redundant = old_value == new_value;

        Ok(Self {
            state,
            property,
            new_value,
            old_value,
            redundant,
        })
    }

    pub fn property_name(&self) -> &str {
        self.property.name()
    }

    pub fn old_value(&self) -> &V {
        &self.old_value
    }

    pub fn new_value(&self) -> &V {
        &self.new_value
    }

    fn write(&self, value: V) -> UndoRedoResult<()> {
        let target = self.state.upgrade().ok_or(UndoRedoError::NullState)?;
        let mut current = target
            .try_borrow_mut()
            .map_err(|_| UndoRedoError::StateBorrowed)?;
        self.property.set(&mut current, value)
    }
}

impl<S, V> Command for PropertySetCommand<S, V>
where
    S: 'static,
    V: Clone + PartialEq + fmt::Debug + 'static,
{
    fn execute(&mut self) -> UndoRedoResult<()> {
        self.write(self.new_value.clone())
    }

    fn revert(&mut self) -> UndoRedoResult<()> {
        self.write(self.old_value.clone())
    }

    fn is_redundant(&self) -> bool {
        self.redundant
    }

    fn description(&self) -> String {
        format!("Set {} to {:?}", self.property.name(), self.new_value)
    }
}

impl<S, V: fmt::Debug> fmt::Debug for PropertySetCommand<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySetCommand")
            .field("property", &self.property)
            .field("old_value", &self.old_value)
            .field("new_value", &self.new_value)
            .field("redundant", &self.redundant)
            .finish()
    }
}
