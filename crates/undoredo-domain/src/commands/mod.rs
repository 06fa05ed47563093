use std::cell::RefCell;
use std::rc::Rc;

pub mod property_set;

pub use property_set::PropertySetCommand;

/// Handle to caller-owned state that commands mutate in place.
///
/// Commands only keep a weak reference to it, so the caller decides how long
/// the state lives.
pub type SharedState<S> = Rc<RefCell<S>>;

/// Wrap `state` so commands can target it.
pub fn shared<S>(state: S) -> SharedState<S> {
    Rc::new(RefCell::new(state))
}
