//! Typed property accessors.
//!
//! A [`Property`] pairs a getter with an optional setter for one field of a
//! state type, which lets a single generic command mutate any field without a
//! dedicated command type per field. Properties can be built directly, through
//! the [`property!`](crate::property!) selector macro, or looked up by name in
//! a [`PropertyRegistry`] published through [`Reflect`].

use std::any::{type_name, Any};
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use undoredo_core::{BoxError, UndoRedoError, UndoRedoResult};

/// Select a field of a state type as a [`Property`].
///
/// Only plain field accesses are accepted, so the selector is checked at
/// compile time. Append `read_only` to build a property without setter.
///
/// ```
/// use undoredo_domain::property;
///
/// struct Counter {
///     value: i32,
/// }
///
/// let value = property!(Counter, value);
/// let mut counter = Counter { value: 5 };
/// value.set(&mut counter, 10).unwrap();
/// assert_eq!(value.get(&counter), 10);
/// assert_eq!(value.name(), "value");
/// ```
///
/// Anything other than a field name is rejected:
///
/// ```compile_fail
/// use undoredo_domain::property;
///
/// struct Counter {
///     value: i32,
/// }
///
/// let doubled = property!(Counter, value + 1);
/// ```
#[macro_export]
macro_rules! property {
    ($state:ty, $field:ident) => {
        $crate::property::Property::new(
            stringify!($field),
            |state: &$state| ::std::clone::Clone::clone(&state.$field),
            |state: &mut $state, value| state.$field = value,
        )
    };
    ($state:ty, $field:ident, read_only) => {
        $crate::property::Property::read_only(stringify!($field), |state: &$state| {
            ::std::clone::Clone::clone(&state.$field)
        })
    };
}

enum Setter<S, V> {
    ReadOnly,
    Infallible(fn(&mut S, V)),
    Fallible(fn(&mut S, V) -> Result<(), BoxError>),
}

impl<S, V> Clone for Setter<S, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, V> Copy for Setter<S, V> {}

/// Named getter/setter pair over a state type `S` holding values of type `V`.
pub struct Property<S, V> {
    name: Cow<'static, str>,
    getter: fn(&S) -> V,
    setter: Setter<S, V>,
}

impl<S, V> Property<S, V> {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        getter: fn(&S) -> V,
        setter: fn(&mut S, V),
    ) -> Self {
        Self {
            name: name.into(),
            getter,
            setter: Setter::Infallible(setter),
        }
    }

    /// A property whose writes always fail with
    /// [`UndoRedoError::ReadOnlyProperty`].
    pub fn read_only(name: impl Into<Cow<'static, str>>, getter: fn(&S) -> V) -> Self {
        Self {
            name: name.into(),
            getter,
            setter: Setter::ReadOnly,
        }
    }

    /// A property whose setter may reject a value. The rejection surfaces as
    /// [`UndoRedoError::PropertyWrite`] with the setter's error as source.
    pub fn fallible(
        name: impl Into<Cow<'static, str>>,
        getter: fn(&S) -> V,
        setter: fn(&mut S, V) -> Result<(), BoxError>,
    ) -> Self {
        Self {
            name: name.into(),
            getter,
            setter: Setter::Fallible(setter),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_writable(&self) -> bool {
        !matches!(self.setter, Setter::ReadOnly)
    }

    pub fn get(&self, state: &S) -> V {
        (self.getter)(state)
    }

    pub fn set(&self, state: &mut S, value: V) -> UndoRedoResult<()> {
        match self.setter {
            Setter::ReadOnly => Err(UndoRedoError::ReadOnlyProperty(self.name.to_string())),
            Setter::Infallible(setter) => {
                setter(state, value);
                Ok(())
            }
            Setter::Fallible(setter) => {
                setter(state, value).map_err(|source| UndoRedoError::PropertyWrite {
                    property: self.name.to_string(),
                    source,
                })
            }
        }
    }
}

impl<S, V> Clone for Property<S, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            getter: self.getter,
            setter: self.setter,
        }
    }
}

impl<S, V> fmt::Debug for Property<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("value_type", &type_name::<V>())
            .field("writable", &self.is_writable())
            .finish()
    }
}

struct RegistryEntry {
    name: Cow<'static, str>,
    value_type: &'static str,
    property: Box<dyn Any>,
}

/// Name-indexed table of the properties a state type exposes.
///
/// Each entry remembers its value type; a lookup must ask for the same type
/// the property was registered with.
pub struct PropertyRegistry<S> {
    entries: Vec<RegistryEntry>,
    _state: PhantomData<fn(&S)>,
}

impl<S: 'static> PropertyRegistry<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            _state: PhantomData,
        }
    }

    /// Add a property. Names must be non-empty and unique within the registry.
    pub fn register<V: 'static>(&mut self, property: Property<S, V>) -> UndoRedoResult<()> {
        if property.name().is_empty() {
            return Err(UndoRedoError::InvalidArgument(
                "property name cannot be empty".to_string(),
            ));
        }
        if self.contains(property.name()) {
            return Err(UndoRedoError::InvalidArgument(format!(
                "property `{}` is already registered on `{}`",
                property.name(),
                type_name::<S>()
            )));
        }

        self.entries.push(RegistryEntry {
            name: property.name.clone(),
            value_type: type_name::<V>(),
            property: Box::new(property),
        });
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<V: 'static>(mut self, property: Property<S, V>) -> UndoRedoResult<Self> {
        self.register(property)?;
        Ok(self)
    }

    pub fn lookup<V: 'static>(&self, name: &str) -> UndoRedoResult<Property<S, V>> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| UndoRedoError::PropertyNotFound(name.to_string()))?;

        entry
            .property
            .downcast_ref::<Property<S, V>>()
            .cloned()
            .ok_or_else(|| {
                UndoRedoError::InvalidArgument(format!(
                    "property `{}` holds `{}`, not `{}`",
                    name,
                    entry.value_type,
                    type_name::<V>()
                ))
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Property names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: 'static> Default for PropertyRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> fmt::Debug for PropertyRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRegistry")
            .field("state", &type_name::<S>())
            .field("properties", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Implemented by state types whose properties can be addressed by name.
pub trait Reflect: Sized + 'static {
    fn properties() -> UndoRedoResult<PropertyRegistry<Self>>;
}
