use crate::Symbol;
use std::{
    any::{type_name, Any},
    collections::HashMap,
    fmt::{self, Debug, Formatter},
    str::FromStr,
};
use tracing::debug;

/// Renders a stored value for inspection, or `None` if the type has no preview.
type PreviewFn = fn(&dyn Any) -> Option<String>;

/// Fallback preview: numbers, booleans, characters and strings render with
/// `Display`, any other type has none.
fn display_preview(value: &dyn Any) -> Option<String> {
    macro_rules! try_display {
        ($($ty: ty),* $(,)?) => {
            $(if let Some(value) = value.downcast_ref::<$ty>() {
                return Some(value.to_string());
            })*
        };
    }
    try_display!(
        i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
        String, &'static str, Symbol,
    );
    None
}

fn debug_preview<T: Debug + 'static>(value: &dyn Any) -> Option<String> {
    value.downcast_ref::<T>().map(|value| format!("{:?}", value))
}

/// A single type-erased value together with the name of its concrete type.
struct Entry {
    value: Box<dyn Any>,
    type_name: &'static str,
    preview: PreviewFn,
}

impl Entry {
    fn new<T: 'static>(value: T, preview: PreviewFn) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
            preview,
        }
    }
}

/// The attribute store (a.k.a. blackboard) is a mapping from keys to values of
/// arbitrary, independently chosen types.
///
/// A key is bound to a concrete type on its first [`set`](Self::set). Reading it back
/// as a different type never yields a value: [`get`](Self::get) panics and
/// [`try_get`](Self::try_get) returns `None`. Writing a differently typed value to an
/// existing key is a programming error and panics as well.
///
/// ```
/// # use agent_mind::AttributeStore;
/// let mut store = AttributeStore::default();
/// store.set("hp", 42i32);
/// assert_eq!(*store.get::<i32>("hp"), 42);
/// assert!(store.try_get::<f32>("hp").is_none());
/// assert!(!store.has_key::<u32>("hp"));
/// ```
#[derive(Default)]
pub struct AttributeStore {
    entries: HashMap<Symbol, Entry>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `value`, or overwrites the existing value in place.
    ///
    /// # Panics
    ///
    /// If `key` is already bound to a type other than `T`.
    pub fn set<T: 'static>(&mut self, key: impl Into<Symbol>, value: T) {
        self.set_with_preview(key.into(), value, None);
    }

    /// Same as [`set`](Self::set), but the entry previews as the value's `Debug` output
    /// instead of the default rendering, which only covers primitives and strings.
    pub fn set_debug<T: Debug + 'static>(&mut self, key: impl Into<Symbol>, value: T) {
        self.set_with_preview(key.into(), value, Some(debug_preview::<T>));
    }

    fn set_with_preview<T: 'static>(&mut self, key: Symbol, value: T, preview: Option<PreviewFn>) {
        match self.entries.get_mut(&key) {
            Some(entry) => {
                let type_name = entry.type_name;
                match entry.value.downcast_mut::<T>() {
                    Some(slot) => {
                        *slot = value;
                        if let Some(preview) = preview {
                            entry.preview = preview;
                        }
                    }
                    None => mismatch(key, type_name, std::any::type_name::<T>()),
                }
            }
            None => {
                debug!(key = %key, ty = std::any::type_name::<T>(), "binding attribute");
                self.entries
                    .insert(key, Entry::new(value, preview.unwrap_or(display_preview)));
            }
        }
    }

    /// Returns the value bound to `key`.
    ///
    /// # Panics
    ///
    /// If `key` is absent or bound to a type other than `T`.
    pub fn get<T: 'static>(&self, key: impl Into<Symbol>) -> &T {
        let key = key.into();
        let entry = self.entry(key);
        match entry.value.downcast_ref::<T>() {
            Some(value) => value,
            None => mismatch(key, entry.type_name, type_name::<T>()),
        }
    }

    /// Mutable counterpart of [`get`](Self::get), with the same panics.
    pub fn get_mut<T: 'static>(&mut self, key: impl Into<Symbol>) -> &mut T {
        let key = key.into();
        let entry = match self.entries.get_mut(&key) {
            Some(entry) => entry,
            None => missing(key),
        };
        let type_name = entry.type_name;
        match entry.value.downcast_mut::<T>() {
            Some(value) => value,
            None => mismatch(key, type_name, std::any::type_name::<T>()),
        }
    }

    /// Returns the value bound to `key`, or `None` if the key is absent or bound to
    /// another type.
    pub fn try_get<T: 'static>(&self, key: impl Into<Symbol>) -> Option<&T> {
        self.entries.get(&key.into())?.value.downcast_ref()
    }

    pub fn try_get_mut<T: 'static>(&mut self, key: impl Into<Symbol>) -> Option<&mut T> {
        self.entries.get_mut(&key.into())?.value.downcast_mut()
    }

    /// Returns the value as `T` if it is stored as such, or tries to parse it from a
    /// stored string.
    pub fn get_parse<T>(&self, key: impl Into<Symbol>) -> Option<T>
    where
        T: FromStr + Clone + 'static,
    {
        let key = key.into();
        let entry = self.entries.get(&key)?;
        if let Some(value) = entry.value.downcast_ref::<T>() {
            return Some(value.clone());
        }
        if let Some(s) = entry.value.downcast_ref::<String>() {
            return s.parse().ok();
        }
        entry
            .value
            .downcast_ref::<&'static str>()
            .and_then(|s| s.parse().ok())
    }

    /// True only if `key` is present and bound to `T`.
    pub fn has_key<T: 'static>(&self, key: impl Into<Symbol>) -> bool {
        self.entries
            .get(&key.into())
            .map_or(false, |entry| entry.value.is::<T>())
    }

    /// True if `key` is present, whatever its type.
    pub fn contains(&self, key: impl Into<Symbol>) -> bool {
        self.entries.contains_key(&key.into())
    }

    pub fn type_name(&self, key: impl Into<Symbol>) -> Option<&'static str> {
        self.entries.get(&key.into()).map(|entry| entry.type_name)
    }

    /// Unbinds `key`. Returns whether it was present.
    pub fn remove(&mut self, key: impl Into<Symbol>) -> bool {
        self.entries.remove(&key.into()).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best effort human readable rendering of the value at `key`.
    pub fn preview(&self, key: impl Into<Symbol>) -> Option<String> {
        self.entries.get(&key.into()).map(Self::render)
    }

    /// Previews of every entry, sorted by key.
    pub fn previews(&self) -> Vec<(Symbol, String)> {
        let mut ret: Vec<_> = self
            .entries
            .iter()
            .map(|(key, entry)| (*key, Self::render(entry)))
            .collect();
        ret.sort_by(|lhs, rhs| lhs.0.cmp(&rhs.0));
        ret
    }

    fn render(entry: &Entry) -> String {
        (entry.preview)(entry.value.as_ref()).unwrap_or_else(|| format!("<{}>", entry.type_name))
    }

    fn entry(&self, key: Symbol) -> &Entry {
        match self.entries.get(&key) {
            Some(entry) => entry,
            None => missing(key),
        }
    }
}

impl Debug for AttributeStore {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.debug_map().entries(self.previews()).finish()
    }
}

#[cold]
fn missing(key: Symbol) -> ! {
    panic!("attribute {:?} is not set", key)
}

#[cold]
fn mismatch(key: Symbol, stored: &str, requested: &str) -> ! {
    panic!(
        "attribute {:?} type mismatch: stored as {}, accessed as {}",
        key, stored, requested
    )
}

#[cfg(test)]
mod test;
