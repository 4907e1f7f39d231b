//! Interned attribute keys.
//!
//! Keys of the attribute store are compared on every lookup, so they are
//! interned once and compared by address afterwards.

use ::once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Mutex;

static SYMBOL_HEAP: Lazy<Mutex<HashSet<&'static str>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// An interned string with O(1) equality.
#[derive(Clone, Copy, Eq)]
pub struct Symbol {
    s: &'static str,
}

impl Symbol {
    /// Retrieves the address of the backing string.
    pub fn addr(self) -> usize {
        self.s.as_ptr() as usize
    }

    pub fn as_str(self) -> &'static str {
        self.s
    }

    /// Number of distinct strings interned so far in this process.
    pub fn count() -> usize {
        SYMBOL_HEAP
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl Debug for Symbol {
    fn fmt(&self, fmt: &mut Formatter) -> FmtResult {
        Debug::fmt(self.s, fmt)
    }
}

impl Display for Symbol {
    fn fmt(&self, fmt: &mut Formatter) -> FmtResult {
        fmt.write_str(self.s)
    }
}

impl Deref for Symbol {
    type Target = str;
    fn deref(&self) -> &str {
        self.s
    }
}

impl<S: AsRef<str>> From<S> for Symbol {
    fn from(s: S) -> Symbol {
        let s = s.as_ref();
        let mut heap = SYMBOL_HEAP
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let s = match heap.get(s) {
            Some(interned) => *interned,
            None => {
                let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
                heap.insert(leaked);
                leaked
            }
        };
        Symbol { s }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state)
    }
}

/// Orders by string contents so that listings are stable across runs.
impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.s.cmp(other.s)
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
