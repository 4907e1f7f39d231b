use crate::{error::ParseComparatorError, parser, AttributeStore, Symbol};
use std::{
    any::type_name,
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use tracing::warn;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum CompareOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }

    /// Whether the operator needs an ordering, as opposed to only equality.
    pub fn is_ordering(self) -> bool {
        !matches!(self, Self::Equal | Self::NotEqual)
    }
}

impl Display for CompareOp {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(self.symbol())
    }
}

impl FromStr for CompareOp {
    type Err = ParseComparatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parser::compare_op(s.trim()) {
            Ok(("", op)) => Ok(op),
            _ => Err(ParseComparatorError::Syntax(s.to_owned())),
        }
    }
}

/// Operator capabilities of a type that can be held by a [`Comparator`].
///
/// Both capabilities are off by default. An operator that the type does not
/// support makes the comparator evaluate to `false` instead of failing.
/// Use [`comparable_eq!`](crate::comparable_eq), [`comparable_ord!`](crate::comparable_ord)
/// or [`comparable_none!`](crate::comparable_none) to implement it for your own types.
///
/// The degradation to `false` only covers operators: a type with no `Comparable`
/// impl at all cannot be put in a [`Comparator`] and is rejected at compile time,
/// even if it implements `PartialEq`.
pub trait Comparable: 'static {
    const SUPPORTS_EQ: bool = false;
    const SUPPORTS_ORD: bool = false;

    fn equals(&self, _other: &Self) -> bool {
        false
    }

    /// `None` when unsupported or when the values are unordered (e.g. NaN).
    fn partial_order(&self, _other: &Self) -> Option<Ordering> {
        None
    }
}

/// Implements [`Comparable`] with equality operators only, from `PartialEq`.
#[macro_export]
macro_rules! comparable_eq {
    ($($ty: ty),* $(,)?) => {
        $(impl $crate::Comparable for $ty {
            const SUPPORTS_EQ: bool = true;

            fn equals(&self, other: &Self) -> bool {
                self == other
            }
        })*
    };
}

/// Implements [`Comparable`] with every operator, from `PartialEq` and `PartialOrd`.
#[macro_export]
macro_rules! comparable_ord {
    ($($ty: ty),* $(,)?) => {
        $(impl $crate::Comparable for $ty {
            const SUPPORTS_EQ: bool = true;
            const SUPPORTS_ORD: bool = true;

            fn equals(&self, other: &Self) -> bool {
                self == other
            }

            fn partial_order(&self, other: &Self) -> Option<::std::cmp::Ordering> {
                ::std::cmp::PartialOrd::partial_cmp(self, other)
            }
        })*
    };
}

/// Implements [`Comparable`] for types that support no operator at all.
#[macro_export]
macro_rules! comparable_none {
    ($($ty: ty),* $(,)?) => {
        $(impl $crate::Comparable for $ty {})*
    };
}

comparable_ord!(
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    bool,
    char,
    (),
    String,
    &'static str,
    Symbol,
);

/// A relational predicate over one entry of an [`AttributeStore`]:
/// `store[key] op literal`.
///
/// ```
/// # use agent_mind::{AttributeStore, Comparator, CompareOp};
/// let low_hp = Comparator::new("hp", CompareOp::Less, 10);
/// let mut store = AttributeStore::default();
/// assert!(!low_hp.evaluate(&store));
/// store.set("hp", 5);
/// assert!(low_hp.evaluate(&store));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Comparator<T> {
    key: Symbol,
    op: CompareOp,
    literal: T,
}

impl<T: Comparable> Comparator<T> {
    pub fn new(key: impl Into<Symbol>, op: CompareOp, literal: T) -> Self {
        Self {
            key: key.into(),
            op,
            literal,
        }
    }

    pub fn key(&self) -> Symbol {
        self.key
    }

    pub fn op(&self) -> CompareOp {
        self.op
    }

    pub fn literal(&self) -> &T {
        &self.literal
    }

    /// Whether `T` supports `op` at all. Fixed per type.
    pub fn supports(op: CompareOp) -> bool {
        if op.is_ordering() {
            T::SUPPORTS_ORD
        } else {
            T::SUPPORTS_EQ
        }
    }

    /// Compares the stored value against the literal.
    ///
    /// Absent keys, keys bound to another type and operators that `T` does not
    /// support all evaluate to `false`.
    pub fn evaluate(&self, store: &AttributeStore) -> bool {
        let stored = match store.try_get::<T>(self.key) {
            Some(stored) => stored,
            None => {
                if store.contains(self.key) {
                    warn!(
                        key = %self.key,
                        expected = type_name::<T>(),
                        stored = store.type_name(self.key).unwrap_or("?"),
                        "comparator key bound to another type"
                    );
                }
                return false;
            }
        };
        if !Self::supports(self.op) {
            return false;
        }
        let ordering = || stored.partial_order(&self.literal);
        match self.op {
            CompareOp::Equal => stored.equals(&self.literal),
            CompareOp::NotEqual => !stored.equals(&self.literal),
            CompareOp::Less => ordering() == Some(Ordering::Less),
            CompareOp::LessEqual => {
                matches!(ordering(), Some(Ordering::Less | Ordering::Equal))
            }
            CompareOp::Greater => ordering() == Some(Ordering::Greater),
            CompareOp::GreaterEqual => {
                matches!(ordering(), Some(Ordering::Greater | Ordering::Equal))
            }
        }
    }

    /// Turns the comparator into a predicate for [`ConditionNode`](crate::ConditionNode).
    pub fn predicate(self) -> impl FnMut(&AttributeStore) -> bool + 'static {
        move |store: &AttributeStore| self.evaluate(store)
    }
}

impl<T: Comparable + FromStr> Comparator<T> {
    /// Builds a comparator from text like `hp <= 10`. The literal is parsed as `T`;
    /// surrounding double quotes are stripped first.
    pub fn parse(src: &str) -> Result<Self, ParseComparatorError> {
        let expr = parser::parse_comparison(src)
            .ok_or_else(|| ParseComparatorError::Syntax(src.to_owned()))?;
        let literal = expr
            .literal
            .parse::<T>()
            .map_err(|_| ParseComparatorError::Literal {
                literal: expr.literal.to_owned(),
                ty: type_name::<T>(),
            })?;
        Ok(Self::new(expr.key, expr.op, literal))
    }
}

impl<T: Comparable + FromStr> FromStr for Comparator<T> {
    type Err = ParseComparatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T: Display> Display for Comparator<T> {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{} {} {}", self.key, self.op, self.literal)
    }
}
