//! # agent-mind
//!
//! The decision making core of game agents: a typed attribute store
//! (blackboard), comparators over its entries, and a resumable behavior tree
//! that reads and reacts to it.
//!
//!
//! ## Attribute store
//!
//! An [`AttributeStore`] maps keys to values of any `'static` type. A key is bound
//! to a concrete type by its first `set`, and reading it back as another type never
//! returns a value.
//!
//! ```rust
//! # use agent_mind::AttributeStore;
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! struct Position {
//!     x: f32,
//!     y: f32,
//! }
//!
//! let mut store = AttributeStore::default();
//! store.set("hp", 100i32);
//! store.set("target", Position { x: 3., y: 4. });
//!
//! assert_eq!(*store.get::<i32>("hp"), 100);
//! assert!(store.try_get::<u32>("hp").is_none());
//! assert!(store.has_key::<Position>("target"));
//! ```
//!
//! `get` panics on a missing key or a type mismatch: it is a bug in the agent, not
//! a decision outcome. Use `try_get` when absence is expected.
//!
//!
//! ## Comparators
//!
//! A [`Comparator`] compares one store entry against a literal with one of six
//! relational operators. Which operators a type supports is declared once with the
//! [`Comparable`] trait; an unsupported operator evaluates to `false`.
//!
//! ```rust
//! # use agent_mind::*;
//! let mut store = AttributeStore::default();
//! store.set("hp", 5i32);
//!
//! let low_hp = Comparator::new("hp", CompareOp::Less, 10i32);
//! assert!(low_hp.evaluate(&store));
//!
//! let same: Comparator<i32> = "hp <= 10".parse().unwrap();
//! assert!(same.evaluate(&store));
//! ```
//!
//!
//! ## Behavior tree
//!
//! A tree is made of [`TreeNode`]s. Each one wraps a [`BehaviorNode`]
//! implementation and owns its children. The run status of every node is not kept
//! in the tree but in a [`Context`], which the caller passes to each
//! [`TreeNode::execute`] together with the attribute store.
//! A node returning [`Status::Running`] is resumed, not restarted, the next time it
//! is executed with the same context.
//!
//! ```rust
//! # use agent_mind::*;
//! let mut root = TreeNode::selector(vec![
//!     TreeNode::condition(
//!         Comparator::new("hp", CompareOp::Less, 10i32).predicate(),
//!         TreeNode::action("flee", |store| {
//!             store.set("fleeing", true);
//!             Status::Success
//!         }),
//!         false,
//!     ),
//!     TreeNode::action("patrol", |_| Status::Running),
//! ]);
//!
//! let mut ctx = Context::default();
//! let mut store = AttributeStore::default();
//! store.set("hp", 50i32);
//!
//! assert_eq!(root.execute(&mut ctx, &mut store), Status::Running);
//! store.set("hp", 3i32);
//! assert_eq!(root.execute(&mut ctx, &mut store), Status::Success);
//! assert!(*store.get::<bool>("fleeing"));
//! ```
//!
//! ### How to define your own node
//!
//! Implement [`BehaviorNode`] for your type. Leaves ignore the `children` slice.
//!
//! ```rust
//! # use agent_mind::*;
//! struct CountDown;
//!
//! impl BehaviorNode for CountDown {
//!     fn initialize(&mut self, _ctx: &Context, store: &mut AttributeStore) {
//!         store.set("remaining", 3u32);
//!     }
//!
//!     fn tick(
//!         &mut self,
//!         _children: &mut [TreeNode],
//!         _ctx: &mut Context,
//!         store: &mut AttributeStore,
//!     ) -> Status {
//!         let remaining = store.get_mut::<u32>("remaining");
//!         *remaining -= 1;
//!         if *remaining == 0 {
//!             Status::Success
//!         } else {
//!             Status::Running
//!         }
//!     }
//! }
//!
//! let mut node = TreeNode::new("CountDown", CountDown);
//! let (mut ctx, mut store) = (Context::default(), AttributeStore::default());
//! assert_eq!(node.execute(&mut ctx, &mut store), Status::Running);
//! assert_eq!(node.execute(&mut ctx, &mut store), Status::Running);
//! assert_eq!(node.execute(&mut ctx, &mut store), Status::Success);
//! ```
//!
//! ### Optimizing key access by caching symbols
//!
//! Keys are interned into [`Symbol`]s. Hot keys can be cached with `Lazy`,
//! re-exported from `once_cell`.
//!
//! ```rust
//! use agent_mind::{AttributeStore, Lazy, Symbol};
//!
//! static HP: Lazy<Symbol> = Lazy::new(|| "hp".into());
//!
//! let mut store = AttributeStore::default();
//! store.set(*HP, 10i32);
//! assert_eq!(*store.get::<i32>("hp"), 10);
//! ```

mod agent;
mod attributes;
mod builder;
mod comparator;
mod config;
mod container;
mod context;
pub mod error;
mod nodes;
pub mod parser;
mod symbol;

use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

pub use crate::agent::Agent;
pub use crate::attributes::AttributeStore;
pub use crate::builder::TreeBuilder;
pub use crate::comparator::{CompareOp, Comparable, Comparator};
pub use crate::config::{EngineConfig, ExhaustedPolicy, InverterRunningPolicy};
pub use crate::container::TreeNode;
pub use crate::context::Context;
pub use crate::nodes::{
    ActionNode, AlwaysSucceedNode, ConditionNode, InverterNode, RepeaterNode, SelectorNode,
    SequenceNode, UntilFailNode,
};
pub use crate::symbol::Symbol;
pub use ::once_cell::sync::Lazy;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Default)]
pub enum Status {
    /// Not run yet, or reset
    #[default]
    Invalid,
    /// The node should be resumed, not restarted, in the next tick
    Running,
    Success,
    Failure,
}

impl Status {
    /// Success or Failure.
    pub fn is_done(self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}

impl Display for Status {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        let s = match self {
            Self::Invalid => "Invalid",
            Self::Running => "Running",
            Self::Success => "Success",
            Self::Failure => "Failure",
        };
        fmt.write_str(s)
    }
}

/// Identity of a node, unique for the lifetime of the process.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "#{}", self.0)
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum NumChildren {
    Finite(usize),
    Infinite,
}

impl PartialOrd for NumChildren {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(match (self, other) {
            (NumChildren::Finite(_), NumChildren::Infinite) => std::cmp::Ordering::Less,
            (NumChildren::Infinite, NumChildren::Finite(_)) => std::cmp::Ordering::Greater,
            (NumChildren::Finite(lhs), NumChildren::Finite(rhs)) => lhs.cmp(rhs),
            (NumChildren::Infinite, NumChildren::Infinite) => return None,
        })
    }
}

/// The node specific logic of a behavior tree node.
///
/// The bookkeeping around it (hooks and recording the status in the [`Context`])
/// is done by [`TreeNode::execute`].
pub trait BehaviorNode {
    /// Called before `tick` when the node starts fresh, i.e. it was not
    /// [`Status::Running`] after its previous execution.
    fn initialize(&mut self, _ctx: &Context, _store: &mut AttributeStore) {}

    fn tick(
        &mut self,
        children: &mut [TreeNode],
        ctx: &mut Context,
        store: &mut AttributeStore,
    ) -> Status;

    /// Called after `tick` whenever it returned something other than
    /// [`Status::Running`].
    fn end(&mut self, _status: Status, _ctx: &Context, _store: &mut AttributeStore) {}

    fn max_children(&self) -> NumChildren {
        NumChildren::Finite(0)
    }
}
