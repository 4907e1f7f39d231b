use crate::{NodeId, Status};
use std::collections::HashMap;

/// Per-agent execution memory of a behavior tree: the last known status of every
/// node that has been executed.
///
/// The tree itself keeps no run status, so the same tree can be driven with
/// different contexts, and a context can be kept around for as many frames as a
/// node stays [`Status::Running`].
///
/// Nodes that need to remember progress across a suspension (such as the iteration
/// of a repeater) keep it in a per-node counter here as well. A counter lives as
/// long as its node stays running: it is cleared when the node starts afresh,
/// finishes or is reset.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Context {
    statuses: HashMap<NodeId, Status>,
    counters: HashMap<NodeId, usize>,
    current: Option<NodeId>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last recorded status of `id`, [`Status::Invalid`] if it has never run.
    pub fn status(&self, id: NodeId) -> Status {
        self.statuses.get(&id).copied().unwrap_or_default()
    }

    pub fn set_status(&mut self, id: NodeId, status: Status) {
        if status == Status::Invalid {
            // Absent and Invalid are equivalent; keep the map small.
            self.statuses.remove(&id);
        } else {
            self.statuses.insert(id, status);
        }
    }

    pub fn is_running(&self, id: NodeId) -> bool {
        self.status(id) == Status::Running
    }

    /// Progress counter of `id`, 0 if none is kept.
    pub fn counter(&self, id: NodeId) -> usize {
        self.counters.get(&id).copied().unwrap_or(0)
    }

    pub fn set_counter(&mut self, id: NodeId, count: usize) {
        if count == 0 {
            self.counters.remove(&id);
        } else {
            self.counters.insert(id, count);
        }
    }

    /// The node whose `tick` is in progress, if any.
    ///
    /// While a node ticks its children this is briefly the child's id; it is the
    /// ticking node's own id again as soon as the child execution returns.
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Makes `id` the current node and returns the previous one, to be restored
    /// with [`leave`](Self::leave).
    pub(crate) fn enter(&mut self, id: NodeId) -> Option<NodeId> {
        self.current.replace(id)
    }

    pub(crate) fn leave(&mut self, outer: Option<NodeId>) {
        self.current = outer;
    }

    /// Forgets every recorded status and counter.
    pub fn clear(&mut self) {
        self.statuses.clear();
        self.counters.clear();
    }

    /// Number of nodes with a status other than [`Status::Invalid`].
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
