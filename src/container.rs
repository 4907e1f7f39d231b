use std::fmt::Write;

use tracing::trace;

use crate::{
    builder::TreeBuilder,
    error::{AddChildError, AddChildResult},
    nodes::ActionNode,
    AttributeStore, BehaviorNode, Context, NodeId, NumChildren, Status,
};

/// A node of a behavior tree: the node logic, its identity and its children.
pub struct TreeNode {
    id: NodeId,
    /// Name shown in logs and [`TreeNode::describe`]
    name: String,
    node: Box<dyn BehaviorNode>,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, node: impl BehaviorNode + 'static) -> Self {
        Self::new_raw(name, Box::new(node))
    }

    pub fn new_raw(name: impl Into<String>, node: Box<dyn BehaviorNode>) -> Self {
        Self {
            id: NodeId::next(),
            name: name.into(),
            node,
            children: vec![],
        }
    }

    /// Leaf node running `action` on every tick.
    pub fn action(
        name: impl Into<String>,
        action: impl FnMut(&mut AttributeStore) -> Status + 'static,
    ) -> Self {
        Self::new(name, ActionNode::new(action))
    }

    pub fn sequence(children: Vec<TreeNode>) -> Self {
        TreeBuilder::default().sequence(children)
    }

    pub fn selector(children: Vec<TreeNode>) -> Self {
        TreeBuilder::default().selector(children)
    }

    pub fn inverter(child: TreeNode) -> Self {
        TreeBuilder::default().inverter(child)
    }

    pub fn repeater(n: usize, child: TreeNode) -> Self {
        TreeBuilder::default().repeater(n, child)
    }

    pub fn always_succeed(child: TreeNode) -> Self {
        TreeBuilder::default().always_succeed(child)
    }

    pub fn until_fail(child: TreeNode) -> Self {
        TreeBuilder::default().until_fail(child)
    }

    /// See [`ConditionNode`](crate::ConditionNode) for how the child's result is treated.
    pub fn condition(
        predicate: impl FnMut(&AttributeStore) -> bool + 'static,
        child: TreeNode,
        negate: bool,
    ) -> Self {
        TreeBuilder::default().condition(predicate, child, negate)
    }

    /// Appends `children` without checking [`BehaviorNode::max_children`].
    pub(crate) fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn add_child(&mut self, child: TreeNode) -> AddChildResult {
        if NumChildren::Finite(self.children.len()) < self.node.max_children() {
            self.children.push(child);
            Ok(())
        } else {
            Err(AddChildError::TooManyNodes)
        }
    }

    /// Runs one evaluation of this node.
    ///
    /// `initialize` is called unless the node was left [`Status::Running`] by the
    /// previous execution with `ctx`, and `end` is called unless the node returns
    /// [`Status::Running`] now. The returned status is recorded in `ctx`, and the
    /// node's counter in `ctx` is dropped unless it is still running.
    pub fn execute(&mut self, ctx: &mut Context, store: &mut AttributeStore) -> Status {
        let resuming = ctx.is_running(self.id);
        if !resuming {
            ctx.set_counter(self.id, 0);
            self.node.initialize(ctx, store);
        }
        let outer = ctx.enter(self.id);
        let status = self.node.tick(&mut self.children, ctx, store);
        ctx.leave(outer);
        if status != Status::Running {
            ctx.set_counter(self.id, 0);
            self.node.end(status, ctx, store);
        }
        ctx.set_status(self.id, status);
        trace!(node = %self.id, name = %self.name, resuming, %status, "executed");
        status
    }

    /// Marks this node and its whole subtree [`Status::Invalid`], so that the next
    /// execution starts from scratch.
    pub fn reset(&mut self, ctx: &mut Context) {
        ctx.set_status(self.id, Status::Invalid);
        ctx.set_counter(self.id, 0);
        for child in &mut self.children {
            child.reset(ctx);
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Depth first search for the node with `id` in this subtree.
    pub fn find(&self, id: NodeId) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Indented listing of the subtree with the statuses recorded in `ctx`.
    pub fn describe(&self, ctx: &Context) -> String {
        let mut out = String::new();
        self.describe_recurse(ctx, 0, &mut out);
        out
    }

    fn describe_recurse(&self, ctx: &Context, depth: usize, out: &mut String) {
        // Writing to a String does not fail
        let _ = writeln!(
            out,
            "{:indent$}{} {}: {}",
            "",
            self.name,
            self.id,
            ctx.status(self.id),
            indent = depth * 2
        );
        for child in &self.children {
            child.describe_recurse(ctx, depth + 1, out);
        }
    }
}

impl std::fmt::Debug for TreeNode {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.debug_struct("TreeNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("children", &self.children)
            .finish()
    }
}
