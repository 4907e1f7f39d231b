use tracing::debug;

use crate::{AttributeStore, Context, Status, TreeNode};

/// One decision maker: a behavior tree together with the context and attribute
/// store it runs against.
///
/// ```
/// # use agent_mind::*;
/// let mut agent = Agent::new(TreeNode::action("count", |store| {
///     *store.get_mut::<u32>("ticks") += 1;
///     Status::Success
/// }));
/// agent.store_mut().set("ticks", 0u32);
/// agent.update();
/// agent.update();
/// assert_eq!(*agent.store().get::<u32>("ticks"), 2);
/// ```
pub struct Agent {
    tree: TreeNode,
    context: Context,
    store: AttributeStore,
}

impl Agent {
    pub fn new(tree: TreeNode) -> Self {
        Self::with_store(tree, AttributeStore::default())
    }

    pub fn with_store(tree: TreeNode, store: AttributeStore) -> Self {
        Self {
            tree,
            context: Context::default(),
            store,
        }
    }

    /// Runs one cycle of the tree.
    pub fn update(&mut self) -> Status {
        self.tree.execute(&mut self.context, &mut self.store)
    }

    /// Discards all progress of the tree. The attribute store is kept.
    pub fn reset(&mut self) {
        debug!(root = %self.tree.id(), "resetting agent tree");
        self.tree.reset(&mut self.context);
    }

    /// Status of the root after the last update.
    pub fn status(&self) -> Status {
        self.context.status(self.tree.id())
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn store(&self) -> &AttributeStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut AttributeStore {
        &mut self.store
    }

    /// Status dump of the tree, for debugging.
    pub fn describe(&self) -> String {
        self.tree.describe(&self.context)
    }
}
