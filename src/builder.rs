use crate::{
    nodes::{
        AlwaysSucceedNode, ConditionNode, InverterNode, RepeaterNode, SelectorNode, SequenceNode,
        UntilFailNode,
    },
    AttributeStore, EngineConfig, TreeNode,
};

/// Constructs the built-in nodes with the policies of an [`EngineConfig`].
///
/// The `TreeNode::sequence`, `TreeNode::inverter`, ... shorthands use
/// `TreeBuilder::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder {
    config: EngineConfig,
}

impl TreeBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sequence(&self, children: Vec<TreeNode>) -> TreeNode {
        TreeNode::new("Sequence", SequenceNode).with_children(children)
    }

    pub fn selector(&self, children: Vec<TreeNode>) -> TreeNode {
        TreeNode::new("Selector", SelectorNode::new(self.config.selector_exhausted))
            .with_children(children)
    }

    pub fn inverter(&self, child: TreeNode) -> TreeNode {
        TreeNode::new("Inverter", InverterNode::new(self.config.inverter_running))
            .with_children(vec![child])
    }

    pub fn repeater(&self, n: usize, child: TreeNode) -> TreeNode {
        TreeNode::new("Repeater", RepeaterNode::new(n)).with_children(vec![child])
    }

    pub fn always_succeed(&self, child: TreeNode) -> TreeNode {
        TreeNode::new("AlwaysSucceed", AlwaysSucceedNode).with_children(vec![child])
    }

    pub fn until_fail(&self, child: TreeNode) -> TreeNode {
        TreeNode::new("UntilFail", UntilFailNode).with_children(vec![child])
    }

    pub fn condition(
        &self,
        predicate: impl FnMut(&AttributeStore) -> bool + 'static,
        child: TreeNode,
        negate: bool,
    ) -> TreeNode {
        TreeNode::new("Condition", ConditionNode::new(predicate, negate)).with_children(vec![child])
    }
}
