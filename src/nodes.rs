use tracing::debug;

use crate::{
    AttributeStore, BehaviorNode, Context, ExhaustedPolicy, InverterRunningPolicy, NumChildren,
    Status, TreeNode,
};

fn reset_all(children: &mut [TreeNode], ctx: &mut Context) {
    for child in children {
        child.reset(ctx);
    }
}

/// Ticks children in order until one fails or keeps running.
///
/// Children already recorded as `Success` are skipped, so a sequence suspended by
/// a running child resumes at that child. When the sequence completes, or a child
/// fails, every child is reset and the next execution starts from the first child.
pub struct SequenceNode;

impl BehaviorNode for SequenceNode {
    fn tick(
        &mut self,
        children: &mut [TreeNode],
        ctx: &mut Context,
        store: &mut AttributeStore,
    ) -> Status {
        for i in 0..children.len() {
            if ctx.status(children[i].id()) == Status::Success {
                continue;
            }
            match children[i].execute(ctx, store) {
                Status::Running => return Status::Running,
                Status::Failure => {
                    reset_all(children, ctx);
                    return Status::Failure;
                }
                // A child reporting Invalid has no outcome yet; move on.
                Status::Success | Status::Invalid => (),
            }
        }
        reset_all(children, ctx);
        Status::Success
    }

    fn max_children(&self) -> NumChildren {
        NumChildren::Infinite
    }
}

/// Ticks children in order until one does not fail, and returns its status.
///
/// All the other children are reset at that point, discarding the progress of any
/// of them that was running. If every child fails, the children are reset or kept
/// according to [`ExhaustedPolicy`].
pub struct SelectorNode {
    exhausted: ExhaustedPolicy,
}

impl SelectorNode {
    pub fn new(exhausted: ExhaustedPolicy) -> Self {
        Self { exhausted }
    }
}

impl Default for SelectorNode {
    fn default() -> Self {
        Self::new(ExhaustedPolicy::default())
    }
}

impl BehaviorNode for SelectorNode {
    fn tick(
        &mut self,
        children: &mut [TreeNode],
        ctx: &mut Context,
        store: &mut AttributeStore,
    ) -> Status {
        for i in 0..children.len() {
            let status = children[i].execute(ctx, store);
            if status != Status::Failure {
                for (j, other) in children.iter_mut().enumerate() {
                    if j != i {
                        other.reset(ctx);
                    }
                }
                return status;
            }
        }
        if self.exhausted == ExhaustedPolicy::ResetAll {
            reset_all(children, ctx);
        }
        Status::Failure
    }

    fn max_children(&self) -> NumChildren {
        NumChildren::Infinite
    }
}

/// Swaps `Success` and `Failure` of its child.
pub struct InverterNode {
    running: InverterRunningPolicy,
}

impl InverterNode {
    pub fn new(running: InverterRunningPolicy) -> Self {
        Self { running }
    }
}

impl Default for InverterNode {
    fn default() -> Self {
        Self::new(InverterRunningPolicy::default())
    }
}

impl BehaviorNode for InverterNode {
    fn tick(
        &mut self,
        children: &mut [TreeNode],
        ctx: &mut Context,
        store: &mut AttributeStore,
    ) -> Status {
        let Some(child) = children.first_mut() else {
            return Status::Failure;
        };
        match child.execute(ctx, store) {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => match self.running {
                InverterRunningPolicy::Propagate => Status::Running,
                InverterRunningPolicy::Invalidate => Status::Invalid,
            },
            Status::Invalid => Status::Invalid,
        }
    }

    fn max_children(&self) -> NumChildren {
        NumChildren::Finite(1)
    }
}

/// Runs its child to completion `n` times, resetting it after every success.
/// Stops early and returns the child's status when it is `Running` or `Failure`;
/// returns `Success` once the child has completed `n` times.
///
/// Completed runs are counted in the [`Context`], so a repeater suspended by a
/// running child carries on from the same iteration when it is resumed.
pub struct RepeaterNode {
    n: usize,
}

impl RepeaterNode {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    pub fn n(&self) -> usize {
        self.n
    }
}

impl BehaviorNode for RepeaterNode {
    fn tick(
        &mut self,
        children: &mut [TreeNode],
        ctx: &mut Context,
        store: &mut AttributeStore,
    ) -> Status {
        let Some(child) = children.first_mut() else {
            return Status::Failure;
        };
        let me = ctx.current();
        let mut completed = me.map_or(0, |id| ctx.counter(id));
        while completed < self.n {
            match child.execute(ctx, store) {
                status @ (Status::Running | Status::Failure) => {
                    debug!(completed, n = self.n, %status, "repeater stopped early");
                    if let Some(id) = me {
                        ctx.set_counter(id, completed);
                    }
                    return status;
                }
                Status::Success | Status::Invalid => {
                    child.reset(ctx);
                    completed += 1;
                }
            }
        }
        Status::Success
    }

    fn max_children(&self) -> NumChildren {
        NumChildren::Finite(1)
    }
}

/// Ticks its child and returns `Success` whatever the child returned.
///
/// A running child is not reset, so it resumes on the next execution.
pub struct AlwaysSucceedNode;

impl BehaviorNode for AlwaysSucceedNode {
    fn tick(
        &mut self,
        children: &mut [TreeNode],
        ctx: &mut Context,
        store: &mut AttributeStore,
    ) -> Status {
        if let Some(child) = children.first_mut() {
            child.execute(ctx, store);
        }
        Status::Success
    }

    fn max_children(&self) -> NumChildren {
        NumChildren::Finite(1)
    }
}

/// Returns `Failure` if its child fails, `Success` otherwise.
pub struct UntilFailNode;

impl BehaviorNode for UntilFailNode {
    fn tick(
        &mut self,
        children: &mut [TreeNode],
        ctx: &mut Context,
        store: &mut AttributeStore,
    ) -> Status {
        let Some(child) = children.first_mut() else {
            return Status::Failure;
        };
        match child.execute(ctx, store) {
            Status::Failure => Status::Failure,
            _ => Status::Success,
        }
    }

    fn max_children(&self) -> NumChildren {
        NumChildren::Finite(1)
    }
}

/// A gate: the child is executed only when the predicate, XOR `negate`, holds.
///
/// The condition's own status tells whether the gate was open (`Success`) or
/// closed (`Failure`). The status returned by the child is deliberately ignored:
/// the child runs as a side effect of an open gate, so a failing child behind an
/// open gate still yields `Success`.
pub struct ConditionNode {
    predicate: Box<dyn FnMut(&AttributeStore) -> bool>,
    negate: bool,
}

impl ConditionNode {
    pub fn new(predicate: impl FnMut(&AttributeStore) -> bool + 'static, negate: bool) -> Self {
        Self {
            predicate: Box::new(predicate),
            negate,
        }
    }

    pub fn is_negated(&self) -> bool {
        self.negate
    }
}

impl BehaviorNode for ConditionNode {
    fn tick(
        &mut self,
        children: &mut [TreeNode],
        ctx: &mut Context,
        store: &mut AttributeStore,
    ) -> Status {
        let open = (self.predicate)(store) != self.negate;
        if !open {
            return Status::Failure;
        }
        if let Some(child) = children.first_mut() {
            child.execute(ctx, store);
        }
        Status::Success
    }

    fn max_children(&self) -> NumChildren {
        NumChildren::Finite(1)
    }
}

/// Leaf node running a closure over the attribute store.
pub struct ActionNode {
    action: Box<dyn FnMut(&mut AttributeStore) -> Status>,
}

impl ActionNode {
    pub fn new(action: impl FnMut(&mut AttributeStore) -> Status + 'static) -> Self {
        Self {
            action: Box::new(action),
        }
    }
}

impl BehaviorNode for ActionNode {
    fn tick(
        &mut self,
        _children: &mut [TreeNode],
        _ctx: &mut Context,
        store: &mut AttributeStore,
    ) -> Status {
        (self.action)(store)
    }
}
