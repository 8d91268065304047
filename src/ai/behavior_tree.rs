//! Behavior tree engine
//!
//! Trees are plain data: composites and a decorator over an application
//! defined leaf type. A single `evaluate` walks the tree and hands each
//! leaf it reaches to a [`LeafRunner`], which owns whatever state the
//! leaves read and mutate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeStatus {
    Success,
    Failure,
    Running,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BehaviorNode<L> {
    /// Children in order; stops at the first non-Success
    Sequence(Vec<BehaviorNode<L>>),
    /// Children in order; stops at the first non-Failure
    Selector(Vec<BehaviorNode<L>>),
    /// Swaps Success and Failure, passes Running through
    Inverter(Box<BehaviorNode<L>>),
    Leaf(L),
}

/// Executes leaves on behalf of the engine
pub trait LeafRunner<L> {
    fn run(&mut self, leaf: &L) -> NodeStatus;
}

impl<L> BehaviorNode<L> {
    pub fn sequence(children: impl IntoIterator<Item = BehaviorNode<L>>) -> Self {
        BehaviorNode::Sequence(children.into_iter().collect())
    }

    pub fn selector(children: impl IntoIterator<Item = BehaviorNode<L>>) -> Self {
        BehaviorNode::Selector(children.into_iter().collect())
    }

    pub fn inverter(child: BehaviorNode<L>) -> Self {
        BehaviorNode::Inverter(Box::new(child))
    }

    pub fn leaf(leaf: L) -> Self {
        BehaviorNode::Leaf(leaf)
    }

    pub fn evaluate<R: LeafRunner<L> + ?Sized>(&self, runner: &mut R) -> NodeStatus {
        match self {
            BehaviorNode::Sequence(children) => {
                for child in children {
                    let status = child.evaluate(runner);
                    if status != NodeStatus::Success {
                        return status;
                    }
                }
                NodeStatus::Success
            }
            BehaviorNode::Selector(children) => {
                for child in children {
                    let status = child.evaluate(runner);
                    if status != NodeStatus::Failure {
                        return status;
                    }
                }
                NodeStatus::Failure
            }
            BehaviorNode::Inverter(child) => match child.evaluate(runner) {
                NodeStatus::Success => NodeStatus::Failure,
                NodeStatus::Failure => NodeStatus::Success,
                NodeStatus::Running => NodeStatus::Running,
            },
            BehaviorNode::Leaf(leaf) => runner.run(leaf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Leaf returns a fixed status and the runner records the visit
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Fixed(&'static str, NodeStatus);

    #[derive(Default)]
    struct Recorder {
        visited: Vec<&'static str>,
    }

    impl LeafRunner<Fixed> for Recorder {
        fn run(&mut self, leaf: &Fixed) -> NodeStatus {
            self.visited.push(leaf.0);
            leaf.1
        }
    }

    fn ok(name: &'static str) -> BehaviorNode<Fixed> {
        BehaviorNode::leaf(Fixed(name, NodeStatus::Success))
    }

    fn fail(name: &'static str) -> BehaviorNode<Fixed> {
        BehaviorNode::leaf(Fixed(name, NodeStatus::Failure))
    }

    fn running(name: &'static str) -> BehaviorNode<Fixed> {
        BehaviorNode::leaf(Fixed(name, NodeStatus::Running))
    }

    #[test]
    fn test_sequence_short_circuits_on_failure() {
        let tree = BehaviorNode::sequence([ok("a"), fail("b"), ok("c")]);
        let mut runner = Recorder::default();
        assert_eq!(tree.evaluate(&mut runner), NodeStatus::Failure);
        assert_eq!(runner.visited, vec!["a", "b"]);
    }

    #[test]
    fn test_sequence_all_succeed() {
        let tree = BehaviorNode::sequence([ok("a"), ok("b")]);
        let mut runner = Recorder::default();
        assert_eq!(tree.evaluate(&mut runner), NodeStatus::Success);
        assert_eq!(runner.visited, vec!["a", "b"]);
    }

    #[test]
    fn test_sequence_stops_on_running() {
        let tree = BehaviorNode::sequence([running("a"), ok("b")]);
        let mut runner = Recorder::default();
        assert_eq!(tree.evaluate(&mut runner), NodeStatus::Running);
        assert_eq!(runner.visited, vec!["a"]);
    }

    #[test]
    fn test_selector_returns_first_success() {
        let tree = BehaviorNode::selector([fail("a"), ok("b"), ok("c")]);
        let mut runner = Recorder::default();
        assert_eq!(tree.evaluate(&mut runner), NodeStatus::Success);
        assert_eq!(runner.visited, vec!["a", "b"]);
    }

    #[test]
    fn test_selector_all_fail() {
        let tree = BehaviorNode::selector([fail("a"), fail("b")]);
        let mut runner = Recorder::default();
        assert_eq!(tree.evaluate(&mut runner), NodeStatus::Failure);
    }

    #[test]
    fn test_selector_stops_on_running() {
        let tree = BehaviorNode::selector([fail("a"), running("b"), ok("c")]);
        let mut runner = Recorder::default();
        assert_eq!(tree.evaluate(&mut runner), NodeStatus::Running);
        assert_eq!(runner.visited, vec!["a", "b"]);
    }

    #[test]
    fn test_inverter() {
        let mut runner = Recorder::default();
        assert_eq!(BehaviorNode::inverter(ok("a")).evaluate(&mut runner), NodeStatus::Failure);
        assert_eq!(BehaviorNode::inverter(fail("b")).evaluate(&mut runner), NodeStatus::Success);
        assert_eq!(BehaviorNode::inverter(running("c")).evaluate(&mut runner), NodeStatus::Running);
    }

    #[test]
    fn test_empty_composites() {
        let mut runner = Recorder::default();
        assert_eq!(BehaviorNode::<Fixed>::sequence([]).evaluate(&mut runner), NodeStatus::Success);
        assert_eq!(BehaviorNode::<Fixed>::selector([]).evaluate(&mut runner), NodeStatus::Failure);
    }

    #[test]
    fn test_nested_fallback() {
        let tree = BehaviorNode::selector([
            BehaviorNode::sequence([ok("guard"), fail("act")]),
            BehaviorNode::sequence([BehaviorNode::inverter(fail("not")), ok("fallback")]),
        ]);
        let mut runner = Recorder::default();
        assert_eq!(tree.evaluate(&mut runner), NodeStatus::Success);
        assert_eq!(runner.visited, vec!["guard", "act", "not", "fallback"]);
    }
}
