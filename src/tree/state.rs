use crate::tree::path::NodePath;
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which branches start out expanded before any toggle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpandPolicy {
    /// Direct children of the record (depth 0) are expanded, deeper branches collapsed
    #[default]
    RootExpanded,
    AllCollapsed,
    AllExpanded,
}

impl ExpandPolicy {
    pub fn default_expanded(self, depth: usize) -> bool {
        match self {
            ExpandPolicy::RootExpanded => depth == 0,
            ExpandPolicy::AllCollapsed => false,
            ExpandPolicy::AllExpanded => true,
        }
    }
}

/// Expand/collapse flags for the nodes of one rendered record.
///
/// Only nodes that were toggled or set explicitly are stored; everything else
/// falls back to the policy default for its depth.
#[derive(Debug, Clone, Default)]
pub struct ExpandState {
    policy: ExpandPolicy,
    flags: HashMap<NodePath, bool>,
}

impl ExpandState {
    pub fn new(policy: ExpandPolicy) -> Self {
        ExpandState {
            policy,
            flags: HashMap::new(),
        }
    }

    pub fn policy(&self) -> ExpandPolicy {
        self.policy
    }

    pub fn is_expanded(&self, path: &NodePath, depth: usize) -> bool {
        self.flags
            .get(path)
            .copied()
            .unwrap_or_else(|| self.policy.default_expanded(depth))
    }

    /// Flip one node's flag and return its new value
    pub fn toggle(&mut self, path: &NodePath, depth: usize) -> bool {
        let expanded = !self.is_expanded(path, depth);
        trace!("toggle {} -> {}", path, expanded);
        self.flags.insert(path.clone(), expanded);
        expanded
    }

    pub fn set(&mut self, path: NodePath, expanded: bool) {
        self.flags.insert(path, expanded);
    }

    /// Drop every explicit flag, returning all nodes to the policy default
    pub fn reset(&mut self) {
        self.flags.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_expanded_policy() {
        let state = ExpandState::new(ExpandPolicy::RootExpanded);
        let offers = NodePath::root().key("offers");

        assert!(state.is_expanded(&offers, 0));
        assert!(!state.is_expanded(&offers.index(0).key("seller"), 2));
    }

    #[test]
    fn test_other_policies() {
        let path = NodePath::root().key("a");
        assert!(!ExpandState::new(ExpandPolicy::AllCollapsed).is_expanded(&path, 0));
        assert!(ExpandState::new(ExpandPolicy::AllExpanded).is_expanded(&path, 4));
    }

    #[test]
    fn test_toggle_is_independent() {
        let mut state = ExpandState::new(ExpandPolicy::AllCollapsed);
        let a = NodePath::root().key("a");
        let b = NodePath::root().key("b");
        let a_child = a.key("inner");

        assert!(state.toggle(&a, 0));
        assert!(state.is_expanded(&a, 0));
        assert!(!state.is_expanded(&b, 0));
        assert!(!state.is_expanded(&a_child, 2));

        assert!(!state.toggle(&a, 0));
        assert!(!state.is_expanded(&a, 0));
    }

    #[test]
    fn test_reset() {
        let mut state = ExpandState::new(ExpandPolicy::RootExpanded);
        let a = NodePath::root().key("a");

        state.set(a.clone(), false);
        assert!(!state.is_expanded(&a, 0));

        state.reset();
        assert!(state.is_expanded(&a, 0));
    }
}
