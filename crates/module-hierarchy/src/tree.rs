//! Module Tree
//!
//! Arena of module nodes indexed by id, built from the flat record list.
//! The nested `TreeNode` form is only a projection for rendering.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::record::{ModuleId, ModuleRecord};

/// Nested view of a module and its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub key: ModuleId,
    pub title: String,
    pub children: Vec<TreeNode>,
}

/// Data-integrity problems found while building the tree.
/// None of them are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// A second record reused an id; it was ignored
    DuplicateId { id: ModuleId },
    /// `parent_id` did not resolve; the module became a root
    MissingParent { id: ModuleId, parent_id: ModuleId },
    /// The module's ancestry looped back on itself; it became a root
    Cycle { id: ModuleId, parent_id: ModuleId },
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityWarning::DuplicateId { id } => write!(f, "duplicate module id {}", id),
            IntegrityWarning::MissingParent { id, parent_id } => {
                write!(f, "parent {} not found for module {}", parent_id, id)
            }
            IntegrityWarning::Cycle { id, parent_id } => {
                write!(f, "module {} is part of a parent cycle through {}", id, parent_id)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) title: String,
    pub(crate) parent: Option<ModuleId>,
    pub(crate) children: Vec<ModuleId>,
}

/// Module hierarchy as an id-indexed arena
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleTree {
    pub(crate) nodes: HashMap<ModuleId, Node>,
    pub(crate) roots: Vec<ModuleId>,
    warnings: Vec<IntegrityWarning>,
}

/// Build the nested tree for a flat record list (root-level nodes only)
pub fn build(records: &[ModuleRecord]) -> Vec<TreeNode> {
    ModuleTree::from_records(records).nodes()
}

impl ModuleTree {
    /// Build the tree from records in any order.
    ///
    /// The first record with a given id wins, by input position. Accepted
    /// records are then stably sorted by `order`, so siblings keep that
    /// order and ties keep their input position.
    pub fn from_records(records: &[ModuleRecord]) -> Self {
        let mut tree = ModuleTree::default();
        let mut accepted = Vec::with_capacity(records.len());

        for record in records {
            if tree.nodes.contains_key(&record.id) {
                tree.warn(IntegrityWarning::DuplicateId { id: record.id });
                continue;
            }
            tree.nodes.insert(
                record.id,
                Node {
                    title: record.name.clone(),
                    parent: None,
                    children: Vec::new(),
                },
            );
            accepted.push(record);
        }
        accepted.sort_by_key(|r| r.order);

        for record in &accepted {
            match record.parent_id {
                None => tree.roots.push(record.id),
                Some(parent_id) => match tree.nodes.get_mut(&parent_id) {
                    Some(parent) => {
                        parent.children.push(record.id);
                        if let Some(node) = tree.nodes.get_mut(&record.id) {
                            node.parent = Some(parent_id);
                        }
                    }
                    None => {
                        tree.warn(IntegrityWarning::MissingParent { id: record.id, parent_id });
                        tree.roots.push(record.id);
                    }
                },
            }
        }

        let sequence: Vec<ModuleId> = accepted.iter().map(|r| r.id).collect();
        tree.repair_cycles(&sequence);
        tree
    }

    /// Promote one member of every parent cycle to a root, so no module
    /// disappears from the rendered tree.
    fn repair_cycles(&mut self, sequence: &[ModuleId]) {
        let mut reachable = self.reachable();
        if reachable.len() == self.nodes.len() {
            return;
        }

        let rank: HashMap<ModuleId, usize> = sequence.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        for id in sequence {
            if reachable.contains(id) {
                continue;
            }

            // Walk up until a module repeats; everything from that module
            // back to itself is the cycle.
            let mut path = Vec::new();
            let mut seen = HashSet::new();
            let mut current = *id;
            while seen.insert(current) {
                path.push(current);
                match self.parent(current) {
                    Some(parent) => current = parent,
                    None => break,
                }
            }
            let start = path.iter().position(|m| *m == current).unwrap_or(0);
            let promoted = path[start..]
                .iter()
                .copied()
                .min_by_key(|m| rank.get(m).copied().unwrap_or(usize::MAX))
                .unwrap_or(*id);

            let old_parent = self.detach(promoted);
            self.roots.push(promoted);
            if let Some(parent_id) = old_parent {
                self.warn(IntegrityWarning::Cycle { id: promoted, parent_id });
            }
            reachable.extend(self.subtree(promoted));
        }
    }

    fn warn(&mut self, warning: IntegrityWarning) {
        warn!(%warning, "module data integrity");
        self.warnings.push(warning);
    }

    fn reachable(&self) -> HashSet<ModuleId> {
        self.roots.iter().flat_map(|root| self.subtree(*root)).collect()
    }

    /// The module and all of its descendants, depth-first
    pub fn subtree(&self, id: ModuleId) -> Vec<ModuleId> {
        let mut result = Vec::new();
        let mut to_visit = vec![id];
        while let Some(current) = to_visit.pop() {
            if let Some(node) = self.nodes.get(&current) {
                result.push(current);
                to_visit.extend(node.children.iter().rev().copied());
            }
        }
        result
    }

    /// Integrity warnings collected while building
    pub fn warnings(&self) -> &[IntegrityWarning] {
        &self.warnings
    }

    pub(crate) fn clear_warnings(&mut self) {
        self.warnings.clear();
    }

    pub fn roots(&self) -> &[ModuleId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn title(&self, id: ModuleId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.title.as_str())
    }

    pub fn parent(&self, id: ModuleId) -> Option<ModuleId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Ordered children of a module (empty for unknown ids)
    pub fn children(&self, id: ModuleId) -> &[ModuleId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Sibling sequence under `parent` (None = root list)
    pub fn siblings(&self, parent: Option<ModuleId>) -> &[ModuleId] {
        match parent {
            None => &self.roots,
            Some(pid) => self.children(pid),
        }
    }

    /// Index of a module within its sibling sequence
    pub fn position(&self, id: ModuleId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.siblings(self.parent(id)).iter().position(|m| *m == id)
    }

    /// Whether `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: ModuleId, id: ModuleId) -> bool {
        let mut current = self.parent(id);
        let mut steps = 0;
        while let Some(pid) = current {
            if pid == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                break;
            }
            current = self.parent(pid);
        }
        false
    }

    /// Remove a module from its sibling sequence, keeping its subtree.
    /// Returns the former parent.
    pub(crate) fn detach(&mut self, id: ModuleId) -> Option<ModuleId> {
        let parent = self.parent(id);
        match parent.and_then(|pid| self.nodes.get_mut(&pid)) {
            Some(node) => node.children.retain(|m| *m != id),
            None => self.roots.retain(|m| *m != id),
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
        }
        parent
    }

    /// Insert a detached module into `parent`'s sibling sequence at `index`
    pub(crate) fn attach(&mut self, id: ModuleId, parent: Option<ModuleId>, index: usize) {
        let siblings = match parent.and_then(|pid| self.nodes.get_mut(&pid)) {
            Some(node) => &mut node.children,
            None => &mut self.roots,
        };
        let index = index.min(siblings.len());
        siblings.insert(index, id);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = parent;
        }
    }

    /// Nested projection of the root list
    pub fn nodes(&self) -> Vec<TreeNode> {
        self.roots.iter().filter_map(|id| self.node(*id)).collect()
    }

    /// Nested projection of one module and its descendants.
    ///
    /// Assembled bottom-up: in reverse pre-order every child is finished
    /// before its parent, so depth does not grow the call stack.
    pub fn node(&self, id: ModuleId) -> Option<TreeNode> {
        let order = self.subtree(id);
        let mut built: HashMap<ModuleId, TreeNode> = HashMap::with_capacity(order.len());

        for current in order.into_iter().rev() {
            let Some(node) = self.nodes.get(&current) else { continue };
            let children = node.children.iter().filter_map(|c| built.remove(c)).collect();
            built.insert(
                current,
                TreeNode {
                    key: current,
                    title: node.title.clone(),
                    children,
                },
            );
        }

        built.remove(&id)
    }
}

impl Drop for TreeNode {
    // Unnest before dropping so deep chains are freed without recursion
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: ModuleId, order: i64, parent_id: Option<ModuleId>) -> ModuleRecord {
        ModuleRecord::new(id, format!("Module {}", id), order, parent_id)
    }

    fn keys(nodes: &[TreeNode]) -> Vec<ModuleId> {
        nodes.iter().map(|n| n.key).collect()
    }

    #[test]
    fn test_build_nested_tree() {
        let records = vec![
            ModuleRecord::new(1, "A", 1, None),
            ModuleRecord::new(2, "B", 2, None),
            ModuleRecord::new(3, "C", 1, Some(1)),
        ];

        let roots = build(&records);

        assert_eq!(keys(&roots), vec![1, 2]);
        assert_eq!(roots[0].title, "A");
        assert_eq!(keys(&roots[0].children), vec![3]);
        assert_eq!(roots[0].children[0].title, "C");
        assert!(roots[1].children.is_empty());
    }

    #[test]
    fn test_siblings_follow_order_not_input_position() {
        let records = vec![
            record(1, 1, None),
            record(12, 5, Some(1)),
            record(10, 2, Some(1)),
            record(11, 3, Some(1)),
        ];

        let tree = ModuleTree::from_records(&records);
        assert_eq!(tree.children(1), &[10, 11, 12]);
    }

    #[test]
    fn test_equal_order_keeps_input_position() {
        let records = vec![record(7, 1, None), record(3, 1, None), record(5, 1, None)];

        let tree = ModuleTree::from_records(&records);
        assert_eq!(tree.roots(), &[7, 3, 5]);
    }

    #[test]
    fn test_children_listed_before_parent() {
        let records = vec![record(2, 1, Some(1)), record(1, 4, None)];

        let tree = ModuleTree::from_records(&records);
        assert_eq!(tree.roots(), &[1]);
        assert_eq!(tree.children(1), &[2]);
        assert!(tree.warnings().is_empty());
    }

    #[test]
    fn test_orphan_becomes_root_with_one_warning() {
        let records = vec![record(1, 1, None), record(2, 2, Some(99))];

        let tree = ModuleTree::from_records(&records);

        assert_eq!(tree.roots(), &[1, 2]);
        assert_eq!(tree.parent(2), None);
        assert_eq!(
            tree.warnings(),
            &[IntegrityWarning::MissingParent { id: 2, parent_id: 99 }]
        );
    }

    #[test]
    fn test_duplicate_id_first_wins() {
        let records = vec![
            ModuleRecord::new(1, "first", 1, None),
            ModuleRecord::new(1, "second", 2, None),
        ];

        let tree = ModuleTree::from_records(&records);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.title(1), Some("first"));
        assert_eq!(tree.warnings(), &[IntegrityWarning::DuplicateId { id: 1 }]);
    }

    #[test]
    fn test_duplicate_id_keeps_input_position_over_order() {
        let records = vec![
            ModuleRecord::new(1, "first", 5, None),
            ModuleRecord::new(2, "other", 3, None),
            ModuleRecord::new(1, "second", 1, None),
        ];

        let tree = ModuleTree::from_records(&records);

        assert_eq!(tree.title(1), Some("first"));
        assert_eq!(tree.roots(), &[2, 1]);
        assert_eq!(tree.warnings(), &[IntegrityWarning::DuplicateId { id: 1 }]);
    }

    #[test]
    fn test_deep_chain_builds_without_recursion() {
        let depth: ModuleId = 5_000;
        let records: Vec<ModuleRecord> = (1..=depth)
            .map(|id| record(id, 1, if id == 1 { None } else { Some(id - 1) }))
            .collect();

        let roots = build(&records);

        assert_eq!(keys(&roots), vec![1]);
        let mut current = &roots[0];
        let mut levels = 1;
        while let Some(child) = current.children.first() {
            assert_eq!(child.key, current.key + 1);
            assert_eq!(current.children.len(), 1);
            current = child;
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert_eq!(current.title, format!("Module {}", depth));
    }

    #[test]
    fn test_cycle_is_broken_into_a_root() {
        // 2 -> 3 -> 2, with 4 hanging below the cycle
        let records = vec![
            record(1, 1, None),
            record(2, 2, Some(3)),
            record(3, 3, Some(2)),
            record(4, 4, Some(3)),
        ];

        let tree = ModuleTree::from_records(&records);

        assert_eq!(tree.roots(), &[1, 2]);
        assert_eq!(tree.children(2), &[3]);
        assert_eq!(tree.children(3), &[4]);
        assert_eq!(tree.warnings(), &[IntegrityWarning::Cycle { id: 2, parent_id: 3 }]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_self_parent_is_promoted() {
        let records = vec![record(5, 1, Some(5))];

        let tree = ModuleTree::from_records(&records);

        assert_eq!(tree.roots(), &[5]);
        assert!(tree.children(5).is_empty());
        assert_eq!(tree.warnings().len(), 1);
    }

    #[test]
    fn test_no_node_appears_twice() {
        let records = vec![
            record(1, 1, None),
            record(2, 1, Some(1)),
            record(3, 2, Some(1)),
            record(4, 1, Some(3)),
            record(5, 2, None),
        ];

        let tree = ModuleTree::from_records(&records);
        let mut seen: Vec<ModuleId> = tree.roots().iter().flat_map(|r| tree.subtree(*r)).collect();
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_is_ancestor() {
        let records = vec![record(1, 1, None), record(2, 1, Some(1)), record(3, 1, Some(2))];

        let tree = ModuleTree::from_records(&records);

        assert!(tree.is_ancestor(1, 3));
        assert!(tree.is_ancestor(2, 3));
        assert!(!tree.is_ancestor(3, 1));
        assert!(!tree.is_ancestor(3, 3));
    }
}
