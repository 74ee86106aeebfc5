//! Tree Utilities
//!
//! Helper functions for tree rendering.

use std::collections::HashSet;

use module_hierarchy::{ModuleId, ModuleTree};

/// One rendered row of the module tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeRow {
    pub id: ModuleId,
    pub title: String,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// Render modules as indented rows, depth-first with an explicit stack.
/// Children of collapsed modules are skipped.
pub fn visible_rows(tree: &ModuleTree, collapsed: &HashSet<ModuleId>) -> Vec<TreeRow> {
    let mut result = Vec::with_capacity(tree.len());
    // Reverse so the first sibling is popped first
    let mut stack: Vec<(ModuleId, usize)> = tree.roots().iter().rev().map(|id| (*id, 0)).collect();

    while let Some((id, depth)) = stack.pop() {
        let children = tree.children(id);
        let expanded = !collapsed.contains(&id);
        result.push(TreeRow {
            id,
            title: tree.title(id).unwrap_or_default().to_string(),
            depth,
            has_children: !children.is_empty(),
            expanded,
        });
        if expanded {
            stack.extend(children.iter().rev().map(|child| (*child, depth + 1)));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use module_hierarchy::ModuleRecord;

    fn make_module(id: ModuleId, parent_id: Option<ModuleId>, order: i64) -> ModuleRecord {
        ModuleRecord::new(id, format!("Module {}", id), order, parent_id)
    }

    fn sample() -> ModuleTree {
        ModuleTree::from_records(&[
            make_module(1, None, 0),    // Root 1
            make_module(2, None, 1),    // Root 2
            make_module(3, Some(1), 0), // Child of 1
            make_module(4, Some(1), 1), // Child of 1
            make_module(5, Some(3), 0), // Child of 3 (grandchild of 1)
        ])
    }

    #[test]
    fn test_visible_rows() {
        let rows = visible_rows(&sample(), &HashSet::new());

        // Should be: 1 (depth 0), 3 (depth 1), 5 (depth 2), 4 (depth 1), 2 (depth 0)
        let shape: Vec<(ModuleId, usize)> = rows.iter().map(|r| (r.id, r.depth)).collect();
        assert_eq!(shape, vec![(1, 0), (3, 1), (5, 2), (4, 1), (2, 0)]);
        assert!(rows[0].has_children);
        assert!(!rows[4].has_children);
        assert_eq!(rows[2].title, "Module 5");
    }

    #[test]
    fn test_collapsed_module_hides_descendants() {
        let collapsed: HashSet<ModuleId> = [3].into_iter().collect();

        let rows = visible_rows(&sample(), &collapsed);

        let ids: Vec<ModuleId> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 2]);
        assert!(!rows[1].expanded);
        assert!(rows[1].has_children);
    }

    #[test]
    fn test_deep_chain_rows() {
        let depth: ModuleId = 5_000;
        let records: Vec<ModuleRecord> = (1..=depth)
            .map(|id| make_module(id, if id == 1 { None } else { Some(id - 1) }, 0))
            .collect();
        let tree = ModuleTree::from_records(&records);

        let rows = visible_rows(&tree, &HashSet::new());

        assert_eq!(rows.len(), depth as usize);
        assert!(rows.iter().enumerate().all(|(i, r)| r.depth == i && r.id == i as ModuleId + 1));
        assert!(!rows[rows.len() - 1].has_children);
    }
}
