//! Module Hierarchy State
//!
//! The record list the server returned, paired with the tree derived from it.
//! The tree is always rebuilt from records, never patched in place.

use crate::order::OrderScheme;
use crate::record::{ModuleId, ModuleRecord};
use crate::reorder::{apply_drop, DropRequest, ReorderError};
use crate::tree::{ModuleTree, TreeNode};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleHierarchy {
    records: Vec<ModuleRecord>,
    tree: ModuleTree,
}

/// A drop that has been applied locally but not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reorder {
    pub request: DropRequest,
    /// Tree after the drop
    pub tree: ModuleTree,
    /// Full flattened list to send to the server
    pub payload: Vec<ModuleRecord>,
    /// Records as they were before the drop
    pub snapshot: Vec<ModuleRecord>,
}

impl Reorder {
    /// Hierarchy to display while the reorder is in flight
    pub fn preview(&self) -> ModuleHierarchy {
        ModuleHierarchy {
            records: self.payload.clone(),
            tree: self.tree.clone(),
        }
    }
}

impl ModuleHierarchy {
    pub fn new(records: Vec<ModuleRecord>) -> Self {
        let tree = ModuleTree::from_records(&records);
        Self { records, tree }
    }

    pub fn records(&self) -> &[ModuleRecord] {
        &self.records
    }

    pub fn tree(&self) -> &ModuleTree {
        &self.tree
    }

    pub fn nodes(&self) -> Vec<TreeNode> {
        self.tree.nodes()
    }

    pub fn name(&self, id: ModuleId) -> Option<&str> {
        self.tree.title(id)
    }

    /// Apply a drop, keeping the current records as the rollback snapshot
    pub fn apply_drop(&self, request: DropRequest, scheme: OrderScheme) -> Result<Reorder, ReorderError> {
        let (tree, payload) = apply_drop(&self.tree, request.drag, request.target, request.intent, scheme)?;
        Ok(Reorder {
            request,
            tree,
            payload,
            snapshot: self.records.clone(),
        })
    }
}
