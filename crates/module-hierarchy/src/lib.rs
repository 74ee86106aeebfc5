//! Module Hierarchy
//!
//! Builds a nested module tree from a flat parent-pointer list, applies
//! drag-and-drop moves to it and flattens it back into records that can be
//! persisted.
//!
//! - `record`: flat, persisted module records
//! - `tree`: id-indexed arena and the tree builder
//! - `intent`: pointer geometry to drop intent
//! - `reorder`: detach/reattach of a dragged subtree
//! - `order`: order assignment when flattening
//! - `validate`: flat invariants checked before persistence
//! - `hierarchy`: records + tree pair, the unit the UI holds
//! - `store`: persistence collaborator and commit/rollback
//! - `selection`: tree selection callback

mod hierarchy;
mod intent;
mod order;
mod record;
mod reorder;
mod selection;
mod store;
mod tree;
mod validate;

pub use hierarchy::{ModuleHierarchy, Reorder};
pub use intent::{resolve_intent, DropIntent, DropZone, GAP_RATIO};
pub use order::{OrderError, OrderScheme};
pub use record::{ModuleId, ModuleRecord, NewModule};
pub use reorder::{apply_drop, DropRequest, ReorderError};
pub use selection::{on_select, SelectionKey};
pub use store::{commit, CommitOutcome, ModuleStore, StoreError};
pub use tree::{build, IntegrityWarning, ModuleTree, TreeNode};
pub use validate::{validate, ValidationError};
