//! Reorder Engine
//!
//! Moves a dragged module (with its whole subtree) to a new place in the
//! tree and re-derives the flat records to persist.

use thiserror::Error;
use tracing::debug;

use crate::intent::DropIntent;
use crate::order::{OrderError, OrderScheme};
use crate::record::{ModuleId, ModuleRecord};
use crate::tree::ModuleTree;
use crate::validate::{validate, ValidationError};

/// A completed drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropRequest {
    /// Module being dragged
    pub drag: ModuleId,
    /// Module the pointer was released over
    pub target: ModuleId,
    pub intent: DropIntent,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("module {0} is not in the tree")]
    NotFound(ModuleId),
    #[error("module {0} cannot be dropped onto itself")]
    SelfDrop(ModuleId),
    #[error("module {drag} cannot be moved inside its own subtree (onto {target})")]
    IntoOwnSubtree { drag: ModuleId, target: ModuleId },
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error("reordered modules are inconsistent: {0}")]
    Invalid(#[from] ValidationError),
}

/// Apply a drop to `tree`, returning the new tree and its flattened records.
///
/// `tree` is left untouched. Dropping a module onto itself or anywhere
/// inside its own subtree is rejected, since the subtree would be cut off
/// from the roots.
pub fn apply_drop(
    tree: &ModuleTree,
    drag: ModuleId,
    target: ModuleId,
    intent: DropIntent,
    scheme: OrderScheme,
) -> Result<(ModuleTree, Vec<ModuleRecord>), ReorderError> {
    if !tree.contains(drag) {
        return Err(ReorderError::NotFound(drag));
    }
    if !tree.contains(target) {
        return Err(ReorderError::NotFound(target));
    }
    if drag == target {
        return Err(ReorderError::SelfDrop(drag));
    }
    if tree.is_ancestor(drag, target) {
        return Err(ReorderError::IntoOwnSubtree { drag, target });
    }

    let mut next = tree.clone();
    next.clear_warnings();
    next.detach(drag);

    match intent {
        DropIntent::Into => next.attach(drag, Some(target), 0),
        DropIntent::Before | DropIntent::After => {
            let parent = next.parent(target);
            let index = next.position(target).ok_or(ReorderError::NotFound(target))?;
            let at = if intent == DropIntent::Before { index } else { index + 1 };
            next.attach(drag, parent, at);
        }
    }

    debug!(drag, target, ?intent, parent = ?next.parent(drag), "module moved");

    let records = next.flatten(scheme)?;
    validate(&records)?;
    Ok((next, records))
}
