//! Order Assignment
//!
//! Flattening the tree back into records, with fresh `order` and
//! `parent_id` values.

use thiserror::Error;

use crate::record::{ModuleId, ModuleRecord};
use crate::tree::ModuleTree;

/// How `order` values are assigned when flattening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderScheme {
    /// 1-based index among siblings. Ancestry lives in `parent_id` only.
    #[default]
    SiblingRank,
    /// `parent_order * base + index`, roots numbered from 1.
    ///
    /// Limited to `base - 1` children per module and `base - 1` roots, so a
    /// root's order never reaches a child value. Values grow by a
    /// factor of `base` per level until they overflow `i64` (six levels
    /// with `base = 1000`).
    Nested { base: i64 },
}

impl OrderScheme {
    /// Nested encoding with base 1000, as older servers expect
    pub const LEGACY: OrderScheme = OrderScheme::Nested { base: 1000 };

    fn rank(self, parent: Option<(ModuleId, i64)>, index: usize, count: usize) -> Result<i64, OrderError> {
        let index = index as i64 + 1;
        match (self, parent) {
            (OrderScheme::SiblingRank, _) => Ok(index),
            (OrderScheme::Nested { base }, None) => {
                if count as i64 >= base {
                    return Err(OrderError::TooManyRoots { count, max: base - 1 });
                }
                Ok(index)
            }
            (OrderScheme::Nested { base }, Some((parent_id, parent_order))) => {
                if count as i64 >= base {
                    return Err(OrderError::TooManyChildren {
                        parent_id,
                        count,
                        max: base - 1,
                    });
                }
                parent_order
                    .checked_mul(base)
                    .and_then(|v| v.checked_add(index))
                    .ok_or(OrderError::Overflow { parent_id })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("module {parent_id} has {count} children, the nested order scheme allows at most {max}")]
    TooManyChildren { parent_id: ModuleId, count: usize, max: i64 },
    #[error("{count} root modules, the nested order scheme allows at most {max}")]
    TooManyRoots { count: usize, max: i64 },
    #[error("nested order values below module {parent_id} overflow")]
    Overflow { parent_id: ModuleId },
}

impl ModuleTree {
    /// Flatten depth-first, parents before their children, assigning each
    /// module its current parent and a fresh order.
    pub fn flatten(&self, scheme: OrderScheme) -> Result<Vec<ModuleRecord>, OrderError> {
        let mut result = Vec::with_capacity(self.len());
        let mut stack: Vec<(ModuleId, Option<ModuleId>, i64)> = Vec::new();

        push_children(&mut stack, None, self.roots(), scheme)?;

        while let Some((id, parent_id, order)) = stack.pop() {
            let Some(title) = self.title(id) else { continue };
            result.push(ModuleRecord {
                id,
                name: title.to_string(),
                order,
                parent_id,
            });
            push_children(&mut stack, Some((id, order)), self.children(id), scheme)?;
        }

        Ok(result)
    }
}

fn push_children(
    stack: &mut Vec<(ModuleId, Option<ModuleId>, i64)>,
    parent: Option<(ModuleId, i64)>,
    children: &[ModuleId],
    scheme: OrderScheme,
) -> Result<(), OrderError> {
    let parent_id = parent.map(|(id, _)| id);
    // Reverse so the first child is popped first
    for (index, child) in children.iter().enumerate().rev() {
        let order = scheme.rank(parent, index, children.len())?;
        stack.push((*child, parent_id, order));
    }
    Ok(())
}
