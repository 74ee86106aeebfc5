//! Flat Invariants
//!
//! Checks a record list before it is sent to the server.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::record::{ModuleId, ModuleRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("module id {0} appears more than once")]
    DuplicateId(ModuleId),
    #[error("module {id} references missing parent {parent_id}")]
    MissingParent { id: ModuleId, parent_id: ModuleId },
    #[error("module {0} is its own ancestor")]
    Cycle(ModuleId),
    #[error("two modules under {parent_id:?} share order {order}")]
    DuplicateOrder { parent_id: Option<ModuleId>, order: i64 },
}

/// Check unique ids, resolvable parents, acyclic ancestry and a strict
/// order among siblings.
pub fn validate(records: &[ModuleRecord]) -> Result<(), ValidationError> {
    let mut parents: HashMap<ModuleId, Option<ModuleId>> = HashMap::with_capacity(records.len());
    for record in records {
        if parents.insert(record.id, record.parent_id).is_some() {
            return Err(ValidationError::DuplicateId(record.id));
        }
    }

    let mut ranks = HashSet::with_capacity(records.len());
    for record in records {
        if let Some(parent_id) = record.parent_id {
            if !parents.contains_key(&parent_id) {
                return Err(ValidationError::MissingParent { id: record.id, parent_id });
            }
        }
        if !ranks.insert((record.parent_id, record.order)) {
            return Err(ValidationError::DuplicateOrder {
                parent_id: record.parent_id,
                order: record.order,
            });
        }
    }

    // Modules already known to reach a root
    let mut rooted: HashSet<ModuleId> = HashSet::with_capacity(records.len());
    for record in records {
        let mut path = Vec::new();
        let mut on_path = HashSet::new();
        let mut current = Some(record.id);
        while let Some(id) = current {
            if rooted.contains(&id) {
                break;
            }
            if !on_path.insert(id) {
                return Err(ValidationError::Cycle(id));
            }
            path.push(id);
            current = parents.get(&id).copied().flatten();
        }
        rooted.extend(path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: ModuleId, order: i64, parent_id: Option<ModuleId>) -> ModuleRecord {
        ModuleRecord::new(id, format!("Module {}", id), order, parent_id)
    }

    #[test]
    fn test_valid_list() {
        let records = vec![record(1, 1, None), record(2, 1, Some(1)), record(3, 2, Some(1)), record(4, 2, None)];
        assert_eq!(validate(&records), Ok(()));
    }

    #[test]
    fn test_same_order_under_different_parents_is_fine() {
        let records = vec![record(1, 1, None), record(2, 1, Some(1))];
        assert_eq!(validate(&records), Ok(()));
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let records = vec![record(1, 1, None), record(1, 2, None)];
        assert_eq!(validate(&records), Err(ValidationError::DuplicateId(1)));
    }

    #[test]
    fn test_rejects_missing_parent() {
        let records = vec![record(1, 1, None), record(2, 1, Some(9))];
        assert_eq!(
            validate(&records),
            Err(ValidationError::MissingParent { id: 2, parent_id: 9 })
        );
    }

    #[test]
    fn test_rejects_duplicate_sibling_order() {
        let records = vec![record(1, 1, None), record(2, 3, Some(1)), record(3, 3, Some(1))];
        assert_eq!(
            validate(&records),
            Err(ValidationError::DuplicateOrder { parent_id: Some(1), order: 3 })
        );
    }

    #[test]
    fn test_rejects_cycle() {
        let records = vec![record(1, 1, None), record(2, 1, Some(3)), record(3, 2, Some(2))];
        assert!(matches!(validate(&records), Err(ValidationError::Cycle(_))));
    }
}
