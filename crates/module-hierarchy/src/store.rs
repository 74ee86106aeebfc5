//! Module Store
//!
//! Persistence collaborator and the commit step of a reorder.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::hierarchy::Reorder;
use crate::record::{ModuleRecord, NewModule};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The request never got a response
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status
    #[error("server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Where modules are loaded from and saved to.
///
/// Futures are not required to be `Send`, so browser implementations can
/// hold JS values across awaits.
#[async_trait(?Send)]
pub trait ModuleStore {
    /// Load the full flat module list
    async fn fetch_modules(&self) -> Result<Vec<ModuleRecord>, StoreError>;

    /// Create a module, returning it as stored
    async fn create_module(&self, module: &NewModule) -> Result<ModuleRecord, StoreError>;

    /// Replace order and parent of every module with the given full list
    async fn reorder(&self, modules: &[ModuleRecord]) -> Result<(), StoreError>;
}

/// Result of persisting a reorder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Saved; carries the records to rebuild the tree from
    Persisted(Vec<ModuleRecord>),
    /// Not saved; carries the pre-drop records to restore
    RolledBack {
        restored: Vec<ModuleRecord>,
        error: StoreError,
    },
}

impl CommitOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, CommitOutcome::Persisted(_))
    }

    /// Records the tree should be rebuilt from
    pub fn records(&self) -> &[ModuleRecord] {
        match self {
            CommitOutcome::Persisted(records) => records,
            CommitOutcome::RolledBack { restored, .. } => restored,
        }
    }

    pub fn into_records(self) -> Vec<ModuleRecord> {
        match self {
            CommitOutcome::Persisted(records) => records,
            CommitOutcome::RolledBack { restored, .. } => restored,
        }
    }
}

/// Send the full flattened list to the store.
///
/// On success the list is fetched again so the tree reflects what the
/// server actually kept; if that fetch fails the submitted payload is used.
/// On failure the snapshot taken before the drop is handed back.
pub async fn commit<S>(store: &S, reorder: Reorder) -> CommitOutcome
where
    S: ModuleStore + ?Sized,
{
    let Reorder { request, payload, snapshot, .. } = reorder;

    match store.reorder(&payload).await {
        Ok(()) => {
            info!(drag = request.drag, target = request.target, count = payload.len(), "module order saved");
            match store.fetch_modules().await {
                Ok(records) => CommitOutcome::Persisted(records),
                Err(e) => {
                    warn!(error = %e, "refetch after reorder failed, keeping submitted order");
                    CommitOutcome::Persisted(payload)
                }
            }
        }
        Err(e) => {
            error!(error = %e, drag = request.drag, "module order not saved, restoring previous order");
            CommitOutcome::RolledBack {
                restored: snapshot,
                error: e,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::ModuleHierarchy;
    use crate::intent::DropIntent;
    use crate::order::OrderScheme;
    use crate::reorder::DropRequest;
    use std::cell::{Cell, RefCell};

    /// In-memory store that can be told to fail
    #[derive(Default)]
    struct MemoryStore {
        modules: RefCell<Vec<ModuleRecord>>,
        submitted: RefCell<Vec<Vec<ModuleRecord>>>,
        fail_reorder: Cell<bool>,
        fail_fetch: Cell<bool>,
    }

    impl MemoryStore {
        fn with(modules: Vec<ModuleRecord>) -> Self {
            Self {
                modules: RefCell::new(modules),
                ..Default::default()
            }
        }
    }

    #[async_trait(?Send)]
    impl ModuleStore for MemoryStore {
        async fn fetch_modules(&self) -> Result<Vec<ModuleRecord>, StoreError> {
            if self.fail_fetch.get() {
                return Err(StoreError::Transport("connection reset".to_string()));
            }
            Ok(self.modules.borrow().clone())
        }

        async fn create_module(&self, module: &NewModule) -> Result<ModuleRecord, StoreError> {
            let mut modules = self.modules.borrow_mut();
            let id = modules.iter().map(|m| m.id).max().unwrap_or(0) + 1;
            let order = modules.iter().filter(|m| m.parent_id == module.parent_id).count() as i64 + 1;
            let record = ModuleRecord::new(id, module.name.clone(), order, module.parent_id);
            modules.push(record.clone());
            Ok(record)
        }

        async fn reorder(&self, modules: &[ModuleRecord]) -> Result<(), StoreError> {
            self.submitted.borrow_mut().push(modules.to_vec());
            if self.fail_reorder.get() {
                return Err(StoreError::Rejected {
                    status: 500,
                    message: "database locked".to_string(),
                });
            }
            *self.modules.borrow_mut() = modules.to_vec();
            Ok(())
        }
    }

    fn records() -> Vec<ModuleRecord> {
        vec![
            ModuleRecord::new(1, "A", 1, None),
            ModuleRecord::new(2, "B", 2, None),
            ModuleRecord::new(3, "C", 1, Some(1)),
        ]
    }

    fn drop_b_into_a(hierarchy: &ModuleHierarchy) -> Reorder {
        hierarchy
            .apply_drop(
                DropRequest { drag: 2, target: 1, intent: DropIntent::Into },
                OrderScheme::SiblingRank,
            )
            .expect("drop should apply")
    }

    #[tokio::test]
    async fn test_commit_sends_full_list_and_refetches() {
        let store = MemoryStore::with(records());
        let hierarchy = ModuleHierarchy::new(store.fetch_modules().await.unwrap());
        let reorder = drop_b_into_a(&hierarchy);
        let payload = reorder.payload.clone();

        let outcome = commit(&store, reorder).await;

        assert!(outcome.is_persisted());
        assert_eq!(store.submitted.borrow().as_slice(), &[payload.clone()]);
        assert_eq!(store.submitted.borrow()[0].len(), 3);
        assert_eq!(outcome.records(), payload.as_slice());

        let rebuilt = ModuleHierarchy::new(outcome.into_records());
        assert_eq!(rebuilt.tree().children(1), &[2, 3]);
    }

    #[tokio::test]
    async fn test_failed_commit_rolls_back_to_snapshot() {
        let store = MemoryStore::with(records());
        store.fail_reorder.set(true);
        let hierarchy = ModuleHierarchy::new(records());
        let reorder = drop_b_into_a(&hierarchy);

        let outcome = commit(&store, reorder).await;

        match &outcome {
            CommitOutcome::RolledBack { restored, error } => {
                assert_eq!(restored, &records());
                assert!(matches!(error, StoreError::Rejected { status: 500, .. }));
            }
            other => panic!("expected rollback, got {:?}", other),
        }
        let restored = ModuleHierarchy::new(outcome.into_records());
        assert_eq!(restored.tree(), hierarchy.tree());
        assert_eq!(*store.modules.borrow(), records());
    }

    #[tokio::test]
    async fn test_refetch_failure_keeps_submitted_payload() {
        let store = MemoryStore::with(records());
        let hierarchy = ModuleHierarchy::new(records());
        let reorder = drop_b_into_a(&hierarchy);
        let payload = reorder.payload.clone();
        store.fail_fetch.set(true);

        let outcome = commit(&store, reorder).await;

        assert_eq!(outcome, CommitOutcome::Persisted(payload));
    }

    #[tokio::test]
    async fn test_created_module_shows_up_after_refetch() {
        let store = MemoryStore::with(records());

        let created = store
            .create_module(&NewModule { name: "D".to_string(), parent_id: Some(1) })
            .await
            .unwrap();

        let hierarchy = ModuleHierarchy::new(store.fetch_modules().await.unwrap());
        assert_eq!(created.id, 4);
        assert_eq!(hierarchy.tree().children(1), &[3, 4]);
    }
}
