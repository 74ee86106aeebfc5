//! Tree Selection
//!
//! Resolves the tree's selection set to the module the page should show
//! test cases for.

use tracing::warn;

use crate::record::ModuleId;

/// A selection key that can be resolved to a module id
pub trait SelectionKey {
    fn module_id(&self) -> Option<ModuleId>;
}

impl SelectionKey for ModuleId {
    fn module_id(&self) -> Option<ModuleId> {
        Some(*self)
    }
}

impl SelectionKey for str {
    fn module_id(&self) -> Option<ModuleId> {
        self.trim().parse().ok()
    }
}

impl SelectionKey for String {
    fn module_id(&self) -> Option<ModuleId> {
        self.as_str().module_id()
    }
}

impl<K: SelectionKey + ?Sized> SelectionKey for &K {
    fn module_id(&self) -> Option<ModuleId> {
        (**self).module_id()
    }
}

/// Invoke `on_module` with the first selected module.
///
/// An empty selection does nothing, so the previous selection stays in
/// effect on the page. Returns the module that was selected, if any.
pub fn on_select<K, F>(selected_keys: &[K], on_module: F) -> Option<ModuleId>
where
    K: SelectionKey,
    F: FnOnce(ModuleId),
{
    let first = selected_keys.first()?;
    match first.module_id() {
        Some(id) => {
            on_module(id);
            Some(id)
        }
        None => {
            warn!("selection key does not name a module");
            None
        }
    }
}
