//! Module Commands
//!
//! `/modules` endpoints, exposed through the `ModuleStore` trait.

use async_trait::async_trait;
use module_hierarchy::{ModuleRecord, ModuleStore, NewModule, StoreError};

use super::ApiClient;

#[async_trait(?Send)]
impl ModuleStore for ApiClient {
    async fn fetch_modules(&self) -> Result<Vec<ModuleRecord>, StoreError> {
        self.get("modules").await
    }

    async fn create_module(&self, module: &NewModule) -> Result<ModuleRecord, StoreError> {
        self.post("modules", module).await
    }

    async fn reorder(&self, modules: &[ModuleRecord]) -> Result<(), StoreError> {
        // Always the full list, never a diff
        self.post_discard("modules/reorder", modules).await
    }
}
