//! Test Case Commands
//!
//! Read-only listing of test cases, optionally scoped to a module.

use module_hierarchy::StoreError;

use super::ApiClient;
use crate::models::{ModuleId, TestCase};

/// API path listing test cases for a module (all when None)
pub fn test_cases_path(module_id: Option<ModuleId>) -> String {
    match module_id {
        Some(id) => format!("test-cases?module_id={}", id),
        None => "test-cases".to_string(),
    }
}

impl ApiClient {
    pub async fn list_test_cases(&self, module_id: Option<ModuleId>) -> Result<Vec<TestCase>, StoreError> {
        self.get(&test_cases_path(module_id)).await
    }
}
