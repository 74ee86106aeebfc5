//! Module Records
//!
//! Flat, persisted form of the module hierarchy (matches the REST payloads).

use serde::{Deserialize, Serialize};

/// Module identifier, unique and stable across reorders
pub type ModuleId = u32;

/// A module as stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub id: ModuleId,
    pub name: String,
    /// Rank among siblings sharing the same `parent_id`
    #[serde(default)]
    pub order: i64,
    /// Parent module (None = root level)
    pub parent_id: Option<ModuleId>,
}

impl ModuleRecord {
    pub fn new(id: ModuleId, name: impl Into<String>, order: i64, parent_id: Option<ModuleId>) -> Self {
        Self {
            id,
            name: name.into(),
            order,
            parent_id,
        }
    }

    /// Check if this is a root module (no parent)
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Payload for creating a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewModule {
    pub name: String,
    pub parent_id: Option<ModuleId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_shape() {
        let json = r#"{"id":3,"name":"Login","order":2,"parent_id":null}"#;
        let record: ModuleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, ModuleRecord::new(3, "Login", 2, None));
        assert!(record.is_root());

        let value = serde_json::to_value(ModuleRecord::new(4, "Signup", 1, Some(3))).unwrap();
        assert_eq!(value["parent_id"], 3);
        assert_eq!(value["order"], 1);
    }

    #[test]
    fn test_missing_order_defaults_to_zero() {
        let record: ModuleRecord = serde_json::from_str(r#"{"id":1,"name":"A","parent_id":null}"#).unwrap();
        assert_eq!(record.order, 0);
    }
}
