use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generic persisted record.
///
/// Every table shares this shape: a caller-assigned `id` (unique per table),
/// an `owner_id` used for list queries (no foreign-key enforcement), a
/// caller-supplied `version` whose monotonic meaning is left to the caller,
/// and a schema-free JSON `attributes` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_id: String,
    pub version: i64,
    pub attributes: Map<String, Value>,
}

impl Object {
    /// Create an object with empty attributes. Timestamps are provisional;
    /// the store stamps them on insert/update.
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>, version: i64) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            created_at: now,
            updated_at: now,
            owner_id: owner_id.into(),
            version,
            attributes: Map::new(),
        }
    }

    /// Set an attribute. Anything convertible to a JSON value is accepted.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Read a string attribute, if present and a string.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_accessors() {
        let mut obj = Object::new("id-1", "owner-1", 1);
        obj.set_attr("email", "user@example.com");
        obj.set_attr("count", 3);

        assert_eq!(obj.attr_str("email"), Some("user@example.com"));
        assert_eq!(obj.attr_str("count"), None);
        assert_eq!(obj.attr_str("missing"), None);
    }
}
