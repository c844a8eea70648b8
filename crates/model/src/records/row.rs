use crate::core::value::{FieldValue, Value};
use serde::{Deserialize, Serialize};

/// Read-only, by-name access to the fields of a result row.
///
/// Fields the row does not carry read as [`Value::Null`]; whether a name is
/// legal at all is decided by the row's [`crate::records::schema::RowSchema`].
pub trait Record {
    fn get_value(&self, field: &str) -> Value;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowData {
    pub entity: String,
    pub field_values: Vec<FieldValue>,
}

impl RowData {
    pub fn new(entity: &str, field_values: Vec<FieldValue>) -> Self {
        RowData {
            entity: entity.to_string(),
            field_values,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values.iter().find(|f| f.name == field)
    }
}

impl Record for RowData {
    fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .and_then(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn get_value(&self, field: &str) -> Value {
        (**self).get_value(field)
    }
}
