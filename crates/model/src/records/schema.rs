use crate::core::data_type::DataType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
    #[serde(default)]
    pub nullable: bool,
}

impl ColumnDef {
    pub fn new(name: &str, data_type: DataType) -> Self {
        ColumnDef {
            name: name.to_string(),
            data_type,
            nullable: false,
        }
    }

    pub fn nullable(name: &str, data_type: DataType) -> Self {
        ColumnDef {
            nullable: true,
            ..ColumnDef::new(name, data_type)
        }
    }
}

/// The set of named fields a row type exposes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RowSchema {
    pub entity: String,
    pub columns: Vec<ColumnDef>,
}

impl RowSchema {
    pub fn new(entity: &str, columns: Vec<ColumnDef>) -> Self {
        RowSchema {
            entity: entity.to_string(),
            columns,
        }
    }

    /// Looks a column up by exact (case-sensitive) name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}
