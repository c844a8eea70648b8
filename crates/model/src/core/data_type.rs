use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Domain type of a key field or a row column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataType {
    Int,
    Long,
    IntUnsigned,
    Float,
    Decimal,
    String,
    Boolean,
    Date,
    Timestamp,
    Uuid,
    /// Optional wrapper around another domain type.
    ///
    /// Column nullability is tracked separately on [`crate::records::schema::ColumnDef`];
    /// this variant only exists to describe key slots declared over an optional type,
    /// which cursor comparison rejects.
    Nullable(Box<DataType>),
}

lazy_static! {
    static ref TYPE_NAME_MAP: HashMap<&'static str, DataType> = build_type_name_map();
}

impl DataType {
    /// Resolves a loose type name (`"string"`, `"bigint"`, `"numeric"`, ...).
    pub fn from_name(type_name: &str) -> Result<Self, String> {
        let normalized = type_name.trim().to_ascii_lowercase();

        if let Some(inner) = normalized
            .strip_prefix("nullable<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return Ok(DataType::Nullable(Box::new(Self::from_name(inner)?)));
        }

        TYPE_NAME_MAP
            .get(normalized.as_str())
            .cloned()
            .ok_or_else(|| format!("Unknown column type: {type_name}"))
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, DataType::Nullable(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, DataType::String)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int => write!(f, "int"),
            DataType::Long => write!(f, "long"),
            DataType::IntUnsigned => write!(f, "uint"),
            DataType::Float => write!(f, "float"),
            DataType::Decimal => write!(f, "decimal"),
            DataType::String => write!(f, "string"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::Date => write!(f, "date"),
            DataType::Timestamp => write!(f, "timestamp"),
            DataType::Uuid => write!(f, "uuid"),
            DataType::Nullable(inner) => write!(f, "nullable<{inner}>"),
        }
    }
}

fn build_type_name_map() -> HashMap<&'static str, DataType> {
    HashMap::from([
        ("int", DataType::Int),
        ("integer", DataType::Int),
        ("int4", DataType::Int),
        ("long", DataType::Long),
        ("bigint", DataType::Long),
        ("int8", DataType::Long),
        ("uint", DataType::IntUnsigned),
        ("unsigned", DataType::IntUnsigned),
        ("float", DataType::Float),
        ("double", DataType::Float),
        ("decimal", DataType::Decimal),
        ("numeric", DataType::Decimal),
        ("string", DataType::String),
        ("text", DataType::String),
        ("varchar", DataType::String),
        ("bool", DataType::Boolean),
        ("boolean", DataType::Boolean),
        ("date", DataType::Date),
        ("timestamp", DataType::Timestamp),
        ("datetime", DataType::Timestamp),
        ("uuid", DataType::Uuid),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_aliases() {
        assert_eq!(DataType::from_name("BIGINT").unwrap(), DataType::Long);
        assert_eq!(DataType::from_name(" numeric ").unwrap(), DataType::Decimal);
        assert!(DataType::from_name("geometry").is_err());
    }

    #[test]
    fn test_from_name_nullable() {
        let ty = DataType::from_name("nullable<int>").unwrap();
        assert_eq!(ty, DataType::Nullable(Box::new(DataType::Int)));
        assert!(ty.is_nullable());
        assert_eq!(ty.to_string(), "nullable<int>");
    }
}
