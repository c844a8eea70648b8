//! Shared fixtures for the keyset tests of every crate: the `ExampleToken`
//! type and the twelve-row "sharon" dataset.

use crate::{
    core::{
        data_type::DataType,
        value::{FieldValue, Value},
    },
    pagination::token::{KeySetToken, TokenSchema},
    records::{
        row::RowData,
        schema::{ColumnDef, RowSchema},
    },
};
use bigdecimal::BigDecimal;
use std::sync::Arc;

pub fn token_schema() -> Arc<TokenSchema> {
    TokenSchema::builder("ExampleToken")
        .slot("StringName", DataType::String)
        .slot("DecimalName", DataType::Decimal)
        .slot("IntName", DataType::Int)
        .slot("LongName", DataType::Long)
        .slot("NullableName", DataType::Decimal)
        .default_fields(["StringName", "NullableName"])
        .build()
}

/// An all-unset `ExampleToken`.
pub fn token() -> KeySetToken {
    KeySetToken::new(token_schema()).unwrap()
}

/// `ExampleToken` positioned at `(name, nullable)`; `None` leaves the slot unset.
pub fn after(name: &str, nullable: Option<i64>) -> KeySetToken {
    let mut token = token().with("StringName", name).unwrap();
    if let Some(n) = nullable {
        token.set("NullableName", dec(n)).unwrap();
    }
    token
}

pub fn dec(v: i64) -> Value {
    Value::Decimal(BigDecimal::from(v))
}

pub fn row_schema() -> RowSchema {
    RowSchema::new(
        "ExampleModel",
        vec![
            ColumnDef::new("StringName", DataType::String),
            ColumnDef::new("DecimalName", DataType::Decimal),
            ColumnDef::new("IntName", DataType::Int),
            ColumnDef::new("LongName", DataType::Long),
            ColumnDef::nullable("NullableName", DataType::Decimal),
        ],
    )
}

pub fn row(s: &str, dec: i64, int: i64, long: i64, nullable: Option<i64>) -> RowData {
    RowData::new(
        "ExampleModel",
        vec![
            FieldValue::new("StringName", s, DataType::String),
            FieldValue::new("DecimalName", BigDecimal::from(dec), DataType::Decimal),
            FieldValue::new("IntName", int, DataType::Int),
            FieldValue::new("LongName", long, DataType::Long),
            FieldValue::new(
                "NullableName",
                nullable.map(BigDecimal::from).map(Value::Decimal),
                DataType::Decimal,
            ),
        ],
    )
}

/// Three rows sharing keys with the generated ones, then `sharon1..=sharon9`.
pub fn rows() -> Vec<RowData> {
    let mut rows = vec![
        row("sharon2", 1, i32::MAX as i64, 2, None),
        row("sharon2", 1, 2, 2, Some(1)),
        row("sharon3", 3, 3, 3, None),
    ];
    for i in 1..10 {
        rows.push(row(&format!("sharon{i}"), i, i, i, Some(i)));
    }
    rows
}

/// `(StringName, NullableName)` of every row in [`rows`], ascending, nulls first.
pub fn sorted_keys() -> Vec<(String, Option<i64>)> {
    let mut keys = vec![
        ("sharon1".to_string(), Some(1)),
        ("sharon2".to_string(), None),
        ("sharon2".to_string(), Some(1)),
        ("sharon2".to_string(), Some(2)),
        ("sharon3".to_string(), None),
        ("sharon3".to_string(), Some(3)),
    ];
    for i in 4..10 {
        keys.push((format!("sharon{i}"), Some(i)));
    }
    keys
}
