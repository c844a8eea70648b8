use connectors::memory::source::MemorySource;
use model::{
    core::value::Value,
    records::row::{Record, RowData},
    testing::{row_schema, rows},
};

pub use model::testing::{after, sorted_keys, token};


pub fn source() -> MemorySource {
    MemorySource::new(row_schema(), rows())
}

/// `(StringName, NullableName)` of each row, as a comparable key.
pub fn keys(rows: &[RowData]) -> Vec<(String, Option<i64>)> {
    rows.iter()
        .map(|r| {
            let name = r.get_value("StringName").as_string().unwrap_or_default();
            let nullable = match r.get_value("NullableName") {
                Value::Null => None,
                v => v.as_f64().map(|f| f as i64),
            };
            (name, nullable)
        })
        .collect()
}
