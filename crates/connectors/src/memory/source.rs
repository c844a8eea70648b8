use crate::{
    error::SourceError,
    memory::filter::{MemoryFilterCompiler, compare_rows},
    source::PageSource,
};
use async_trait::async_trait;
use model::{
    core::value::{FieldValue, Value},
    pagination::request::PagingRequest,
    records::{
        row::RowData,
        schema::{ColumnDef, RowSchema},
    },
};
use planner::query::{compiler::FilterCompiler, keyset::KeysetPlan};
use serde::Deserialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Rows plus the schema describing them, as read from JSON.
#[derive(Debug, Deserialize)]
pub struct Dataset {
    pub entity: String,
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Serves keyset pages from rows held in memory.
///
/// Every fetch re-plans from the request token, filters with the compiled
/// predicate, sorts by the plan's ordering and truncates to the page size.
pub struct MemorySource {
    schema: RowSchema,
    rows: Vec<RowData>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new(schema: RowSchema, rows: Vec<RowData>) -> Self {
        MemorySource {
            schema,
            rows,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Self::from_dataset(dataset)
    }

    pub fn from_dataset(dataset: Dataset) -> Result<Self, SourceError> {
        let schema = RowSchema::new(&dataset.entity, dataset.columns);

        let rows = dataset
            .rows
            .iter()
            .enumerate()
            .map(|(idx, raw)| decode_row(&schema, idx, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MemorySource::new(schema, rows))
    }

    pub fn schema(&self) -> &RowSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[RowData] {
        &self.rows
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn fetch_page<P>(&self, request: &PagingRequest<P>) -> Result<Vec<RowData>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        request.validate()?;

        let plan = KeysetPlan::new(
            &request.key_set_token,
            request.sort_direction,
            &self.schema,
        )?;
        let filter = MemoryFilterCompiler.compile(plan.predicate());

        let mut page: Vec<&RowData> = self.rows.iter().filter(|r| filter.eval(*r)).collect();
        page.sort_by(|a, b| compare_rows(*a, *b, plan.order_by()));
        page.truncate(request.page_size);

        debug!(
            entity = %self.schema.entity,
            rows = page.len(),
            page_size = request.page_size,
            "Fetched page from memory"
        );

        Ok(page.into_iter().cloned().collect())
    }
}

fn decode_row(
    schema: &RowSchema,
    idx: usize,
    raw: &serde_json::Map<String, serde_json::Value>,
) -> Result<RowData, SourceError> {
    if let Some(unknown) = raw.keys().find(|k| !schema.contains(k)) {
        return Err(SourceError::Decode(format!(
            "Row {idx} has unknown field '{unknown}'"
        )));
    }

    let mut field_values = Vec::with_capacity(schema.columns.len());
    for column in &schema.columns {
        let json = raw.get(&column.name).unwrap_or(&serde_json::Value::Null);
        let value = Value::from_json(json, &column.data_type)
            .map_err(|e| SourceError::Decode(format!("Row {idx}: {e}")))?;

        if value.is_null() && !column.nullable {
            return Err(SourceError::Decode(format!(
                "Row {idx}: column '{}' is not nullable",
                column.name
            )));
        }

        field_values.push(FieldValue::new(&column.name, value, column.data_type.clone()));
    }

    Ok(RowData::new(&schema.entity, field_values))
}

#[async_trait]
impl<P> PageSource<P> for MemorySource
where
    P: Send + Sync,
{
    type Row = RowData;
    type Error = SourceError;

    async fn fetch(&self, request: &PagingRequest<P>) -> Result<Vec<RowData>, SourceError> {
        self.fetch_page(request)
    }
}


#[cfg(test)]
mod tests {
    use super::{fixtures::*, *};
    use model::records::row::Record;
    use model::pagination::{
        error::{ConfigError, TokenError},
        request::SortDirection,
    };
    use planner::{error::PlanError, query::keyset::next_token};

    fn fetch(
        token: model::pagination::token::KeySetToken,
        direction: SortDirection,
        size: usize,
    ) -> Vec<RowData> {
        let request = PagingRequest::new(token, ())
            .with_page_size(size)
            .with_sort_direction(direction);
        source().fetch_page(&request).unwrap()
    }

    #[test]
    fn test_empty_token_first_rows_ascending() {
        let page = fetch(token(), SortDirection::Asc, 5);
        assert_eq!(
            page,
            vec![
                row("sharon1", 1, 1, 1, Some(1)),
                row("sharon2", 1, i32::MAX as i64, 2, None),
                row("sharon2", 1, 2, 2, Some(1)),
                row("sharon2", 2, 2, 2, Some(2)),
                row("sharon3", 3, 3, 3, None),
            ]
        );
    }

    #[test]
    fn test_empty_token_first_rows_descending() {
        let page = fetch(token(), SortDirection::Desc, 5);
        let names: Vec<_> = page.iter().map(|r| r.get_value("StringName")).collect();
        assert_eq!(
            names,
            ["sharon9", "sharon8", "sharon7", "sharon6", "sharon5"]
                .map(Value::from)
                .to_vec()
        );
    }

    #[test]
    fn test_custom_default_fields() {
        let token = token().with_default_fields(["IntName", "NullableName"]);
        let page = fetch(token, SortDirection::Desc, 5);

        assert_eq!(page[0], row("sharon2", 1, i32::MAX as i64, 2, None));
        assert_eq!(page[1], row("sharon9", 9, 9, 9, Some(9)));
        assert_eq!(page[4], row("sharon6", 6, 6, 6, Some(6)));
    }

    #[test]
    fn test_after_row_token() {
        let after = token()
            .with("StringName", "sharon5")
            .unwrap()
            .with("NullableName", dec(5))
            .unwrap();

        assert_eq!(
            fetch(after.clone(), SortDirection::Asc, 1),
            vec![row("sharon6", 6, 6, 6, Some(6))]
        );
        assert_eq!(
            fetch(after, SortDirection::Desc, 1),
            vec![row("sharon4", 4, 4, 4, Some(4))]
        );
    }

    #[test]
    fn test_after_row_token_same_complex_key() {
        let after = token()
            .with("StringName", "sharon2")
            .unwrap()
            .with("NullableName", dec(1))
            .unwrap();

        assert_eq!(
            fetch(after, SortDirection::Asc, 1),
            vec![row("sharon2", 2, 2, 2, Some(2))]
        );
    }

    #[test]
    fn test_unset_slot_resumes_after_null() {
        let after = token().with("StringName", "sharon2").unwrap();

        assert_eq!(
            fetch(after, SortDirection::Asc, 1),
            vec![row("sharon2", 1, 2, 2, Some(1))]
        );
    }

    #[test]
    fn test_after_last_row_is_empty() {
        let last_asc = token()
            .with("StringName", "sharon9")
            .unwrap()
            .with("NullableName", dec(9))
            .unwrap();
        let last_desc = token()
            .with("StringName", "sharon1")
            .unwrap()
            .with("NullableName", dec(1))
            .unwrap();

        assert!(fetch(last_asc, SortDirection::Asc, 1).is_empty());
        assert!(fetch(last_desc, SortDirection::Desc, 1).is_empty());
    }

    #[test]
    fn test_suffix_property() {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let all = fetch(token(), direction, 100);
            assert_eq!(all.len(), 12);

            for k in 0..all.len() {
                let cursor = next_token(Some(&token()), Some(&all[k])).unwrap().unwrap();
                assert_eq!(
                    fetch(cursor, direction, 100),
                    all[k + 1..].to_vec(),
                    "{direction} after row {k}"
                );
            }
        }
    }

    #[test]
    fn test_null_as_minimum() {
        let source = MemorySource::new(
            row_schema(),
            vec![
                row("sharon3", 0, 0, 0, None),
                row("sharon2", 0, 0, 0, Some(2)),
                row("sharon2", 0, 0, 0, None),
                row("sharon2", 0, 0, 0, Some(1)),
            ],
        );
        let request = PagingRequest::new(token().with("StringName", "sharon2").unwrap(), ())
            .with_page_size(1);

        assert_eq!(
            source.fetch_page(&request).unwrap(),
            vec![row("sharon2", 0, 0, 0, Some(1))]
        );
    }

    #[test]
    fn test_unknown_field_and_bad_page_size() {
        let source = source();

        let wrong = model::pagination::token::TokenSchema::builder("WrongNameToken")
            .slot("NotKeySetTokenValue", model::core::data_type::DataType::Int)
            .default_fields(["NotKeySetTokenValue"])
            .build();
        let request = PagingRequest::new(
            model::pagination::token::KeySetToken::new(wrong).unwrap(),
            (),
        );
        assert!(matches!(
            source.fetch_page(&request),
            Err(SourceError::Plan(PlanError::FieldNotFound { .. }))
        ));

        let request = PagingRequest::new(token(), ()).with_page_size(0);
        assert!(matches!(
            source.fetch_page(&request),
            Err(SourceError::Config(ConfigError::PageSizeOutOfRange { .. }))
        ));
        assert_eq!(source.fetch_count(), 2);
    }

    #[test]
    fn test_from_json() {
        let source = MemorySource::from_json_str(
            r#"{
                "entity": "people",
                "columns": [
                    { "name": "name", "data_type": "String" },
                    { "name": "age", "data_type": "Int", "nullable": true }
                ],
                "rows": [
                    { "name": "ann", "age": 31 },
                    { "name": "bob" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(source.rows().len(), 2);
        assert_eq!(source.rows()[1].get_value("age"), Value::Null);

        let bad = MemorySource::from_json_str(
            r#"{ "entity": "p", "columns": [{ "name": "a", "data_type": "Int" }], "rows": [{}] }"#,
        );
        assert!(matches!(bad, Err(SourceError::Decode(_))));
    }

    #[test]
    fn test_token_type_mismatch_is_rejected_before_fetch() {
        let err = token().with("IntName", "not a number").unwrap_err();
        assert!(matches!(err, TokenError::TypeMismatch { .. }));
    }
}
