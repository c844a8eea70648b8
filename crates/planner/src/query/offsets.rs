use crate::{
    error::PlanError,
    query::{
        builder::select::{FromState, SelectBuilder},
        keyset::{KeysetPlan, next_token},
    },
};
use model::{
    pagination::{request::SortDirection, token::KeySetToken},
    records::{row::Record, schema::RowSchema},
};

pub trait OffsetStrategy: Send + Sync {
    /// Applies the pagination logic (WHERE, ORDER BY and LIMIT) to a SelectBuilder.
    fn apply_to_builder(
        &self,
        builder: SelectBuilder<FromState>,
        token: &KeySetToken,
        limit: usize,
    ) -> Result<SelectBuilder<FromState>, PlanError>;

    /// Generates the token resuming after the last fetched row.
    fn next_cursor(&self, row: &dyn Record) -> Result<Option<KeySetToken>, PlanError>;

    /// Clones the boxed trait object.
    fn clone_box(&self) -> Box<dyn OffsetStrategy>;
}

/// Keyset pagination over a token's active fields, all sorted in one direction.
#[derive(Debug, Clone)]
pub struct KeysetOffset {
    pub schema: RowSchema,
    pub direction: SortDirection,
    /// Token whose shape and default fields seed every extracted cursor.
    pub reference: KeySetToken,
}

impl KeysetOffset {
    pub fn new(schema: RowSchema, direction: SortDirection, reference: KeySetToken) -> Self {
        Self {
            schema,
            direction,
            reference,
        }
    }
}

impl OffsetStrategy for KeysetOffset {
    fn apply_to_builder(
        &self,
        builder: SelectBuilder<FromState>,
        token: &KeySetToken,
        limit: usize,
    ) -> Result<SelectBuilder<FromState>, PlanError> {
        let plan = KeysetPlan::new(token, self.direction, &self.schema)?;
        Ok(builder.apply_keyset(&plan, limit))
    }

    fn next_cursor(&self, row: &dyn Record) -> Result<Option<KeySetToken>, PlanError> {
        next_token(Some(&self.reference), Some(&row))
    }

    fn clone_box(&self) -> Box<dyn OffsetStrategy> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{
        ast::common::TableRef,
        dialect::Postgres,
        renderer::{Render, Renderer},
    };
    use model::testing::{row, row_schema, token};
    use model::core::value::Value;

    #[test]
    fn test_keyset_offset_round() {
        let offset = KeysetOffset::new(row_schema(), SortDirection::Asc, token());

        let first = offset
            .apply_to_builder(
                SelectBuilder::new(&[]).from(TableRef::new("example"), None),
                &token(),
                2,
            )
            .unwrap()
            .build();

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        first.render(&mut renderer);
        let (sql, params) = renderer.finish();
        assert_eq!(
            sql,
            r#"SELECT * FROM "example" ORDER BY "StringName" COLLATE "C" ASC NULLS FIRST, "NullableName" ASC NULLS FIRST LIMIT $1"#
        );
        assert_eq!(params, vec![Value::Int(2)]);

        let next = offset
            .next_cursor(&row("sharon2", 1, 1, 1, None))
            .unwrap()
            .unwrap();
        let second = offset
            .clone_box()
            .apply_to_builder(
                SelectBuilder::new(&[]).from(TableRef::new("example"), None),
                &next,
                2,
            )
            .unwrap()
            .build();

        let mut renderer = Renderer::new(&dialect);
        second.render(&mut renderer);
        let (sql, params) = renderer.finish();
        assert_eq!(
            sql,
            r#"SELECT * FROM "example" WHERE ("StringName" COLLATE "C" > $1 OR ("StringName" COLLATE "C" = $2 AND "NullableName" IS NOT NULL)) ORDER BY "StringName" COLLATE "C" ASC NULLS FIRST, "NullableName" ASC NULLS FIRST LIMIT $3"#
        );
        assert_eq!(
            params,
            vec![Value::from("sharon2"), Value::from("sharon2"), Value::Int(2)]
        );
    }
}
