use crate::{
    error::PlanError,
    query::{
        ast::expr::{CompareOp, Expr},
        compare, ident,
    },
};
use model::{
    pagination::{request::SortDirection, token::KeySetToken},
    records::schema::ColumnDef,
};

/// Builds "row is strictly after `token`" over `columns` (the token's active
/// field list, already resolved against the row schema).
///
/// Fields are processed left to right with two accumulators: `tie_break`
/// (every field so far equals the cursor) and `result`. Field `i` contributes
/// `tie_break(0..i) AND after_i`.
///
/// Null sorts before every non-null value. A slot without a concrete value
/// (unset or set to null) places the cursor on the null position of its field:
/// ascending, every non-null value comes after it; descending, nothing within
/// the tie group does.
///
/// Descending terms mirror the ascending ones (`f < v OR f IS NULL`, and
/// `FALSE` for a null cursor) so descending scans return every row exactly once.
pub(crate) fn build_predicate(
    token: &KeySetToken,
    columns: &[&ColumnDef],
    direction: SortDirection,
) -> Result<Expr, PlanError> {
    let mut tie_break = Expr::TRUE;
    let mut result = Expr::FALSE;

    for column in columns {
        let field = column.name.as_str();

        let slot = token.slot(field).ok_or_else(|| PlanError::FieldNotFound {
            entity: token.schema().name().to_string(),
            field: field.to_string(),
        })?;

        if token.domain(field).is_some_and(|d| d.is_nullable()) {
            return Err(PlanError::UnsupportedCursorType {
                field: field.to_string(),
            });
        }

        let (after, equal) = match slot.value() {
            Some(value) => {
                let op = match direction {
                    SortDirection::Asc => CompareOp::Gt,
                    SortDirection::Desc => CompareOp::Lt,
                };
                let after = compare(field, op, value.clone());
                let equal = compare(field, CompareOp::Eq, value.clone());

                if column.nullable {
                    let not_null = Expr::IsNotNull(ident(field));
                    let after = match direction {
                        SortDirection::Asc => not_null.clone().and(after),
                        SortDirection::Desc => after.or(Expr::IsNull(ident(field))),
                    };
                    (after, not_null.and(equal))
                } else {
                    (after, equal)
                }
            }
            None => {
                let after = match direction {
                    SortDirection::Asc => Expr::IsNotNull(ident(field)),
                    SortDirection::Desc => Expr::FALSE,
                };
                (after, Expr::IsNull(ident(field)))
            }
        };

        result = result.or(tie_break.clone().and(after));
        tie_break = tie_break.and(equal);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::testing::*;
    use model::{core::data_type::DataType, pagination::token::TokenSchema};

    fn columns(schema: &model::records::schema::RowSchema, names: &[&str]) -> Vec<ColumnDef> {
        names
            .iter()
            .map(|n| schema.column(n).unwrap().clone())
            .collect()
    }

    #[test]
    fn test_unset_slot_means_after_null_ascending() {
        let schema = row_schema();
        let cols = columns(&schema, &["StringName", "NullableName"]);
        let refs: Vec<&ColumnDef> = cols.iter().collect();
        let token = token().with("StringName", "sharon2").unwrap();

        let predicate = build_predicate(&token, &refs, SortDirection::Asc).unwrap();

        let expected = compare("StringName", CompareOp::Gt, "sharon2".into()).or(compare(
            "StringName",
            CompareOp::Eq,
            "sharon2".into(),
        )
        .and(Expr::IsNotNull(ident("NullableName"))));
        assert_eq!(predicate, expected);
    }

    #[test]
    fn test_unset_slot_descending_skips_tie_group() {
        let schema = row_schema();
        let cols = columns(&schema, &["StringName", "NullableName"]);
        let refs: Vec<&ColumnDef> = cols.iter().collect();
        let token = token().with("StringName", "sharon2").unwrap();

        let predicate = build_predicate(&token, &refs, SortDirection::Desc).unwrap();

        assert_eq!(
            predicate,
            compare("StringName", CompareOp::Lt, "sharon2".into())
        );
    }

    #[test]
    fn test_nullable_value_descending_includes_nulls() {
        let schema = row_schema();
        let cols = columns(&schema, &["NullableName"]);
        let refs: Vec<&ColumnDef> = cols.iter().collect();
        let token = token().with("NullableName", dec(3)).unwrap();

        let predicate = build_predicate(&token, &refs, SortDirection::Desc).unwrap();

        assert_eq!(
            predicate,
            compare("NullableName", CompareOp::Lt, dec(3)).or(Expr::IsNull(ident("NullableName")))
        );
    }

    #[test]
    fn test_active_field_without_slot() {
        let schema = row_schema();
        let cols = columns(&schema, &["IntName"]);
        let refs: Vec<&ColumnDef> = cols.iter().collect();
        let token_schema = TokenSchema::builder("Narrow")
            .slot("StringName", DataType::String)
            .build();
        let token = KeySetToken::new(token_schema)
            .unwrap()
            .with("StringName", "x")
            .unwrap();

        assert_eq!(
            build_predicate(&token, &refs, SortDirection::Asc).unwrap_err(),
            PlanError::FieldNotFound {
                entity: "Narrow".to_string(),
                field: "IntName".to_string()
            }
        );
    }

    #[test]
    fn test_nested_optional_domain_is_unsupported() {
        let schema = row_schema();
        let cols = columns(&schema, &["NullableName"]);
        let refs: Vec<&ColumnDef> = cols.iter().collect();
        let token_schema = TokenSchema::builder("Optional")
            .slot(
                "NullableName",
                DataType::Nullable(Box::new(DataType::Decimal)),
            )
            .build();
        let token = KeySetToken::new(token_schema)
            .unwrap()
            .with("NullableName", dec(1))
            .unwrap();

        assert_eq!(
            build_predicate(&token, &refs, SortDirection::Asc).unwrap_err(),
            PlanError::UnsupportedCursorType {
                field: "NullableName".to_string()
            }
        );
    }
}
