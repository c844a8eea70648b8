//! Keyset ordering and "after cursor" predicates.
//!
//! Both halves are derived from one [`KeysetPlan`], built once from a token,
//! a direction and the row schema. A predicate only characterises "rows after
//! the last row" under the ordering computed from the same field list and
//! direction, so neither half is exposed on its own.

mod extract;
mod order;
mod predicate;

pub use extract::next_token;

use crate::{
    error::PlanError,
    query::ast::{expr::Expr, select::OrderByExpr},
};
use model::{
    pagination::{request::SortDirection, token::KeySetToken},
    records::schema::{ColumnDef, RowSchema},
};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct KeysetPlan {
    fields: Vec<String>,
    direction: SortDirection,
    order_by: Vec<OrderByExpr>,
    predicate: Expr,
}

impl KeysetPlan {
    /// Builds the ordering and the after-cursor predicate for `token`.
    ///
    /// A token with no slot set yields the identity predicate (first page).
    pub fn new(
        token: &KeySetToken,
        direction: SortDirection,
        schema: &RowSchema,
    ) -> Result<Self, PlanError> {
        let fields = token.active_fields();
        let columns = resolve_columns(&fields, schema)?;

        let order_by = order::build_order(&columns, direction);
        let predicate = if token.is_empty() {
            Expr::TRUE
        } else {
            predicate::build_predicate(token, &columns, direction)?
        };

        debug!(
            entity = %schema.entity,
            fields = ?fields,
            direction = %direction,
            "Built keyset plan"
        );

        Ok(KeysetPlan {
            fields,
            direction,
            order_by,
            predicate,
        })
    }

    /// An ordering over an explicit field list, with no cursor predicate.
    pub fn for_fields(
        fields: &[String],
        direction: SortDirection,
        schema: &RowSchema,
    ) -> Result<Self, PlanError> {
        let columns = resolve_columns(fields, schema)?;

        Ok(KeysetPlan {
            fields: fields.to_vec(),
            direction,
            order_by: order::build_order(&columns, direction),
            predicate: Expr::TRUE,
        })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn order_by(&self) -> &[OrderByExpr] {
        &self.order_by
    }

    pub fn predicate(&self) -> &Expr {
        &self.predicate
    }
}

fn resolve_columns<'a>(
    fields: &[String],
    schema: &'a RowSchema,
) -> Result<Vec<&'a ColumnDef>, PlanError> {
    fields
        .iter()
        .map(|field| {
            schema.column(field).ok_or_else(|| PlanError::FieldNotFound {
                entity: schema.entity.clone(),
                field: field.clone(),
            })
        })
        .collect()
}
