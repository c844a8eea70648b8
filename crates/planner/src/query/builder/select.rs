use crate::query::{
    ast::{
        common::TableRef,
        expr::{Expr, Ident},
        select::{FromClause, OrderByExpr, Select},
    },
    keyset::KeysetPlan,
};
use model::core::value::Value;
use std::marker::PhantomData;

/// Marker for a builder that has no FROM clause yet.
#[derive(Debug, Clone)]
pub struct NoFromState;

/// Marker for a builder with a FROM clause; only this state may be built.
#[derive(Debug, Clone)]
pub struct FromState;

#[derive(Debug, Clone)]
pub struct SelectBuilder<State> {
    pub ast: Select,
    _state: PhantomData<State>,
}

impl SelectBuilder<NoFromState> {
    pub fn new(columns: &[Ident]) -> Self {
        Self {
            ast: Select {
                columns: columns.to_vec(),
                ..Default::default()
            },
            _state: PhantomData,
        }
    }

    pub fn from(mut self, table: TableRef, alias: Option<&str>) -> SelectBuilder<FromState> {
        self.ast.from = Some(FromClause {
            table,
            alias: alias.map(|a| a.to_string()),
        });
        SelectBuilder {
            ast: self.ast,
            _state: PhantomData,
        }
    }
}

impl SelectBuilder<FromState> {
    /// Adds a condition, AND-combined with any existing WHERE clause.
    pub fn where_(mut self, condition: Expr) -> Self {
        self.ast.where_clause = Some(match self.ast.where_clause.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    pub fn order_by(mut self, order: OrderByExpr) -> Self {
        self.ast.order_by.push(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.ast.limit = Some(Value::Int(limit as i64));
        self
    }

    /// Applies a keyset page: the after-cursor predicate, the keyset ordering
    /// and the page size.
    ///
    /// An identity predicate adds no WHERE condition.
    pub fn apply_keyset(mut self, plan: &KeysetPlan, limit: usize) -> Self {
        if !plan.predicate().is_identity() {
            self = self.where_(plan.predicate().clone());
        }
        for order in plan.order_by() {
            self = self.order_by(order.clone());
        }
        self.limit(limit)
    }

    pub fn build(self) -> Select {
        self.ast
    }
}
