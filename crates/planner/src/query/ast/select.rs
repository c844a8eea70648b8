//! Defines the Abstract Syntax Tree (AST) for a SELECT query.

use crate::query::ast::{
    common::TableRef,
    expr::{Expr, Ident},
};
use model::{core::value::Value, pagination::request::SortDirection};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Select {
    /// The list of columns to be returned. Empty means `*`.
    pub columns: Vec<Ident>,

    /// The primary table for the query.
    /// e.g., `FROM users`
    pub from: Option<FromClause>,

    /// The WHERE clause condition.
    pub where_clause: Option<Expr>,

    /// The ORDER BY clause.
    pub order_by: Vec<OrderByExpr>,

    /// The LIMIT clause, bound as a parameter.
    pub limit: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub table: TableRef,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub field: Ident,
    pub direction: SortDirection,
    /// Text key compared by ordinal (binary) collation.
    pub ordinal: bool,
}
