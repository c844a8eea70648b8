//! Lowering of keyset predicates into store-specific filters.

use crate::query::{
    ast::{expr::Expr, select::OrderByExpr},
    dialect::Dialect,
    renderer::{Render, Renderer},
};
use model::core::value::Value;

/// A trait for compiling predicate expressions into a specific format.
pub trait FilterCompiler {
    /// The type of filter that this compiler produces.
    type Filter;

    /// Compile the predicate into a filter.
    fn compile(&self, expr: &Expr) -> Self::Filter;
}

/// A parameterized SQL boolean expression.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFilter {
    pub sql: String,
    pub params: Vec<Value>,
}

pub struct SqlFilterCompiler<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> SqlFilterCompiler<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Renders an ORDER BY list (without the keyword).
    pub fn compile_order(&self, order_by: &[OrderByExpr]) -> String {
        let mut renderer = Renderer::new(self.dialect);
        for (i, order) in order_by.iter().enumerate() {
            if i > 0 {
                renderer.sql.push_str(", ");
            }
            order.render(&mut renderer);
        }
        renderer.finish().0
    }
}

impl FilterCompiler for SqlFilterCompiler<'_> {
    type Filter = SqlFilter;

    fn compile(&self, expr: &Expr) -> Self::Filter {
        let mut renderer = Renderer::new(self.dialect);
        expr.render(&mut renderer);
        let (sql, params) = renderer.finish();
        SqlFilter { sql, params }
    }
}
