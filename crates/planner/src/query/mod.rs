use crate::query::ast::expr::{Expr, Ident};
use model::core::value::Value;

pub mod ast;
pub mod builder;
pub mod compiler;
pub mod dialect;
pub mod keyset;
pub mod offsets;
pub mod renderer;

pub fn ident(name: &str) -> Ident {
    Ident {
        qualifier: None,
        name: name.to_string(),
    }
}

pub fn compare(field: &str, op: ast::expr::CompareOp, val: Value) -> Expr {
    Expr::Compare {
        field: ident(field),
        op,
        value: val,
    }
}
