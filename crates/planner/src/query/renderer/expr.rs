use crate::query::{
    ast::expr::{CompareOp, Expr},
    renderer::{Render, Renderer},
};
use model::core::value::Value;

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Literal(true) => r.sql.push_str("TRUE"),
            Expr::Literal(false) => r.sql.push_str("FALSE"),
            Expr::Compare { field, op, value } => {
                if matches!(value, Value::String(_)) {
                    r.render_ordinal_ident(field);
                } else {
                    r.render_ident(field);
                }
                r.sql.push_str(match op {
                    CompareOp::Eq => " = ",
                    CompareOp::Gt => " > ",
                    CompareOp::Lt => " < ",
                });
                r.add_param(value.clone());
            }
            Expr::IsNull(field) => {
                r.render_ident(field);
                r.sql.push_str(" IS NULL");
            }
            Expr::IsNotNull(field) => {
                r.render_ident(field);
                r.sql.push_str(" IS NOT NULL");
            }
            Expr::And(left, right) => render_binary(r, left, "AND", right),
            Expr::Or(left, right) => render_binary(r, left, "OR", right),
        }
    }
}

fn render_binary(r: &mut Renderer, left: &Expr, op: &str, right: &Expr) {
    r.sql.push('(');
    left.render(r);
    r.sql.push(' ');
    r.sql.push_str(op);
    r.sql.push(' ');
    right.render(r);
    r.sql.push(')');
}
