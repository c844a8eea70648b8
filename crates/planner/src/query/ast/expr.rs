//! Predicate IR produced by the keyset builders.
//!
//! Deliberately small: field references compared to literal values, null
//! tests, and boolean connectives. Lowering to a concrete store happens in a
//! [`crate::query::compiler::FilterCompiler`].

use model::core::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub qualifier: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Gt,
    Lt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(bool),
    Compare {
        field: Ident,
        op: CompareOp,
        value: Value,
    },
    IsNull(Ident),
    IsNotNull(Ident),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub const TRUE: Expr = Expr::Literal(true);
    pub const FALSE: Expr = Expr::Literal(false);

    /// Conjunction, folding boolean literals away.
    pub fn and(self, other: Expr) -> Expr {
        match (self, other) {
            (Expr::Literal(false), _) | (_, Expr::Literal(false)) => Expr::FALSE,
            (Expr::Literal(true), e) | (e, Expr::Literal(true)) => e,
            (l, r) => Expr::And(Box::new(l), Box::new(r)),
        }
    }

    /// Disjunction, folding boolean literals away.
    pub fn or(self, other: Expr) -> Expr {
        match (self, other) {
            (Expr::Literal(true), _) | (_, Expr::Literal(true)) => Expr::TRUE,
            (Expr::Literal(false), e) | (e, Expr::Literal(false)) => e,
            (l, r) => Expr::Or(Box::new(l), Box::new(r)),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Expr::Literal(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ident;

    #[test]
    fn test_literal_folding() {
        let null_check = Expr::IsNull(ident("a"));

        assert_eq!(Expr::TRUE.and(null_check.clone()), null_check);
        assert_eq!(null_check.clone().and(Expr::FALSE), Expr::FALSE);
        assert_eq!(Expr::FALSE.or(null_check.clone()), null_check);
        assert!(null_check.clone().or(Expr::TRUE).is_identity());
    }

    #[test]
    fn test_nested_connectives() {
        let e = Expr::IsNull(ident("a")).and(Expr::IsNotNull(ident("b")));
        assert!(matches!(e, Expr::And(_, _)));
    }
}
