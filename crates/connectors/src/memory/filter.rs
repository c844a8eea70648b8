use model::{
    core::value::Value,
    pagination::request::SortDirection,
    records::row::Record,
};
use planner::query::{
    ast::{
        expr::{CompareOp, Expr},
        select::OrderByExpr,
    },
    compiler::FilterCompiler,
};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub enum MemoryCondition {
    Compare { op: CompareOp, value: Value },
    IsNull,
    IsNotNull,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemoryFilterExpr {
    Const(bool),
    Leaf { field: String, cond: MemoryCondition },
    And(Vec<MemoryFilterExpr>),
    Or(Vec<MemoryFilterExpr>),
}

/// A predicate evaluated directly against in-memory rows.
///
/// Comparisons involving a null row value are false, as in SQL where they
/// are unknown and the row is filtered out.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryFilter {
    pub expr: MemoryFilterExpr,
}

impl MemoryFilter {
    pub fn with_expr(expr: MemoryFilterExpr) -> Self {
        MemoryFilter { expr }
    }

    pub fn eval(&self, row: &dyn Record) -> bool {
        eval_expr(&self.expr, row)
    }
}

fn eval_expr(expr: &MemoryFilterExpr, row: &dyn Record) -> bool {
    match expr {
        MemoryFilterExpr::Const(b) => *b,
        MemoryFilterExpr::Leaf { field, cond } => {
            let actual = row.get_value(field);
            match cond {
                MemoryCondition::IsNull => actual.is_null(),
                MemoryCondition::IsNotNull => !actual.is_null(),
                MemoryCondition::Compare { op, value } => {
                    let expected = match op {
                        CompareOp::Eq => Ordering::Equal,
                        CompareOp::Gt => Ordering::Greater,
                        CompareOp::Lt => Ordering::Less,
                    };
                    actual.compare(value) == Some(expected)
                }
            }
        }
        MemoryFilterExpr::And(children) => children.iter().all(|c| eval_expr(c, row)),
        MemoryFilterExpr::Or(children) => children.iter().any(|c| eval_expr(c, row)),
    }
}

pub struct MemoryFilterCompiler;

impl FilterCompiler for MemoryFilterCompiler {
    type Filter = MemoryFilter;

    fn compile(&self, expr: &Expr) -> Self::Filter {
        MemoryFilter::with_expr(compile_memory_expr(expr))
    }
}

fn compile_memory_expr(expr: &Expr) -> MemoryFilterExpr {
    match expr {
        Expr::Literal(b) => MemoryFilterExpr::Const(*b),
        Expr::Compare { field, op, value } => MemoryFilterExpr::Leaf {
            field: field.name.clone(),
            cond: MemoryCondition::Compare {
                op: *op,
                value: value.clone(),
            },
        },
        Expr::IsNull(field) => MemoryFilterExpr::Leaf {
            field: field.name.clone(),
            cond: MemoryCondition::IsNull,
        },
        Expr::IsNotNull(field) => MemoryFilterExpr::Leaf {
            field: field.name.clone(),
            cond: MemoryCondition::IsNotNull,
        },
        Expr::And(left, right) => {
            MemoryFilterExpr::And(vec![compile_memory_expr(left), compile_memory_expr(right)])
        }
        Expr::Or(left, right) => {
            MemoryFilterExpr::Or(vec![compile_memory_expr(left), compile_memory_expr(right)])
        }
    }
}

/// Orders two rows by an ORDER BY list, with null below every value.
pub fn compare_rows(a: &dyn Record, b: &dyn Record, order_by: &[OrderByExpr]) -> Ordering {
    for order in order_by {
        let left = a.get_value(&order.field.name);
        let right = b.get_value(&order.field.name);

        let ord = match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => left.compare(&right).unwrap_or(Ordering::Equal),
        };

        let ord = match order.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };

        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{
        core::{data_type::DataType, value::FieldValue},
        records::row::RowData,
    };
    use planner::query::{compare, ident};

    fn row(name: &str, score: Option<i64>) -> RowData {
        RowData::new(
            "t",
            vec![
                FieldValue::new("name", name, DataType::String),
                FieldValue::new("score", score, DataType::Long),
            ],
        )
    }

    fn order(field: &str, direction: SortDirection) -> OrderByExpr {
        OrderByExpr {
            field: ident(field),
            direction,
            ordinal: false,
        }
    }

    #[test]
    fn test_null_comparisons_are_false() {
        let filter = MemoryFilterCompiler.compile(&compare("score", CompareOp::Lt, Value::Int(5)));
        assert!(filter.eval(&row("a", Some(4))));
        assert!(!filter.eval(&row("a", Some(5))));
        assert!(!filter.eval(&row("a", None)));
    }

    #[test]
    fn test_connectives() {
        let expr = compare("name", CompareOp::Gt, Value::from("b"))
            .or(compare("name", CompareOp::Eq, Value::from("b")).and(Expr::IsNull(ident("score"))));
        let filter = MemoryFilterCompiler.compile(&expr);

        assert!(filter.eval(&row("c", Some(1))));
        assert!(filter.eval(&row("b", None)));
        assert!(!filter.eval(&row("b", Some(1))));
        assert!(!filter.eval(&row("a", None)));
        assert!(MemoryFilterCompiler.compile(&Expr::TRUE).eval(&row("a", None)));
    }

    #[test]
    fn test_compare_rows_null_is_minimum() {
        let null = row("a", None);
        let one = row("a", Some(1));

        let asc = [order("score", SortDirection::Asc)];
        let desc = [order("score", SortDirection::Desc)];

        assert_eq!(compare_rows(&null, &one, &asc), Ordering::Less);
        assert_eq!(compare_rows(&null, &one, &desc), Ordering::Greater);
        assert_eq!(compare_rows(&null, &null, &asc), Ordering::Equal);
    }

    #[test]
    fn test_compare_rows_tie_breaks_left_to_right() {
        let order_by = [
            order("name", SortDirection::Asc),
            order("score", SortDirection::Asc),
        ];
        assert_eq!(
            compare_rows(&row("a", Some(2)), &row("a", Some(1)), &order_by),
            Ordering::Greater
        );
        assert_eq!(
            compare_rows(&row("B", Some(2)), &row("a", Some(1)), &order_by),
            Ordering::Less
        );
    }
}
