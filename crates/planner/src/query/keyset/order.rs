use crate::query::{ast::select::OrderByExpr, ident};
use model::{pagination::request::SortDirection, records::schema::ColumnDef};

/// First column is the primary key of the sort, each following one breaks
/// ties among equal predecessors. One direction for all of them.
pub(crate) fn build_order(columns: &[&ColumnDef], direction: SortDirection) -> Vec<OrderByExpr> {
    columns
        .iter()
        .map(|column| OrderByExpr {
            field: ident(&column.name),
            direction,
            ordinal: column.data_type.is_text(),
        })
        .collect()
}
