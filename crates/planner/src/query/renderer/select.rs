use crate::query::{
    ast::select::{OrderByExpr, Select},
    renderer::{Render, Renderer},
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("SELECT ");
        if self.columns.is_empty() {
            r.sql.push('*');
        } else {
            for (i, column) in self.columns.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                r.render_ident(column);
            }
        }

        if let Some(from) = &self.from {
            r.sql.push_str(" FROM ");
            r.render_table_ref(&from.table);
            if let Some(alias) = &from.alias {
                r.sql.push_str(" AS ");
                r.sql.push_str(&r.dialect.quote_identifier(alias));
            }
        }

        if let Some(where_clause) = &self.where_clause {
            r.sql.push_str(" WHERE ");
            where_clause.render(r);
        }

        if !self.order_by.is_empty() {
            r.sql.push_str(" ORDER BY ");
            for (i, order) in self.order_by.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                order.render(r);
            }
        }

        if let Some(limit) = &self.limit {
            r.sql.push_str(" LIMIT ");
            r.add_param(limit.clone());
        }
    }
}

impl Render for OrderByExpr {
    fn render(&self, r: &mut Renderer) {
        if self.ordinal {
            r.render_ordinal_ident(&self.field);
        } else {
            r.render_ident(&self.field);
        }

        r.sql.push(' ');
        r.sql.push_str(&self.direction.to_string().to_ascii_uppercase());

        if let Some(nulls) = r.dialect.null_ordering(self.direction) {
            r.sql.push(' ');
            r.sql.push_str(nulls);
        }
    }
}
