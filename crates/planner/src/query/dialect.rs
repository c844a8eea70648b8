//! Defines the `Dialect` trait for database-specific SQL syntax.

use model::pagination::request::SortDirection;

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL uses `?`
    fn get_placeholder(&self, index: usize) -> String;

    /// Collation that compares text by code point rather than by locale.
    fn ordinal_collation(&self) -> &'static str;

    /// Modifier placing NULLs before every value in ascending order and after
    /// every value in descending order, if the dialect needs one.
    fn null_ordering(&self, direction: SortDirection) -> Option<&'static str>;

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', "\"\""))
    }

    fn get_placeholder(&self, index: usize) -> String {
        // PostgreSQL uses $1, $2, etc.
        format!("${}", index + 1)
    }

    fn ordinal_collation(&self) -> &'static str {
        r#""C""#
    }

    fn null_ordering(&self, direction: SortDirection) -> Option<&'static str> {
        // Postgres treats NULL as larger than any value by default.
        match direction {
            SortDirection::Asc => Some("NULLS FIRST"),
            SortDirection::Desc => Some("NULLS LAST"),
        }
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn get_placeholder(&self, _index: usize) -> String {
        // MySQL uses ?
        "?".into()
    }

    fn ordinal_collation(&self) -> &'static str {
        "utf8mb4_bin"
    }

    fn null_ordering(&self, _direction: SortDirection) -> Option<&'static str> {
        None
    }

    fn name(&self) -> String {
        "MySQL".into()
    }
}

pub fn from_name(name: &str) -> Option<Box<dyn Dialect>> {
    match name.to_ascii_lowercase().as_str() {
        "pg" | "postgres" | "postgresql" => Some(Box::new(Postgres)),
        "mysql" => Some(Box::new(MySql)),
        _ => None,
    }
}
