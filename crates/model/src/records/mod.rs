pub mod row;
pub mod schema;
