//! An in-process page source over a fixed set of rows.

pub mod filter;
pub mod source;
