pub mod driver;
pub mod hook;

#[cfg(test)]
mod tests;
