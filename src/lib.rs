pub mod catalog;
pub mod config;
pub mod help;
pub mod lookup;
pub mod text;

#[cfg(test)]
pub mod test_helpers;
